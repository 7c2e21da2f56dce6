use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::behaviours::WeakBehaviour;
use crate::errors::{Error, TimelineError};
use crate::utils::{task, EventHandler, EventManager, TaskHandler};

/// Default number of frames per second.
pub const DEFAULT_FPS: u32 = 60;

/// Lists all events a Timeline can emit/listen.
pub enum TimelineEvent {
    /// Triggered when the timeline starts playing.
    OnStarted,
    /// Triggered for each new frame.
    OnNewFrame,
    /// Triggered when the timeline reaches its last frame.
    OnCompleted,
    /// Triggered when a playing timeline is paused (or stopped).
    OnPaused,
}

/// Convert events to string to facilitate usage with [`EventManager`].
impl From<TimelineEvent> for String {
    fn from(event: TimelineEvent) -> Self {
        let event = match event {
            TimelineEvent::OnStarted => "started",
            TimelineEvent::OnNewFrame => "new-frame",
            TimelineEvent::OnCompleted => "completed",
            TimelineEvent::OnPaused => "paused",
        };
        event.into()
    }
}

/// The direction frames are played in.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum Direction {
    /// From frame 0 to the last frame.
    #[default]
    Forward,
    /// From the last frame to frame 0.
    Backward,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Settings {
    duration: u64,
    fps: u32,
    repeat: bool,
    direction: Direction,
}

impl Settings {
    fn n_frames(&self) -> u32 {
        let n_frames = self.duration.saturating_mul(self.fps as u64) / 1000;
        n_frames.clamp(1, u32::MAX as u64) as u32
    }
}

/// The clock driving behaviours: a fixed number of frames played at a given frame rate.
///
/// A timeline can be played on the Clutter runtime ([`Timeline::start`]) or driven manually,
/// frame by frame ([`Timeline::next_frame`]), by any external clock. On each new frame, every
/// behaviour whose [`Alpha`](crate::timeline::Alpha) reads this timeline is ticked.
///
/// Cloning a timeline gives another handle on the same clock.
///
/// # Example
/// ```
/// use clutter::timeline::{Direction, Timeline};
///
/// // 500ms at 60fps: 30 frames, played backward.
/// let timeline = Timeline::new(500).set_direction(Direction::Backward);
/// assert_eq!(timeline.get_n_frames(), 30);
/// assert_eq!(timeline.get_current_frame(), 30);
/// ```
#[derive(Clone)]
pub struct Timeline {
    settings: Arc<RwLock<Settings>>,
    current: Arc<RwLock<u32>>,

    // ########################################
    // # Volatile utility data.
    /// Behaviours ticked on each frame. Not owned: dropped behaviours are pruned on the next tick.
    behaviours: Arc<RwLock<Vec<(usize, WeakBehaviour)>>>,
    next_id: Arc<AtomicUsize>,
    /// Inner handler to the task playing the timeline.
    interval: Arc<RwLock<Option<TaskHandler>>>,
    /// The event manager for the timeline.
    events: EventManager,
}

impl Timeline {
    /// Creates a timeline lasting `duration` milliseconds, at [`DEFAULT_FPS`].
    pub fn new(duration: u64) -> Self {
        Self {
            settings: Arc::new(RwLock::new(Settings {
                duration,
                fps: DEFAULT_FPS,
                repeat: false,
                direction: Direction::Forward,
            })),
            current: Arc::new(RwLock::new(0)),
            behaviours: Arc::new(RwLock::new(vec![])),
            next_id: Arc::new(AtomicUsize::new(0)),
            interval: Arc::new(RwLock::new(None)),
            events: Default::default(),
        }
    }

    // ########################################
    // Settings

    /// Returns the timeline duration (in ms).
    pub fn get_duration(&self) -> u64 {
        self.settings.read().duration
    }

    /// Sets the timeline duration (in ms). The current frame is kept within the new bounds.
    pub fn set_duration(self, duration: u64) -> Self {
        self.settings.write().duration = duration;
        self.clamp_current();
        self
    }

    /// Returns the frame rate.
    pub fn get_fps(&self) -> u32 {
        self.settings.read().fps
    }

    /// Sets the frame rate.
    ///
    /// # Errors
    /// Fails with [`TimelineError::InvalidFrameRate`] if `fps` is zero.
    pub fn set_fps(self, fps: u32) -> Result<Self, Error> {
        if fps == 0 {
            return Err(TimelineError::InvalidFrameRate { fps }.into());
        }
        self.settings.write().fps = fps;
        self.clamp_current();
        Ok(self)
    }

    /// Indicates if the timeline restarts once completed.
    pub fn is_loop(&self) -> bool {
        self.settings.read().repeat
    }

    /// Sets whether the timeline restarts once completed.
    pub fn set_loop(self, repeat: bool) -> Self {
        self.settings.write().repeat = repeat;
        self
    }

    /// Returns the play direction.
    pub fn get_direction(&self) -> Direction {
        self.settings.read().direction
    }

    /// Sets the play direction. A backward timeline sitting on frame 0 jumps to its last frame.
    pub fn set_direction(self, direction: Direction) -> Self {
        self.settings.write().direction = direction;
        if direction == Direction::Backward && self.get_current_frame() == 0 {
            *self.current.write() = self.get_n_frames();
        }
        self
    }

    /// Returns the total number of frames (at least 1).
    pub fn get_n_frames(&self) -> u32 {
        self.settings.read().n_frames()
    }

    // ########################################
    // Progress

    /// Returns the current frame, between 0 and [`Timeline::get_n_frames`] (included).
    pub fn get_current_frame(&self) -> u32 {
        *self.current.read()
    }

    /// Returns the progress through the timeline, from 0.0 (frame 0) to 1.0 (last frame).
    pub fn get_progress(&self) -> f32 {
        self.get_current_frame() as f32 / self.get_n_frames() as f32
    }

    /// Indicates if the timeline sits on its final frame (according to its direction).
    pub fn is_complete(&self) -> bool {
        match self.get_direction() {
            Direction::Forward => self.get_current_frame() >= self.get_n_frames(),
            Direction::Backward => self.get_current_frame() == 0,
        }
    }

    /// Jumps to the given frame. No frame is played: behaviours are not ticked.
    ///
    /// # Errors
    /// Fails with [`TimelineError::FrameOutOfBounds`] if the frame is past the last frame.
    pub fn advance(&self, frame: u32) -> Result<(), Error> {
        let n_frames = self.get_n_frames();
        if frame > n_frames {
            return Err(TimelineError::FrameOutOfBounds { frame, n_frames }.into());
        }
        *self.current.write() = frame;
        Ok(())
    }

    /// Skips `n` frames in the play direction without playing them. A looping timeline wraps
    /// around, other timelines stop on their final frame.
    pub fn skip(&self, n: u32) {
        let settings = *self.settings.read();
        let n_frames = settings.n_frames() as u64;
        let mut current = self.current.write();
        let frame = *current as u64;
        let n = n as u64;

        *current = match (settings.direction, settings.repeat) {
            (Direction::Forward, false) => (frame + n).min(n_frames),
            (Direction::Forward, true) => (frame + n) % (n_frames + 1),
            (Direction::Backward, false) => frame.saturating_sub(n),
            (Direction::Backward, true) => {
                let span = n_frames + 1;
                (frame + span - n % span) % span
            }
        } as u32;
    }

    /// Moves back to the first frame (according to the play direction).
    pub fn rewind(&self) {
        *self.current.write() = match self.get_direction() {
            Direction::Forward => 0,
            Direction::Backward => self.get_n_frames(),
        };
    }

    /// Plays the next frame: moves one frame forward (or backward), ticks every attached
    /// behaviour and emits [`TimelineEvent::OnNewFrame`].
    ///
    /// When the final frame is reached, [`TimelineEvent::OnCompleted`] is emitted and a looping
    /// timeline rewinds.
    ///
    /// # Returns
    /// `false` once a non-looping timeline is complete, `true` otherwise. A complete timeline
    /// plays no further frame: behaviours are not ticked and no event is emitted.
    pub fn next_frame(&self) -> bool {
        let settings = *self.settings.read();
        if !settings.repeat && self.is_complete() {
            return false;
        }
        let n_frames = settings.n_frames();
        let (frame, complete) = {
            let mut current = self.current.write();
            match settings.direction {
                Direction::Forward => {
                    *current = (*current + 1).min(n_frames);
                    (*current, *current >= n_frames)
                }
                Direction::Backward => {
                    *current = current.saturating_sub(1);
                    (*current, *current == 0)
                }
            }
        };

        log::trace!("Timeline new frame {}/{}", frame, n_frames);
        self.tick_behaviours();
        self.events
            .emit(TimelineEvent::OnNewFrame, (self.clone(), frame));

        if !complete {
            return true;
        }

        self.events.emit(TimelineEvent::OnCompleted, self.clone());
        match settings.repeat {
            true => {
                self.rewind();
                true
            }
            false => false,
        }
    }

    fn tick_behaviours(&self) {
        // The lock is released before ticking: a behaviour may detach itself meanwhile.
        let behaviours: Vec<(usize, WeakBehaviour)> = self.behaviours.read().clone();
        let dropped: Vec<usize> = behaviours
            .into_iter()
            .filter(|(_, behaviour)| !behaviour.tick())
            .map(|(id, _)| id)
            .collect();
        if !dropped.is_empty() {
            log::debug!("Timeline prunes {} dropped behaviour(s)", dropped.len());
            self.behaviours
                .write()
                .retain(|(id, _)| !dropped.contains(id));
        }
    }

    fn clamp_current(&self) {
        let n_frames = self.get_n_frames();
        let mut current = self.current.write();
        *current = (*current).min(n_frames);
    }

    // ########################################
    // Playback

    /// Starts (or resumes) playing the timeline on the Clutter runtime, one frame every
    /// `1000 / fps` milliseconds. A complete timeline is rewound first.
    ///
    /// # Errors
    /// Fails with [`Error::RuntimeError`] outside of `#[clutter::runtime]`.
    pub fn start(&self) -> Result<(), Error> {
        if self.is_playing() {
            return Ok(());
        }
        if self.is_complete() {
            self.rewind();
        }

        let period = Duration::from_millis((1000 / self.get_fps() as u64).max(1));
        log::debug!(
            "Timeline starts: {} frames every {:?}",
            self.get_n_frames(),
            period
        );
        self.events.emit(TimelineEvent::OnStarted, self.clone());

        let timeline = self.clone();
        let handler = task::run(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !timeline.next_frame() {
                    break;
                }
            }
            Ok::<(), Error>(())
        })?;
        *self.interval.write() = Some(handler);
        Ok(())
    }

    /// Pauses the timeline: resuming with [`Timeline::start`] continues from the current frame.
    pub fn pause(&self) {
        if self.cancel_playback() {
            log::debug!("Timeline paused at frame {}", self.get_current_frame());
            self.events.emit(TimelineEvent::OnPaused, self.clone());
        }
    }

    /// Pauses and rewinds the timeline.
    pub fn stop(&self) {
        self.pause();
        self.rewind();
    }

    /// Indicates if the timeline is currently playing on the runtime.
    pub fn is_playing(&self) -> bool {
        self.interval
            .read()
            .as_ref()
            .is_some_and(|handler| !handler.is_finished())
    }

    /// Inner helper: cancel the playback and return a flag indicating if it was running.
    fn cancel_playback(&self) -> bool {
        let was_running = self.is_playing();
        if let Some(handler) = self.interval.write().take() {
            handler.abort();
        }
        was_running
    }

    // ########################################
    // Behaviours

    /// Attaches a behaviour: it will be ticked on each new frame.
    /// Returns an id to be used with [`Timeline::detach`].
    pub(crate) fn attach(&self, behaviour: WeakBehaviour) -> usize {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.behaviours.write().push((id, behaviour));
        id
    }

    /// Detaches a behaviour previously attached.
    pub(crate) fn detach(&self, id: usize) {
        self.behaviours.write().retain(|(other, _)| *other != id);
    }

    /// Returns the number of behaviours ticked by this timeline. Dropped behaviours are not
    /// counted.
    pub fn get_n_behaviours(&self) -> usize {
        self.behaviours
            .read()
            .iter()
            .filter(|(_, behaviour)| behaviour.is_alive())
            .count()
    }

    /// Indicates if both handles refer to the same timeline.
    pub fn ptr_eq(&self, other: &Timeline) -> bool {
        Arc::ptr_eq(&self.current, &other.current)
    }

    // ########################################
    // Event related functions

    /// Registers a callback to be executed on a given event.
    ///
    /// Available events for a timeline are defined by the enum: [`TimelineEvent`]:
    /// - **`OnStarted` | `started`**: Triggered when the timeline starts playing.
    ///   _The callback must receive the following parameter: `|_: Timeline| { ... }`_
    /// - **`OnNewFrame` | `new-frame`**: Triggered for each new frame.
    ///   _The callback must receive the following parameter: `|_: (Timeline, u32)| { ... }`_
    /// - **`OnCompleted` | `completed`**: Triggered when the final frame is reached.
    ///   _The callback must receive the following parameter: `|_: Timeline| { ... }`_
    /// - **`OnPaused` | `paused`**: Triggered when a playing timeline is paused.
    ///   _The callback must receive the following parameter: `|_: Timeline| { ... }`_
    ///
    /// # Example
    /// ```ignore
    /// use clutter::timeline::{Timeline, TimelineEvent};
    ///
    /// #[clutter::runtime]
    /// async fn main() {
    ///     let timeline = Timeline::new(1000);
    ///     timeline.on(TimelineEvent::OnCompleted, |_: Timeline| async move {
    ///         println!("Timeline done");
    ///         Ok(())
    ///     });
    ///     timeline.start().unwrap();
    /// }
    /// ```
    pub fn on<S, F, T, Fut>(&self, event: S, callback: F) -> EventHandler
    where
        S: Into<String>,
        T: 'static + Send + Sync + Clone,
        F: FnMut(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), Error>> + Send + 'static,
    {
        self.events.on(event, callback)
    }

    /// Unregisters an event callback.
    pub fn unregister(&self, handler: EventHandler) {
        self.events.unregister(handler)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Debug for Timeline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let settings = *self.settings.read();
        f.debug_struct("Timeline")
            .field("duration", &settings.duration)
            .field("fps", &settings.fps)
            .field("loop", &settings.repeat)
            .field("direction", &settings.direction)
            .field("frame", &self.get_current_frame())
            .field("n_frames", &settings.n_frames())
            .field("behaviours", &self.get_n_behaviours())
            .finish()
    }
}
