use snafu::Snafu;

pub use crate::errors::Error::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Runtime error: Are you sure your code runs inside #[clutter::runtime]?
    RuntimeError,
    /// Timeline error: {source}.
    TimelineError { source: TimelineError },
    /// Unknown error: {info}.
    Unknown { info: String },
}

impl From<TimelineError> for Error {
    fn from(value: TimelineError) -> Self {
        Self::TimelineError { source: value }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum TimelineError {
    /// Invalid frame rate ({fps}fps) - must be greater than zero
    InvalidFrameRate { fps: u32 },
    /// Frame {frame} is out of the timeline bounds (0..={n_frames})
    FrameOutOfBounds { frame: u32, n_frames: u32 },
}
