use std::fmt::{Display, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::behaviours::{Behaviour, BehaviourCore, WeakBehaviour};
use crate::fixed::Fixed;
use crate::gravity::Gravity;
use crate::timeline::{Alpha, ALPHA_MAX};
use crate::utils::{PropertyChange, Range};

/// Lists the observable properties of a [`ScaleBehaviour`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScaleProperty {
    XScaleStart,
    YScaleStart,
    XScaleEnd,
    YScaleEnd,
    ScaleGravity,
}

impl ScaleProperty {
    pub fn name(&self) -> &'static str {
        match self {
            ScaleProperty::XScaleStart => "x-scale-start",
            ScaleProperty::YScaleStart => "y-scale-start",
            ScaleProperty::XScaleEnd => "x-scale-end",
            ScaleProperty::YScaleEnd => "y-scale-end",
            ScaleProperty::ScaleGravity => "scale-gravity",
        }
    }
}

impl Display for ScaleProperty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Convert properties to string to facilitate usage with [`Behaviour::on_notify`].
impl From<ScaleProperty> for String {
    fn from(property: ScaleProperty) -> Self {
        property.name().into()
    }
}

/// The scale factors a [`ScaleBehaviour`] interpolates between, per axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScaleBounds {
    pub x: Range<Fixed>,
    pub y: Range<Fixed>,
}

impl ScaleBounds {
    pub fn new(x_start: Fixed, y_start: Fixed, x_end: Fixed, y_end: Fixed) -> Self {
        Self {
            x: Range::new(x_start, x_end),
            y: Range::new(y_start, y_end),
        }
    }

    /// Computes the `(x, y)` scale at the given progress factor.
    pub fn interpolate(&self, factor: Fixed) -> (Fixed, Fixed) {
        (self.x.interpolate(factor), self.y.interpolate(factor))
    }
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self::new(Fixed::ONE, Fixed::ONE, Fixed::ONE, Fixed::ONE)
    }
}

/// Animates the scale of its actors, from a start scale to an end scale.
///
/// On each alpha value, every actor gets its anchor point re-derived from the behaviour
/// [`Gravity`] (unless [`Gravity::None`]), then its scale set to:
/// `start + alpha / ALPHA_MAX * (end - start)` on each axis.
///
/// The interpolation runs in 16.16 fixed point: alpha 0 gives exactly the start scale and
/// [`ALPHA_MAX`] exactly the end scale.
///
/// # Example
/// ```
/// use clutter::behaviours::{Behaviour, ScaleBehaviour};
/// use clutter::timeline::{Alpha, AlphaFunc, Timeline};
/// use clutter::Gravity;
///
/// let timeline = Timeline::new(1000);
/// let alpha = Alpha::new(&timeline, AlphaFunc::RampInc);
///
/// // Grows from 100% to 200% around the actor center.
/// let behaviour = ScaleBehaviour::new(Some(alpha), 1.0, 1.0, 2.0, 2.0, Gravity::Center);
/// assert_eq!(behaviour.get_bounds(), (1.0, 1.0, 2.0, 2.0));
/// assert_eq!(timeline.get_n_behaviours(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct ScaleBehaviour {
    inner: Arc<ScaleState>,
}

#[derive(Debug)]
struct ScaleState {
    core: BehaviourCore,
    bounds: RwLock<ScaleBounds>,
    gravity: RwLock<Gravity>,
}

/// Checks a scale factor given as a real number.
fn check_scale(scale: f64) {
    assert!(
        scale.is_finite() && (0.0..FIXED_SCALE_LIMIT).contains(&scale),
        "Invalid scale factor: {}",
        scale
    );
}

/// Checks a scale factor given in fixed point.
fn check_scalex(scale: Fixed) {
    assert!(scale >= Fixed::ZERO, "Invalid scale factor: {}", scale);
}

/// Scale factors are stored in 16.16 fixed point: they must stay below 32768.
const FIXED_SCALE_LIMIT: f64 = 32768.0;

impl ScaleBehaviour {
    /// Creates a scale behaviour. An absent alpha leaves the behaviour inert until
    /// [`Behaviour::set_alpha`] is called.
    ///
    /// # Panics
    /// Panics if a scale factor is negative, not finite, or 32768 and above (the 16.16 fixed
    /// point ceiling).
    pub fn new(
        alpha: Option<Alpha>,
        x_scale_start: f64,
        y_scale_start: f64,
        x_scale_end: f64,
        y_scale_end: f64,
        gravity: Gravity,
    ) -> Self {
        for scale in [x_scale_start, y_scale_start, x_scale_end, y_scale_end] {
            check_scale(scale);
        }
        Self::newx(
            alpha,
            Fixed::from_f64(x_scale_start),
            Fixed::from_f64(y_scale_start),
            Fixed::from_f64(x_scale_end),
            Fixed::from_f64(y_scale_end),
            gravity,
        )
    }

    /// Fixed point version of [`ScaleBehaviour::new`].
    ///
    /// # Panics
    /// Panics if a scale factor is negative.
    pub fn newx(
        alpha: Option<Alpha>,
        x_scale_start: Fixed,
        y_scale_start: Fixed,
        x_scale_end: Fixed,
        y_scale_end: Fixed,
        gravity: Gravity,
    ) -> Self {
        for scale in [x_scale_start, y_scale_start, x_scale_end, y_scale_end] {
            check_scalex(scale);
        }
        let behaviour = Self {
            inner: Arc::new(ScaleState {
                core: BehaviourCore::default(),
                bounds: RwLock::new(ScaleBounds::new(
                    x_scale_start,
                    y_scale_start,
                    x_scale_end,
                    y_scale_end,
                )),
                gravity: RwLock::new(gravity),
            }),
        };
        if alpha.is_some() {
            behaviour.set_alpha(alpha);
        }
        behaviour
    }

    /// Returns `(x_scale_start, y_scale_start, x_scale_end, y_scale_end)`.
    pub fn get_bounds(&self) -> (f64, f64, f64, f64) {
        let (x_start, y_start, x_end, y_end) = self.get_boundsx();
        (
            x_start.to_f64(),
            y_start.to_f64(),
            x_end.to_f64(),
            y_end.to_f64(),
        )
    }

    /// Sets the bounds: see [`ScaleBehaviour::set_boundsx`].
    ///
    /// # Panics
    /// Panics if a scale factor is negative, not finite, or 32768 and above (the 16.16 fixed
    /// point ceiling). The bounds are left untouched.
    pub fn set_bounds(
        &self,
        x_scale_start: f64,
        y_scale_start: f64,
        x_scale_end: f64,
        y_scale_end: f64,
    ) {
        for scale in [x_scale_start, y_scale_start, x_scale_end, y_scale_end] {
            check_scale(scale);
        }
        self.set_boundsx(
            Fixed::from_f64(x_scale_start),
            Fixed::from_f64(y_scale_start),
            Fixed::from_f64(x_scale_end),
            Fixed::from_f64(y_scale_end),
        )
    }

    /// Fixed point version of [`ScaleBehaviour::get_bounds`].
    pub fn get_boundsx(&self) -> (Fixed, Fixed, Fixed, Fixed) {
        let bounds = *self.inner.bounds.read();
        (bounds.x.start, bounds.y.start, bounds.x.end, bounds.y.end)
    }

    /// Sets the bounds. Only the fields actually changing are written, each of them emitting
    /// one notification once all four fields are committed.
    ///
    /// # Panics
    /// Panics if a scale factor is negative. The bounds are left untouched.
    pub fn set_boundsx(
        &self,
        x_scale_start: Fixed,
        y_scale_start: Fixed,
        x_scale_end: Fixed,
        y_scale_end: Fixed,
    ) {
        for scale in [x_scale_start, y_scale_start, x_scale_end, y_scale_end] {
            check_scalex(scale);
        }
        let mut batch = self.inner.core.notifier().batch();
        let mut guard = self.inner.bounds.write();
        let bounds = &mut *guard;

        let fields = [
            (&mut bounds.x.start, x_scale_start, ScaleProperty::XScaleStart),
            (&mut bounds.y.start, y_scale_start, ScaleProperty::YScaleStart),
            (&mut bounds.x.end, x_scale_end, ScaleProperty::XScaleEnd),
            (&mut bounds.y.end, y_scale_end, ScaleProperty::YScaleEnd),
        ];
        for (field, value, property) in fields {
            if *field != value {
                *field = value;
                batch.push(property.name(), value);
            }
        }

        // The bounds are released before the batch flushes: observers may read them back.
        drop(guard);
        drop(batch);
    }

    /// Returns the [`ScaleBounds`].
    pub fn get_scale_bounds(&self) -> ScaleBounds {
        *self.inner.bounds.read()
    }

    pub fn get_gravity(&self) -> Gravity {
        *self.inner.gravity.read()
    }

    /// Sets the gravity the actors are scaled around. Emits a `scale-gravity` notification if
    /// the value changed.
    pub fn set_gravity(&self, gravity: Gravity) {
        {
            let mut current = self.inner.gravity.write();
            if *current == gravity {
                return;
            }
            *current = gravity;
        }
        self.inner.core.notifier().notify(PropertyChange::new(
            ScaleProperty::ScaleGravity.name(),
            gravity,
        ));
    }

    /// Computes the `(x, y)` scale for the given alpha value.
    ///
    /// # Panics
    /// Panics if the alpha is greater than [`ALPHA_MAX`].
    pub fn compute_scale(&self, alpha: u32) -> (Fixed, Fixed) {
        assert!(alpha <= ALPHA_MAX, "Alpha {} is out of range", alpha);
        let factor = Fixed::from_ratio(alpha, ALPHA_MAX);
        self.inner.bounds.read().interpolate(factor)
    }
}

impl Behaviour for ScaleBehaviour {
    fn core(&self) -> &BehaviourCore {
        &self.inner.core
    }

    fn downgrade(&self) -> WeakBehaviour {
        WeakBehaviour::new(&self.inner, |inner| ScaleBehaviour { inner })
    }

    fn alpha_notify(&self, alpha: u32) {
        let (scale_x, scale_y) = self.compute_scale(alpha);
        let gravity = self.get_gravity();
        let (scale_x, scale_y) = (scale_x.to_f64(), scale_y.to_f64());

        self.inner.core.actors_foreach(|actor| {
            let mut actor = actor.write();
            if gravity != Gravity::None {
                actor.set_anchor_point_from_gravity(gravity);
            }
            actor.set_scale(scale_x, scale_y);
        });
    }
}
