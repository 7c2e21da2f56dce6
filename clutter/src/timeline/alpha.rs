use std::sync::Arc;

use parking_lot::RwLock;

use crate::timeline::{AlphaFunc, Timeline};

/// The upper bound of an alpha value: alpha values range from 0 to `ALPHA_MAX` (included).
pub const ALPHA_MAX: u32 = 0xffff;

/// Maps the progress of a [`Timeline`] to an alpha value, through an [`AlphaFunc`].
///
/// The alpha is the single input behaviours are driven by: 0 at the start of the transition,
/// [`ALPHA_MAX`] at its end (for increasing functions).
///
/// Cloning an alpha gives another handle on the same alpha.
///
/// # Example
/// ```
/// use clutter::timeline::{Alpha, AlphaFunc, Timeline, ALPHA_MAX};
///
/// let timeline = Timeline::new(1000);
/// let alpha = Alpha::new(&timeline, AlphaFunc::RampDec);
/// assert_eq!(alpha.get_alpha(), ALPHA_MAX);
/// ```
#[derive(Clone, Debug)]
pub struct Alpha {
    timeline: Timeline,
    func: Arc<RwLock<AlphaFunc>>,
}

impl Alpha {
    pub fn new(timeline: &Timeline, func: AlphaFunc) -> Self {
        Self {
            timeline: timeline.clone(),
            func: Arc::new(RwLock::new(func)),
        }
    }

    /// Computes the current alpha value, between 0 and [`ALPHA_MAX`].
    pub fn get_alpha(&self) -> u32 {
        let progress = self.timeline.get_progress();
        let value = self.get_func().call(progress).clamp(0.0, 1.0);
        (value as f64 * ALPHA_MAX as f64).round() as u32
    }

    /// Returns the timeline the alpha reads its progress from.
    pub fn get_timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn get_func(&self) -> AlphaFunc {
        *self.func.read()
    }

    pub fn set_func(&self, func: AlphaFunc) {
        *self.func.write() = func;
    }

    /// Indicates if both handles refer to the same alpha.
    pub fn ptr_eq(&self, other: &Alpha) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_follows_timeline() {
        let timeline = Timeline::new(1000).set_fps(10).unwrap();
        let alpha = Alpha::new(&timeline, AlphaFunc::RampInc);
        assert_eq!(alpha.get_alpha(), 0);

        timeline.advance(5).unwrap();
        assert_eq!(alpha.get_alpha(), 32768);

        timeline.advance(10).unwrap();
        assert_eq!(alpha.get_alpha(), ALPHA_MAX);
    }

    #[test]
    fn test_alpha_func() {
        let timeline = Timeline::new(1000).set_fps(10).unwrap();
        let alpha = Alpha::new(&timeline, AlphaFunc::default());
        assert_eq!(alpha.get_func(), AlphaFunc::RampInc);

        alpha.set_func(AlphaFunc::RampDec);
        assert_eq!(alpha.get_alpha(), ALPHA_MAX);

        // Clones share the function.
        let clone = alpha.clone();
        clone.set_func(AlphaFunc::Square);
        assert_eq!(alpha.get_func(), AlphaFunc::Square);
        assert!(alpha.ptr_eq(&clone));
        assert!(!alpha.ptr_eq(&Alpha::new(&timeline, AlphaFunc::Square)));
    }

    #[test]
    fn test_alpha_is_clamped() {
        let timeline = Timeline::new(1000).set_fps(10).unwrap();
        let alpha = Alpha::new(&timeline, AlphaFunc::SineDec);
        timeline.advance(10).unwrap();
        // sin/cos rounding may go slightly below 0.
        assert_eq!(alpha.get_alpha(), 0);
        assert!(alpha.get_timeline().ptr_eq(&timeline));
    }
}
