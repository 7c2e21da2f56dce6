use std::f32::consts::PI;

use simple_easing::{
    cubic_in, cubic_out, expo_in, expo_out, quad_in, quad_out, reverse, roundtrip, sine_in,
    sine_out,
};

/// Represents the set of functions an [`Alpha`](crate::timeline::Alpha) maps timeline progress with.
///
/// Each function takes the timeline progress (0.0 at the first frame, 1.0 at the last one) and
/// returns the normalized alpha, 0.0 to 1.0.
///
/// See <https://easings.net> for a representation of the easing curves.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlphaFunc {
    /// Increases linearly from 0 to 1 (default).
    #[default]
    RampInc,
    /// Decreases linearly from 1 to 0.
    RampDec,
    /// Increases linearly up to the middle of the timeline, then decreases back to 0.
    Ramp,
    /// Quarter of a sine wave, rising from 0 to 1 (fast start).
    SineInc,
    /// Quarter of a sine wave, falling from 1 to 0 (slow start).
    SineDec,
    /// Half of a sine wave: 0 to 1 and back to 0.
    SineHalf,
    /// 0 for the first half of the timeline, 1 for the second one.
    Square,
    /// Smoothstep curve from 0 to 1.
    SmoothstepInc,
    /// Smoothstep curve from 1 to 0.
    SmoothstepDec,
    /// Exponential curve from 0 to 1.
    ExpInc,
    /// Exponential curve from 1 to 0.
    ExpDec,
    /// <https://easings.net/#easeInQuad>
    QuadIn,
    /// <https://easings.net/#easeOutQuad>
    QuadOut,
    /// <https://easings.net/#easeInCubic>
    CubicIn,
    /// <https://easings.net/#easeOutCubic>
    CubicOut,
}

impl AlphaFunc {
    /// Call the alpha function.
    pub(crate) fn call(&self, t: f32) -> f32 {
        match self {
            AlphaFunc::RampInc => t,
            AlphaFunc::RampDec => reverse(t),
            AlphaFunc::Ramp => roundtrip(t),
            AlphaFunc::SineInc => sine_out(t),
            AlphaFunc::SineDec => 1.0 - sine_in(t),
            AlphaFunc::SineHalf => (t * PI).sin(),
            AlphaFunc::Square => match t < 0.5 {
                true => 0.0,
                false => 1.0,
            },
            AlphaFunc::SmoothstepInc => smoothstep(t),
            AlphaFunc::SmoothstepDec => smoothstep(1.0 - t),
            AlphaFunc::ExpInc => expo_in(t),
            AlphaFunc::ExpDec => expo_out(1.0 - t),
            AlphaFunc::QuadIn => quad_in(t),
            AlphaFunc::QuadOut => quad_out(t),
            AlphaFunc::CubicIn => cubic_in(t),
            AlphaFunc::CubicOut => cubic_out(t),
        }
    }
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32, func: AlphaFunc, t: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "{:?}({}) = {} (expected {})",
            func,
            t,
            actual,
            expected
        );
    }

    #[test]
    fn test_alpha_func_end_points() {
        let expectations = [
            (AlphaFunc::RampInc, 0.0, 1.0),
            (AlphaFunc::RampDec, 1.0, 0.0),
            (AlphaFunc::Ramp, 0.0, 0.0),
            (AlphaFunc::SineInc, 0.0, 1.0),
            (AlphaFunc::SineDec, 1.0, 0.0),
            (AlphaFunc::SineHalf, 0.0, 0.0),
            (AlphaFunc::Square, 0.0, 1.0),
            (AlphaFunc::SmoothstepInc, 0.0, 1.0),
            (AlphaFunc::SmoothstepDec, 1.0, 0.0),
            (AlphaFunc::ExpInc, 0.0, 1.0),
            (AlphaFunc::ExpDec, 1.0, 0.0),
            (AlphaFunc::QuadIn, 0.0, 1.0),
            (AlphaFunc::QuadOut, 0.0, 1.0),
            (AlphaFunc::CubicIn, 0.0, 1.0),
            (AlphaFunc::CubicOut, 0.0, 1.0),
        ];
        for (func, start, end) in expectations {
            assert_close(func.call(0.0), start, func, 0.0);
            assert_close(func.call(1.0), end, func, 1.0);
        }
    }

    #[test]
    fn test_alpha_func_middle() {
        assert_close(AlphaFunc::RampInc.call(0.5), 0.5, AlphaFunc::RampInc, 0.5);
        assert_close(AlphaFunc::Ramp.call(0.5), 1.0, AlphaFunc::Ramp, 0.5);
        assert_close(AlphaFunc::SineHalf.call(0.5), 1.0, AlphaFunc::SineHalf, 0.5);
        assert_close(AlphaFunc::Square.call(0.49), 0.0, AlphaFunc::Square, 0.49);
        assert_close(AlphaFunc::Square.call(0.5), 1.0, AlphaFunc::Square, 0.5);
        assert_close(AlphaFunc::SmoothstepInc.call(0.5), 0.5, AlphaFunc::SmoothstepInc, 0.5);
        assert_close(AlphaFunc::QuadOut.call(0.5), 0.75, AlphaFunc::QuadOut, 0.5);
    }

    #[test]
    fn test_default_alpha_func() {
        assert_eq!(AlphaFunc::default(), AlphaFunc::RampInc);
    }
}
