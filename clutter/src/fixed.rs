//! Defines the 16.16 fixed point scalar used for every interpolation.
//!
//! Interpolations are computed on integers so that a given alpha sample produces the very same
//! value on every platform. Conversions from `f64` truncate toward zero; multiplications truncate
//! the extra fractional bits toward negative infinity (arithmetic shift).

use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};

/// Number of fractional bits.
pub const FIXED_Q: u32 = 16;

/// A signed 16.16 fixed point number.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(1 << FIXED_Q);
    pub const HALF: Fixed = Fixed(1 << (FIXED_Q - 1));
    pub const MAX: Fixed = Fixed(i32::MAX);
    pub const MIN: Fixed = Fixed(i32::MIN);

    /// Wraps a raw 16.16 value.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw 16.16 value.
    pub const fn to_raw(self) -> i32 {
        self.0
    }

    /// Converts an integer.
    ///
    /// # Panics
    /// Panics if the value does not fit in the 16 integer bits.
    pub fn from_int(value: i32) -> Self {
        assert!(
            (i16::MIN as i32..=i16::MAX as i32).contains(&value),
            "Integer {} does not fit in a 16.16 fixed point value.",
            value
        );
        Self(value << FIXED_Q)
    }

    /// Converts a real number, truncating the bits that do not fit toward zero.
    ///
    /// # Panics
    /// Panics if the value is not finite or does not fit in the 16 integer bits.
    pub fn from_f64(value: f64) -> Self {
        assert!(value.is_finite(), "Cannot convert {} to fixed point.", value);
        let scaled = (value * (1u32 << FIXED_Q) as f64).trunc();
        assert!(
            scaled >= i32::MIN as f64 && scaled <= i32::MAX as f64,
            "Value {} does not fit in a 16.16 fixed point value.",
            value
        );
        Self(scaled as i32)
    }

    /// Converts back to a real number. This conversion is exact.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1u32 << FIXED_Q) as f64
    }

    /// Computes `numerator / denominator` (truncated toward zero).
    ///
    /// This is the normalization used to turn an alpha sample into a progress factor: it is
    /// exactly [`Fixed::ZERO`] for a zero numerator and exactly [`Fixed::ONE`] when both
    /// values are equal.
    ///
    /// # Panics
    /// Panics if the denominator is zero or if the ratio does not fit in the 16 integer bits.
    pub fn from_ratio(numerator: u32, denominator: u32) -> Self {
        assert_ne!(denominator, 0, "Cannot divide by a zero denominator.");
        let raw = ((numerator as i64) << FIXED_Q) / denominator as i64;
        Self(i32::try_from(raw).expect("Ratio does not fit in a 16.16 fixed point value."))
    }

    /// Linear interpolation between `start` and `end`: `start + self * (end - start)`.
    pub fn lerp(self, start: Fixed, end: Fixed) -> Fixed {
        start + self * (end - start)
    }
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl Mul for Fixed {
    type Output = Fixed;

    fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(((self.0 as i64 * rhs.0 as i64) >> FIXED_Q) as i32)
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    fn neg(self) -> Fixed {
        Fixed(-self.0)
    }
}

impl From<i16> for Fixed {
    fn from(value: i16) -> Self {
        Self::from_int(value as i32)
    }
}

impl From<f64> for Fixed {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<Fixed> for f64 {
    fn from(value: Fixed) -> Self {
        value.to_f64()
    }
}

impl Display for Fixed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fixed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.to_f64())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fixed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: f64 = serde::Deserialize::deserialize(deserializer)?;
        if !value.is_finite() || value.abs() >= 32768.0 {
            return Err(serde::de::Error::custom(format!(
                "{} does not fit in a 16.16 fixed point value",
                value
            )));
        }
        Ok(Fixed::from_f64(value))
    }
}
