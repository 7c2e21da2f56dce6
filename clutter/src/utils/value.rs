use std::fmt::{Display, Formatter};

use crate::gravity::Gravity;

/// The new value carried by a property change notification.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(u64),
    Float(f64),
    Gravity(Gravity),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Gravity(g) => write!(f, "{}", g),
        }
    }
}

// **********************************************
// Extractors: get the value inside Value.
// **********************************************
impl Value {
    pub fn is_null(&self) -> bool {
        *self == Value::Null
    }

    /// Extracts the boolean value, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }

    /// Extracts the integer value, if any.
    pub fn as_integer(&self) -> Option<u64> {
        match *self {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Extracts the float value (integers are widened).
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Value::Float(f) => Some(f),
            Value::Integer(i) => Some(i as f64),
            _ => None,
        }
    }

    /// Extracts the gravity value, if any.
    pub fn as_gravity(&self) -> Option<Gravity> {
        match *self {
            Value::Gravity(g) => Some(g),
            _ => None,
        }
    }
}

// **********************************************
// Converters: convert a type into a Value.
// **********************************************

macro_rules! impl_from_integer {
    ($($variant:ty),*) => {
        $(
            impl From<$variant> for Value {
                fn from(value: $variant) -> Self {
                    Value::Integer(value as u64)
                }
            }
        )*
    };
}

impl_from_integer!(u8, u16, u32, u64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<crate::fixed::Fixed> for Value {
    fn from(value: crate::fixed::Fixed) -> Self {
        Value::Float(value.to_f64())
    }
}

impl From<Gravity> for Value {
    fn from(value: Gravity) -> Self {
        Value::Gravity(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            None => Value::Null,
            Some(value) => value.into(),
        }
    }
}
