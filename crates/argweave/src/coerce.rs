//! Typed values and string-to-value coercion.
//!
//! Every coercion is a plain function from a raw string to either a typed
//! [`Value`] or a [`CoerceError`]. Bad input is always the `Err` variant,
//! never a panic; a panic out of a user-supplied coercion means the
//! coercion itself is broken and is allowed to propagate.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Largest magnitude an `f64` can hold while still representing every
/// whole number exactly (2^53 - 1).
const MAX_EXACT_INT: f64 = 9_007_199_254_740_991.0;

/// A resolved parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// A recoverable coercion failure, carrying a message that names the
/// offending raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct CoerceError {
    message: String,
}

impl CoerceError {
    /// Build the standard "'raw' is not a valid <what>" failure.
    pub fn invalid(raw: &str, what: &str) -> Self {
        Self {
            message: format!("'{raw}' is not a valid {what}"),
        }
    }

    /// Build a failure from a custom message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A shareable string-to-value coercion function.
#[derive(Clone)]
pub struct Coercion(Arc<dyn Fn(&str) -> Result<Value, CoerceError> + Send + Sync>);

impl Coercion {
    /// Wrap a user-supplied coercion.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CoerceError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Finite floating-point numbers. `NaN` and infinities are rejected.
    pub fn float() -> Self {
        Self::new(|raw| match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Value::Float(v)),
            _ => Err(CoerceError::invalid(raw, "number")),
        })
    }

    /// Whole numbers that are exactly representable, i.e. within
    /// ±(2^53 - 1). Fractional and out-of-range input is rejected.
    pub fn integer() -> Self {
        Self::new(|raw| match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_EXACT_INT => {
                Ok(Value::Int(v as i64))
            }
            _ => Err(CoerceError::invalid(raw, "integer")),
        })
    }

    /// Apply the coercion to a raw string.
    pub fn apply(&self, raw: &str) -> Result<Value, CoerceError> {
        (self.0)(raw)
    }
}

impl fmt::Debug for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Coercion(..)")
    }
}
