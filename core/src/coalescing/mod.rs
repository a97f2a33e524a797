//! Type coalescing: converting dynamically-typed values into requested kinds.
//!
//! A [`Coalescer`] decides how permissive the engine is when a value of one
//! kind is used where another kind is expected. Three strategies ship with
//! the engine:
//!
//! - [`Pedantic`]: identity conversions only.
//! - [`Strict`]: `null` bridges to every zero value, lossless numeric conversions.
//! - [`Humane`]: weak typing; numeric strings, truthiness, stringification.
//!
//! Host values may override the default behavior through the `coalesce_to_*`
//! hooks of [`HostValue`](crate::values::HostValue).

mod humane;
mod pedantic;
mod strict;


pub use humane::Humane;
pub use pedantic::Pedantic;
pub use strict::Strict;

use core::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::values::{HostValue, Number, Object, Value};

/// Conversion failure. Names the source and the requested kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoalesceError {
    #[error("cannot convert {from} to {to}")]
    Incompatible {
        from: &'static str,
        to: &'static str,
    },

    #[error("{value} cannot be converted losslessly to {to}")]
    Lossy { value: String, to: &'static str },

    #[error("{value:?} is not a valid {to}")]
    Unparsable { value: String, to: &'static str },
}

impl CoalesceError {
    pub(crate) fn incompatible(value: &Value, to: &'static str) -> Self {
        CoalesceError::Incompatible {
            from: value.type_name(),
            to,
        }
    }
}

/// Pluggable conversion strategy.
///
/// Every method is total within the strategy's domain and fails with a
/// [`CoalesceError`] outside of it. Implementations must be deterministic and
/// free of side effects.
pub trait Coalescer: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn to_null(&self, value: &Value) -> Result<(), CoalesceError>;
    fn to_bool(&self, value: &Value) -> Result<bool, CoalesceError>;
    fn to_int64(&self, value: &Value) -> Result<i64, CoalesceError>;
    fn to_float64(&self, value: &Value) -> Result<f64, CoalesceError>;
    fn to_number(&self, value: &Value) -> Result<Number, CoalesceError>;
    fn to_string(&self, value: &Value) -> Result<String, CoalesceError>;
    fn to_vector(&self, value: &Value) -> Result<Vec<Value>, CoalesceError>;
    fn to_object(&self, value: &Value) -> Result<Object, CoalesceError>;
}

/// Built-in coalescing strategies, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Coalescing {
    #[default]
    Strict,
    Pedantic,
    Humane,
}

impl Coalescing {
    pub fn coalescer(self) -> Arc<dyn Coalescer> {
        match self {
            Coalescing::Strict => Arc::new(Strict),
            Coalescing::Pedantic => Arc::new(Pedantic),
            Coalescing::Humane => Arc::new(Humane),
        }
    }
}

// ============================================================================
// Shared conversion helpers
// ============================================================================

pub(crate) const NULL: &str = "null";
pub(crate) const BOOL: &str = "bool";
pub(crate) const INT64: &str = "int64";
pub(crate) const FLOAT64: &str = "float64";
pub(crate) const NUMBER: &str = "number";
pub(crate) const STRING: &str = "string";
pub(crate) const VECTOR: &str = "vector";
pub(crate) const OBJECT: &str = "object";

/// Apply a host hook, failing when the host does not provide it.
fn from_host<T>(host: &dyn HostValue, hook: Option<T>, to: &'static str) -> Result<T, CoalesceError> {
    hook.ok_or(CoalesceError::Incompatible {
        from: host.type_name(),
        to,
    })
}

fn host_number(host: &dyn HostValue) -> Result<Number, CoalesceError> {
    if let Some(i) = host.coalesce_to_int64() {
        return Ok(Number::Int(i));
    }
    from_host(host, host.coalesce_to_float64().map(Number::Float), NUMBER)
}

/// Float to integer, only when no precision is lost.
fn float_to_int(value: f64) -> Result<i64, CoalesceError> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range.
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(CoalesceError::Lossy {
            value: Number::Float(value).to_string(),
            to: INT64,
        })
    }
}

/// Whether a value is the zero value of its own kind.
fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.is_zero(),
        Value::String(s) => s.is_empty(),
        Value::Vector(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Host(host) => host.coalesce_to_null(),
    }
}
