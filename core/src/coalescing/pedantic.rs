//! Identity-only coalescing.

use super::*;

/// Accepts only values that already have the requested kind.
///
/// The only conversion performed is the numeric widening hosts get for free
/// when building values from 32-bit numbers. Integers are not floats and
/// floats are not integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pedantic;

impl Coalescer for Pedantic {
    fn name(&self) -> &'static str {
        "pedantic"
    }

    fn to_null(&self, value: &Value) -> Result<(), CoalesceError> {
        match value {
            Value::Null => Ok(()),
            Value::Host(host) if host.coalesce_to_null() => Ok(()),
            other => Err(CoalesceError::incompatible(other, NULL)),
        }
    }

    fn to_bool(&self, value: &Value) -> Result<bool, CoalesceError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Host(host) => from_host(host.as_ref(), host.coalesce_to_bool(), BOOL),
            other => Err(CoalesceError::incompatible(other, BOOL)),
        }
    }

    fn to_int64(&self, value: &Value) -> Result<i64, CoalesceError> {
        match value {
            Value::Number(Number::Int(i)) => Ok(*i),
            Value::Host(host) => from_host(host.as_ref(), host.coalesce_to_int64(), INT64),
            other => Err(CoalesceError::incompatible(other, INT64)),
        }
    }

    fn to_float64(&self, value: &Value) -> Result<f64, CoalesceError> {
        match value {
            Value::Number(Number::Float(f)) => Ok(*f),
            Value::Host(host) => from_host(host.as_ref(), host.coalesce_to_float64(), FLOAT64),
            other => Err(CoalesceError::incompatible(other, FLOAT64)),
        }
    }

    fn to_number(&self, value: &Value) -> Result<Number, CoalesceError> {
        match value {
            Value::Number(n) => Ok(*n),
            Value::Host(host) => host_number(host.as_ref()),
            other => Err(CoalesceError::incompatible(other, NUMBER)),
        }
    }

    fn to_string(&self, value: &Value) -> Result<String, CoalesceError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Host(host) => from_host(host.as_ref(), host.coalesce_to_string(), STRING),
            other => Err(CoalesceError::incompatible(other, STRING)),
        }
    }

    fn to_vector(&self, value: &Value) -> Result<Vec<Value>, CoalesceError> {
        match value {
            Value::Vector(items) => Ok(items.clone()),
            Value::Host(host) => from_host(host.as_ref(), host.coalesce_to_vector(), VECTOR),
            other => Err(CoalesceError::incompatible(other, VECTOR)),
        }
    }

    fn to_object(&self, value: &Value) -> Result<Object, CoalesceError> {
        match value {
            Value::Object(map) => Ok(map.clone()),
            Value::Host(host) => from_host(host.as_ref(), host.coalesce_to_object(), OBJECT),
            other => Err(CoalesceError::incompatible(other, OBJECT)),
        }
    }
}
