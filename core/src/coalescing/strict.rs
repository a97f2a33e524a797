//! Strict coalescing: pedantic plus one-directional null bridging.

use super::*;

/// `null` converts to the zero value of every kind; a non-null value converts
/// to `null` only when it already is the zero value of its own kind. Numbers
/// convert between integer and float only when no precision is lost.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

impl Coalescer for Strict {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn to_null(&self, value: &Value) -> Result<(), CoalesceError> {
        if is_zero_value(value) {
            Ok(())
        } else {
            Err(CoalesceError::incompatible(value, NULL))
        }
    }

    fn to_bool(&self, value: &Value) -> Result<bool, CoalesceError> {
        match value {
            Value::Null => Ok(false),
            other => Pedantic.to_bool(other),
        }
    }

    fn to_int64(&self, value: &Value) -> Result<i64, CoalesceError> {
        match value {
            Value::Null => Ok(0),
            Value::Number(Number::Float(f)) => float_to_int(*f),
            Value::Host(host) => match host.coalesce_to_int64() {
                Some(i) => Ok(i),
                None => float_to_int(from_host(host.as_ref(), host.coalesce_to_float64(), INT64)?),
            },
            other => Pedantic.to_int64(other),
        }
    }

    fn to_float64(&self, value: &Value) -> Result<f64, CoalesceError> {
        match value {
            Value::Null => Ok(0.0),
            Value::Number(n) => Ok(n.as_f64()),
            Value::Host(host) => match host.coalesce_to_float64() {
                Some(f) => Ok(f),
                None => from_host(host.as_ref(), host.coalesce_to_int64(), FLOAT64).map(|i| i as f64),
            },
            other => Pedantic.to_float64(other),
        }
    }

    fn to_number(&self, value: &Value) -> Result<Number, CoalesceError> {
        match value {
            Value::Null => Ok(Number::Int(0)),
            other => Pedantic.to_number(other),
        }
    }

    fn to_string(&self, value: &Value) -> Result<String, CoalesceError> {
        match value {
            Value::Null => Ok(String::new()),
            other => Pedantic.to_string(other),
        }
    }

    fn to_vector(&self, value: &Value) -> Result<Vec<Value>, CoalesceError> {
        match value {
            Value::Null => Ok(Vec::new()),
            other => Pedantic.to_vector(other),
        }
    }

    fn to_object(&self, value: &Value) -> Result<Object, CoalesceError> {
        match value {
            Value::Null => Ok(Object::new()),
            other => Pedantic.to_object(other),
        }
    }
}
