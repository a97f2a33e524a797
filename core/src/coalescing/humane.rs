//! Weakly-typed coalescing for hand-written rules.

use super::*;

/// Converts whenever a sensible human reading exists.
///
/// - numeric strings parse to numbers (surrounding whitespace ignored, the
///   empty string is zero)
/// - every value has a truthiness: `0`, `""`, `[]`, `{}` and the string
///   `"false"` (any case) are false
/// - `null`, bools and numbers stringify
/// - `[]` and `{}` convert into each other only when empty
#[derive(Debug, Clone, Copy, Default)]
pub struct Humane;

impl Coalescer for Humane {
    fn name(&self) -> &'static str {
        "humane"
    }

    fn to_null(&self, value: &Value) -> Result<(), CoalesceError> {
        match value {
            Value::String(s) if s.trim().is_empty() => Ok(()),
            other => Strict.to_null(other),
        }
    }

    fn to_bool(&self, value: &Value) -> Result<bool, CoalesceError> {
        Ok(match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !n.is_zero(),
            Value::String(s) => {
                let s = s.trim();
                !(s.is_empty() || s.eq_ignore_ascii_case("false"))
            }
            Value::Vector(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::Host(host) => host.coalesce_to_bool().unwrap_or(true),
        })
    }

    fn to_int64(&self, value: &Value) -> Result<i64, CoalesceError> {
        match value {
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::String(s) => match parse_number(s, INT64)? {
                Number::Int(i) => Ok(i),
                Number::Float(f) => float_to_int(f),
            },
            other => Strict.to_int64(other),
        }
    }

    fn to_float64(&self, value: &Value) -> Result<f64, CoalesceError> {
        match value {
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => parse_number(s, FLOAT64).map(Number::as_f64),
            other => Strict.to_float64(other),
        }
    }

    fn to_number(&self, value: &Value) -> Result<Number, CoalesceError> {
        match value {
            Value::Bool(b) => Ok(Number::Int(i64::from(*b))),
            Value::String(s) => parse_number(s, NUMBER),
            other => Strict.to_number(other),
        }
    }

    fn to_string(&self, value: &Value) -> Result<String, CoalesceError> {
        match value {
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(Number::Int(i)) => Ok(i.to_string()),
            Value::Number(Number::Float(f)) => Ok(f.to_string()),
            other => Strict.to_string(other),
        }
    }

    fn to_vector(&self, value: &Value) -> Result<Vec<Value>, CoalesceError> {
        match value {
            Value::Object(map) if map.is_empty() => Ok(Vec::new()),
            other => Strict.to_vector(other),
        }
    }

    fn to_object(&self, value: &Value) -> Result<Object, CoalesceError> {
        match value {
            Value::Vector(items) if items.is_empty() => Ok(Object::new()),
            other => Strict.to_object(other),
        }
    }
}

/// Parse a trimmed string as an integer, falling back to a float.
fn parse_number(s: &str, to: &'static str) -> Result<Number, CoalesceError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Number::Int(0));
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(Number::Int(i));
    }
    trimmed
        .parse::<f64>()
        .map(Number::Float)
        .map_err(|_| CoalesceError::Unparsable {
            value: s.to_string(),
            to,
        })
}
