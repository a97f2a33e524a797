//! Value equality and ordering on top of a [`Coalescer`].
//!
//! Both operations use a type-directed cascade. The kinds are tried in a fixed
//! order and the first kind that either side naturally has wins; the other
//! side is then coerced into that kind with the active coalescer.
//!
//! | step | [`equal`] | [`compare`] |
//! |------|-----------|-------------|
//! | 1    | null      | null        |
//! | 2    | bool      | bool        |
//! | 3    | int64     | float64     |
//! | 4    | float64   | int64       |
//! | 5    | string    | string      |
//! | 6    | vector    | vector      |
//! | 7    | object    | object      |
//!
//! The numeric steps are swapped between the two operations: mixing an
//! integer with a float compares as integers under `equal` and as floats
//! under `compare`. Programs may depend on this, so both orders are kept.


use thiserror::Error;

use crate::{
    coalescing::{CoalesceError, Coalescer},
    values::Value,
};

/// Outcome of a three-way comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Equal,
    Smaller,
    Greater,
    /// Values can be checked for equality but have no order (vectors, objects, NaN).
    Unorderable,
}

impl From<core::cmp::Ordering> for Ordering {
    fn from(ordering: core::cmp::Ordering) -> Self {
        match ordering {
            core::cmp::Ordering::Less => Ordering::Smaller,
            core::cmp::Ordering::Equal => Ordering::Equal,
            core::cmp::Ordering::Greater => Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonError {
    #[error("incompatible types {left} and {right}: {source}")]
    Incompatible {
        left: &'static str,
        right: &'static str,
        source: CoalesceError,
    },

    #[error("incompatible types {left} and {right}")]
    NoCommonKind {
        left: &'static str,
        right: &'static str,
    },
}

/// Coerce both sides with the same conversion, naming both types on failure.
fn both<T>(
    left: &Value,
    right: &Value,
    convert: impl Fn(&Value) -> Result<T, CoalesceError>,
) -> Result<(T, T), ComparisonError> {
    let incompatible = |source| ComparisonError::Incompatible {
        left: left.type_name(),
        right: right.type_name(),
        source,
    };
    let l = convert(left).map_err(incompatible)?;
    let r = convert(right).map_err(incompatible)?;
    Ok((l, r))
}

fn either(left: &Value, right: &Value, test: impl Fn(&Value) -> bool) -> bool {
    test(left) || test(right)
}

/// Check two values for equality under the given coalescer.
pub fn equal(c: &dyn Coalescer, left: &Value, right: &Value) -> Result<bool, ComparisonError> {
    if either(left, right, Value::is_null) {
        both(left, right, |v| c.to_null(v))?;
        return Ok(true);
    }

    if either(left, right, |v| matches!(v, Value::Bool(_))) {
        let (l, r) = both(left, right, |v| c.to_bool(v))?;
        return Ok(l == r);
    }

    if either(left, right, Value::is_int) {
        let (l, r) = both(left, right, |v| c.to_int64(v))?;
        return Ok(l == r);
    }

    if either(left, right, Value::is_float) {
        let (l, r) = both(left, right, |v| c.to_float64(v))?;
        return Ok(l == r);
    }

    if either(left, right, |v| matches!(v, Value::String(_))) {
        let (l, r) = both(left, right, |v| c.to_string(v))?;
        return Ok(l == r);
    }

    if either(left, right, |v| matches!(v, Value::Vector(_))) {
        let (l, r) = both(left, right, |v| c.to_vector(v))?;
        if l.len() != r.len() {
            return Ok(false);
        }
        for (a, b) in l.iter().zip(r.iter()) {
            if !equal(c, a, b)? {
                return Ok(false);
            }
        }
        return Ok(true);
    }

    if either(left, right, |v| matches!(v, Value::Object(_))) {
        let (l, r) = both(left, right, |v| c.to_object(v))?;
        if l.len() != r.len() {
            return Ok(false);
        }
        for (key, a) in &l {
            match r.get(key) {
                Some(b) if equal(c, a, b)? => {}
                _ => return Ok(false),
            }
        }
        return Ok(true);
    }

    // Only host values are left.
    if left == right {
        return Ok(true);
    }
    Err(ComparisonError::NoCommonKind {
        left: left.type_name(),
        right: right.type_name(),
    })
}

/// Three-way comparison under the given coalescer.
///
/// Vectors and objects are only ever `Equal` or `Unorderable`.
pub fn compare(
    c: &dyn Coalescer,
    left: &Value,
    right: &Value,
) -> Result<Ordering, ComparisonError> {
    if either(left, right, Value::is_null) {
        both(left, right, |v| c.to_null(v))?;
        return Ok(Ordering::Equal);
    }

    if either(left, right, |v| matches!(v, Value::Bool(_))) {
        let (l, r) = both(left, right, |v| c.to_bool(v))?;
        return Ok(l.cmp(&r).into());
    }

    if either(left, right, Value::is_float) {
        let (l, r) = both(left, right, |v| c.to_float64(v))?;
        return Ok(l.partial_cmp(&r).map_or(Ordering::Unorderable, Into::into));
    }

    if either(left, right, Value::is_int) {
        let (l, r) = both(left, right, |v| c.to_int64(v))?;
        return Ok(l.cmp(&r).into());
    }

    if either(left, right, |v| matches!(v, Value::String(_))) {
        let (l, r) = both(left, right, |v| c.to_string(v))?;
        return Ok(l.cmp(&r).into());
    }

    Ok(if equal(c, left, right)? {
        Ordering::Equal
    } else {
        Ordering::Unorderable
    })
}
