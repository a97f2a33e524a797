//! Comparison Package
//!
//! Equality and ordering predicates over the active coalescer.

use super::Res;
use crate::{
    coalescing::Humane,
    context::{Context, Functions},
    dispatch::{DispatchError, NativeFunction},
    equality::{Ordering, compare, equal},
    values::Value,
};

pub fn register(functions: &mut Functions) -> Result<(), DispatchError> {
    functions.register(
        "eq?",
        NativeFunction::builder("Whether two values are equal.")
            .form(|ctx: Context, a: Value, b: Value| -> Res<bool> {
                Ok(equal(ctx.coalescer(), &a, &b)?)
            })
            .build()?,
    )?;

    functions.register(
        "like?",
        NativeFunction::builder("Whether two values are equal under humane coalescing.")
            .form(|a: Value, b: Value| -> Res<bool> { Ok(equal(&Humane, &a, &b)?) })
            .build()?,
    )?;

    ordering(functions, "lt?", "Whether the first value is smaller.", |o| {
        o == Ordering::Smaller
    })?;
    ordering(functions, "lte?", "Whether the first value is smaller or equal.", |o| {
        matches!(o, Ordering::Smaller | Ordering::Equal)
    })?;
    ordering(functions, "gt?", "Whether the first value is greater.", |o| {
        o == Ordering::Greater
    })?;
    ordering(functions, "gte?", "Whether the first value is greater or equal.", |o| {
        matches!(o, Ordering::Greater | Ordering::Equal)
    })?;

    Ok(())
}

/// Unorderable pairs answer `false` to every ordering predicate.
fn ordering(
    functions: &mut Functions,
    name: &str,
    description: &str,
    accept: fn(Ordering) -> bool,
) -> Result<(), DispatchError> {
    functions.register(
        name,
        NativeFunction::builder(description)
            .form(move |ctx: Context, a: Value, b: Value| -> Res<bool> {
                Ok(accept(compare(ctx.coalescer(), &a, &b)?))
            })
            .build()?,
    )
}
