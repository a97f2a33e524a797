//! Types Package
//!
//! Conversions through the active coalescer. Unlike typed parameters, these
//! report the coercion failure itself rather than a dispatch mismatch.

use super::Res;
use crate::{
    context::{Context, Functions},
    dispatch::{DispatchError, NativeFunction},
    values::{Number, Value},
};

pub fn register(functions: &mut Functions) -> Result<(), DispatchError> {
    functions.register(
        "type-of",
        NativeFunction::builder("Name of the value's type.")
            .form(|value: Value| -> Res<&'static str> { Ok(value.type_name()) })
            .build()?,
    )?;

    functions.register(
        "to-string",
        NativeFunction::builder("Converts to a string.")
            .form(|ctx: Context, value: Value| -> Res<String> {
                Ok(ctx.coalescer().to_string(&value)?)
            })
            .build()?,
    )?;

    functions.register(
        "to-int",
        NativeFunction::builder("Converts to an integer.")
            .form(|ctx: Context, value: Value| -> Res<i64> {
                Ok(ctx.coalescer().to_int64(&value)?)
            })
            .build()?,
    )?;

    functions.register(
        "to-float",
        NativeFunction::builder("Converts to a float.")
            .form(|ctx: Context, value: Value| -> Res<f64> {
                Ok(ctx.coalescer().to_float64(&value)?)
            })
            .build()?,
    )?;

    functions.register(
        "to-number",
        NativeFunction::builder("Converts to an integer or a float, whichever fits.")
            .form(|ctx: Context, value: Value| -> Res<Number> {
                Ok(ctx.coalescer().to_number(&value)?)
            })
            .build()?,
    )?;

    functions.register(
        "to-bool",
        NativeFunction::builder("Converts to a bool.")
            .form(|ctx: Context, value: Value| -> Res<bool> {
                Ok(ctx.coalescer().to_bool(&value)?)
            })
            .build()?,
    )?;

    Ok(())
}
