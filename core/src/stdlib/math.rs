//! Math Package
//!
//! Arithmetic with an integer form tried before a float form, so integer
//! arguments stay integers and anything else is computed in floating point.

use super::Res;
use crate::{
    context::Functions,
    dispatch::{DispatchError, NativeFunction, Variadic},
    evaluator::ExecutionError,
    values::Number,
};

pub fn register(functions: &mut Functions) -> Result<(), DispatchError> {
    functions.register(
        "+",
        NativeFunction::builder("Sum of the arguments.")
            .form(|Variadic(xs): Variadic<i64>| -> Res<i64> {
                xs.into_iter()
                    .try_fold(0i64, |acc, x| acc.checked_add(x))
                    .ok_or(ExecutionError::IntegerOverflow)
            })
            .form(|Variadic(xs): Variadic<f64>| -> Res<f64> { Ok(xs.into_iter().sum()) })
            .build()?,
    )?;

    functions.register(
        "-",
        NativeFunction::builder("Subtracts the rest from the first argument, or negates a single one.")
            .form(|first: i64, Variadic(rest): Variadic<i64>| -> Res<i64> {
                if rest.is_empty() {
                    return first.checked_neg().ok_or(ExecutionError::IntegerOverflow);
                }
                rest.into_iter()
                    .try_fold(first, |acc, x| acc.checked_sub(x))
                    .ok_or(ExecutionError::IntegerOverflow)
            })
            .form(|first: f64, Variadic(rest): Variadic<f64>| -> Res<f64> {
                if rest.is_empty() {
                    return Ok(-first);
                }
                Ok(rest.into_iter().fold(first, |acc, x| acc - x))
            })
            .build()?,
    )?;

    functions.register(
        "*",
        NativeFunction::builder("Product of the arguments.")
            .form(|Variadic(xs): Variadic<i64>| -> Res<i64> {
                xs.into_iter()
                    .try_fold(1i64, |acc, x| acc.checked_mul(x))
                    .ok_or(ExecutionError::IntegerOverflow)
            })
            .form(|Variadic(xs): Variadic<f64>| -> Res<f64> { Ok(xs.into_iter().product()) })
            .build()?,
    )?;

    functions.register(
        "/",
        NativeFunction::builder("Divides the first argument by the rest.")
            .form(|first: i64, Variadic(rest): Variadic<i64>| -> Res<Number> {
                rest.into_iter()
                    .try_fold(Number::Int(first), divide_int)
            })
            .form(|first: f64, Variadic(rest): Variadic<f64>| -> Res<f64> {
                rest.into_iter().try_fold(first, |acc, x| {
                    if x == 0.0 {
                        return Err(ExecutionError::DivisionByZero);
                    }
                    Ok(acc / x)
                })
            })
            .build()?,
    )?;

    Ok(())
}

/// Integer division stays integral only while it is exact.
fn divide_int(acc: Number, divisor: i64) -> Res<Number> {
    if divisor == 0 {
        return Err(ExecutionError::DivisionByZero);
    }
    match acc {
        Number::Int(n) if n.checked_rem(divisor) == Some(0) => n
            .checked_div(divisor)
            .map(Number::Int)
            .ok_or(ExecutionError::IntegerOverflow),
        other => Ok(Number::Float(other.as_f64() / divisor as f64)),
    }
}
