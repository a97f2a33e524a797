//! String Package

use super::Res;
use crate::{
    context::Functions,
    dispatch::{DispatchError, NativeFunction, Variadic},
    values::{Object, Value},
};

pub fn register(functions: &mut Functions) -> Result<(), DispatchError> {
    functions.register(
        "concat",
        NativeFunction::builder("Joins strings.")
            .form(|first: String, Variadic(rest): Variadic<String>| -> Res<String> {
                Ok(rest.into_iter().fold(first, |mut acc, s| {
                    acc.push_str(&s);
                    acc
                }))
            })
            .build()?,
    )?;

    // String form first: under strict coalescing null counts as "".
    functions.register(
        "len",
        NativeFunction::builder("Length of a string (in characters), vector or object.")
            .form(|s: String| -> Res<i64> { Ok(s.chars().count() as i64) })
            .form(|items: Vec<Value>| -> Res<i64> { Ok(items.len() as i64) })
            .form(|map: Object| -> Res<i64> { Ok(map.len() as i64) })
            .build()?,
    )?;

    functions.register(
        "to-upper",
        NativeFunction::builder("Uppercase copy of a string.")
            .form(|s: String| -> Res<String> { Ok(s.to_uppercase()) })
            .build()?,
    )?;

    functions.register(
        "to-lower",
        NativeFunction::builder("Lowercase copy of a string.")
            .form(|s: String| -> Res<String> { Ok(s.to_lowercase()) })
            .build()?,
    )?;

    functions.register(
        "trim",
        NativeFunction::builder("Strips surrounding whitespace.")
            .form(|s: String| -> Res<String> { Ok(s.trim().to_string()) })
            .build()?,
    )?;

    Ok(())
}
