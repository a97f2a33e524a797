//! Control Package
//!
//! Assignment, branching, sequencing and error recovery.

use super::{Res, expect_symbol};
use crate::{
    ast::{Expression, Symbol},
    coalescing::{Coalescer, Humane},
    context::{Context, Functions},
    dispatch::{DispatchError, NativeFunction, RawFunction, Variadic},
    evaluator::{ExecutionError, read_symbol, symbol_path},
    pathexpr::{self, Path},
    values::Value,
};

pub fn register(functions: &mut Functions) -> Result<(), DispatchError> {
    functions.register(
        "set",
        NativeFunction::builder("Returns the value; `set!` stores it at the target.")
            .form(|target: Expression, value: Value| -> Res<Value> {
                expect_symbol("set", &target)?;
                Ok(value)
            })
            .build()?,
    )?;

    functions.register(
        "delete",
        NativeFunction::builder("Removes the target location; returns the updated variable or document.")
            .form(delete)
            .bang_handler(store_root)
            .build()?,
    )?;

    functions.register(
        "if",
        NativeFunction::builder("Evaluates one branch depending on the condition.")
            .form(|ctx: Context, condition: bool, then: Expression| -> Res<Value> {
                if condition {
                    ctx.evaluate_value(&then)
                } else {
                    Ok(Value::Null)
                }
            })
            .form(
                |ctx: Context, condition: bool, then: Expression, otherwise: Expression| -> Res<Value> {
                    ctx.evaluate_value(if condition { &then } else { &otherwise })
                },
            )
            .build()?,
    )?;

    functions.register(
        "do",
        RawFunction::new(
            "Evaluates expressions in order, each seeing the bindings of the previous ones.",
            sequence,
        ),
    )?;

    functions.register(
        "try",
        NativeFunction::builder("Evaluates an expression, substituting a fallback on error.")
            .form(|ctx: Context, body: Expression| -> Res<Value> {
                recover(&ctx, &body, None)
            })
            .form(|ctx: Context, body: Expression, fallback: Expression| -> Res<Value> {
                recover(&ctx, &body, Some(&fallback))
            })
            .build()?,
    )?;

    functions.register(
        "default",
        NativeFunction::builder("Returns the fallback when the value is empty.")
            .form(|value: Value, fallback: Value| -> Res<Value> {
                Ok(if Humane.to_null(&value).is_ok() {
                    fallback
                } else {
                    value
                })
            })
            .build()?,
    )?;

    functions.register(
        "error",
        NativeFunction::builder("Raises an error; `{}` placeholders are filled from the arguments.")
            .form(|message: String, Variadic(args): Variadic<Value>| -> Res<Value> {
                Err(ExecutionError::User(format_message(&message, &args)))
            })
            .build()?,
    )?;

    functions.register(
        "has?",
        NativeFunction::builder("Whether the target location exists.")
            .form(|ctx: Context, target: Expression| -> Res<bool> {
                let symbol = expect_symbol("has?", &target)?;
                match read_symbol(&ctx, symbol) {
                    Ok(_) => Ok(true),
                    Err(e) => match e.root() {
                        ExecutionError::Path(_) | ExecutionError::UnknownVariable(_) => Ok(false),
                        _ => Err(e),
                    },
                }
            })
            .build()?,
    )?;

    Ok(())
}

/// The variable or document the target belongs to, with the target removed.
fn delete(ctx: Context, target: Expression) -> Res<Value> {
    let symbol = expect_symbol("delete", &target)?;
    let path = symbol_path(&ctx, symbol)?;
    let root = match &symbol.variable {
        Some(name) => ctx
            .get_variable(name)
            .cloned()
            .ok_or_else(|| ExecutionError::UnknownVariable(name.clone()))?,
        None => ctx.document().get(),
    };
    Ok(pathexpr::delete(root, &path)?)
}

/// `delete!` replaces the whole variable or document, not the deleted location.
fn store_root(ctx: &Context, symbol: &Symbol, _path: &Path, value: Value) -> Res<(Context, Value)> {
    match &symbol.variable {
        Some(name) => Ok((ctx.with_variable(name.clone(), value.clone()), value)),
        None => {
            ctx.document().set(value.clone());
            Ok((ctx.clone(), value))
        }
    }
}

fn sequence(ctx: &Context, args: &[Expression]) -> Res<Value> {
    let mut current = ctx.clone();
    let mut last = Value::Null;
    for (i, expression) in args.iter().enumerate() {
        let (next, value) = current
            .evaluate(expression)
            .map_err(|e| e.context(format!("argument #{}", i)))?;
        current = next;
        last = value;
    }
    Ok(last)
}

/// Fatal errors are never swallowed.
fn recover(ctx: &Context, body: &Expression, fallback: Option<&Expression>) -> Res<Value> {
    match ctx.evaluate_value(body) {
        Ok(value) => Ok(value),
        Err(e) if e.is_fatal() => Err(e),
        Err(_) => match fallback {
            Some(fallback) => ctx.evaluate_value(fallback),
            None => Ok(Value::Null),
        },
    }
}

fn format_message(message: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(message.len());
    let mut args = args.iter();
    let mut rest = message;
    while let Some(at) = rest.find("{}") {
        out.push_str(&rest[..at]);
        match args.next() {
            Some(Value::String(s)) => out.push_str(s),
            Some(value) => out.push_str(&value.to_string()),
            None => out.push_str("{}"),
        }
        rest = &rest[at + 2..];
    }
    out.push_str(rest);
    out
}
