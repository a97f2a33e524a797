//! Logic Package
//!
//! `and` and `or` short-circuit, so they take their arguments unevaluated.

use super::Res;
use crate::{
    ast::Expression,
    context::{Context, Functions},
    dispatch::{DispatchError, NativeFunction, RawFunction},
    evaluator::ExecutionError,
    values::Value,
};

pub fn register(functions: &mut Functions) -> Result<(), DispatchError> {
    functions.register(
        "not",
        NativeFunction::builder("Logical negation.")
            .form(|b: bool| -> Res<bool> { Ok(!b) })
            .build()?,
    )?;

    functions.register(
        "and",
        RawFunction::new("True unless some argument is false; stops at the first false.", |ctx, args| {
            short_circuit(ctx, args, false)
        }),
    )?;

    functions.register(
        "or",
        RawFunction::new("True if some argument is true; stops at the first true.", |ctx, args| {
            short_circuit(ctx, args, true)
        }),
    )?;

    Ok(())
}

/// Returns `stop` at the first argument equal to it, `!stop` otherwise.
fn short_circuit(ctx: &Context, args: &[Expression], stop: bool) -> Res<Value> {
    for (i, expression) in args.iter().enumerate() {
        let truth = ctx
            .evaluate_value(expression)
            .and_then(|value| Ok(ctx.coalescer().to_bool(&value)?))
            .map_err(|e: ExecutionError| e.context(format!("argument #{}", i)))?;
        if truth == stop {
            return Ok(Value::Bool(stop));
        }
    }
    Ok(Value::Bool(!stop))
}
