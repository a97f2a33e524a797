//! Turning a raw path expression into a [`Path`].

use tracing::trace;

use super::{Path, PathError, PathStep};
use crate::{
    ast::{Expression, PathExpression},
    coalescing::Coalescer,
    context::Context,
    evaluator::ExecutionError,
    values::{Number, Value},
};

/// Evaluate each step of `expression` against `ctx`.
///
/// Bare identifiers are literal keys. Every other step is evaluated and its
/// value must coalesce to a string key or a non-negative index.
pub fn evaluate(ctx: &Context, expression: &PathExpression) -> Result<Path, ExecutionError> {
    let mut path = Path::new();
    for (i, step) in expression.steps.iter().enumerate() {
        let step = evaluate_step(ctx, step).map_err(|e| e.context(format!("path step #{}", i)))?;
        path.push(step);
    }
    trace!(%path, "evaluated path");
    Ok(path)
}

impl Path {
    /// The path as literal steps, which evaluate back to this same path
    /// without running any accessor expression again.
    pub fn to_expression(&self) -> PathExpression {
        let steps = self
            .steps()
            .iter()
            .map(|step| match step {
                PathStep::Key(key) => Expression::String(key.clone()),
                PathStep::Index(index) => Expression::Number(Number::Int(*index as i64)),
            })
            .collect();
        PathExpression::new(steps)
    }
}

fn evaluate_step(ctx: &Context, step: &Expression) -> Result<PathStep, ExecutionError> {
    if let Expression::Identifier(identifier) = step {
        return Ok(PathStep::Key(identifier.name.clone()));
    }
    let value = ctx.evaluate_value(step)?;
    Ok(step_from_value(ctx.coalescer(), &value)?)
}

/// Coalesce an evaluated accessor into a step.
pub(crate) fn step_from_value(c: &dyn Coalescer, value: &Value) -> Result<PathStep, PathError> {
    let index = |i: i64| usize::try_from(i).map_err(|_| PathError::NegativeIndex(i));
    match value {
        Value::String(key) => Ok(PathStep::Key(key.clone())),
        Value::Number(_) => match c.to_int64(value) {
            Ok(i) => index(i).map(PathStep::Index),
            Err(e) => Err(PathError::InvalidStep(e.to_string())),
        },
        other => {
            if let Ok(i) = c.to_int64(other) {
                return index(i).map(PathStep::Index);
            }
            match c.to_string(other) {
                Ok(key) => Ok(PathStep::Key(key)),
                Err(_) => Err(PathError::InvalidStep(format!(
                    "{} is neither a key nor an index",
                    other.type_name()
                ))),
            }
        }
    }
}
