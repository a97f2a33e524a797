use super::Context;
use crate::{
    ast::{Expression, Identifier, Statement},
    evaluator::ExecutionError,
    values::Value,
};

/// The evaluation strategy a [`Context`] dispatches to.
///
/// Each method returns the context to continue with alongside the value.
/// Callers decide whether to keep that context or discard it.
pub trait Runtime {
    fn eval_statement(
        &self,
        ctx: &Context,
        statement: &Statement,
    ) -> Result<(Context, Value), ExecutionError>;

    fn eval_expression(
        &self,
        ctx: &Context,
        expression: &Expression,
    ) -> Result<(Context, Value), ExecutionError>;

    fn call_function(
        &self,
        ctx: &Context,
        identifier: &Identifier,
        args: &[Expression],
    ) -> Result<(Context, Value), ExecutionError>;
}
