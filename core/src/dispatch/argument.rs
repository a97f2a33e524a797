use once_cell::unsync::OnceCell;

use crate::{ast::Expression, context::Context, evaluator::ExecutionError, values::Value};

/// One argument of a call, evaluated on first use.
///
/// The outcome, value or error, is cached so that probing several forms never
/// evaluates the same expression twice.
pub struct Argument<'a> {
    ctx: &'a Context,
    expression: &'a Expression,
    position: usize,
    value: OnceCell<Result<Value, ExecutionError>>,
}

impl<'a> Argument<'a> {
    pub fn new(ctx: &'a Context, expression: &'a Expression, position: usize) -> Self {
        Self {
            ctx,
            expression,
            position,
            value: OnceCell::new(),
        }
    }

    /// The unevaluated expression.
    pub fn expression(&self) -> &'a Expression {
        self.expression
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The evaluated value. Sibling arguments never see each other's bindings.
    pub fn value(&self) -> Result<&Value, ExecutionError> {
        self.value
            .get_or_init(|| {
                self.ctx
                    .evaluate_value(self.expression)
                    .map_err(|e| e.context(format!("argument #{}", self.position)))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// The cached outcome, if this argument has been evaluated.
    pub fn evaluated(&self) -> Option<&Result<Value, ExecutionError>> {
        self.value.get()
    }
}

/// Walks the arguments of one call while a form consumes them.
pub struct ArgCursor<'a> {
    ctx: &'a Context,
    args: &'a [Argument<'a>],
    position: usize,
}

impl<'a> ArgCursor<'a> {
    pub fn new(ctx: &'a Context, args: &'a [Argument<'a>]) -> Self {
        Self {
            ctx,
            args,
            position: 0,
        }
    }

    pub fn context(&self) -> &'a Context {
        self.ctx
    }

    pub fn remaining(&self) -> usize {
        self.args.len() - self.position
    }

    pub fn peek(&self) -> Option<&'a Argument<'a>> {
        self.args.get(self.position)
    }

    /// Offer the next argument to `consume`, advancing only when it returns `Some`.
    pub fn consume_with<T>(
        &mut self,
        consume: impl FnOnce(&'a Argument<'a>) -> Result<Option<T>, ExecutionError>,
    ) -> Result<Option<T>, ExecutionError> {
        let Some(arg) = self.peek() else {
            return Ok(None);
        };
        let consumed = consume(arg)?;
        if consumed.is_some() {
            self.position += 1;
        }
        Ok(consumed)
    }
}
