//! Core evaluation logic.

use core::cell::Cell;

use tracing::{debug, trace, warn};

use super::{ExecutionError, ResourceExceeded};
use crate::{
    ast::{Expression, Identifier, ObjectNode, PathExpression, Statement, Symbol, Tuple, VectorNode},
    context::{Context, Runtime},
    dispatch::DispatchError,
    pathexpr::{self, Path},
    values::{Object, Value},
};

/// The default tree-walking [`Runtime`].
///
/// Tracks nesting depth across every context that shares it and fails with
/// [`ResourceExceeded`] instead of overflowing the native stack.
#[derive(Debug)]
pub struct Interpreter {
    max_depth: usize,
    depth: Cell<usize>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Interpreter {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            depth: Cell::new(0),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn enter(&self) -> Result<DepthGuard<'_>, ExecutionError> {
        let depth = self.depth.get();
        if depth >= self.max_depth {
            warn!(depth, max_depth = self.max_depth, "evaluation depth exceeded");
            return Err(ResourceExceeded::DepthExceeded {
                depth,
                max_depth: self.max_depth,
            }
            .into());
        }
        self.depth.set(depth + 1);
        Ok(DepthGuard(&self.depth))
    }

    fn eval_vector(&self, ctx: &Context, node: &VectorNode) -> Result<(Context, Value), ExecutionError> {
        let mut current = ctx.clone();
        let mut items = Vec::with_capacity(node.expressions.len());
        for (i, expression) in node.expressions.iter().enumerate() {
            let (next, value) = current
                .evaluate(expression)
                .map_err(|e| e.context(format!("element #{}", i)))?;
            current = next;
            items.push(value);
        }
        let value = descend(&current, Value::Vector(items), node.path.as_ref())?;
        Ok((current, value))
    }

    fn eval_object(&self, ctx: &Context, node: &ObjectNode) -> Result<(Context, Value), ExecutionError> {
        let mut current = ctx.clone();
        let mut map = Object::with_capacity(node.data.len());
        for pair in &node.data {
            let key = match &pair.key {
                Expression::Identifier(identifier) => identifier.name.clone(),
                expression => {
                    let (next, key) = current.evaluate(expression)?;
                    current = next;
                    current.coalescer().to_string(&key)?
                }
            };
            let (next, value) = current
                .evaluate(&pair.value)
                .map_err(|e| e.context(format!("key {:?}", key)))?;
            current = next;
            map.insert(key, value);
        }
        let value = descend(&current, Value::Object(map), node.path.as_ref())?;
        Ok((current, value))
    }

    fn eval_tuple(&self, ctx: &Context, tuple: &Tuple) -> Result<(Context, Value), ExecutionError> {
        let Some((head, args)) = tuple.expressions.split_first() else {
            return Err(ExecutionError::InvalidExpression("empty call".to_string()));
        };
        let Expression::Identifier(identifier) = head else {
            return Err(ExecutionError::InvalidExpression(format!(
                "cannot call {}",
                head
            )));
        };
        let (next, value) = ctx.call_function(identifier, args)?;
        let value = descend(&next, value, tuple.path.as_ref())?;
        Ok((next, value))
    }
}

struct DepthGuard<'a>(&'a Cell<usize>);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

impl Runtime for Interpreter {
    fn eval_statement(
        &self,
        ctx: &Context,
        statement: &Statement,
    ) -> Result<(Context, Value), ExecutionError> {
        self.eval_expression(ctx, &statement.expression)
    }

    fn eval_expression(
        &self,
        ctx: &Context,
        expression: &Expression,
    ) -> Result<(Context, Value), ExecutionError> {
        let _guard = self.enter()?;
        let value = match expression {
            Expression::Null => Value::Null,
            Expression::Bool(b) => Value::Bool(*b),
            Expression::Number(n) => Value::Number(*n),
            Expression::String(s) => Value::String(s.clone()),
            Expression::Vector(items) => Value::Vector(items.clone()),
            Expression::Object(map) => Value::Object(map.clone()),
            Expression::VectorNode(node) => return self.eval_vector(ctx, node),
            Expression::ObjectNode(node) => return self.eval_object(ctx, node),
            Expression::Symbol(symbol) => read_symbol(ctx, symbol)?,
            Expression::Tuple(tuple) => return self.eval_tuple(ctx, tuple),
            Expression::Identifier(identifier) => {
                return Err(ExecutionError::InvalidExpression(format!(
                    "unexpected identifier {}",
                    identifier
                )));
            }
        };
        Ok((ctx.clone(), value))
    }

    fn call_function(
        &self,
        ctx: &Context,
        identifier: &Identifier,
        args: &[Expression],
    ) -> Result<(Context, Value), ExecutionError> {
        ctx.check_cancelled()?;
        let name = identifier.name.as_str();
        let function = ctx
            .functions()
            .get(name)
            .ok_or_else(|| DispatchError::UnknownFunction(name.to_string()))?;

        let target = match (identifier.bang, args.first()) {
            (false, _) => None,
            (true, Some(Expression::Symbol(symbol))) => {
                let path = symbol_path(ctx, symbol)
                    .map_err(|e| e.context("argument #0").context(name))?;
                Some((symbol, path))
            }
            (true, _) => {
                return Err(ExecutionError::InvalidExpression(format!(
                    "{}: first argument must be a variable or document path",
                    identifier
                )));
            }
        };

        // The function sees the target with its path already resolved, so the
        // value it reads and the location written back are the same.
        let pinned;
        let args = match &target {
            Some((symbol, path)) => {
                pinned = pin_target(args, symbol, path);
                pinned.as_slice()
            }
            None => args,
        };

        debug!(name, args = args.len(), bang = identifier.bang, "calling function");
        let value = function.evaluate(ctx, args).map_err(|e| e.context(name))?;

        let Some((symbol, path)) = target else {
            return Ok((ctx.clone(), value));
        };
        trace!(name, %symbol, %path, "writing back");
        let written = match function.bang_handler() {
            Some(handler) => handler(ctx, symbol, &path, value),
            None => write_back(ctx, symbol, &path, value),
        };
        written.map_err(|e| e.context(format!("{}!", name)))
    }
}

/// Apply an optional trailing path to a freshly built value.
fn descend(ctx: &Context, value: Value, path: Option<&PathExpression>) -> Result<Value, ExecutionError> {
    match path {
        Some(path) => {
            let path = pathexpr::evaluate(ctx, path)?;
            Ok(pathexpr::get(&value, &path)?)
        }
        None => Ok(value),
    }
}

/// `args` with the first argument replaced by `symbol` over literal `path` steps.
fn pin_target(args: &[Expression], symbol: &Symbol, path: &Path) -> Vec<Expression> {
    let pinned = Expression::Symbol(Symbol {
        variable: symbol.variable.clone(),
        path: symbol.path.as_ref().map(|_| path.to_expression()),
    });
    std::iter::once(pinned)
        .chain(args.iter().skip(1).cloned())
        .collect()
}

/// Evaluate the path part of a symbol. A missing path is the empty path.
pub fn symbol_path(ctx: &Context, symbol: &Symbol) -> Result<Path, ExecutionError> {
    match &symbol.path {
        Some(path) => pathexpr::evaluate(ctx, path),
        None => Ok(Path::new()),
    }
}

/// The value a symbol refers to.
pub fn read_symbol(ctx: &Context, symbol: &Symbol) -> Result<Value, ExecutionError> {
    let path = symbol_path(ctx, symbol)?;
    match &symbol.variable {
        Some(name) => {
            let value = ctx
                .get_variable(name)
                .ok_or_else(|| ExecutionError::UnknownVariable(name.clone()))?;
            Ok(pathexpr::get(value, &path)?)
        }
        None => Ok(ctx.document().get_path(&path)?),
    }
}

/// Store `value` at `path` inside the variable or document `symbol` names.
///
/// Variables are rebound in the returned context only. Document writes happen
/// in place and are visible through every context.
pub fn write_back(
    ctx: &Context,
    symbol: &Symbol,
    path: &Path,
    value: Value,
) -> Result<(Context, Value), ExecutionError> {
    match &symbol.variable {
        Some(name) => {
            let updated = if path.is_empty() {
                value.clone()
            } else {
                let base = ctx.get_variable(name).cloned().unwrap_or_default();
                pathexpr::set(base, path, value.clone())?
            };
            debug!(variable = %name, %path, "write-back to variable");
            Ok((ctx.with_variable(name.clone(), updated), value))
        }
        None => {
            debug!(%path, "write-back to document");
            ctx.document().set_path(path, value.clone())?;
            Ok((ctx.clone(), value))
        }
    }
}
