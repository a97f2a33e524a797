//! Tree-walking evaluator for Rudi programs.
//!
//! ## Design Principles
//!
//! - **Never panic**: failures are returned as [`ExecutionError`]s
//! - **Stack-safe**: depth tracking stops runaway nesting
//! - **Scoped variables, shared document**: only statements thread variable
//!   bindings forward; document writes are global
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rudi_core::{ast::Expression, stdlib, Coalescing, Functions, Program, Value, Variables};
//!
//! let mut functions = Functions::new();
//! stdlib::register_stdlib(&mut functions).unwrap();
//!
//! let program: Program = vec![
//!     Expression::bang("set", vec![Expression::var("n"), Expression::from(2)]),
//!     Expression::bang(
//!         "set",
//!         vec![
//!             Expression::doc_path(vec![Expression::ident("total")]),
//!             Expression::call("*", vec![Expression::var("n"), Expression::from(21)]),
//!         ],
//!     ),
//! ]
//! .into_iter()
//! .collect();
//!
//! let (document, result) = program
//!     .run(Value::Null, Variables::new(), Arc::new(functions), Coalescing::Strict.coalescer())
//!     .unwrap();
//! assert_eq!(result, Value::int(42));
//! assert_eq!(document.to_string(), r#"{"total" 42}"#);
//! ```

mod error;
mod eval;


pub use error::{ExecutionError, ResourceExceeded};
pub use eval::{Interpreter, read_symbol, symbol_path, write_back};

use std::sync::Arc;

use tracing::debug;

use crate::{
    ast::Program,
    coalescing::Coalescer,
    context::{Context, Document, Functions, Variables},
    values::Value,
};

/// Run every statement of `program` in order, threading the context.
///
/// Returns the final context and the value of the last statement (`null` for
/// an empty program).
pub fn run(program: &Program, ctx: &Context) -> Result<(Context, Value), ExecutionError> {
    let mut current = ctx.clone();
    let mut result = Value::Null;
    for (i, statement) in program.statements.iter().enumerate() {
        let (next, value) = current
            .runtime()
            .eval_statement(&current, statement)
            .map_err(|e| e.context(format!("statement #{}", i)))?;
        current = next;
        result = value;
    }
    debug!(statements = program.statements.len(), "program finished");
    Ok((current, result))
}

impl Program {
    /// Run over `document`, returning the updated document and the last result.
    pub fn run(
        &self,
        document: Value,
        variables: Variables,
        functions: Arc<Functions>,
        coalescer: Arc<dyn Coalescer>,
    ) -> Result<(Value, Value), ExecutionError> {
        let document = Document::new(document);
        let ctx = Context::new(document.clone(), functions, coalescer).with_variables(variables);
        let (_, result) = run(self, &ctx)?;
        drop(ctx);
        Ok((document.into_value(), result))
    }
}
