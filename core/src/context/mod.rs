//! Evaluation context: the document, scoped variables, the function registry,
//! the active coalescer and the cancellation signal.
//!
//! Two mutation disciplines live side by side here. [`Variables`] are
//! persistent: [`Context::with_variable`] returns a new context and the caller's
//! bindings never change. The [`Document`] is one shared cell: every context
//! derived from the same root sees every write.

mod cancellation;
mod document;
mod functions;
mod runtime;
mod variables;


pub use cancellation::Cancellation;
pub use document::Document;
pub use functions::Functions;
pub use runtime::Runtime;
pub use variables::Variables;

use core::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use crate::{
    ast::{Expression, Identifier},
    coalescing::Coalescer,
    evaluator::{ExecutionError, Interpreter},
    values::Value,
};

#[derive(Clone)]
pub struct Context {
    document: Document,
    variables: Variables,
    functions: Arc<Functions>,
    coalescer: Arc<dyn Coalescer>,
    cancellation: Cancellation,
    runtime: Rc<dyn Runtime>,
}

impl Context {
    /// A root context with no variables, no cancellation and the default interpreter.
    pub fn new(document: Document, functions: Arc<Functions>, coalescer: Arc<dyn Coalescer>) -> Self {
        Self {
            document,
            variables: Variables::new(),
            functions,
            coalescer,
            cancellation: Cancellation::new(),
            runtime: Rc::new(Interpreter::default()),
        }
    }

    pub fn with_variables(self, variables: Variables) -> Self {
        Self { variables, ..self }
    }

    pub fn with_cancellation(self, cancellation: Cancellation) -> Self {
        Self {
            cancellation,
            ..self
        }
    }

    pub fn with_runtime(self, runtime: Rc<dyn Runtime>) -> Self {
        Self { runtime, ..self }
    }

    pub fn with_coalescer(&self, coalescer: Arc<dyn Coalescer>) -> Self {
        Self {
            coalescer,
            ..self.clone()
        }
    }

    /// A derived context where `name` is bound to `value`.
    ///
    /// The receiver is unchanged; the document stays shared.
    pub fn with_variable(&self, name: impl Into<String>, value: Value) -> Self {
        Self {
            variables: self.variables.with(name, value),
            ..self.clone()
        }
    }

    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn functions(&self) -> &Functions {
        &self.functions
    }

    pub fn coalescer(&self) -> &dyn Coalescer {
        self.coalescer.as_ref()
    }

    pub fn cancellation(&self) -> &Cancellation {
        &self.cancellation
    }

    pub fn runtime(&self) -> &dyn Runtime {
        self.runtime.as_ref()
    }

    pub fn check_cancelled(&self) -> Result<(), ExecutionError> {
        if self.cancellation.is_cancelled() {
            debug!("cancellation observed");
            return Err(ExecutionError::Cancelled);
        }
        Ok(())
    }

    /// Evaluate `expression`, returning the context to continue with.
    pub fn evaluate(&self, expression: &Expression) -> Result<(Context, Value), ExecutionError> {
        self.runtime.eval_expression(self, expression)
    }

    /// Evaluate `expression` in a child scope and keep only the value.
    pub fn evaluate_value(&self, expression: &Expression) -> Result<Value, ExecutionError> {
        self.evaluate(expression).map(|(_, value)| value)
    }

    pub fn call_function(
        &self,
        identifier: &Identifier,
        args: &[Expression],
    ) -> Result<(Context, Value), ExecutionError> {
        self.runtime.call_function(self, identifier, args)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("document", &self.document)
            .field("variables", &self.variables)
            .field("functions", &self.functions)
            .field("coalescer", &self.coalescer.name())
            .finish_non_exhaustive()
    }
}
