//! The Rudi execution engine.

use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use super::{EngineOptions, Error, FunctionsBuilder};
use crate::{
    ast::Program,
    coalescing::Coalescer,
    context::{Cancellation, Context, Document, Functions, Variables},
    evaluator::{self, Interpreter},
    values::Value,
};

/// The outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    /// The document after every write of the program.
    pub document: Value,
    /// The value of the last statement, `null` for an empty program.
    pub result: Value,
}

/// The Rudi execution engine.
///
/// The engine owns:
/// - the function registry, built once and shared by every run
/// - the coalescer every run converts arguments with
/// - the runtime configuration (EngineOptions)
///
/// An engine is `Send + Sync`; each run gets its own document, variables and
/// interpreter, so one engine can serve many threads.
///
/// # Example
///
/// ```
/// use rudi_core::api::{Engine, EngineOptions};
/// use rudi_core::ast::Expression;
/// use rudi_core::{Program, Value, Variables};
///
/// let engine = Engine::new(EngineOptions::default(), |_| {}).unwrap();
///
/// let program: Program = vec![Expression::bang(
///     "set",
///     vec![
///         Expression::doc_path(vec![Expression::ident("answer")]),
///         Expression::call("+", vec![Expression::from(40), Expression::from(2)]),
///     ],
/// )]
/// .into_iter()
/// .collect();
///
/// let output = engine.run(&program, Value::Null, Variables::new()).unwrap();
/// assert_eq!(output.result, Value::int(42));
/// assert_eq!(output.document.to_string(), r#"{"answer" 42}"#);
/// ```
#[derive(Debug)]
pub struct Engine {
    functions: Arc<Functions>,
    coalescer: Arc<dyn Coalescer>,
    options: EngineOptions,
}

impl Engine {
    /// Create an engine with the standard library plus whatever `init` registers.
    ///
    /// Fails with [`Error::Api`] if any registration was rejected.
    pub fn new(options: EngineOptions, init: impl FnOnce(&mut FunctionsBuilder)) -> Result<Self, Error> {
        let mut builder = FunctionsBuilder::with_stdlib();
        init(&mut builder);
        let functions = builder.build()?;
        debug!(functions = functions.len(), "engine created");
        Ok(Self::with_functions(options, Arc::new(functions)))
    }

    /// Create an engine over an existing registry, without adding the standard library.
    pub fn with_functions(options: EngineOptions, functions: Arc<Functions>) -> Self {
        Self {
            coalescer: options.coalescing.coalescer(),
            functions,
            options,
        }
    }

    pub fn functions(&self) -> &Functions {
        &self.functions
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Run `program` over `document` with the given initial variables.
    pub fn run(&self, program: &Program, document: Value, variables: Variables) -> Result<Output, Error> {
        self.run_with_cancellation(program, document, variables, Cancellation::new())
    }

    /// Like [`run`](Self::run), stopping at the next function call once
    /// `cancellation` fires.
    ///
    /// Writes made before cancellation are lost along with the document.
    pub fn run_with_cancellation(
        &self,
        program: &Program,
        document: Value,
        variables: Variables,
        cancellation: Cancellation,
    ) -> Result<Output, Error> {
        let document = Document::new(document);
        let runtime = Rc::new(Interpreter::new(self.options.execution.max_depth));
        let ctx = Context::new(document.clone(), self.functions.clone(), self.coalescer.clone())
            .with_variables(variables)
            .with_cancellation(cancellation)
            .with_runtime(runtime);

        let (last, result) = evaluator::run(program, &ctx)?;
        drop(last);
        drop(ctx);
        Ok(Output {
            document: document.into_value(),
            result,
        })
    }
}
