//! Rudi - An embeddable evaluation engine for document programs
//!
//! # Overview
//!
//! Rudi runs already-parsed programs over a JSON-like document. Programs call
//! functions, read and write paths into the document, and bind variables.
//! Common use cases include:
//!
//! - Data transformations and mappings
//! - Configuration templating
//! - Business rules over structured records
//!
//! The engine is dynamically typed. Every function declares typed forms and
//! the active coalescing strategy decides how arguments are converted to fit
//! them.
//!
//! # Quick Start
//!
//! ```
//! use rudi::{Engine, EngineOptions, Expression, Program, Value, Variables};
//!
//! let engine = Engine::new(EngineOptions::default(), |_| {}).unwrap();
//!
//! // (set! .total (* $price $quantity))
//! let program: Program = vec![Expression::bang(
//!     "set",
//!     vec![
//!         Expression::doc_path(vec![Expression::ident("total")]),
//!         Expression::call("*", vec![Expression::var("price"), Expression::var("quantity")]),
//!     ],
//! )]
//! .into_iter()
//! .collect();
//!
//! let variables: Variables = [("price", Value::int(3)), ("quantity", Value::int(4))]
//!     .into_iter()
//!     .collect();
//! let output = engine.run(&program, Value::Null, variables).unwrap();
//! assert_eq!(output.document.to_string(), r#"{"total" 12}"#);
//! ```
//!
//! # Host Functions
//!
//! Register native Rust functions with typed forms; the first form whose
//! parameters fit the arguments wins:
//!
//! ```
//! use rudi::{Engine, EngineOptions, ExecutionError, NativeFunction, Variadic};
//!
//! let engine = Engine::new(EngineOptions::default(), |functions| {
//!     functions.register_native(
//!         "max",
//!         NativeFunction::builder("Largest argument.")
//!             .form(|first: i64, Variadic(rest): Variadic<i64>| -> Result<i64, ExecutionError> {
//!                 Ok(rest.into_iter().fold(first, i64::max))
//!             }),
//!     );
//! })
//! .unwrap();
//! assert_eq!(engine.functions().description("max"), Some("Largest argument."));
//! ```

mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export public API from rudi_core
pub use rudi_core::api::{
    CoalescingOption, Engine, EngineOptions, Error, ExecutionOptions, FunctionsBuilder, Output,
};

// Re-export commonly used types and values
pub use rudi_core::ast::{self, Expression, Program};
pub use rudi_core::coalescing::{self, Coalescer, Coalescing};
pub use rudi_core::context::{Cancellation, Context, Functions, Variables};
pub use rudi_core::dispatch::{self, Function, NativeFunction, RawFunction, Variadic};
pub use rudi_core::values::{self, HostValue, Number, Object, Value};

// Re-export errors
pub use rudi_core::evaluator::ExecutionError;
