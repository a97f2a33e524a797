//! Public API for embedding the Rudi engine.
//!
//! An [`Engine`] is configured once with [`EngineOptions`] and a function
//! registry, then runs any number of already-parsed programs, each over its
//! own document:
//!
//! 1. **Configure**: pick a coalescing strategy and resource limits
//! 2. **Register**: add host functions next to the standard library
//! 3. **Run**: evaluate a [`Program`](crate::Program) and collect the [`Output`]
//!
//! Failures surface as [`Error`], which implements [`miette::Diagnostic`].
//!
//! # Example
//!
//! ```
//! use rudi_core::api::{Engine, EngineOptions, Error};
//! use rudi_core::ast::Expression;
//! use rudi_core::dispatch::NativeFunction;
//! use rudi_core::{Coalescing, ExecutionError, Program, Value, Variables};
//!
//! let options = EngineOptions::default().with_coalescing(Coalescing::Humane);
//! let engine = Engine::new(options, |functions| {
//!     functions.register_native(
//!         "greet",
//!         NativeFunction::builder("Greets someone.")
//!             .form(|name: String| -> Result<String, ExecutionError> { Ok(format!("hi {}", name)) }),
//!     );
//! })
//! .unwrap();
//!
//! // Humane coalescing turns the number into a string.
//! let program: Program = vec![Expression::call("greet", vec![Expression::from(7)])]
//!     .into_iter()
//!     .collect();
//! let output = engine.run(&program, Value::Null, Variables::new()).unwrap();
//! assert_eq!(output.result, Value::from("hi 7"));
//!
//! let failing: Program = vec![Expression::call("nope", vec![])].into_iter().collect();
//! let err = engine.run(&failing, Value::Null, Variables::new()).unwrap_err();
//! assert!(matches!(err, Error::Runtime(_)));
//! ```

pub mod engine;
pub mod error;
pub mod functions;
pub mod options;


pub use engine::{Engine, Output};
pub use error::Error;
pub use functions::FunctionsBuilder;
pub use options::{CoalescingOption, EngineOptions, ExecutionOptions};
