//! Binding call arguments to functions.
//!
//! A [`Function`] receives its argument expressions unevaluated. Most functions
//! are [`NativeFunction`]s: one or more ordinary Rust closures ("forms") whose
//! parameter types describe how each argument is consumed. Dispatch tries the
//! forms in declaration order and calls the first whose parameters consume
//! every argument.
//!
//! ```
//! use rudi_core::dispatch::{NativeFunction, Variadic};
//! use rudi_core::ExecutionError;
//!
//! let sum = NativeFunction::builder("Adds numbers.")
//!     .form(|Variadic(xs): Variadic<i64>| -> Result<i64, ExecutionError> {
//!         Ok(xs.iter().sum())
//!     })
//!     .form(|Variadic(xs): Variadic<f64>| -> Result<f64, ExecutionError> {
//!         Ok(xs.iter().sum())
//!     })
//!     .build()
//!     .unwrap();
//! # let _ = sum;
//! ```
//!
//! Each argument is evaluated at most once per call, however many forms are
//! probed. A failed coercion is not an error, it only rules the form out. An
//! evaluation error aborts the call.
//!
//! Functions that need full control implement [`Function`] directly or wrap a
//! closure in a [`RawFunction`].

mod argument;
mod form;
mod function;
mod parameter;

#[cfg(test)]
mod dispatch_test;

pub use argument::{ArgCursor, Argument};
pub use form::{Form, FormOutput, IntoForm};
pub use function::{NativeFunction, NativeFunctionBuilder, RawFunction};
pub use parameter::{ParamDescriptor, ParamKind, Parameter, Variadic};

use thiserror::Error;

use crate::{
    ast::{Expression, Symbol},
    context::Context,
    evaluator::ExecutionError,
    pathexpr::Path,
    values::Value,
};

/// A callable registered in [`Functions`](crate::context::Functions).
pub trait Function: Send + Sync {
    /// Run the function over unevaluated argument expressions.
    fn evaluate(&self, ctx: &Context, args: &[Expression]) -> Result<Value, ExecutionError>;

    /// One-line human description.
    fn description(&self) -> &str;

    /// Custom write-back for `name!` calls. `None` uses the generic write-back.
    fn bang_handler(&self) -> Option<&BangHandler> {
        None
    }
}

/// Writes a bang call's result back to its target symbol.
///
/// Receives the calling context, the target symbol (argument #0), the target
/// path as resolved once before the call, and the function's result. Returns
/// the context to continue with.
pub type BangHandler = dyn Fn(&Context, &Symbol, &Path, Value) -> Result<(Context, Value), ExecutionError>
    + Send
    + Sync;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("no form matches arguments ({args}); candidates: {}", .candidates.join(", "))]
    NoMatchingForm {
        args: String,
        candidates: Vec<String>,
    },

    #[error("invalid signature {signature}: {reason}")]
    InvalidSignature {
        signature: String,
        reason: &'static str,
    },

    #[error("function already registered: {0}")]
    DuplicateFunction(String),

    #[error("function name cannot be empty")]
    EmptyName,

    #[error("function has no forms")]
    NoForms,
}
