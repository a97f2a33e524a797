//! Public error type for the Rudi API.
//!
//! Internal errors are classified into these variants at the API boundary so
//! hosts can tell a broken setup from a failing program, and a failing program
//! from one that was stopped.

use miette::Diagnostic;
use thiserror::Error;

use crate::{dispatch::DispatchError, evaluator::ExecutionError};

/// Public error type for all Rudi operations.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum Error {
    /// Invalid API usage, such as a function registered twice.
    #[error("API error: {0}")]
    #[diagnostic(code(rudi::api))]
    Api(#[from] DispatchError),

    /// The program failed. Carries the full positional chain.
    #[error("Runtime error: {0}")]
    #[diagnostic(code(rudi::runtime))]
    Runtime(ExecutionError),

    /// The host cancelled the run or its deadline passed.
    #[error("Cancelled: {0}")]
    #[diagnostic(
        code(rudi::cancelled),
        help("the program was stopped between function calls; the document may be partially updated")
    )]
    Cancelled(ExecutionError),

    /// Resource limits exceeded, e.g. evaluation depth.
    #[error("Resource limit exceeded: {0}")]
    #[diagnostic(
        code(rudi::resource_exceeded),
        help("raise `ExecutionOptions::max_depth` or reduce nesting")
    )]
    ResourceExceeded(ExecutionError),
}

impl Error {
    /// The underlying evaluation error, if the program itself failed.
    pub fn execution_error(&self) -> Option<&ExecutionError> {
        match self {
            Error::Api(_) => None,
            Error::Runtime(e) | Error::Cancelled(e) | Error::ResourceExceeded(e) => Some(e),
        }
    }
}

impl From<ExecutionError> for Error {
    fn from(err: ExecutionError) -> Self {
        match err.root() {
            ExecutionError::Cancelled => Error::Cancelled(err),
            ExecutionError::ResourceExceeded(_) => Error::ResourceExceeded(err),
            _ => Error::Runtime(err),
        }
    }
}
