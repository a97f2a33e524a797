//! Runtime evaluation errors.
//!
//! # Error Categories
//!
//! - **Runtime errors**: coercion, comparison, path, dispatch and user errors.
//!   They can be caught by the `try` function.
//!
//! - **Fatal errors**: cancellation and exceeded resource limits. They pass
//!   through `try` untouched so a program cannot hide them.

use thiserror::Error;

use crate::{
    coalescing::CoalesceError, dispatch::DispatchError, equality::ComparisonError,
    pathexpr::PathError,
};

/// Runtime evaluation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Coalesce(#[from] CoalesceError),

    #[error(transparent)]
    Comparison(#[from] ComparisonError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Raised explicitly by a program.
    #[error("{0}")]
    User(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    IntegerOverflow,

    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    #[error("unknown variable: ${0}")]
    UnknownVariable(String),

    #[error("evaluation cancelled")]
    Cancelled,

    #[error(transparent)]
    ResourceExceeded(#[from] ResourceExceeded),

    /// Positional context added while the error propagates.
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<ExecutionError>,
    },
}

/// Resource limit exceeded. Never caught by `try`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceExceeded {
    #[error("evaluation depth {depth} exceeds maximum of {max_depth}")]
    DepthExceeded { depth: usize, max_depth: usize },
}

impl ExecutionError {
    /// Wrap with a positional note such as `argument #2`.
    pub fn context(self, context: impl Into<String>) -> Self {
        ExecutionError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all context stripped.
    pub fn root(&self) -> &ExecutionError {
        let mut current = self;
        while let ExecutionError::Context { source, .. } = current {
            current = source;
        }
        current
    }

    /// Whether this error must propagate through `try`.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.root(),
            ExecutionError::Cancelled | ExecutionError::ResourceExceeded(_)
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.root(), ExecutionError::Cancelled)
    }
}
