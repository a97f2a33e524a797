//! Configuration options for the Rudi engine.

use core::fmt;
use std::sync::Arc;

use crate::coalescing::{Coalescer, Coalescing};

/// Configuration options for program execution.
///
/// These options control resource limits during evaluation.
///
/// # Example
///
/// ```
/// use rudi_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions { max_depth: 500 };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum nesting of expressions being evaluated at once.
    ///
    /// Default: 1000
    pub max_depth: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self { max_depth: 1000 }
    }
}

/// How call arguments are converted to the kinds functions ask for.
#[derive(Clone)]
pub enum CoalescingOption {
    Builtin(Coalescing),
    Custom(Arc<dyn Coalescer>),
}

impl CoalescingOption {
    pub fn coalescer(&self) -> Arc<dyn Coalescer> {
        match self {
            CoalescingOption::Builtin(coalescing) => coalescing.coalescer(),
            CoalescingOption::Custom(coalescer) => coalescer.clone(),
        }
    }
}

impl Default for CoalescingOption {
    fn default() -> Self {
        CoalescingOption::Builtin(Coalescing::default())
    }
}

impl From<Coalescing> for CoalescingOption {
    fn from(coalescing: Coalescing) -> Self {
        CoalescingOption::Builtin(coalescing)
    }
}

impl From<Arc<dyn Coalescer>> for CoalescingOption {
    fn from(coalescer: Arc<dyn Coalescer>) -> Self {
        CoalescingOption::Custom(coalescer)
    }
}

impl fmt::Debug for CoalescingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoalescingOption::Builtin(coalescing) => write!(f, "{:?}", coalescing),
            CoalescingOption::Custom(coalescer) => write!(f, "Custom({})", coalescer.name()),
        }
    }
}

/// Configuration options for the Rudi engine.
///
/// # Example
///
/// ```
/// use rudi_core::api::{EngineOptions, ExecutionOptions};
/// use rudi_core::Coalescing;
///
/// let options = EngineOptions {
///     coalescing: Coalescing::Humane.into(),
///     execution: ExecutionOptions { max_depth: 500 },
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Coalescing used by every run. Default: strict.
    pub coalescing: CoalescingOption,

    /// Limits applied to every run.
    pub execution: ExecutionOptions,
}

impl EngineOptions {
    pub fn with_coalescing(self, coalescing: impl Into<CoalescingOption>) -> Self {
        Self {
            coalescing: coalescing.into(),
            ..self
        }
    }

    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self {
            execution: ExecutionOptions { max_depth },
            ..self
        }
    }
}
