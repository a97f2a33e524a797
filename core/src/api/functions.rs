//! Builder for the session-wide function registry.

use std::sync::Arc;

use crate::{
    context::Functions,
    dispatch::{DispatchError, Function, NativeFunctionBuilder},
    stdlib,
};

/// Collects the functions available to every program run by an
/// [`Engine`](super::Engine).
///
/// The first registration error is remembered and reported when the engine
/// is built, so registrations can be chained without checking each one.
///
/// # Example
///
/// ```
/// use rudi_core::api::{Engine, EngineOptions};
/// use rudi_core::dispatch::NativeFunction;
/// use rudi_core::ExecutionError;
///
/// let engine = Engine::new(EngineOptions::default(), |functions| {
///     functions.register_native(
///         "double",
///         NativeFunction::builder("Twice the argument.")
///             .form(|n: i64| -> Result<i64, ExecutionError> { Ok(n * 2) }),
///     );
/// })
/// .unwrap();
/// assert!(engine.functions().contains("double"));
/// ```
#[derive(Debug, Default)]
pub struct FunctionsBuilder {
    functions: Functions,
    error: Option<DispatchError>,
}

impl FunctionsBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder holding the standard library.
    pub fn with_stdlib() -> Self {
        let mut builder = Self::new();
        let registered = stdlib::register_stdlib(&mut builder.functions);
        builder.record(registered);
        builder
    }

    pub fn register(&mut self, name: &str, function: impl Function + 'static) -> &mut Self {
        let registered = self.functions.register(name, function);
        self.record(registered);
        self
    }

    /// Build and register a native function.
    pub fn register_native(&mut self, name: &str, builder: NativeFunctionBuilder) -> &mut Self {
        let registered = builder
            .build()
            .and_then(|function| self.functions.register(name, function));
        self.record(registered);
        self
    }

    /// Register a function that is already shared elsewhere.
    pub fn register_shared(&mut self, name: &str, function: Arc<dyn Function>) -> &mut Self {
        let registered = self.functions.register_shared(name, function);
        self.record(registered);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    fn record(&mut self, result: Result<(), DispatchError>) {
        if let Err(error) = result {
            self.error.get_or_insert(error);
        }
    }

    pub(crate) fn build(self) -> Result<Functions, DispatchError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.functions),
        }
    }
}
