use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use tracing::debug;

use crate::dispatch::{DispatchError, Function};

/// Registry of callable functions, shared by every context of a session.
#[derive(Clone, Default)]
pub struct Functions {
    entries: HashMap<String, Arc<dyn Function>>,
}

impl Functions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `function` under `name`.
    ///
    /// Names must be non-empty and unique within the registry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        function: impl Function + 'static,
    ) -> Result<(), DispatchError> {
        self.register_shared(name, Arc::new(function))
    }

    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        function: Arc<dyn Function>,
    ) -> Result<(), DispatchError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DispatchError::EmptyName);
        }
        if self.entries.contains_key(&name) {
            return Err(DispatchError::DuplicateFunction(name));
        }
        debug!(name = %name, "registering function");
        self.entries.insert(name, function);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Function>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|function| function.description())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
