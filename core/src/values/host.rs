//! Capabilities for host-defined values.
//!
//! A host application can hand the engine values of its own types without
//! converting them into native vectors and objects first. Every hook is
//! optional: returning `None` (or [`Lookup::Unsupported`]) means the type does
//! not offer that capability, and the engine falls back to its default behavior
//! for opaque values, which is to reject the conversion.

use core::fmt;

use super::value::{Object, Value};

/// Result of a read-capability lookup on a host value.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// The key or index exists.
    Found(Value),
    /// The container is traversable, but the key or index does not exist.
    Missing,
    /// The value cannot be traversed this way.
    Unsupported,
}

/// A value owned by the host application.
pub trait HostValue: fmt::Debug + Send + Sync {
    /// Name used in error messages.
    fn type_name(&self) -> &'static str;

    /// Whether the value is equivalent to `null`.
    fn coalesce_to_null(&self) -> bool {
        false
    }

    fn coalesce_to_bool(&self) -> Option<bool> {
        None
    }

    fn coalesce_to_int64(&self) -> Option<i64> {
        None
    }

    fn coalesce_to_float64(&self) -> Option<f64> {
        None
    }

    fn coalesce_to_string(&self) -> Option<String> {
        None
    }

    fn coalesce_to_vector(&self) -> Option<Vec<Value>> {
        None
    }

    fn coalesce_to_object(&self) -> Option<Object> {
        None
    }

    /// Read a named field without converting the whole value.
    fn get_object_key(&self, _key: &str) -> Lookup {
        Lookup::Unsupported
    }

    /// Read a positional item without converting the whole value.
    fn get_vector_item(&self, _index: usize) -> Lookup {
        Lookup::Unsupported
    }
}
