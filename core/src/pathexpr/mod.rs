//! Generic get/set/delete over tree-shaped values.
//!
//! A [`Path`] is an ordered list of [`PathStep`]s, each either an object key or
//! a vector index. Reads walk the tree and fail on missing keys or indexes.
//! Writes rebuild the tree in place:
//!
//! - a `null` reached by a key step becomes an object holding the rest of the path
//! - a `null` never becomes a vector, and vectors never grow by index
//! - non-null scalars cannot be descended into
//!
//! Writes and deletes are atomic: when they fail, the target is left untouched.

mod eval;


pub use eval::evaluate;

use core::fmt;
use std::borrow::Cow;

use smallvec::SmallVec;
use thiserror::Error;

use crate::values::{Lookup, Object, Value};

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => write!(f, ".{}", key),
            PathStep::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}

/// An evaluated path expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: SmallVec<[PathStep; 4]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: impl Into<PathStep>) {
        self.steps.push(step.into());
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, ".");
        }
        for step in &self.steps {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl<S: Into<PathStep>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("index {index} out of bounds (length: {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("no such key: {key:?}")]
    MissingKey { key: String },

    #[error("cannot descend into {kind} with {step}")]
    CannotDescend { kind: &'static str, step: PathStep },

    #[error("negative index: {0}")]
    NegativeIndex(i64),

    #[error("invalid path step: {0}")]
    InvalidStep(String),
}

fn cannot_descend(value: &Value, step: &PathStep) -> PathError {
    PathError::CannotDescend {
        kind: value.type_name(),
        step: step.clone(),
    }
}

// ============================================================================
// Get
// ============================================================================

/// Read the value at `path`.
pub fn get(value: &Value, path: &Path) -> Result<Value, PathError> {
    let mut current = Cow::Borrowed(value);
    for step in path.steps() {
        current = match current {
            Cow::Borrowed(v) => descend(v, step)?,
            Cow::Owned(v) => Cow::Owned(descend(&v, step)?.into_owned()),
        };
    }
    Ok(current.into_owned())
}

fn descend<'a>(value: &'a Value, step: &PathStep) -> Result<Cow<'a, Value>, PathError> {
    match (value, step) {
        (Value::Vector(items), PathStep::Index(index)) => items
            .get(*index)
            .map(Cow::Borrowed)
            .ok_or(PathError::IndexOutOfBounds {
                index: *index,
                len: items.len(),
            }),
        (Value::Object(map), PathStep::Key(key)) => map
            .get(key)
            .map(Cow::Borrowed)
            .ok_or_else(|| PathError::MissingKey { key: key.clone() }),
        (Value::Host(host), PathStep::Key(key)) => match host.get_object_key(key) {
            Lookup::Found(found) => Ok(Cow::Owned(found)),
            Lookup::Missing => Err(PathError::MissingKey { key: key.clone() }),
            Lookup::Unsupported => match host.coalesce_to_object() {
                Some(map) => descend(&Value::Object(map), step).map(|v| Cow::Owned(v.into_owned())),
                None => Err(cannot_descend(value, step)),
            },
        },
        (Value::Host(host), PathStep::Index(index)) => match host.get_vector_item(*index) {
            Lookup::Found(found) => Ok(Cow::Owned(found)),
            Lookup::Missing => Err(PathError::IndexOutOfBounds {
                index: *index,
                len: 0,
            }),
            Lookup::Unsupported => match host.coalesce_to_vector() {
                Some(items) => {
                    descend(&Value::Vector(items), step).map(|v| Cow::Owned(v.into_owned()))
                }
                None => Err(cannot_descend(value, step)),
            },
        },
        _ => Err(cannot_descend(value, step)),
    }
}

// ============================================================================
// Set
// ============================================================================

/// Return `value` with `new_value` written at `path`.
pub fn set(mut value: Value, path: &Path, new_value: Value) -> Result<Value, PathError> {
    set_in_place(&mut value, path, new_value)?;
    Ok(value)
}

/// Write `new_value` at `path` inside `target`.
pub fn set_in_place(target: &mut Value, path: &Path, new_value: Value) -> Result<(), PathError> {
    check_settable(target, path.steps())?;
    write(target, path.steps(), new_value);
    Ok(())
}

/// Validate a write without touching anything.
fn check_settable(value: &Value, steps: &[PathStep]) -> Result<(), PathError> {
    let Some((step, rest)) = steps.split_first() else {
        return Ok(());
    };
    match (value, step) {
        // Everything below a null is created fresh, which only works for keys.
        (Value::Null, PathStep::Key(_)) => {
            match rest.iter().find(|s| matches!(s, PathStep::Index(_))) {
                Some(index) => Err(PathError::CannotDescend {
                    kind: "null",
                    step: index.clone(),
                }),
                None => Ok(()),
            }
        }
        (Value::Object(map), PathStep::Key(key)) => match map.get(key) {
            Some(child) => check_settable(child, rest),
            None => check_settable(&Value::Null, rest),
        },
        (Value::Vector(items), PathStep::Index(index)) => match items.get(*index) {
            Some(child) => check_settable(child, rest),
            None => Err(PathError::IndexOutOfBounds {
                index: *index,
                len: items.len(),
            }),
        },
        _ => Err(cannot_descend(value, step)),
    }
}

/// Perform a write that [`check_settable`] accepted.
fn write(target: &mut Value, steps: &[PathStep], new_value: Value) {
    let Some((step, rest)) = steps.split_first() else {
        *target = new_value;
        return;
    };
    if target.is_null() {
        *target = Value::Object(Object::new());
    }
    match (target, step) {
        (Value::Object(map), PathStep::Key(key)) => {
            let child = map.entry(key.clone()).or_insert(Value::Null);
            write(child, rest, new_value);
        }
        (Value::Vector(items), PathStep::Index(index)) => {
            if let Some(child) = items.get_mut(*index) {
                write(child, rest, new_value);
            }
        }
        _ => {}
    }
}

// ============================================================================
// Delete
// ============================================================================

/// Return `value` with the location at `path` removed.
pub fn delete(mut value: Value, path: &Path) -> Result<Value, PathError> {
    delete_in_place(&mut value, path)?;
    Ok(value)
}

/// Remove the location at `path` from `target`.
///
/// Removing an absent object key, or anything below an absent key, is a
/// no-op. Removing a vector index shifts the remaining items down. An empty
/// path clears the whole value to `null`.
pub fn delete_in_place(target: &mut Value, path: &Path) -> Result<(), PathError> {
    match path.steps().split_last() {
        None => {
            *target = Value::Null;
            Ok(())
        }
        Some((last, parents)) => remove(target, parents, last),
    }
}

fn remove(target: &mut Value, parents: &[PathStep], last: &PathStep) -> Result<(), PathError> {
    let Some((step, rest)) = parents.split_first() else {
        return remove_last(target, last);
    };
    match (target, step) {
        (Value::Null, PathStep::Key(_)) => Ok(()),
        (Value::Object(map), PathStep::Key(key)) => match map.get_mut(key) {
            Some(child) => remove(child, rest, last),
            None => Ok(()),
        },
        (Value::Vector(items), PathStep::Index(index)) => {
            let len = items.len();
            match items.get_mut(*index) {
                Some(child) => remove(child, rest, last),
                None => Err(PathError::IndexOutOfBounds { index: *index, len }),
            }
        }
        (other, step) => Err(cannot_descend(other, step)),
    }
}

fn remove_last(target: &mut Value, step: &PathStep) -> Result<(), PathError> {
    match (target, step) {
        (Value::Null, PathStep::Key(_)) => Ok(()),
        (Value::Object(map), PathStep::Key(key)) => {
            map.remove(key);
            Ok(())
        }
        (Value::Vector(items), PathStep::Index(index)) => {
            if *index >= items.len() {
                return Err(PathError::IndexOutOfBounds {
                    index: *index,
                    len: items.len(),
                });
            }
            items.remove(*index);
            Ok(())
        }
        (other, step) => Err(cannot_descend(other, step)),
    }
}
