use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use crate::pathexpr::{self, Path, PathError};
use crate::values::Value;

/// The document a program runs over.
///
/// Every [`Context`](super::Context) derived from the same root shares one
/// document. Writes through any of them are visible to all of them, including
/// after a nested scope has been discarded.
#[derive(Clone, Default)]
pub struct Document {
    cell: Rc<RefCell<Value>>,
}

impl Document {
    pub fn new(value: Value) -> Self {
        Self {
            cell: Rc::new(RefCell::new(value)),
        }
    }

    /// A copy of the whole document.
    pub fn get(&self) -> Value {
        self.cell.borrow().clone()
    }

    /// Replace the whole document.
    pub fn set(&self, value: Value) {
        *self.cell.borrow_mut() = value;
    }

    pub fn get_path(&self, path: &Path) -> Result<Value, PathError> {
        pathexpr::get(&self.cell.borrow(), path)
    }

    pub fn set_path(&self, path: &Path, value: Value) -> Result<(), PathError> {
        pathexpr::set_in_place(&mut self.cell.borrow_mut(), path, value)
    }

    pub fn delete_path(&self, path: &Path) -> Result<(), PathError> {
        pathexpr::delete_in_place(&mut self.cell.borrow_mut(), path)
    }

    /// Whether both handles point at the same document.
    pub fn shares_with(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// The final value, without copying when this is the last handle.
    pub fn into_value(self) -> Value {
        match Rc::try_unwrap(self.cell) {
            Ok(cell) => cell.into_inner(),
            Err(shared) => shared.borrow().clone(),
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Document").field(&*self.cell.borrow()).finish()
    }
}
