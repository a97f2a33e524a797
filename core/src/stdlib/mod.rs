//! Rudi Standard Library
//!
//! A small set of functions registered before user code runs:
//! - Control: `set`, `delete`, `if`, `do`, `try`, `default`, `error`, `has?`
//! - Comparison: `eq?`, `like?`, `lt?`, `lte?`, `gt?`, `gte?`
//! - Math: `+`, `-`, `*`, `/`
//! - String: `concat`, `len`, `to-upper`, `to-lower`, `trim`
//! - Logic: `not`, `and`, `or`
//! - Types: `type-of`, `to-string`, `to-int`, `to-float`, `to-number`, `to-bool`
//! - Lists: `map`
//!
//! Each package registers [`NativeFunction`](crate::dispatch::NativeFunction)
//! forms where the arguments can be described by parameter types, and
//! [`RawFunction`](crate::dispatch::RawFunction)s where evaluation order is
//! part of the semantics.

use crate::{
    ast::{Expression, Symbol},
    context::Functions,
    dispatch::DispatchError,
    evaluator::ExecutionError,
};

pub mod comparison;
pub mod control;
pub mod lists;
pub mod logic;
pub mod math;
pub mod string;
pub mod types;

#[cfg(test)]
mod control_test;
#[cfg(test)]
mod lists_test;
#[cfg(test)]
mod math_test;

type Res<T> = Result<T, ExecutionError>;

/// Register every standard library package.
///
/// # Example
///
/// ```
/// use rudi_core::{stdlib, Functions};
///
/// let mut functions = Functions::new();
/// stdlib::register_stdlib(&mut functions).expect("stdlib registration should succeed");
/// assert!(functions.contains("map"));
/// ```
///
/// Packages can also be registered individually through each module's
/// `register` function.
pub fn register_stdlib(functions: &mut Functions) -> Result<(), DispatchError> {
    control::register(functions)?;
    comparison::register(functions)?;
    math::register(functions)?;
    string::register(functions)?;
    logic::register(functions)?;
    types::register(functions)?;
    lists::register(functions)?;
    Ok(())
}

/// The symbol a function argument must be.
fn expect_symbol<'a>(function: &str, expression: &'a Expression) -> Res<&'a Symbol> {
    expression.as_symbol().ok_or_else(|| {
        ExecutionError::InvalidExpression(format!(
            "{} expects a variable or document path, got {}",
            function, expression
        ))
    })
}
