//! Rudi core: the evaluation engine.
//!
//! The engine walks an already-parsed program over a mutable document, binding
//! typed native functions to dynamically-typed call arguments under a
//! configurable coalescing policy.

pub mod api;
pub mod ast;
pub mod coalescing;
pub mod context;
pub mod dispatch;
pub mod equality;
pub mod evaluator;
pub mod pathexpr;
pub mod stdlib;
pub mod values;

pub use ast::{Expression, Program};
pub use coalescing::{Coalescer, Coalescing};
pub use context::{Cancellation, Context, Document, Functions, Variables};
pub use evaluator::ExecutionError;
pub use values::{Number, Object, Value};

static_assertions::assert_impl_all!(Value: Send, Sync);
static_assertions::assert_impl_all!(Functions: Send, Sync);
static_assertions::assert_impl_all!(api::Engine: Send, Sync);
