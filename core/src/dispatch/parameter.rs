use core::fmt;

use super::ArgCursor;
use crate::{
    ast::Expression,
    context::Context,
    evaluator::ExecutionError,
    values::{Number, Object, Value},
};

/// What a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Int64,
    Float64,
    Number,
    String,
    Vector,
    Object,
    /// Any evaluated value, uncoerced.
    Any,
    /// The unevaluated expression.
    Expression,
    /// The calling context. Consumes no argument.
    Context,
}

impl ParamKind {
    pub fn name(self) -> &'static str {
        match self {
            ParamKind::Bool => "bool",
            ParamKind::Int64 => "int64",
            ParamKind::Float64 => "float64",
            ParamKind::Number => "number",
            ParamKind::String => "string",
            ParamKind::Vector => "vector",
            ParamKind::Object => "object",
            ParamKind::Any => "any",
            ParamKind::Expression => "expression",
            ParamKind::Context => "context",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Declarative description of one formal parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub kind: ParamKind,
    pub variadic: bool,
}

impl ParamDescriptor {
    pub const fn new(kind: ParamKind) -> Self {
        Self {
            kind,
            variadic: false,
        }
    }
}

impl fmt::Display for ParamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.variadic {
            write!(f, "...")?;
        }
        write!(f, "{}", self.kind)
    }
}

/// A type usable as a form parameter.
///
/// `consume` returns `Ok(None)` when the next argument does not fit, which
/// rules out the form without failing the call.
pub trait Parameter: Sized {
    fn descriptor() -> ParamDescriptor;

    fn consume(cursor: &mut ArgCursor<'_>) -> Result<Option<Self>, ExecutionError>;
}

macro_rules! coalesced_parameter {
    ($ty:ty, $kind:ident, $convert:ident) => {
        impl Parameter for $ty {
            fn descriptor() -> ParamDescriptor {
                ParamDescriptor::new(ParamKind::$kind)
            }

            fn consume(cursor: &mut ArgCursor<'_>) -> Result<Option<Self>, ExecutionError> {
                let coalescer = cursor.context().coalescer();
                cursor.consume_with(|arg| Ok(coalescer.$convert(arg.value()?).ok()))
            }
        }
    };
}

coalesced_parameter!(bool, Bool, to_bool);
coalesced_parameter!(i64, Int64, to_int64);
coalesced_parameter!(f64, Float64, to_float64);
coalesced_parameter!(Number, Number, to_number);
coalesced_parameter!(String, String, to_string);
coalesced_parameter!(Vec<Value>, Vector, to_vector);
coalesced_parameter!(Object, Object, to_object);

impl Parameter for Value {
    fn descriptor() -> ParamDescriptor {
        ParamDescriptor::new(ParamKind::Any)
    }

    fn consume(cursor: &mut ArgCursor<'_>) -> Result<Option<Self>, ExecutionError> {
        cursor.consume_with(|arg| arg.value().map(|value| Some(value.clone())))
    }
}

impl Parameter for Expression {
    fn descriptor() -> ParamDescriptor {
        ParamDescriptor::new(ParamKind::Expression)
    }

    fn consume(cursor: &mut ArgCursor<'_>) -> Result<Option<Self>, ExecutionError> {
        cursor.consume_with(|arg| Ok(Some(arg.expression().clone())))
    }
}

impl Parameter for Context {
    fn descriptor() -> ParamDescriptor {
        ParamDescriptor::new(ParamKind::Context)
    }

    fn consume(cursor: &mut ArgCursor<'_>) -> Result<Option<Self>, ExecutionError> {
        Ok(Some(cursor.context().clone()))
    }
}

/// All remaining arguments, each consumed as `T`.
///
/// Matches only when every remaining argument fits. Must be the last parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Variadic<T>(pub Vec<T>);

impl<T: Parameter> Parameter for Variadic<T> {
    fn descriptor() -> ParamDescriptor {
        ParamDescriptor {
            kind: T::descriptor().kind,
            variadic: true,
        }
    }

    fn consume(cursor: &mut ArgCursor<'_>) -> Result<Option<Self>, ExecutionError> {
        let mut items = Vec::with_capacity(cursor.remaining());
        while cursor.remaining() > 0 {
            match T::consume(cursor)? {
                Some(item) => items.push(item),
                None => return Ok(None),
            }
        }
        Ok(Some(Variadic(items)))
    }
}
