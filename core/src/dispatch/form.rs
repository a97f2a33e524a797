use core::fmt;

use super::{ArgCursor, DispatchError, ParamDescriptor, ParamKind, Parameter};
use crate::{evaluator::ExecutionError, values::Value};

type Invoke =
    dyn for<'a> Fn(&mut ArgCursor<'a>) -> Result<Option<Value>, ExecutionError> + Send + Sync;

/// One overload of a native function.
pub struct Form {
    params: Vec<ParamDescriptor>,
    invoke: Box<Invoke>,
}

impl Form {
    /// Validate `params` and wrap `invoke`.
    ///
    /// A variadic parameter must come last, and the context cannot be variadic.
    pub fn new<F>(params: Vec<ParamDescriptor>, invoke: F) -> Result<Self, DispatchError>
    where
        F: for<'a> Fn(&mut ArgCursor<'a>) -> Result<Option<Value>, ExecutionError>
            + Send
            + Sync
            + 'static,
    {
        let invalid = |reason| DispatchError::InvalidSignature {
            signature: signature(&params),
            reason,
        };
        if let Some(position) = params.iter().position(|p| p.variadic) {
            if position + 1 != params.len() {
                return Err(invalid("variadic parameter must be last"));
            }
            if params[position].kind == ParamKind::Context {
                return Err(invalid("context parameter cannot be variadic"));
            }
        }
        Ok(Self {
            params,
            invoke: Box::new(invoke),
        })
    }

    pub fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    /// Consume the arguments and call through. `Ok(None)` means no match.
    pub fn invoke(&self, cursor: &mut ArgCursor<'_>) -> Result<Option<Value>, ExecutionError> {
        (self.invoke)(cursor)
    }

    pub fn signature(&self) -> String {
        signature(&self.params)
    }
}

fn signature(params: &[ParamDescriptor]) -> String {
    let shown: Vec<String> = params
        .iter()
        .filter(|p| p.kind != ParamKind::Context)
        .map(ToString::to_string)
        .collect();
    format!("({})", shown.join(" "))
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Form{}", self.signature())
    }
}

/// The result shape a form must return.
pub trait FormOutput {
    fn into_result(self) -> Result<Value, ExecutionError>;
}

impl<T, E> FormOutput for Result<T, E>
where
    T: Into<Value>,
    E: Into<ExecutionError>,
{
    fn into_result(self) -> Result<Value, ExecutionError> {
        self.map(Into::into).map_err(Into::into)
    }
}

/// Closures and functions convertible into a [`Form`].
///
/// Implemented for `Fn(A1, .., An) -> R` with up to eight [`Parameter`]s and
/// an `R` of `Result<impl Into<Value>, impl Into<ExecutionError>>`.
pub trait IntoForm<Args>: Send + Sync + 'static {
    fn into_form(self) -> Result<Form, DispatchError>;
}

macro_rules! impl_into_form {
    ($($param:ident),*) => {
        impl<Func, Out, $($param,)*> IntoForm<($($param,)*)> for Func
        where
            Func: Fn($($param),*) -> Out + Send + Sync + 'static,
            Out: FormOutput,
            $($param: Parameter + 'static,)*
        {
            #[allow(non_snake_case, unused_variables)]
            fn into_form(self) -> Result<Form, DispatchError> {
                let params = vec![$(<$param as Parameter>::descriptor()),*];
                Form::new(params, move |cursor| {
                    $(
                        let Some($param) = <$param as Parameter>::consume(cursor)? else {
                            return Ok(None);
                        };
                    )*
                    if cursor.remaining() > 0 {
                        return Ok(None);
                    }
                    (self)($($param),*).into_result().map(Some)
                })
            }
        }
    };
}

impl_into_form!();
impl_into_form!(A1);
impl_into_form!(A1, A2);
impl_into_form!(A1, A2, A3);
impl_into_form!(A1, A2, A3, A4);
impl_into_form!(A1, A2, A3, A4, A5);
impl_into_form!(A1, A2, A3, A4, A5, A6);
impl_into_form!(A1, A2, A3, A4, A5, A6, A7);
impl_into_form!(A1, A2, A3, A4, A5, A6, A7, A8);
