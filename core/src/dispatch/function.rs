use core::fmt;

use tracing::{debug, trace};

use super::{ArgCursor, Argument, BangHandler, DispatchError, Form, Function, IntoForm};
use crate::{
    ast::{Expression, Symbol},
    context::Context,
    evaluator::ExecutionError,
    pathexpr::Path,
    values::Value,
};

type RawBody = dyn Fn(&Context, &[Expression]) -> Result<Value, ExecutionError> + Send + Sync;

/// A function that handles its argument expressions itself.
///
/// Used where evaluation order matters (`if`, `and`, `try`) or where
/// arguments must be inspected before they are evaluated.
pub struct RawFunction {
    description: String,
    body: Box<RawBody>,
    bang_handler: Option<Box<BangHandler>>,
}

impl RawFunction {
    pub fn new<F>(description: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Context, &[Expression]) -> Result<Value, ExecutionError> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            body: Box::new(body),
            bang_handler: None,
        }
    }

    pub fn with_bang_handler<H>(self, handler: H) -> Self
    where
        H: Fn(&Context, &Symbol, &Path, Value) -> Result<(Context, Value), ExecutionError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            bang_handler: Some(Box::new(handler)),
            ..self
        }
    }
}

impl Function for RawFunction {
    fn evaluate(&self, ctx: &Context, args: &[Expression]) -> Result<Value, ExecutionError> {
        (self.body)(ctx, args)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn bang_handler(&self) -> Option<&BangHandler> {
        self.bang_handler.as_deref()
    }
}

impl fmt::Debug for RawFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFunction")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A function made of typed forms, tried in declaration order.
pub struct NativeFunction {
    description: String,
    forms: Vec<Form>,
    bang_handler: Option<Box<BangHandler>>,
}

impl NativeFunction {
    pub fn builder(description: impl Into<String>) -> NativeFunctionBuilder {
        NativeFunctionBuilder {
            description: description.into(),
            forms: Vec::new(),
            bang_handler: None,
            error: None,
        }
    }

    pub fn forms(&self) -> &[Form] {
        &self.forms
    }
}

impl Function for NativeFunction {
    fn evaluate(&self, ctx: &Context, args: &[Expression]) -> Result<Value, ExecutionError> {
        let arguments: Vec<Argument<'_>> = args
            .iter()
            .enumerate()
            .map(|(position, expression)| Argument::new(ctx, expression, position))
            .collect();

        for (index, form) in self.forms.iter().enumerate() {
            let mut cursor = ArgCursor::new(ctx, &arguments);
            if let Some(value) = form.invoke(&mut cursor)? {
                trace!(form = index, "form matched");
                return Ok(value);
            }
        }

        let candidates: Vec<String> = self.forms.iter().map(Form::signature).collect();
        let args = describe(&arguments);
        debug!(%args, "no matching form");
        Err(DispatchError::NoMatchingForm { args, candidates }.into())
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn bang_handler(&self) -> Option<&BangHandler> {
        self.bang_handler.as_deref()
    }
}

/// Argument types as far as dispatch got to see them.
fn describe(arguments: &[Argument<'_>]) -> String {
    let kinds: Vec<&str> = arguments
        .iter()
        .map(|arg| match arg.evaluated() {
            Some(Ok(value)) => value.type_name(),
            _ => "expression",
        })
        .collect();
    kinds.join(" ")
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("description", &self.description)
            .field("forms", &self.forms)
            .finish_non_exhaustive()
    }
}

/// Collects forms for a [`NativeFunction`].
///
/// The first invalid form is remembered and reported by [`build`](Self::build).
pub struct NativeFunctionBuilder {
    description: String,
    forms: Vec<Form>,
    bang_handler: Option<Box<BangHandler>>,
    error: Option<DispatchError>,
}

impl NativeFunctionBuilder {
    pub fn form<Args, F: IntoForm<Args>>(mut self, form: F) -> Self {
        if self.error.is_none() {
            match form.into_form() {
                Ok(form) => self.forms.push(form),
                Err(error) => self.error = Some(error),
            }
        }
        self
    }

    pub fn bang_handler<H>(mut self, handler: H) -> Self
    where
        H: Fn(&Context, &Symbol, &Path, Value) -> Result<(Context, Value), ExecutionError>
            + Send
            + Sync
            + 'static,
    {
        self.bang_handler = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> Result<NativeFunction, DispatchError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.forms.is_empty() {
            return Err(DispatchError::NoForms);
        }
        Ok(NativeFunction {
            description: self.description,
            forms: self.forms,
            bang_handler: self.bang_handler,
        })
    }
}
