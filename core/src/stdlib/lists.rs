//! Lists Package
//!
//! `map` over vectors and objects, either with a named function:
//!
//! ```text
//! (map $names to-upper)
//! ```
//!
//! or with a naming vector and a body evaluated once per element, in a scope
//! where the names are bound:
//!
//! ```text
//! (map $items [$item] (+ $item 1))
//! (map $prices [$key $price] (concat $key "=" (to-string $price)))
//! ```
//!
//! For vectors the key is the element index. Objects keep their keys.

use super::Res;
use crate::{
    ast::{Expression, Identifier, VectorNode},
    context::{Context, Functions},
    dispatch::{DispatchError, NativeFunction},
    evaluator::ExecutionError,
    values::{Object, Value},
};

pub fn register(functions: &mut Functions) -> Result<(), DispatchError> {
    functions.register(
        "map",
        NativeFunction::builder("Transforms every element of a vector or object.")
            .form(|ctx: Context, collection: Value, function: Expression| -> Res<Value> {
                let identifier = match function {
                    Expression::Identifier(identifier) => identifier,
                    other => {
                        return Err(ExecutionError::InvalidExpression(format!(
                            "map expects a function name, got {}",
                            other
                        )));
                    }
                };
                map(&ctx, collection, |_, item| apply(&ctx, &identifier, item))
            })
            .form(
                |ctx: Context, collection: Value, names: Expression, body: Expression| -> Res<Value> {
                    let (key_name, value_name) = binding_names(&names)?;
                    map(&ctx, collection, |key, item| {
                        let mut scope = ctx.with_variable(value_name.clone(), item);
                        if let Some(key_name) = &key_name {
                            scope = scope.with_variable(key_name.clone(), key);
                        }
                        scope.evaluate_value(&body)
                    })
                },
            )
            .build()?,
    )
}

/// Apply `f(key, item)` to each element, keeping the container kind.
fn map(ctx: &Context, collection: Value, mut f: impl FnMut(Value, Value) -> Res<Value>) -> Res<Value> {
    match collection {
        Value::Object(map) => {
            let mut out = Object::with_capacity(map.len());
            for (key, item) in map {
                let mapped = f(Value::from(key.as_str()), item)
                    .map_err(|e| e.context(format!("key {:?}", key)))?;
                out.insert(key, mapped);
            }
            Ok(Value::Object(out))
        }
        other => {
            let items = ctx.coalescer().to_vector(&other)?;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                let mapped = f(Value::int(i as i64), item)
                    .map_err(|e| e.context(format!("element #{}", i)))?;
                out.push(mapped);
            }
            Ok(Value::Vector(out))
        }
    }
}

fn apply(ctx: &Context, identifier: &Identifier, item: Value) -> Res<Value> {
    let arg = Expression::literal(item).ok_or_else(|| {
        ExecutionError::InvalidExpression(format!("cannot pass a host value to {}", identifier))
    })?;
    let call = Identifier {
        name: identifier.name.clone(),
        bang: false,
    };
    ctx.call_function(&call, &[arg]).map(|(_, value)| value)
}

/// `[$value]` or `[$key $value]`.
fn binding_names(names: &Expression) -> Res<(Option<String>, String)> {
    let invalid = || {
        ExecutionError::InvalidExpression(format!(
            "map expects [$value] or [$key $value], got {}",
            names
        ))
    };
    let Expression::VectorNode(VectorNode {
        expressions,
        path: None,
    }) = names
    else {
        return Err(invalid());
    };
    let mut variables = expressions.iter().map(|expression| match expression {
        Expression::Symbol(symbol) if symbol.path.is_none() => symbol.variable.clone(),
        _ => None,
    });
    match (variables.next(), variables.next(), variables.next()) {
        (Some(Some(value)), None, None) => Ok((None, value)),
        (Some(Some(key)), Some(Some(value)), None) => Ok((Some(key), value)),
        _ => Err(invalid()),
    }
}
