use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::{
    coalescing::Coalescing,
    context::{Document, Functions},
    test_utils,
};
use pretty_assertions::assert_eq;

type Res<T> = Result<T, ExecutionError>;

/// Registry with a `tick` function counting its own invocations.
fn functions_with_counter() -> (Functions, Arc<AtomicUsize>) {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut functions = test_utils::stdlib_functions();
    let ticks = counter.clone();
    functions
        .register(
            "tick",
            RawFunction::new("Counts calls.", move |_, _| {
                let n = ticks.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(Value::from(n as i64))
            }),
        )
        .unwrap();
    (functions, counter)
}

fn run(functions: Functions, expr: &Expression) -> Res<Value> {
    let ctx = Context::new(
        Document::default(),
        Arc::new(functions),
        Coalescing::Strict.coalescer(),
    );
    ctx.evaluate_value(expr)
}

fn call(name: &str, args: Vec<Expression>) -> Expression {
    Expression::call(name, args)
}

#[test]
fn test_first_matching_form_wins() {
    let (mut functions, _) = functions_with_counter();
    let f = NativeFunction::builder("Two overlapping forms.")
        .form(|_a: String, _b: String| -> Res<&'static str> { Ok("fixed") })
        .form(|_a: String, _b: String, Variadic(rest): Variadic<i64>| -> Res<String> {
            Ok(format!("variadic {}", rest.len()))
        })
        .build()
        .unwrap();
    functions.register("f", f).unwrap();

    let two = call("f", vec!["a".into(), "b".into()]);
    assert_eq!(run(functions.clone(), &two), Ok(Value::from("fixed")));

    let three = call("f", vec!["a".into(), "b".into(), 1.into()]);
    assert_eq!(run(functions, &three), Ok(Value::from("variadic 1")));
}

#[test]
fn test_arguments_are_evaluated_once_across_forms() {
    let (mut functions, counter) = functions_with_counter();
    let f = NativeFunction::builder("Probes three forms.")
        .form(|_: String| -> Res<&'static str> { Ok("string") })
        .form(|_: bool| -> Res<&'static str> { Ok("bool") })
        .form(|n: i64| -> Res<i64> { Ok(n * 10) })
        .build()
        .unwrap();
    functions.register("f", f).unwrap();

    let expr = call("f", vec![call("tick", vec![])]);
    assert_eq!(run(functions, &expr), Ok(Value::int(10)));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unmatched_call_still_evaluates_once() {
    let (mut functions, counter) = functions_with_counter();
    let f = NativeFunction::builder("Only strings.")
        .form(|_: String| -> Res<()> { Ok(()) })
        .form(|_: String, _: String| -> Res<()> { Ok(()) })
        .build()
        .unwrap();
    functions.register("f", f).unwrap();

    let expr = call("f", vec![call("tick", vec![])]);
    let error = run(functions, &expr).unwrap_err();
    assert!(matches!(
        error.root(),
        ExecutionError::Dispatch(DispatchError::NoMatchingForm { .. })
    ));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_variadic_is_all_or_nothing() {
    let (mut functions, _) = functions_with_counter();
    let f = NativeFunction::builder("Sums integers.")
        .form(|Variadic(xs): Variadic<i64>| -> Res<i64> { Ok(xs.iter().sum()) })
        .build()
        .unwrap();
    functions.register("sum", f).unwrap();

    let ok = call("sum", vec![1.into(), 2.into(), 3.into()]);
    assert_eq!(run(functions.clone(), &ok), Ok(Value::int(6)));

    let empty = call("sum", vec![]);
    assert_eq!(run(functions.clone(), &empty), Ok(Value::int(0)));

    let bad = call("sum", vec![1.into(), 2.into(), "x".into()]);
    let error = run(functions, &bad).unwrap_err();
    assert_eq!(
        error.root(),
        &ExecutionError::Dispatch(DispatchError::NoMatchingForm {
            args: "number number string".to_string(),
            candidates: vec!["(...int64)".to_string()],
        })
    );
}

#[test]
fn test_extra_arguments_rule_out_a_form() {
    let (mut functions, _) = functions_with_counter();
    let f = NativeFunction::builder("Unary.")
        .form(|n: i64| -> Res<i64> { Ok(n) })
        .build()
        .unwrap();
    functions.register("one", f).unwrap();

    let expr = call("one", vec![1.into(), 2.into()]);
    assert!(run(functions, &expr).is_err());
}

#[test]
fn test_expression_parameter_is_not_evaluated() {
    let (mut functions, counter) = functions_with_counter();
    let f = NativeFunction::builder("Quotes its argument.")
        .form(|expr: Expression| -> Res<String> { Ok(expr.to_string()) })
        .build()
        .unwrap();
    functions.register("quote", f).unwrap();

    let expr = call("quote", vec![call("tick", vec![])]);
    assert_eq!(run(functions, &expr), Ok(Value::from("(tick)")));
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn test_context_parameter_consumes_nothing() {
    let (mut functions, _) = functions_with_counter();
    let f = NativeFunction::builder("Reads a variable by name.")
        .form(|ctx: Context, name: String| -> Res<Value> {
            Ok(ctx.get_variable(&name).cloned().unwrap_or_default())
        })
        .build()
        .unwrap();
    functions.register("lookup", f).unwrap();

    let ctx = Context::new(
        Document::default(),
        Arc::new(functions),
        Coalescing::Strict.coalescer(),
    )
    .with_variable("x", Value::int(7));
    let expr = call("lookup", vec!["x".into()]);
    assert_eq!(ctx.evaluate_value(&expr), Ok(Value::int(7)));
}

#[test]
fn test_argument_errors_abort_dispatch() {
    let (mut functions, counter) = functions_with_counter();
    let f = NativeFunction::builder("Two forms.")
        .form(|_: i64, _: i64| -> Res<&'static str> { Ok("ints") })
        .form(|_: Value, _: Value| -> Res<&'static str> { Ok("any") })
        .build()
        .unwrap();
    functions.register("f", f).unwrap();

    let expr = call("f", vec![call("tick", vec![]), call("error", vec!["boom".into()])]);
    let error = run(functions, &expr).unwrap_err();
    assert_eq!(error.to_string(), "f: argument #1: error: boom");
    assert_eq!(error.root(), &ExecutionError::User("boom".to_string()));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_coercion_follows_active_coalescer() {
    let f = || {
        NativeFunction::builder("Doubles.")
            .form(|n: i64| -> Res<i64> { Ok(n * 2) })
            .build()
            .unwrap()
    };
    let expr = call("double", vec!["21".into()]);

    let mut strict = Functions::new();
    strict.register("double", f()).unwrap();
    assert!(run(strict, &expr).is_err());

    let mut humane = Functions::new();
    humane.register("double", f()).unwrap();
    let ctx = Context::new(
        Document::default(),
        Arc::new(humane),
        Coalescing::Humane.coalescer(),
    );
    assert_eq!(ctx.evaluate_value(&expr), Ok(Value::int(42)));
}

#[test]
fn test_form_errors_convert() {
    let mut functions = Functions::new();
    let f = NativeFunction::builder("Fails with a path error.")
        .form(|| -> Result<Value, crate::pathexpr::PathError> {
            Err(crate::pathexpr::PathError::NegativeIndex(-1))
        })
        .build()
        .unwrap();
    functions.register("fail", f).unwrap();
    let error = run(functions, &call("fail", vec![])).unwrap_err();
    assert_eq!(error.to_string(), "fail: negative index: -1");
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_variadic_must_be_last() {
    let result = NativeFunction::builder("Bad.")
        .form(|_: Variadic<i64>, _: i64| -> Res<()> { Ok(()) })
        .build();
    assert_eq!(
        result.map(|_| ()),
        Err(DispatchError::InvalidSignature {
            signature: "(...int64 int64)".to_string(),
            reason: "variadic parameter must be last",
        })
    );
}

#[test]
fn test_variadic_context_is_rejected() {
    let result = NativeFunction::builder("Bad.")
        .form(|_: Variadic<Context>| -> Res<()> { Ok(()) })
        .build();
    assert!(matches!(result, Err(DispatchError::InvalidSignature { .. })));
}

#[test]
fn test_builder_requires_forms() {
    assert!(matches!(
        NativeFunction::builder("Empty.").build(),
        Err(DispatchError::NoForms)
    ));
}

#[test]
fn test_first_invalid_form_is_reported() {
    let result = NativeFunction::builder("Bad then good.")
        .form(|_: Variadic<Context>| -> Res<()> { Ok(()) })
        .form(|_: i64| -> Res<()> { Ok(()) })
        .build();
    assert!(result.is_err());
}

#[test]
fn test_registry_rejects_duplicates_and_empty_names() {
    let mut functions = Functions::new();
    let raw = || RawFunction::new("Nothing.", |_, _| Ok(Value::Null));
    functions.register("noop", raw()).unwrap();
    assert_eq!(
        functions.register("noop", raw()),
        Err(DispatchError::DuplicateFunction("noop".to_string()))
    );
    assert_eq!(functions.register("", raw()), Err(DispatchError::EmptyName));
    assert_eq!(functions.description("noop"), Some("Nothing."));
    assert_eq!(functions.names(), vec!["noop"]);
}

#[test]
fn test_form_signatures() {
    let f = NativeFunction::builder("Mixed.")
        .form(|_: Context, _: String, _: Expression, _: Variadic<Value>| -> Res<()> { Ok(()) })
        .build()
        .unwrap();
    let signatures: Vec<String> = f.forms().iter().map(Form::signature).collect();
    assert_eq!(signatures, vec!["(string expression ...any)".to_string()]);
}
