use std::rc::Rc;

use crate::{
    ast::{Expression, Program},
    coalescing::Coalescing,
    context::Context,
    dispatch::DispatchError,
    evaluator::{self, ExecutionError, Interpreter, ResourceExceeded},
    pathexpr::PathError,
    test_utils,
    values::Value,
};
use pretty_assertions::assert_eq;

type Res<T> = Result<T, ExecutionError>;

fn obj(pairs: &[(&str, Value)]) -> Value {
    pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
}

fn call(name: &str, args: Vec<Expression>) -> Expression {
    Expression::call(name, args)
}

fn bang(name: &str, args: Vec<Expression>) -> Expression {
    Expression::bang(name, args)
}

fn key(name: &str) -> Expression {
    Expression::ident(name)
}

/// Run statements in order over `ctx`, returning the last value.
fn run(ctx: &Context, statements: Vec<Expression>) -> Res<Value> {
    let program: Program = statements.into_iter().collect();
    evaluator::run(&program, ctx).map(|(_, value)| value)
}

#[test]
fn test_set_bang_binds_variable_for_later_statements() {
    let ctx = test_utils::context(Value::Null);
    let result = run(
        &ctx,
        vec![bang("set", vec![Expression::var("a"), 2.into()]), Expression::var("a")],
    );
    assert_eq!(result, Ok(Value::int(2)));
    assert_eq!(ctx.get_variable("a"), None);
}

#[test]
fn test_set_without_bang_only_returns_the_value() {
    let ctx = test_utils::context(Value::Null);
    let err = run(
        &ctx,
        vec![call("set", vec![Expression::var("a"), 2.into()]), Expression::var("a")],
    )
    .unwrap_err();
    assert_eq!(err.root(), &ExecutionError::UnknownVariable("a".to_string()));
    assert_eq!(err.to_string(), "statement #1: unknown variable: $a");
}

#[test]
fn test_set_bang_vivifies_document_objects() {
    let ctx = test_utils::context(Value::Null);
    let target = Expression::doc_path(vec![key("a"), key("b")]);
    run(&ctx, vec![bang("set", vec![target, "x".into()])]).unwrap();
    assert_eq!(
        ctx.document().get(),
        obj(&[("a", obj(&[("b", Value::from("x"))]))])
    );
}

#[test]
fn test_set_bang_into_variable_subpath() {
    let ctx = test_utils::context(Value::Null);
    let result = run(
        &ctx,
        vec![
            bang("set", vec![Expression::var("v"), Expression::vector(vec![1.into(), 2.into()])]),
            bang("set", vec![Expression::var_path("v", vec![1.into()]), 20.into()]),
            Expression::var("v"),
        ],
    );
    assert_eq!(result, Ok(Value::from(vec![Value::int(1), Value::int(20)])));
}

#[test]
fn test_set_rejects_non_symbol_target() {
    let ctx = test_utils::context(Value::Null);
    let err = run(&ctx, vec![call("set", vec![1.into(), 2.into()])]).unwrap_err();
    assert!(matches!(err.root(), ExecutionError::InvalidExpression(_)));
}

#[test]
fn test_if_scopes_variables_but_shares_document() {
    let ctx = test_utils::context(obj(&[("n", Value::int(1))]));
    let result = run(
        &ctx,
        vec![
            bang("set", vec![Expression::var("a"), 1.into()]),
            call("if", vec![true.into(), bang("set", vec![Expression::var("a"), 2.into()])]),
            Expression::var("a"),
        ],
    );
    assert_eq!(result, Ok(Value::int(1)));

    run(
        &ctx,
        vec![call("if", vec![true.into(), bang("set", vec![Expression::doc(), 2.into()])])],
    )
    .unwrap();
    assert_eq!(ctx.document().get(), Value::int(2));
}

#[test]
fn test_if_branches() {
    let ctx = test_utils::context(Value::Null);
    let both = |cond: bool| call("if", vec![cond.into(), "yes".into(), "no".into()]);
    assert_eq!(ctx.evaluate_value(&both(true)), Ok(Value::from("yes")));
    assert_eq!(ctx.evaluate_value(&both(false)), Ok(Value::from("no")));

    let only_then = call("if", vec![false.into(), "yes".into()]);
    assert_eq!(ctx.evaluate_value(&only_then), Ok(Value::Null));

    // The untaken branch is never evaluated.
    let guarded = call("if", vec![false.into(), call("error", vec!["boom".into()])]);
    assert_eq!(ctx.evaluate_value(&guarded), Ok(Value::Null));
}

#[test]
fn test_if_condition_follows_coalescing() {
    let expr = call("if", vec!["yes".into(), 1.into(), 2.into()]);

    let strict = test_utils::context(Value::Null);
    let err = strict.evaluate_value(&expr).unwrap_err();
    assert!(matches!(
        err.root(),
        ExecutionError::Dispatch(DispatchError::NoMatchingForm { .. })
    ));

    let humane = test_utils::context_with(Value::Null, Coalescing::Humane);
    assert_eq!(humane.evaluate_value(&expr), Ok(Value::int(1)));
}

#[test]
fn test_do_threads_bindings_between_children_only() {
    let ctx = test_utils::context(Value::Null);
    let block = call(
        "do",
        vec![
            bang("set", vec![Expression::var("x"), 1.into()]),
            call("+", vec![Expression::var("x"), 1.into()]),
        ],
    );
    assert_eq!(ctx.evaluate_value(&block), Ok(Value::int(2)));

    let leaked = run(
        &ctx,
        vec![block, call("has?", vec![Expression::var("x")])],
    );
    assert_eq!(leaked, Ok(Value::Bool(false)));

    assert_eq!(ctx.evaluate_value(&call("do", vec![])), Ok(Value::Null));
}

#[test]
fn test_try_swallows_runtime_errors() {
    let ctx = test_utils::context(Value::Null);
    let failing = call("error", vec!["boom".into()]);
    assert_eq!(
        ctx.evaluate_value(&call("try", vec![failing.clone()])),
        Ok(Value::Null)
    );
    assert_eq!(
        ctx.evaluate_value(&call("try", vec![failing, "fallback".into()])),
        Ok(Value::from("fallback"))
    );
    assert_eq!(
        ctx.evaluate_value(&call("try", vec![call("/", vec![1.into(), 0.into()]), 0.into()])),
        Ok(Value::int(0))
    );
    assert_eq!(
        ctx.evaluate_value(&call("try", vec![1.into(), 0.into()])),
        Ok(Value::int(1))
    );
}

#[test]
fn test_try_does_not_swallow_fatal_errors() {
    let ctx = test_utils::context(Value::Null).with_runtime(Rc::new(Interpreter::new(3)));
    let deep = call("+", vec![call("+", vec![call("+", vec![1.into()])])]);
    let err = ctx
        .evaluate_value(&call("try", vec![deep, 0.into()]))
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(
        err.root(),
        ExecutionError::ResourceExceeded(ResourceExceeded::DepthExceeded { max_depth: 3, .. })
    ));
}

#[test]
fn test_default() {
    let ctx = test_utils::context(Value::Null);
    let default = |value: Expression| call("default", vec![value, "fallback".into()]);
    assert_eq!(ctx.evaluate_value(&default(Expression::Null)), Ok(Value::from("fallback")));
    assert_eq!(ctx.evaluate_value(&default("  ".into())), Ok(Value::from("fallback")));
    assert_eq!(ctx.evaluate_value(&default("x".into())), Ok(Value::from("x")));
    assert_eq!(ctx.evaluate_value(&default(3.into())), Ok(Value::int(3)));
}

#[test]
fn test_error_formats_message() {
    let ctx = test_utils::context(Value::Null);
    let expr = call("error", vec!["bad {} at {}".into(), "input".into(), 3.into()]);
    let err = ctx.evaluate_value(&expr).unwrap_err();
    assert_eq!(err.root(), &ExecutionError::User("bad input at 3".to_string()));
    assert_eq!(err.to_string(), "error: bad input at 3");
    assert!(!err.is_fatal());
}

#[test]
fn test_has() {
    let ctx = test_utils::context(obj(&[("a", obj(&[("b", Value::int(1))]))]));
    let has = |target: Expression| ctx.evaluate_value(&call("has?", vec![target]));

    assert_eq!(has(Expression::doc_path(vec![key("a"), key("b")])), Ok(Value::Bool(true)));
    assert_eq!(has(Expression::doc_path(vec![key("a"), key("c")])), Ok(Value::Bool(false)));
    assert_eq!(
        has(Expression::doc_path(vec![key("a"), key("b"), key("c")])),
        Ok(Value::Bool(false))
    );
    assert_eq!(has(Expression::var("missing")), Ok(Value::Bool(false)));

    let err = has(1.into()).unwrap_err();
    assert!(matches!(err.root(), ExecutionError::InvalidExpression(_)));
}

#[test]
fn test_delete_bang_on_document() {
    let ctx = test_utils::context(obj(&[("a", Value::int(1)), ("b", Value::int(2))]));
    let target = Expression::doc_path(vec![key("a")]);

    // Without the bang the document is untouched.
    assert_eq!(
        ctx.evaluate_value(&call("delete", vec![target.clone()])),
        Ok(obj(&[("b", Value::int(2))]))
    );
    assert_eq!(ctx.document().get(), obj(&[("a", Value::int(1)), ("b", Value::int(2))]));

    assert_eq!(
        ctx.evaluate_value(&bang("delete", vec![target])),
        Ok(obj(&[("b", Value::int(2))]))
    );
    assert_eq!(ctx.document().get(), obj(&[("b", Value::int(2))]));
}

#[test]
fn test_delete_bang_on_variable() {
    let ctx = test_utils::context(Value::Null);
    let items = Expression::vector(vec!["a".into(), "b".into(), "c".into()]);
    let result = run(
        &ctx,
        vec![
            bang("set", vec![Expression::var("v"), items]),
            bang("delete", vec![Expression::var_path("v", vec![1.into()])]),
            Expression::var("v"),
        ],
    );
    assert_eq!(result, Ok(Value::from(vec![Value::from("a"), Value::from("c")])));
}

#[test]
fn test_delete_out_of_bounds() {
    let ctx = test_utils::context(Value::Null).with_variable(
        "v",
        Value::from(vec![Value::from("a"), Value::from("b"), Value::from("c")]),
    );
    let err = ctx
        .evaluate_value(&bang("delete", vec![Expression::var_path("v", vec![5.into()])]))
        .unwrap_err();
    assert_eq!(
        err.root(),
        &ExecutionError::Path(PathError::IndexOutOfBounds { index: 5, len: 3 })
    );
}
