use crate::{
    ast::{Expression, Program},
    coalescing::CoalesceError,
    dispatch::DispatchError,
    evaluator::{self, ExecutionError},
    test_utils,
    values::Value,
};
use pretty_assertions::assert_eq;

type Res<T> = Result<T, ExecutionError>;

fn map(args: Vec<Expression>) -> Res<Value> {
    test_utils::context(Value::Null).evaluate_value(&Expression::call("map", args))
}

fn ints(values: &[i64]) -> Value {
    values.iter().map(|&i| Value::int(i)).collect()
}

fn int_vector(values: &[i64]) -> Expression {
    Expression::vector(values.iter().map(|&i| Expression::from(i)).collect())
}

fn names(names: &[&str]) -> Expression {
    Expression::vector(names.iter().map(|&n| Expression::var(n)).collect())
}

fn prices() -> Expression {
    Expression::object(vec![
        (Expression::ident("tea"), 3.into()),
        (Expression::ident("cake"), 5.into()),
    ])
}

#[test]
fn test_map_with_function_name() {
    let words = Expression::vector(vec!["a".into(), "b".into()]);
    assert_eq!(
        map(vec![words, Expression::ident("to-upper")]),
        Ok(Value::from(vec![Value::from("A"), Value::from("B")]))
    );

    // Container elements are passed as they are.
    let nested = Expression::vector(vec![int_vector(&[1, 2]), int_vector(&[3])]);
    assert_eq!(map(vec![nested, Expression::ident("len")]), Ok(ints(&[2, 1])));
}

#[test]
fn test_map_with_body() {
    let body = Expression::call("*", vec![Expression::var("x"), 2.into()]);
    assert_eq!(
        map(vec![int_vector(&[1, 2, 3]), names(&["x"]), body]),
        Ok(ints(&[2, 4, 6]))
    );
}

#[test]
fn test_map_binds_vector_indexes() {
    let words = Expression::vector(vec!["a".into(), "b".into()]);
    assert_eq!(
        map(vec![words, names(&["i", "w"]), Expression::var("i")]),
        Ok(ints(&[0, 1]))
    );
}

#[test]
fn test_map_over_object_keeps_keys() {
    let body = Expression::call("+", vec![Expression::var("price"), 10.into()]);
    let expected: Value = [("tea", Value::int(13)), ("cake", Value::int(15))]
        .into_iter()
        .collect();
    assert_eq!(map(vec![prices(), names(&["price"]), body]), Ok(expected));

    let expected: Value = [("tea", Value::from("tea")), ("cake", Value::from("cake"))]
        .into_iter()
        .collect();
    assert_eq!(
        map(vec![prices(), names(&["k", "v"]), Expression::var("k")]),
        Ok(expected)
    );
}

#[test]
fn test_map_over_null_is_empty() {
    assert_eq!(
        map(vec![Expression::Null, Expression::ident("to-upper")]),
        Ok(Value::Vector(Vec::new()))
    );
}

#[test]
fn test_map_rejects_scalars() {
    let err = map(vec![5.into(), Expression::ident("to-upper")]).unwrap_err();
    assert_eq!(
        err.root(),
        &ExecutionError::Coalesce(CoalesceError::Incompatible {
            from: "number",
            to: "vector",
        })
    );
}

#[test]
fn test_map_scope_does_not_leak() {
    let ctx = test_utils::context(Value::Null);
    let program: Program = vec![
        Expression::bang("set", vec![Expression::var("x"), 5.into()]),
        Expression::call("map", vec![int_vector(&[1, 2]), names(&["x"]), Expression::var("x")]),
        Expression::var("x"),
    ]
    .into_iter()
    .collect();
    let (_, result) = evaluator::run(&program, &ctx).unwrap();
    assert_eq!(result, Value::int(5));
}

#[test]
fn test_map_body_can_write_the_document() {
    let ctx = test_utils::context(Value::Null);
    let body = Expression::bang(
        "set",
        vec![Expression::doc_path(vec![Expression::ident("last")]), Expression::var("x")],
    );
    let expr = Expression::call("map", vec![int_vector(&[1, 2]), names(&["x"]), body]);
    assert_eq!(ctx.evaluate_value(&expr), Ok(ints(&[1, 2])));
    assert_eq!(
        ctx.document().get(),
        [("last", Value::int(2))].into_iter().collect::<Value>()
    );
}

#[test]
fn test_map_reports_failing_element() {
    let items = Expression::vector(vec![1.into(), "a".into()]);
    let body = Expression::call("+", vec![Expression::var("x"), 1.into()]);
    let err = map(vec![items, names(&["x"]), body]).unwrap_err();
    assert!(matches!(
        err.root(),
        ExecutionError::Dispatch(DispatchError::NoMatchingForm { .. })
    ));
    assert!(err.to_string().starts_with("map: element #1: +: "));
}

#[test]
fn test_map_rejects_malformed_names() {
    let cases = vec![
        int_vector(&[1]),
        names(&[]),
        names(&["a", "b", "c"]),
        Expression::vector(vec![Expression::var_path("a", vec![Expression::ident("b")])]),
        Expression::var("a"),
    ];
    for names in cases {
        let err = map(vec![int_vector(&[1]), names, 2.into()]).unwrap_err();
        assert!(
            matches!(err.root(), ExecutionError::InvalidExpression(_)),
            "unexpected error: {}",
            err
        );
    }

    let err = map(vec![int_vector(&[1]), "to-upper".into()]).unwrap_err();
    assert!(matches!(err.root(), ExecutionError::InvalidExpression(_)));
}
