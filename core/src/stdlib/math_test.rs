use crate::{
    ast::Expression,
    coalescing::Coalescing,
    dispatch::DispatchError,
    evaluator::ExecutionError,
    test_utils,
    values::Value,
};
use pretty_assertions::assert_eq;

type Res<T> = Result<T, ExecutionError>;

fn eval(name: &str, args: Vec<Expression>) -> Res<Value> {
    test_utils::context(Value::Null).evaluate_value(&Expression::call(name, args))
}

fn eval_humane(name: &str, args: Vec<Expression>) -> Res<Value> {
    test_utils::context_with(Value::Null, Coalescing::Humane)
        .evaluate_value(&Expression::call(name, args))
}

#[test]
fn test_add() {
    assert_eq!(eval("+", vec![1.into(), 2.into(), 3.into()]), Ok(Value::int(6)));
    assert_eq!(eval("+", vec![]), Ok(Value::int(0)));
    assert_eq!(eval("+", vec![1.into(), 2.5.into()]), Ok(Value::float(3.5)));
    // Strict bridges null to zero and whole floats to integers.
    assert_eq!(eval("+", vec![Expression::Null, 2.0.into()]), Ok(Value::int(2)));
}

#[test]
fn test_add_overflow() {
    let err = eval("+", vec![i64::MAX.into(), 1.into()]).unwrap_err();
    assert_eq!(err.root(), &ExecutionError::IntegerOverflow);
    assert_eq!(err.to_string(), "+: integer overflow");
}

#[test]
fn test_add_rejects_strings_unless_humane() {
    let err = eval("+", vec![2.into(), "1".into()]).unwrap_err();
    assert_eq!(
        err.root(),
        &ExecutionError::Dispatch(DispatchError::NoMatchingForm {
            args: "number string".to_string(),
            candidates: vec!["(...int64)".to_string(), "(...float64)".to_string()],
        })
    );

    assert_eq!(eval_humane("+", vec!["1".into(), 2.into()]), Ok(Value::int(3)));
    assert_eq!(eval_humane("+", vec![" 1.5 ".into(), 2.into()]), Ok(Value::float(3.5)));
}

#[test]
fn test_subtract() {
    assert_eq!(eval("-", vec![10.into(), 3.into(), 2.into()]), Ok(Value::int(5)));
    assert_eq!(eval("-", vec![5.into()]), Ok(Value::int(-5)));
    assert_eq!(eval("-", vec![1.5.into()]), Ok(Value::float(-1.5)));
    assert_eq!(eval("-", vec![1.into(), 0.5.into()]), Ok(Value::float(0.5)));

    let err = eval("-", vec![i64::MIN.into()]).unwrap_err();
    assert_eq!(err.root(), &ExecutionError::IntegerOverflow);

    let err = eval("-", vec![]).unwrap_err();
    assert!(matches!(
        err.root(),
        ExecutionError::Dispatch(DispatchError::NoMatchingForm { .. })
    ));
}

#[test]
fn test_multiply() {
    assert_eq!(eval("*", vec![2.into(), 3.into(), 4.into()]), Ok(Value::int(24)));
    assert_eq!(eval("*", vec![]), Ok(Value::int(1)));
    assert_eq!(eval("*", vec![2.into(), 0.25.into()]), Ok(Value::float(0.5)));

    let err = eval("*", vec![i64::MAX.into(), 2.into()]).unwrap_err();
    assert_eq!(err.root(), &ExecutionError::IntegerOverflow);
}

#[test]
fn test_divide_stays_integral_while_exact() {
    assert_eq!(eval("/", vec![6.into(), 3.into()]), Ok(Value::int(2)));
    assert_eq!(eval("/", vec![8.into(), 2.into(), 4.into()]), Ok(Value::int(1)));
    assert_eq!(eval("/", vec![7.into(), 2.into()]), Ok(Value::float(3.5)));
    assert_eq!(eval("/", vec![9.into(), 2.into(), 2.into()]), Ok(Value::float(2.25)));
    assert_eq!(eval("/", vec![5.into()]), Ok(Value::int(5)));
    assert_eq!(eval("/", vec![1.into(), 0.5.into()]), Ok(Value::float(2.0)));
    // Not exact, so it leaves the integer domain instead of overflowing.
    assert_eq!(
        eval("/", vec![i64::MIN.into(), (-1).into()]),
        Ok(Value::float(i64::MIN as f64 / -1.0))
    );
}

#[test]
fn test_divide_by_zero() {
    let err = eval("/", vec![1.into(), 0.into()]).unwrap_err();
    assert_eq!(err.root(), &ExecutionError::DivisionByZero);

    let err = eval("/", vec![1.5.into(), 0.0.into()]).unwrap_err();
    assert_eq!(err.root(), &ExecutionError::DivisionByZero);
    assert_eq!(err.to_string(), "/: division by zero");
}
