#![allow(dead_code)]

use once_cell::sync::Lazy;
use rudi::*;

/// A host type exposing a field and numeric and string conversions.
#[derive(Debug)]
pub struct Celsius(pub f64);

impl HostValue for Celsius {
    fn type_name(&self) -> &'static str {
        "celsius"
    }

    fn coalesce_to_float64(&self) -> Option<f64> {
        Some(self.0)
    }

    fn coalesce_to_string(&self) -> Option<String> {
        Some(format!("{}°C", self.0))
    }

    fn get_object_key(&self, key: &str) -> values::Lookup {
        match key {
            "degrees" => values::Lookup::Found(Value::float(self.0)),
            "fahrenheit" => values::Lookup::Found(Value::float(self.0 * 9.0 / 5.0 + 32.0)),
            _ => values::Lookup::Missing,
        }
    }
}

fn register_host_functions(functions: &mut FunctionsBuilder) {
    functions.register_native(
        "celsius",
        NativeFunction::builder("Wraps a temperature in degrees Celsius.")
            .form(|degrees: f64| -> Result<Value, ExecutionError> {
                Ok(Value::host(Celsius(degrees)))
            }),
    );
    functions.register_native(
        "describe",
        NativeFunction::builder("Names the form that matched.")
            .form(|_: i64| -> Result<&'static str, ExecutionError> { Ok("int") })
            .form(|_: f64| -> Result<&'static str, ExecutionError> { Ok("float") })
            .form(|_: String| -> Result<&'static str, ExecutionError> { Ok("string") })
            .form(|_: Value, Variadic(rest): Variadic<Value>| -> Result<String, ExecutionError> {
                Ok(format!("any and {} more", rest.len()))
            }),
    );
}

pub static ENGINE: Lazy<Engine> = Lazy::new(|| {
    Engine::new(EngineOptions::default(), register_host_functions)
        .expect("engine setup should succeed")
});

pub static HUMANE_ENGINE: Lazy<Engine> = Lazy::new(|| {
    Engine::new(
        EngineOptions::default().with_coalescing(Coalescing::Humane),
        register_host_functions,
    )
    .expect("engine setup should succeed")
});

pub fn run(document: Value, statements: Vec<Expression>) -> Result<Output, Error> {
    run_on(&ENGINE, document, statements)
}

pub fn run_on(engine: &Engine, document: Value, statements: Vec<Expression>) -> Result<Output, Error> {
    let program: Program = statements.into_iter().collect();
    engine.run(&program, document, Variables::new())
}

pub fn call(name: &str, args: Vec<Expression>) -> Expression {
    Expression::call(name, args)
}

pub fn bang(name: &str, args: Vec<Expression>) -> Expression {
    Expression::bang(name, args)
}

pub fn var(name: &str) -> Expression {
    Expression::var(name)
}

/// `.a.b` style document path made of literal keys.
pub fn doc(keys: &[&str]) -> Expression {
    if keys.is_empty() {
        return Expression::doc();
    }
    Expression::doc_path(keys.iter().map(|&k| Expression::ident(k)).collect())
}

pub fn obj(pairs: &[(&str, Value)]) -> Value {
    pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
}

pub fn strings(items: &[&str]) -> Value {
    items.iter().map(|&s| Value::from(s)).collect()
}
