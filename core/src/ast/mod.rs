//! The closed set of syntax nodes the evaluator runs.
//!
//! Programs arrive already parsed. The constructors on [`Expression`] let hosts
//! and tests build trees directly:
//!
//! ```
//! use rudi_core::ast::Expression;
//!
//! // (set! $total (+ $total 1))
//! let expr = Expression::bang(
//!     "set",
//!     vec![
//!         Expression::var("total"),
//!         Expression::call("+", vec![Expression::var("total"), Expression::from(1)]),
//!     ],
//! );
//! assert_eq!(expr.to_string(), "(set! $total (+ $total 1))");
//! ```


use core::fmt;

use crate::values::{Number, Object, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// A vector whose elements are all literals.
    Vector(Vec<Value>),
    /// An object whose keys and values are all literals.
    Object(Object),
    VectorNode(VectorNode),
    ObjectNode(ObjectNode),
    Symbol(Symbol),
    Tuple(Tuple),
    Identifier(Identifier),
}

/// A vector literal with unevaluated elements: `[a b c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorNode {
    pub expressions: Vec<Expression>,
    pub path: Option<PathExpression>,
}

/// An object literal with unevaluated keys and values: `{"a" 1}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    pub data: Vec<KeyValuePair>,
    pub path: Option<PathExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValuePair {
    pub key: Expression,
    pub value: Expression,
}

/// A reference to the document (`.`, `.a.b`) or a variable (`$x`, `$x.a`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Symbol {
    pub variable: Option<String>,
    pub path: Option<PathExpression>,
}

impl Symbol {
    /// Whether this symbol points into the document rather than a variable.
    pub fn is_document(&self) -> bool {
        self.variable.is_none()
    }
}

/// A function call: `(name args...)`, optionally followed by a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    pub expressions: Vec<Expression>,
    pub path: Option<PathExpression>,
}

/// A function name, with the `!` write-back marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub bang: bool,
}

/// Raw accessor expressions of a path, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathExpression {
    pub steps: Vec<Expression>,
}

impl PathExpression {
    pub fn new(steps: Vec<Expression>) -> Self {
        Self { steps }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

impl FromIterator<Expression> for Program {
    fn from_iter<I: IntoIterator<Item = Expression>>(iter: I) -> Self {
        Self {
            statements: iter
                .into_iter()
                .map(|expression| Statement { expression })
                .collect(),
        }
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl Expression {
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier {
            name: name.into(),
            bang: false,
        })
    }

    /// `(name args...)`
    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self::tuple(name.into(), false, args)
    }

    /// `(name! args...)`
    pub fn bang(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self::tuple(name.into(), true, args)
    }

    fn tuple(name: String, bang: bool, args: Vec<Expression>) -> Self {
        let mut expressions = Vec::with_capacity(args.len() + 1);
        expressions.push(Expression::Identifier(Identifier { name, bang }));
        expressions.extend(args);
        Expression::Tuple(Tuple {
            expressions,
            path: None,
        })
    }

    /// `$name`
    pub fn var(name: impl Into<String>) -> Self {
        Expression::Symbol(Symbol {
            variable: Some(name.into()),
            path: None,
        })
    }

    /// `$name` followed by `steps`.
    pub fn var_path(name: impl Into<String>, steps: Vec<Expression>) -> Self {
        Expression::Symbol(Symbol {
            variable: Some(name.into()),
            path: Some(PathExpression::new(steps)),
        })
    }

    /// `.`
    pub fn doc() -> Self {
        Expression::Symbol(Symbol::default())
    }

    /// `.` followed by `steps`.
    pub fn doc_path(steps: Vec<Expression>) -> Self {
        Expression::Symbol(Symbol {
            variable: None,
            path: Some(PathExpression::new(steps)),
        })
    }

    /// `[expressions...]`
    pub fn vector(expressions: Vec<Expression>) -> Self {
        Expression::VectorNode(VectorNode {
            expressions,
            path: None,
        })
    }

    /// `{key value ...}`
    pub fn object(pairs: Vec<(Expression, Expression)>) -> Self {
        Expression::ObjectNode(ObjectNode {
            data: pairs
                .into_iter()
                .map(|(key, value)| KeyValuePair { key, value })
                .collect(),
            path: None,
        })
    }

    /// Attach a trailing path to a vector, object or call node.
    ///
    /// Other nodes are returned unchanged except symbols, whose path is replaced.
    pub fn with_path(self, steps: Vec<Expression>) -> Self {
        let path = Some(PathExpression::new(steps));
        match self {
            Expression::VectorNode(node) => Expression::VectorNode(VectorNode { path, ..node }),
            Expression::ObjectNode(node) => Expression::ObjectNode(ObjectNode { path, ..node }),
            Expression::Tuple(node) => Expression::Tuple(Tuple { path, ..node }),
            Expression::Symbol(node) => Expression::Symbol(Symbol { path, ..node }),
            other => other,
        }
    }

    /// Wrap a value as a literal node. Host values have no literal form.
    pub fn literal(value: Value) -> Option<Self> {
        Some(match value {
            Value::Null => Expression::Null,
            Value::Bool(b) => Expression::Bool(b),
            Value::Number(n) => Expression::Number(n),
            Value::String(s) => Expression::String(s),
            Value::Vector(items) => Expression::Vector(items),
            Value::Object(map) => Expression::Object(map),
            Value::Host(_) => return None,
        })
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Expression::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(identifier) => Some(identifier),
            _ => None,
        }
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::Bool(value)
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Expression::Number(Number::Int(value))
    }
}

impl From<i32> for Expression {
    fn from(value: i32) -> Self {
        Expression::Number(Number::Int(i64::from(value)))
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::Number(Number::Float(value))
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Expression::String(value.to_string())
    }
}

impl From<String> for Expression {
    fn from(value: String) -> Self {
        Expression::String(value)
    }
}

// ============================================================================
// Display
// ============================================================================

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_path(f: &mut fmt::Formatter<'_>, path: &Option<PathExpression>) -> fmt::Result {
    match path {
        Some(path) => write!(f, "{}", path),
        None => Ok(()),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Null => write!(f, "null"),
            Expression::Bool(b) => write!(f, "{}", b),
            Expression::Number(n) => write!(f, "{}", n),
            Expression::String(s) => write!(f, "{:?}", s),
            Expression::Vector(items) => write!(f, "{}", Value::Vector(items.clone())),
            Expression::Object(map) => write!(f, "{}", Value::Object(map.clone())),
            Expression::VectorNode(node) => {
                write!(f, "[")?;
                write_list(f, &node.expressions)?;
                write!(f, "]")?;
                write_path(f, &node.path)
            }
            Expression::ObjectNode(node) => {
                write!(f, "{{")?;
                for (i, pair) in node.data.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{} {}", pair.key, pair.value)?;
                }
                write!(f, "}}")?;
                write_path(f, &node.path)
            }
            Expression::Symbol(symbol) => write!(f, "{}", symbol),
            Expression::Tuple(tuple) => {
                write!(f, "(")?;
                write_list(f, &tuple.expressions)?;
                write!(f, ")")?;
                write_path(f, &tuple.path)
            }
            Expression::Identifier(identifier) => write!(f, "{}", identifier),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.variable, &self.path) {
            (Some(name), path) => {
                write!(f, "${}", name)?;
                write_path(f, path)
            }
            (None, Some(path)) if !path.steps.is_empty() => write!(f, "{}", path),
            (None, _) => write!(f, "."),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.bang {
            write!(f, "!")?;
        }
        Ok(())
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            match step {
                Expression::Identifier(identifier) => write!(f, ".{}", identifier.name)?,
                other => write!(f, "[{}]", other)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}
