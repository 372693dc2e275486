//! Runtime values produced by parse functions and consumed by callables

use crate::error::{ArgtreeError, ArgtreeResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A parsed argument value or the result of an invoked callable
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence marker, the default of optional parameters
    None,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// String
    Str(String),
    /// Filesystem path
    Path(PathBuf),
    /// Ordered sequence from a list-typed parameter
    List(Vec<Value>),
    /// Ordered sequence from a tuple-typed parameter
    Tuple(Vec<Value>),
    /// String-keyed mapping (plain sub-namespaces and the literal payload)
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Name of the concrete runtime type
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Path(_) => "path",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Map(_) => "map",
        }
    }

    /// Whether two values share a concrete runtime type
    pub fn same_type(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Whether this is the absence marker
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Borrow the string content, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Path(p) => write!(f, "{}", p.display()),
            Value::List(items) => write!(f, "[{}]", join(items)),
            Value::Tuple(items) => write!(f, "({})", join(items)),
            Value::Map(map) => {
                let body = map
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{}}}", body)
            }
        }
    }
}

fn join(items: &[Value]) -> String {
    items
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<PathBuf> for Value {
    fn from(v: PathBuf) -> Self {
        Value::Path(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::None)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

/// Conversion out of a [`Value`] for typed argument access
pub trait FromValue: Sized {
    /// Type name used in error messages
    const EXPECTED: &'static str;

    /// Convert, returning `None` when the value has the wrong shape
    fn from_value(value: &Value) -> Option<Self>;

    /// Convert, reporting a `ValueType` error for argument `name`
    fn extract(name: &str, value: &Value) -> ArgtreeResult<Self> {
        Self::from_value(value).ok_or_else(|| ArgtreeError::ValueType {
            name: name.to_string(),
            expected: Self::EXPECTED,
            found: format!("{} `{}`", value.type_name(), value),
        })
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "str";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for PathBuf {
    const EXPECTED: &'static str = "path";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Path(p) => Some(p.clone()),
            Value::Str(s) => Some(PathBuf::from(s)),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::None => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "sequence";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) | Value::Tuple(items) => {
                items.iter().map(T::from_value).collect()
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_type_ignores_payload() {
        assert!(Value::from("a").same_type(&Value::from("b")));
        assert!(!Value::from("a").same_type(&Value::Int(1)));
    }

    #[test]
    fn test_extract_optional_and_sequences() {
        assert_eq!(Option::<i64>::extract("y", &Value::None).unwrap(), None);
        assert_eq!(Option::<i64>::extract("y", &Value::Int(3)).unwrap(), Some(3));

        let seq = Value::Tuple(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(Vec::<i64>::extract("xs", &seq).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_extract_wrong_type_reports_name() {
        let err = i64::extract("x", &Value::from("hi")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("`x`"));
        assert!(msg.contains("int"));
    }

    #[test]
    fn test_serialize_untagged() {
        let mut map = BTreeMap::new();
        map.insert("x".to_string(), Value::Int(5));
        map.insert("y".to_string(), Value::None);
        let json = serde_json::to_string(&Value::Map(map)).unwrap();
        assert_eq!(json, r#"{"x":5,"y":null}"#);
    }

    #[test]
    fn test_display_float_keeps_fraction() {
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(-0.5).to_string(), "-0.5");
    }

    #[test]
    fn test_display_sequences() {
        let v = Value::List(vec![Value::from("a"), Value::from("e")]);
        assert_eq!(v.to_string(), "[a, e]");
    }
}
