//! Keyword arguments bound to a callable at invocation time

use crate::error::{ArgtreeError, ArgtreeResult};
use crate::value::{FromValue, Value};
use std::collections::BTreeMap;

/// Name under which the literal payload is passed to the root callable
pub const PAYLOAD_KEY: &str = "__payload__";

/// Keyword arguments handed to a callable body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: BTreeMap<String, Value>,
}

impl Arguments {
    /// Create an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Raw value bound to `name`
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Typed value bound to `name`; missing names are an error
    pub fn get<T: FromValue>(&self, name: &str) -> ArgtreeResult<T> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| ArgtreeError::MissingArgument(name.to_string()))?;
        T::extract(name, value)
    }

    /// Typed value bound to `name`; missing names and `none` both read as `None`
    pub fn opt<T: FromValue>(&self, name: &str) -> ArgtreeResult<Option<T>> {
        match self.values.get(name) {
            None | Some(Value::None) => Ok(None),
            Some(value) => T::extract(name, value).map(Some),
        }
    }

    /// The flattened literal view, present only on a payload-accepting root
    pub fn payload(&self) -> Option<&BTreeMap<String, Value>> {
        match self.values.get(PAYLOAD_KEY) {
            Some(Value::Map(map)) => Some(map),
            _ => None,
        }
    }

    /// Number of bound arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over bound arguments in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

impl From<BTreeMap<String, Value>> for Arguments {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_argument() {
        let args = Arguments::new();
        let err = args.get::<i64>("x").unwrap_err();
        assert!(matches!(err, ArgtreeError::MissingArgument(ref n) if n == "x"));
    }

    #[test]
    fn test_opt_treats_none_as_absent() {
        let mut args = Arguments::new();
        args.insert("y", Value::None);
        assert_eq!(args.opt::<String>("y").unwrap(), None);
        assert_eq!(args.opt::<String>("z").unwrap(), None);

        args.insert("y", Value::from("hi"));
        assert_eq!(args.opt::<String>("y").unwrap(), Some("hi".to_string()));
    }

    #[test]
    fn test_payload_lookup() {
        let mut payload = BTreeMap::new();
        payload.insert("x".to_string(), Value::Int(1));

        let mut args = Arguments::new();
        assert!(args.payload().is_none());
        args.insert(PAYLOAD_KEY, Value::Map(payload));
        assert_eq!(args.payload().unwrap().get("x"), Some(&Value::Int(1)));
    }
}
