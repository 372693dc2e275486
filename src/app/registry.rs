//! Registry of top-level callables

use crate::error::{ArgtreeError, ArgtreeResult};
use crate::signature::Callable;
use std::sync::Arc;
use tracing::debug;

/// Append-only, ordered collection of top-level callables keyed by name
#[derive(Debug, Default)]
pub struct Registry {
    callables: Vec<Arc<Callable>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callable; names must be unique
    pub fn register(&mut self, callable: Arc<Callable>) -> ArgtreeResult<Arc<Callable>> {
        if self.get(callable.name()).is_some() {
            return Err(ArgtreeError::collision(format!(
                "a callable named `{}` is already registered",
                callable.name()
            )));
        }
        debug!(callable = callable.name(), position = self.callables.len(), "registered callable");
        self.callables.push(Arc::clone(&callable));
        Ok(callable)
    }

    /// Look up a callable by name
    pub fn get(&self, name: &str) -> Option<&Arc<Callable>> {
        self.callables.iter().find(|c| c.name() == name)
    }

    /// Registered callables in registration order
    pub fn callables(&self) -> &[Arc<Callable>] {
        &self.callables
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.callables.iter().map(|c| c.name()).collect()
    }

    /// Number of registered callables
    pub fn len(&self) -> usize {
        self.callables.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.callables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn noop(name: &str) -> Arc<Callable> {
        Callable::new(name, |_| Ok(Value::None)).build()
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = Registry::new();
        registry.register(noop("beta")).unwrap();
        registry.register(noop("alpha")).unwrap();
        assert_eq!(registry.names(), vec!["beta", "alpha"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("alpha").is_some());
        assert!(registry.get("gamma").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = Registry::new();
        registry.register(noop("f")).unwrap();
        let err = registry.register(noop("f")).unwrap_err();
        assert!(matches!(err, ArgtreeError::NameCollision(_)));
        assert_eq!(registry.len(), 1);
    }
}
