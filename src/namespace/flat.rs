//! Flat parser output keyed by domain path

use crate::registration::DomainPath;
use crate::signature::Callable;
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Value bound to a namespace key
#[derive(Clone)]
pub enum Binding {
    /// Parsed value
    Literal(Value),
    /// Callable chosen by a selector flag
    Selected(Arc<Callable>),
}

impl PartialEq for Binding {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Binding::Literal(a), Binding::Literal(b)) => a == b,
            (Binding::Selected(a), Binding::Selected(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Literal(v) => write!(f, "Literal({:?})", v),
            Binding::Selected(c) => write!(f, "Selected({})", c.name()),
        }
    }
}

/// Mapping from namespace key to bound value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatNamespace {
    entries: BTreeMap<DomainPath, Binding>,
}

impl FlatNamespace {
    /// Create an empty namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `dest`, replacing any previous binding
    pub fn insert(&mut self, dest: DomainPath, binding: Binding) {
        self.entries.insert(dest, binding);
    }

    /// Binding at `dest`
    pub fn get(&self, dest: &DomainPath) -> Option<&Binding> {
        self.entries.get(dest)
    }

    /// Callable selected at `dest`, if any
    pub fn selected(&self, dest: &DomainPath) -> Option<Arc<Callable>> {
        match self.entries.get(dest) {
            Some(Binding::Selected(c)) => Some(Arc::clone(c)),
            _ => None,
        }
    }

    /// Literal value at `dest`, if any
    pub fn literal(&self, dest: &DomainPath) -> Option<&Value> {
        match self.entries.get(dest) {
            Some(Binding::Literal(v)) => Some(v),
            _ => None,
        }
    }

    /// Whether `dest` is bound
    pub fn contains(&self, dest: &DomainPath) -> bool {
        self.entries.contains_key(dest)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in key order
    pub fn iter(&self) -> impl Iterator<Item = (&DomainPath, &Binding)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_and_literal_lookup() {
        let f = Callable::new("f", |_| Ok(Value::None)).build();
        let root = DomainPath::root("f");

        let mut ns = FlatNamespace::new();
        ns.insert(root.clone(), Binding::Selected(Arc::clone(&f)));
        ns.insert(root.child("x"), Binding::Literal(Value::Int(5)));

        assert_eq!(ns.selected(&root).unwrap().name(), "f");
        assert!(ns.literal(&root).is_none());
        assert_eq!(ns.literal(&root.child("x")), Some(&Value::Int(5)));
        assert!(ns.selected(&root.child("x")).is_none());
        assert_eq!(ns.len(), 2);
    }

    #[test]
    fn test_insert_replaces() {
        let mut ns = FlatNamespace::new();
        let key = DomainPath::root("f").child("x");
        ns.insert(key.clone(), Binding::Literal(Value::Int(1)));
        ns.insert(key.clone(), Binding::Literal(Value::Int(2)));
        assert_eq!(ns.literal(&key), Some(&Value::Int(2)));
        assert_eq!(ns.len(), 1);
    }
}
