//! Namespace reconstruction and invocation
//!
//! The flat namespace is folded into a tree along its domain paths. Two views
//! are read off that tree: the call view, where every node holding a selected
//! callable becomes a pending call over its collapsed children, and the literal
//! view, where every bound value (and the name of every selected callable) is
//! keyed by its flag name.

use super::flat::{Binding, FlatNamespace};
use crate::error::{ArgtreeError, ArgtreeResult};
use crate::registration::flag_name;
use crate::signature::{Arguments, Callable, PAYLOAD_KEY};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Node of the reconstructed call tree
#[derive(Clone)]
pub enum CallNode {
    /// Parsed value
    Literal(Value),
    /// Plain sub-namespace without a callable
    Map(BTreeMap<String, CallNode>),
    /// Bound call, not yet invoked
    Call {
        /// Callable to invoke
        callable: Arc<Callable>,
        /// Keyword arguments, invoked before the parent
        args: BTreeMap<String, CallNode>,
    },
}

impl CallNode {
    /// Evaluate leaves before parents and return this node's value
    pub fn evaluate(&self) -> ArgtreeResult<Value> {
        match self {
            CallNode::Literal(value) => Ok(value.clone()),
            CallNode::Map(children) => {
                let mut map = BTreeMap::new();
                for (key, child) in children {
                    map.insert(key.clone(), child.evaluate()?);
                }
                Ok(Value::Map(map))
            }
            CallNode::Call { callable, args } => {
                let arguments = bind(args)?;
                debug!(callable = callable.name(), args = arguments.len(), "invoking");
                callable.call(&arguments)
            }
        }
    }

    /// Callable of a `Call` node
    pub fn callable(&self) -> Option<&Arc<Callable>> {
        match self {
            CallNode::Call { callable, .. } => Some(callable),
            _ => None,
        }
    }

    /// Child named `key` of a `Call` or `Map` node
    pub fn child(&self, key: &str) -> Option<&CallNode> {
        match self {
            CallNode::Call { args, .. } => args.get(key),
            CallNode::Map(children) => children.get(key),
            CallNode::Literal(_) => None,
        }
    }
}

impl PartialEq for CallNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CallNode::Literal(a), CallNode::Literal(b)) => a == b,
            (CallNode::Map(a), CallNode::Map(b)) => a == b,
            (
                CallNode::Call { callable: ca, args: aa },
                CallNode::Call { callable: cb, args: ab },
            ) => ca.name() == cb.name() && aa == ab,
            _ => false,
        }
    }
}

impl fmt::Debug for CallNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallNode::Literal(v) => write!(f, "{:?}", v),
            CallNode::Map(children) => f.debug_map().entries(children.iter()).finish(),
            CallNode::Call { callable, args } => {
                write!(f, "{}", callable.name())?;
                f.debug_map().entries(args.iter()).finish()
            }
        }
    }
}

fn bind(args: &BTreeMap<String, CallNode>) -> ArgtreeResult<Arguments> {
    let mut arguments = Arguments::new();
    for (name, child) in args {
        arguments.insert(name.clone(), child.evaluate()?);
    }
    Ok(arguments)
}

/// Root call plus the flattened literal view
#[derive(Debug, Clone, PartialEq)]
pub struct CallTree {
    /// The single root call
    pub root: CallNode,
    /// Flag name to value, selected callables appearing by name
    pub literals: BTreeMap<String, Value>,
}

impl CallTree {
    /// Invoke the root call.
    ///
    /// A root that accepts a keyword payload additionally receives the literal
    /// view under [`PAYLOAD_KEY`].
    pub fn invoke(&self) -> ArgtreeResult<Value> {
        let CallNode::Call { callable, args } = &self.root else {
            return Err(ArgtreeError::MissingRoot);
        };
        let mut arguments = bind(args)?;
        if callable.accepts_payload() {
            arguments.insert(PAYLOAD_KEY, Value::Map(self.literals.clone()));
        }
        debug!(callable = callable.name(), args = arguments.len(), "invoking root");
        callable.call(&arguments)
    }
}

#[derive(Default)]
struct TreeNode {
    callable: Option<Arc<Callable>>,
    value: Option<Value>,
    children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    fn collapse(&self) -> CallNode {
        let children = || {
            self.children
                .iter()
                .map(|(k, v)| (k.clone(), v.collapse()))
                .collect::<BTreeMap<_, _>>()
        };
        match (&self.callable, &self.value) {
            (Some(callable), _) => CallNode::Call {
                callable: Arc::clone(callable),
                args: children(),
            },
            (None, Some(value)) => CallNode::Literal(value.clone()),
            (None, None) => CallNode::Map(children()),
        }
    }

    fn flatten(&self, path: &mut Vec<String>, out: &mut BTreeMap<String, Value>) {
        let key = flag_name(path.as_slice());
        if !key.is_empty() {
            if let Some(callable) = &self.callable {
                out.insert(key, Value::Str(callable.name().to_string()));
            } else if let Some(value) = &self.value {
                out.insert(key, value.clone());
            }
        }
        for (segment, child) in &self.children {
            path.push(segment.clone());
            child.flatten(path, out);
            path.pop();
        }
    }
}

/// Rebuild the call tree from a finalized namespace
pub fn reconstruct(namespace: &FlatNamespace) -> ArgtreeResult<CallTree> {
    let mut top = TreeNode::default();
    for (dest, binding) in namespace.iter() {
        let mut node = &mut top;
        for segment in dest.segments() {
            node = node.children.entry(segment.clone()).or_default();
        }
        match binding {
            Binding::Literal(value) => node.value = Some(value.clone()),
            Binding::Selected(callable) => node.callable = Some(Arc::clone(callable)),
        }
    }

    let mut roots = top.children.values().map(TreeNode::collapse);
    let root = match (roots.next(), top.children.len()) {
        (None, _) => return Err(ArgtreeError::MissingRoot),
        (Some(root), 1) => root,
        (Some(_), n) => return Err(ArgtreeError::AmbiguousRoot(n)),
    };
    if root.callable().is_none() {
        return Err(ArgtreeError::MissingRoot);
    }

    let mut literals = BTreeMap::new();
    top.flatten(&mut Vec::new(), &mut literals);

    Ok(CallTree { root, literals })
}
