//! Parsed namespace and call-tree reconstruction

pub mod call_tree;
pub mod flat;

pub use call_tree::{reconstruct, CallNode, CallTree};
pub use flat::{Binding, FlatNamespace};
