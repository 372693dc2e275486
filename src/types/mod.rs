//! Type shapes and their handlers
//!
//! Every supported annotation classifies into exactly one [`TypeNode`]
//! variant. The variant decides the flag's metavar, how each token is parsed,
//! and which argument specs get registered for it.
//!
//! | Variant | Metavar | Registers |
//! |---|---|---|
//! | `Primitive` | `int` | one flag |
//! | `Optional` | `T?` | inner's flags, defaulting to `none` |
//! | `Union` | `{A,B}` | one flag, first parsing alternative wins |
//! | `List` | `[T]` | one multi-token flag |
//! | `HomoTuple` | `(T)` | one multi-token flag |
//! | `CallableChoice` / `ConstrainedVar` | `{a,b}` | selector flag + delayed registration |
//! | `ValueSet` | `{x,y}` | one flag with exact membership |

pub mod classifier;
pub mod converters;
pub mod handler;

pub use classifier::classify;
pub use converters::{boolean, normalize_path, PathOptions};
pub use handler::Shape;

use crate::signature::Callable;
use crate::value::Value;
use std::sync::Arc;

/// Primitive scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// `i64`
    Int,
    /// `f64`
    Float,
    /// `String`, taken verbatim
    Str,
    /// Word-set boolean
    Bool,
    /// Filesystem path
    Path(PathOptions),
}

impl PrimitiveKind {
    /// Look up a primitive by its annotation name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "str" => Some(Self::Str),
            "bool" => Some(Self::Bool),
            "path" => Some(Self::Path(PathOptions::default())),
            _ => None,
        }
    }

    /// Annotation name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Path(_) => "path",
        }
    }
}

/// Classified type of a parameter
#[derive(Debug, Clone)]
pub enum TypeNode {
    /// Single scalar value
    Primitive(PrimitiveKind),
    /// Inner type or absence
    Optional(Box<TypeNode>),
    /// Alternatives tried in declaration order
    Union(Vec<TypeNode>),
    /// Zero or more values
    List(Box<TypeNode>),
    /// Zero or more values, delivered as a tuple
    HomoTuple(Box<TypeNode>),
    /// Pick one callable by name, then recurse into its parameters
    CallableChoice(Vec<Arc<Callable>>),
    /// Same as `CallableChoice`, sourced from a type variable's constraints
    ConstrainedVar {
        /// Type variable name
        name: String,
        /// Constraint set
        candidates: Vec<Arc<Callable>>,
    },
    /// Fixed set of literals of one runtime type
    ValueSet(Vec<Value>),
}

impl TypeNode {
    /// Whether the node parses a single token into a single value
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            TypeNode::Primitive(_) | TypeNode::Union(_) | TypeNode::ValueSet(_)
        )
    }

    /// The node with any `Optional` wrapper removed
    pub fn peel_optional(&self) -> &TypeNode {
        match self {
            TypeNode::Optional(inner) => inner.peel_optional(),
            other => other,
        }
    }

    /// Candidate callables of a selector node
    pub fn candidates(&self) -> Option<&[Arc<Callable>]> {
        match self.peel_optional() {
            TypeNode::CallableChoice(candidates) => Some(candidates),
            TypeNode::ConstrainedVar { candidates, .. } => Some(candidates),
            _ => None,
        }
    }
}
