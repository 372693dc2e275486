//! Declared parameter types
//!
//! An [`Annotation`] is what a caller writes down for a parameter. It is
//! deliberately looser than [`TypeNode`](crate::types::TypeNode): shapes such as
//! fixed-arity tuples or a union of a callable and a string can be expressed
//! here and are rejected by the classifier.

use super::callable::Callable;
use crate::types::PathOptions;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Declared type of a parameter
#[derive(Clone)]
pub enum Annotation {
    /// Named primitive: `int`, `float`, `str`, `bool`, `path`
    Named(String),
    /// Path primitive with normalization options
    PathWith(PathOptions),
    /// The none type, only meaningful inside a union
    NoneType,
    /// Union of alternatives (a union containing `NoneType` is optional)
    Union(Vec<Annotation>),
    /// List with its type arguments
    List(Vec<Annotation>),
    /// Tuple with its type arguments, `Ellipsis` marks variable length
    Tuple(Vec<Annotation>),
    /// Ellipsis marker for variable-length tuples
    Ellipsis,
    /// Type-of wrapper around a callable or a union of callables
    Type(Box<Annotation>),
    /// Reference to a callable
    Callable(Arc<Callable>),
    /// Type variable with a constraint set
    TypeVar {
        /// Variable name
        name: String,
        /// Constraint set
        constraints: Vec<Annotation>,
    },
    /// Fixed set of literal values
    Literal(Vec<Value>),
}

impl Annotation {
    /// `int`
    pub fn int() -> Self {
        Self::Named("int".to_string())
    }

    /// `float`
    pub fn float() -> Self {
        Self::Named("float".to_string())
    }

    /// `str`
    pub fn string() -> Self {
        Self::Named("str".to_string())
    }

    /// `bool`, parsed from a yes/no word set
    pub fn boolean() -> Self {
        Self::Named("bool".to_string())
    }

    /// `path` without normalization
    pub fn path() -> Self {
        Self::Named("path".to_string())
    }

    /// `path` with normalization options
    pub fn path_with(options: PathOptions) -> Self {
        Self::PathWith(options)
    }

    /// `Optional[inner]`
    pub fn optional(inner: Annotation) -> Self {
        Self::Union(vec![inner, Self::NoneType])
    }

    /// `Union[alternatives...]`
    pub fn union(alternatives: Vec<Annotation>) -> Self {
        Self::Union(alternatives)
    }

    /// `List[inner]`
    pub fn list(inner: Annotation) -> Self {
        Self::List(vec![inner])
    }

    /// `Tuple[inner, ...]`
    pub fn tuple_of(inner: Annotation) -> Self {
        Self::Tuple(vec![inner, Self::Ellipsis])
    }

    /// `Type[callable]`
    pub fn type_of(callable: &Arc<Callable>) -> Self {
        Self::Type(Box::new(Self::Callable(Arc::clone(callable))))
    }

    /// `Type[Union[callables...]]`
    pub fn one_of(callables: &[Arc<Callable>]) -> Self {
        let arms = callables
            .iter()
            .map(|c| Self::Callable(Arc::clone(c)))
            .collect();
        Self::Type(Box::new(Self::Union(arms)))
    }

    /// `TypeVar(name, constraints...)` over callables
    pub fn type_var(name: impl Into<String>, callables: &[Arc<Callable>]) -> Self {
        Self::TypeVar {
            name: name.into(),
            constraints: callables
                .iter()
                .map(|c| Self::Callable(Arc::clone(c)))
                .collect(),
        }
    }

    /// `Literal[values...]`
    pub fn literal<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::Literal(values.into_iter().map(Into::into).collect())
    }

    /// Whether this is a union carrying `NoneType`
    pub fn is_optional(&self) -> bool {
        match self {
            Self::Union(arms) => arms.iter().any(|a| matches!(a, Self::NoneType)),
            _ => false,
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{}", name),
            Self::PathWith(_) => write!(f, "path"),
            Self::NoneType => write!(f, "NoneType"),
            Self::Union(arms) => write!(f, "Union[{}]", join(arms)),
            Self::List(args) => write!(f, "List[{}]", join(args)),
            Self::Tuple(args) => write!(f, "Tuple[{}]", join(args)),
            Self::Ellipsis => write!(f, "..."),
            Self::Type(inner) => write!(f, "Type[{}]", inner),
            Self::Callable(c) => write!(f, "{}", c.name()),
            Self::TypeVar { name, constraints } => {
                write!(f, "TypeVar({}", name)?;
                for c in constraints {
                    write!(f, ", {}", c)?;
                }
                write!(f, ")")
            }
            Self::Literal(values) => {
                let body = values
                    .iter()
                    .map(|v| format!("{:?}", v.to_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Literal[{}]", body)
            }
        }
    }
}

impl fmt::Debug for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

fn join(items: &[Annotation]) -> String {
    items
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
