//! Argument specs and delayed registrations

use super::naming::DomainPath;
use crate::signature::{Callable, ParamDefault};
use crate::types::TypeNode;
use crate::value::Value;
use std::sync::Arc;

/// What a registered flag produces
#[derive(Debug, Clone)]
pub enum SpecKind {
    /// One value
    Scalar,
    /// Sequence of values, one per token
    Multi {
        /// Deliver as a tuple rather than a list
        tuple: bool,
    },
    /// Name of the selected candidate
    Selector {
        /// Candidates the flag chooses between
        candidates: Vec<Arc<Callable>>,
    },
}

/// A single registered flag
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    /// Dash-joined flag name, without the leading `--`
    pub flag: String,
    /// Namespace key
    pub dest: DomainPath,
    /// Usage metavar
    pub metavar: String,
    /// Node whose parser handles each token
    pub node: Arc<TypeNode>,
    /// Value shape
    pub kind: SpecKind,
    /// Default, or `Required`
    pub default: ParamDefault,
}

impl ArgumentSpec {
    /// Parse one token for this flag
    pub fn parse(&self, token: &str) -> Result<Value, String> {
        self.node.parse(token)
    }

    /// Whether the flag must be supplied once required flags are enforced
    pub fn is_required(&self) -> bool {
        matches!(self.default, ParamDefault::Required)
    }

    /// Whether the flag consumes a run of tokens
    pub fn takes_many(&self) -> bool {
        matches!(self.kind, SpecKind::Multi { .. })
    }

    /// Candidate selected by `name`, for selector flags
    pub fn select(&self, name: &str) -> Option<Arc<Callable>> {
        match &self.kind {
            SpecKind::Selector { candidates } => {
                candidates.iter().find(|c| c.name() == name).cloned()
            }
            _ => None,
        }
    }

    /// Help line
    pub fn help(&self) -> String {
        match self.default.value() {
            Some(default) => format!("{} (default: {})", self.dest, default),
            None => self.dest.to_string(),
        }
    }
}

/// Registration blocked until the selector at `selector` has a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedRegistration {
    /// Unique pending name
    pub key: String,
    /// Namespace key of the selector flag
    pub selector: DomainPath,
}

impl DelayedRegistration {
    /// Delay keyed by the selector's namespace key
    pub fn new(selector: DomainPath) -> Self {
        Self {
            key: selector.to_string(),
            selector,
        }
    }
}
