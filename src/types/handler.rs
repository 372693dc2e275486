//! Per-variant metavar, parse and registration behavior

use super::converters::{boolean, normalize_path};
use super::{PrimitiveKind, TypeNode};
use crate::error::{ArgtreeError, ArgtreeResult};
use crate::registration::{ArgumentSpec, DelayedRegistration, DomainPath, Registrar, SpecKind};
use crate::signature::ParamDefault;
use crate::value::Value;
use std::sync::Arc;

/// How many tokens a flag takes and what its value means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One token, one value
    Scalar,
    /// Zero or more tokens collected into a sequence
    Multi {
        /// Deliver as a tuple rather than a list
        tuple: bool,
    },
    /// One token naming a callable whose parameters are registered later
    Selector,
}

impl TypeNode {
    /// Metavar shown in usage text
    pub fn metavar(&self) -> String {
        match self {
            TypeNode::Primitive(kind) => kind.name().to_string(),
            TypeNode::Optional(inner) => format!("{}?", inner.metavar()),
            TypeNode::Union(arms) => {
                let body = arms.iter().map(|a| a.metavar()).collect::<Vec<_>>().join(",");
                format!("{{{}}}", body)
            }
            TypeNode::List(inner) => format!("[{}]", inner.metavar()),
            TypeNode::HomoTuple(inner) => format!("({})", inner.metavar()),
            TypeNode::CallableChoice(candidates) | TypeNode::ConstrainedVar { candidates, .. } => {
                let body = candidates.iter().map(|c| c.name()).collect::<Vec<_>>().join(",");
                format!("{{{}}}", body)
            }
            TypeNode::ValueSet(values) => {
                let body = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
                format!("{{{}}}", body)
            }
        }
    }

    /// Parse a single token.
    ///
    /// Sequence nodes parse one element per call; the flag parser collects
    /// the elements.
    pub fn parse(&self, token: &str) -> Result<Value, String> {
        match self {
            TypeNode::Primitive(kind) => parse_primitive(kind, token),
            TypeNode::Optional(inner) | TypeNode::List(inner) | TypeNode::HomoTuple(inner) => {
                inner.parse(token)
            }
            TypeNode::Union(arms) => arms
                .iter()
                .find_map(|arm| arm.parse(token).ok())
                .ok_or_else(|| format!("'{}' matches none of {}", token, self.metavar())),
            TypeNode::CallableChoice(candidates) | TypeNode::ConstrainedVar { candidates, .. } => {
                candidates
                    .iter()
                    .find(|c| c.name() == token)
                    .map(|c| Value::Str(c.name().to_string()))
                    .ok_or_else(|| invalid_choice(token, self))
            }
            TypeNode::ValueSet(values) => {
                let parsed = values
                    .first()
                    .and_then(member_kind)
                    .and_then(|kind| parse_primitive(&kind, token).ok());
                match parsed {
                    Some(value) if values.contains(&value) => Ok(value),
                    _ => Err(invalid_choice(token, self)),
                }
            }
        }
    }

    /// Token arity and meaning of this node's flag
    pub fn shape(&self) -> Shape {
        match self.peel_optional() {
            TypeNode::List(_) => Shape::Multi { tuple: false },
            TypeNode::HomoTuple(_) => Shape::Multi { tuple: true },
            TypeNode::CallableChoice(_) | TypeNode::ConstrainedVar { .. } => Shape::Selector,
            _ => Shape::Scalar,
        }
    }

    /// Register this node's flag(s) for the parameter at `dest`
    pub fn register(
        &self,
        registrar: &mut Registrar,
        dest: DomainPath,
        default: ParamDefault,
    ) -> ArgtreeResult<()> {
        let default = match (self, default) {
            (TypeNode::Optional(_), ParamDefault::Required) => ParamDefault::Value(Value::None),
            (_, default) => default,
        };
        let flag = dest.flag_name();
        let metavar = self.metavar();
        let node = Arc::new(self.clone());

        match self.shape() {
            Shape::Scalar => registrar.add_spec(ArgumentSpec {
                flag,
                dest,
                metavar,
                node,
                kind: SpecKind::Scalar,
                default,
            }),
            Shape::Multi { tuple } => registrar.add_spec(ArgumentSpec {
                flag,
                dest,
                metavar,
                node,
                kind: SpecKind::Multi { tuple },
                default,
            }),
            Shape::Selector => {
                let candidates = self.candidates().map(<[_]>::to_vec).unwrap_or_default();
                let default = match default {
                    ParamDefault::Required if candidates.len() == 1 => {
                        ParamDefault::Value(Value::Str(candidates[0].name().to_string()))
                    }
                    ParamDefault::Value(Value::Str(name))
                        if !candidates.iter().any(|c| c.name() == name) =>
                    {
                        return Err(ArgtreeError::config(format!(
                            "default `{}` of `{}` is not one of {}",
                            name, dest, metavar
                        )));
                    }
                    default => default,
                };
                registrar.add_spec(ArgumentSpec {
                    flag,
                    dest: dest.clone(),
                    metavar,
                    node,
                    kind: SpecKind::Selector { candidates },
                    default,
                })?;
                registrar.defer(DelayedRegistration::new(dest))
            }
        }
    }
}

fn parse_primitive(kind: &PrimitiveKind, token: &str) -> Result<Value, String> {
    match kind {
        PrimitiveKind::Int => token
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| format!("invalid int value: '{}'", token)),
        PrimitiveKind::Float => token
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| format!("invalid float value: '{}'", token)),
        PrimitiveKind::Str => Ok(Value::Str(token.to_string())),
        PrimitiveKind::Bool => boolean(token).map(Value::Bool),
        PrimitiveKind::Path(options) => normalize_path(token, options).map(Value::Path),
    }
}

/// Primitive parser shared by the members of a value set
fn member_kind(value: &Value) -> Option<PrimitiveKind> {
    match value {
        Value::Bool(_) => Some(PrimitiveKind::Bool),
        Value::Int(_) => Some(PrimitiveKind::Int),
        Value::Float(_) => Some(PrimitiveKind::Float),
        Value::Str(_) => Some(PrimitiveKind::Str),
        Value::Path(_) => Some(PrimitiveKind::Path(Default::default())),
        Value::None | Value::List(_) | Value::Tuple(_) | Value::Map(_) => None,
    }
}

fn invalid_choice(token: &str, node: &TypeNode) -> String {
    format!("invalid choice: '{}' (choose from {})", token, node.metavar())
}
