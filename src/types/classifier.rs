//! Annotation classification
//!
//! The match arms below are in priority order and the first one that fits
//! wins: optional, union, list, tuple, type-of-callables, type variable,
//! literal set, named primitive.

use super::{PrimitiveKind, TypeNode};
use crate::error::{ArgtreeError, ArgtreeResult};
use crate::signature::{Annotation, Callable};
use crate::value::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Classify an annotation into its handler variant
pub fn classify(annotation: &Annotation) -> ArgtreeResult<TypeNode> {
    let node = match annotation {
        Annotation::Union(arms) if annotation.is_optional() => {
            let rest: Vec<Annotation> = arms
                .iter()
                .filter(|a| !matches!(a, Annotation::NoneType))
                .cloned()
                .collect();
            let inner = match rest.as_slice() {
                [] => {
                    return Err(ArgtreeError::unsupported(format!(
                        "{} has no alternative besides NoneType",
                        annotation
                    )))
                }
                [single] => classify(single)?,
                _ => classify(&Annotation::Union(rest))?,
            };
            match inner {
                TypeNode::Optional(_) => inner,
                inner => TypeNode::Optional(Box::new(inner)),
            }
        }
        Annotation::Union(arms) => match arms.as_slice() {
            [] => return Err(ArgtreeError::unsupported("Union[] has no alternatives")),
            [single] => classify(single)?,
            _ => {
                let nodes = arms.iter().map(classify).collect::<ArgtreeResult<Vec<_>>>()?;
                if let Some(bad) = nodes.iter().position(|n| !n.is_scalar()) {
                    return Err(ArgtreeError::unsupported(format!(
                        "{}: alternative `{}` is not a scalar type",
                        annotation, arms[bad]
                    )));
                }
                TypeNode::Union(nodes)
            }
        },
        Annotation::List(args) => match args.as_slice() {
            [inner] => TypeNode::List(Box::new(scalar(inner, annotation)?)),
            _ => {
                return Err(ArgtreeError::unsupported(format!(
                    "{}: lists take exactly one type argument",
                    annotation
                )))
            }
        },
        Annotation::Tuple(args) => match args.as_slice() {
            [inner, Annotation::Ellipsis] => TypeNode::HomoTuple(Box::new(scalar(inner, annotation)?)),
            _ => {
                return Err(ArgtreeError::unsupported(format!(
                    "{}: only variable-length homogeneous tuples are supported",
                    annotation
                )))
            }
        },
        Annotation::Type(inner) => TypeNode::CallableChoice(callables(inner, annotation)?),
        Annotation::TypeVar { name, constraints } => {
            if constraints.is_empty() {
                return Err(ArgtreeError::unsupported(format!(
                    "{}: type variables need a constraint set",
                    annotation
                )));
            }
            let candidates = constraints
                .iter()
                .map(|c| match c {
                    Annotation::Callable(callable) => Ok(Arc::clone(callable)),
                    other => Err(ArgtreeError::unsupported(format!(
                        "{}: constraint `{}` is not a callable",
                        annotation, other
                    ))),
                })
                .collect::<ArgtreeResult<Vec<_>>>()?;
            check_distinct(&candidates, annotation)?;
            TypeNode::ConstrainedVar {
                name: name.clone(),
                candidates,
            }
        }
        Annotation::Literal(values) => TypeNode::ValueSet(value_set(values, annotation)?),
        Annotation::Named(name) => match PrimitiveKind::from_name(name) {
            Some(kind) => TypeNode::Primitive(kind),
            None => return Err(ArgtreeError::unsupported(format!("unknown type `{}`", name))),
        },
        Annotation::PathWith(options) => TypeNode::Primitive(PrimitiveKind::Path(*options)),
        Annotation::Callable(c) => {
            return Err(ArgtreeError::unsupported(format!(
                "bare callable `{}`; wrap it in Type[...]",
                c.name()
            )))
        }
        Annotation::NoneType | Annotation::Ellipsis => {
            return Err(ArgtreeError::unsupported(annotation.to_string()))
        }
    };
    Ok(node)
}

fn scalar(inner: &Annotation, outer: &Annotation) -> ArgtreeResult<TypeNode> {
    let node = classify(inner)?;
    if !node.is_scalar() {
        return Err(ArgtreeError::unsupported(format!(
            "{}: element type `{}` is not a scalar type",
            outer, inner
        )));
    }
    Ok(node)
}

fn callables(inner: &Annotation, outer: &Annotation) -> ArgtreeResult<Vec<Arc<Callable>>> {
    let candidates = match inner {
        Annotation::Callable(c) => vec![Arc::clone(c)],
        Annotation::Union(arms) if !arms.is_empty() => arms
            .iter()
            .map(|arm| match arm {
                Annotation::Callable(c) => Ok(Arc::clone(c)),
                other => Err(ArgtreeError::unsupported(format!(
                    "{}: `{}` is not a callable",
                    outer, other
                ))),
            })
            .collect::<ArgtreeResult<Vec<_>>>()?,
        _ => {
            return Err(ArgtreeError::unsupported(format!(
                "{}: Type[...] must wrap a callable or a union of callables",
                outer
            )))
        }
    };
    check_distinct(&candidates, outer)?;
    Ok(candidates)
}

fn check_distinct(candidates: &[Arc<Callable>], outer: &Annotation) -> ArgtreeResult<()> {
    let mut seen = HashSet::new();
    for c in candidates {
        if !seen.insert(c.name()) {
            return Err(ArgtreeError::collision(format!(
                "{}: candidate `{}` appears more than once",
                outer,
                c.name()
            )));
        }
    }
    Ok(())
}

fn value_set(values: &[Value], outer: &Annotation) -> ArgtreeResult<Vec<Value>> {
    let first = values
        .first()
        .ok_or_else(|| ArgtreeError::unsupported("Literal[] has no values"))?;
    if matches!(
        first,
        Value::None | Value::List(_) | Value::Tuple(_) | Value::Map(_)
    ) {
        return Err(ArgtreeError::unsupported(format!(
            "{}: literals must be scalar values",
            outer
        )));
    }
    if values.iter().any(|v| !v.same_type(first)) {
        return Err(ArgtreeError::ValueSetTypeMismatch {
            values: outer.to_string(),
        });
    }
    Ok(values.to_vec())
}
