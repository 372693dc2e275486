//! Callable declarations and signature inspection
//!
//! A [`Callable`] carries its name, its ordered parameters and a body. The
//! registration engine never looks at declarations directly: it goes through
//! [`inspect`], which fills in the implicit rules (an unannotated parameter is a
//! string, a `none` default makes the parameter optional).
//!
//! # Example
//!
//! ```rust
//! use argtree::signature::{Annotation, Callable};
//! use argtree::value::Value;
//!
//! let f = Callable::new("f", |args| {
//!     let x: i64 = args.get("x")?;
//!     Ok(Value::Int(x * 2))
//! })
//! .param("x", Annotation::int())
//! .param_with_default("y", Annotation::string(), Value::None)
//! .build();
//!
//! let params = argtree::signature::inspect(&f);
//! assert!(params[1].annotation.is_optional());
//! ```

pub mod annotation;
pub mod arguments;
pub mod callable;

pub use annotation::Annotation;
pub use arguments::{Arguments, PAYLOAD_KEY};
pub use callable::{Callable, CallableFn, Param, ParamDefault};

use crate::value::Value;

/// A parameter after the implicit rules have been applied
#[derive(Debug, Clone)]
pub struct InspectedParam {
    /// Parameter name
    pub name: String,
    /// Effective annotation
    pub annotation: Annotation,
    /// Default value
    pub default: ParamDefault,
}

/// Read a callable's parameter list in declaration order
pub fn inspect(callable: &Callable) -> Vec<InspectedParam> {
    callable
        .params()
        .iter()
        .map(|param| {
            let mut annotation = param.annotation.clone().unwrap_or_else(Annotation::string);
            if matches!(param.default, ParamDefault::Value(Value::None)) && !annotation.is_optional() {
                annotation = Annotation::optional(annotation);
            }
            InspectedParam {
                name: param.name.clone(),
                annotation,
                default: param.default.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_defaults_missing_annotation_to_str() {
        let f = Callable::new("f", |_| Ok(Value::None)).untyped("name");
        let params = inspect(&f);
        assert_eq!(params[0].annotation.to_string(), "str");
    }

    #[test]
    fn test_inspect_wraps_none_default_once() {
        let f = Callable::new("f", |_| Ok(Value::None))
            .param_with_default("a", Annotation::int(), Value::None)
            .param_with_default("b", Annotation::optional(Annotation::int()), Value::None)
            .param_with_default("c", Annotation::int(), 3i64);
        let params = inspect(&f);
        assert_eq!(params[0].annotation.to_string(), "Union[int, NoneType]");
        assert_eq!(params[1].annotation.to_string(), "Union[int, NoneType]");
        assert_eq!(params[2].annotation.to_string(), "int");
    }
}
