//! Callables and their declared parameters

use super::annotation::Annotation;
use super::arguments::Arguments;
use crate::error::{ArgtreeError, ArgtreeResult};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Body of a callable: receives bound keyword arguments, returns a value
pub type CallableFn = dyn Fn(&Arguments) -> anyhow::Result<Value> + Send + Sync;

/// Default of a declared parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamDefault {
    /// No default: the flag must be supplied
    Required,
    /// Value used when the flag is omitted
    Value(Value),
}

impl ParamDefault {
    /// The default value, if one exists
    pub fn value(&self) -> Option<&Value> {
        match self {
            ParamDefault::Required => None,
            ParamDefault::Value(v) => Some(v),
        }
    }
}

/// A declared parameter
#[derive(Debug, Clone)]
pub struct Param {
    /// Parameter name
    pub name: String,
    /// Declared type; `None` is read as `str`
    pub annotation: Option<Annotation>,
    /// Default value
    pub default: ParamDefault,
}

/// A named function whose parameters drive flag registration
pub struct Callable {
    name: String,
    about: Option<String>,
    params: Vec<Param>,
    accepts_payload: bool,
    body: Arc<CallableFn>,
}

impl Callable {
    /// Create a callable with no parameters
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Arguments) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            about: None,
            params: Vec::new(),
            accepts_payload: false,
            body: Arc::new(body),
        }
    }

    /// Set the description shown in sub-command help
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Declare a required parameter
    pub fn param(mut self, name: impl Into<String>, annotation: Annotation) -> Self {
        self.params.push(Param {
            name: name.into(),
            annotation: Some(annotation),
            default: ParamDefault::Required,
        });
        self
    }

    /// Declare a parameter with a default
    pub fn param_with_default(
        mut self,
        name: impl Into<String>,
        annotation: Annotation,
        default: impl Into<Value>,
    ) -> Self {
        self.params.push(Param {
            name: name.into(),
            annotation: Some(annotation),
            default: ParamDefault::Value(default.into()),
        });
        self
    }

    /// Declare a required parameter without an annotation
    pub fn untyped(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            annotation: None,
            default: ParamDefault::Required,
        });
        self
    }

    /// Accept the flattened literal view of the whole namespace as a keyword payload
    pub fn with_payload(mut self) -> Self {
        self.accepts_payload = true;
        self
    }

    /// Finish building and share
    pub fn build(self) -> Arc<Callable> {
        Arc::new(self)
    }

    /// Callable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description, if any
    pub fn description(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// Declared parameters in declaration order
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Whether the callable takes a free-form keyword payload
    pub fn accepts_payload(&self) -> bool {
        self.accepts_payload
    }

    /// Invoke the body
    pub fn call(&self, args: &Arguments) -> ArgtreeResult<Value> {
        (self.body)(args).map_err(|e| ArgtreeError::Invocation {
            name: self.name.clone(),
            message: format!("{:#}", e),
        })
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("accepts_payload", &self.accepts_payload)
            .finish()
    }
}
