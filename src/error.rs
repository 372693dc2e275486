//! Error types for argument derivation, resolution and invocation

use thiserror::Error;

/// Result type for argtree operations
pub type ArgtreeResult<T> = Result<T, ArgtreeError>;

/// Errors that can occur while deriving, parsing or invoking a call tree
#[derive(Debug, Error)]
pub enum ArgtreeError {
    /// Annotation shape the classifier does not recognize
    #[error("Unsupported annotation: {0}")]
    UnsupportedType(String),

    /// Two callables or two flags resolve to the same name
    #[error("Name collision: {0}")]
    NameCollision(String),

    /// Literal set whose members are not all of one concrete type
    #[error("Value set {values} requires all of its candidates to be of the same type")]
    ValueSetTypeMismatch {
        /// Textual rendering of the offending literal set
        values: String,
    },

    /// Token rejected by a handler, missing required flag, unknown sub-command, help
    #[error("{0}")]
    ArgumentParse(#[from] clap::Error),

    /// Delayed registrations did not settle within the pass ceiling
    #[error("Delayed registration did not reach a fixed point after {passes} passes (pending: {pending})")]
    RegistrationCycle {
        /// Number of passes executed
        passes: usize,
        /// Pending registrations at the time of failure
        pending: String,
    },

    /// More than one root call survived reconstruction
    #[error("Expected exactly one root call, found {0}")]
    AmbiguousRoot(usize),

    /// No invocable root call after reconstruction
    #[error("No root call found in the parsed namespace")]
    MissingRoot,

    /// Application-level misconfiguration (empty registry, bad settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Argument value of the wrong runtime type
    #[error("Argument `{name}` expected {expected}, found {found}")]
    ValueType {
        /// Argument name
        name: String,
        /// Expected type name
        expected: &'static str,
        /// Actual value rendering
        found: String,
    },

    /// Argument not bound in the call
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    /// Callable body returned an error
    #[error("Invocation of `{name}` failed: {message}")]
    Invocation {
        /// Callable name
        name: String,
        /// Rendered error chain
        message: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArgtreeError {
    /// Create an unsupported-annotation error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Self::UnsupportedType(msg.into())
    }

    /// Create a name collision error
    pub fn collision<S: Into<String>>(msg: S) -> Self {
        Self::NameCollision(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Process exit code for this error.
    ///
    /// Parse errors carry clap's own code (2 for usage errors, 0 for help and
    /// version output); everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ArgumentParse(err) => err.exit_code(),
            _ => 1,
        }
    }

    /// Whether this is a parse error raised by the flag parser
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ArgumentParse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_for_registration_errors() {
        assert_eq!(ArgtreeError::unsupported("Tuple[int, str]").exit_code(), 1);
        assert_eq!(ArgtreeError::MissingRoot.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_for_parse_errors() {
        let err = clap::Error::new(clap::error::ErrorKind::MissingRequiredArgument);
        let err = ArgtreeError::from(err);
        assert!(err.is_parse_error());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_display_includes_context() {
        let err = ArgtreeError::ValueSetTypeMismatch {
            values: "{1, a}".to_string(),
        };
        assert!(err.to_string().contains("{1, a}"));
    }
}
