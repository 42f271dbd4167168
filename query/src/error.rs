use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

/// Errors returned while compiling a statement. Compilation stops at the first error.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum CompileError {
    #[error("invalid number of arguments for {name}, expected {expected}, got {got}")]
    InvalidArgCount {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("invalid number of arguments for {name}, expected at least {min}, got {got}")]
    TooFewArgs { name: String, min: usize, got: usize },
    #[error("expected field argument in {0}()")]
    ExpectedFieldArgument(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("limit ({limit}) in {name} function must be at least 1")]
    InvalidLimit { name: String, limit: i64 },
    #[error("selector function {0}() cannot be combined with other functions")]
    SelectorConflict(String),
    #[error("mixing aggregate and non-aggregate queries is not supported")]
    MixedAggregate,
    #[error("mixing multiple selector functions with tags or fields is not supported")]
    MixedSelectors,
    #[error("at least 1 non-time field must be queried")]
    NoFields,
    #[error("multiple time dimensions not allowed")]
    MultipleTimeDimensions,
    #[error("{0}")]
    InvalidDimension(String),
    /// A known capability gap rather than a malformed query.
    #[error("unimplemented: {0}")]
    Unimplemented(String),
    /// A compiler bug, e.g. an edge left unbound after compilation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CompileError {
    pub fn is_unimplemented(&self) -> bool {
        matches!(self, CompileError::Unimplemented(_))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, CompileError::Internal(_))
    }
}

impl From<&str> for CompileError {
    fn from(message: &str) -> Self {
        CompileError::InvalidArgument(String::from(message))
    }
}

impl From<String> for CompileError {
    fn from(message: String) -> Self {
        CompileError::InvalidArgument(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = CompileError::InvalidArgCount {
            name: "mean".to_string(),
            expected: 1,
            got: 2,
        };
        assert_eq!(
            err.to_string(),
            "invalid number of arguments for mean, expected 1, got 2"
        );

        let err = CompileError::InvalidLimit {
            name: "top".to_string(),
            limit: 0,
        };
        assert_eq!(err.to_string(), "limit (0) in top function must be at least 1");

        assert_eq!(
            CompileError::SelectorConflict("bottom".to_string()).to_string(),
            "selector function bottom() cannot be combined with other functions"
        );
    }

    #[test]
    fn test_classification() {
        assert!(CompileError::Unimplemented("subquery sources".to_string()).is_unimplemented());
        assert!(!CompileError::NoFields.is_unimplemented());
        assert!(CompileError::Internal("dangling edge".to_string()).is_internal());
    }
}
