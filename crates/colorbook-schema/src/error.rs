use colorbook_codec::ValidationError;

/// Errors that can occur while validating a JSON color book.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The embedded schema could not be compiled.
    #[error("failed to compile schema: {0}")]
    CompileFailed(String),

    /// The document is not valid JSON, or does not deserialize into a book.
    #[error("document is not a valid color book: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The document failed schema validation.
    #[error("validation failed: {message}")]
    ValidationFailed { message: String },

    /// The document is well-formed but violates a book invariant.
    #[error("invariant violated at {path}: {message}")]
    Invariant { path: String, message: String },
}

impl SchemaError {
    pub(crate) fn invariant(path: impl Into<String>, err: impl ToString) -> Self {
        SchemaError::Invariant {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<ValidationError> for SchemaError {
    fn from(err: ValidationError) -> Self {
        let path = match &err {
            ValidationError::TooManyColors(_) => "/colors".to_string(),
            ValidationError::InvalidCode { index, .. } => format!("/colors/{index}/code"),
            ValidationError::ComponentCount { index, .. } => {
                format!("/colors/{index}/components")
            }
            ValidationError::UnknownColorSpace(_) => "/colorSpace".to_string(),
            ValidationError::StringTooLong { .. } => "/".to_string(),
        };
        SchemaError::invariant(path, err)
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
