use std::fmt;
use std::io;

use colorbook_codec::{DecodeError, EncodeError};
use colorbook_schema::SchemaError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound | io::ErrorKind::BrokenPipe => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn decode_error(context: &str, err: DecodeError) -> CliError {
    match err {
        DecodeError::Io(source) => io_error(context, source),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn encode_error(context: &str, err: EncodeError) -> CliError {
    match err {
        EncodeError::Io(source) => io_error(context, source),
        EncodeError::Validation(err) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
    }
}

pub fn schema_error(context: &str, err: SchemaError) -> CliError {
    match err {
        SchemaError::CompileFailed(_) => CliError::new(INTERNAL, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use colorbook_codec::{FormatError, Step, ValidationError};

    use super::*;

    #[test]
    fn malformed_input_is_data_invalid() {
        let err = decode_error(
            "decode failed",
            DecodeError::Format {
                step: Step::Signature,
                source: FormatError::InvalidSignature(*b"RIFF"),
            },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("decode failed: malformed signature"));

        let err = decode_error("decode failed", DecodeError::Truncated { step: Step::Trailer });
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn io_kinds_map_to_codes() {
        let err = decode_error(
            "read failed",
            DecodeError::Io(io::Error::from(io::ErrorKind::PermissionDenied)),
        );
        assert_eq!(err.code, PERMISSION_DENIED);

        let err = io_error("open", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.code, FAILURE);

        let err = encode_error("write", EncodeError::Io(io::Error::other("disk on fire")));
        assert_eq!(err.code, INTERNAL);
    }

    #[test]
    fn invalid_books_are_data_invalid() {
        let err = encode_error(
            "encode failed",
            EncodeError::Validation(ValidationError::TooManyColors(70_000)),
        );
        assert_eq!(err.code, DATA_INVALID);

        let err = schema_error(
            "validate",
            SchemaError::ValidationFailed {
                message: "bad".to_string(),
            },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert_eq!(err.to_string(), "validate: validation failed: bad");
    }
}
