use std::fmt;

use crate::types::ColorSpace;

/// A decode step, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Signature,
    Version,
    Id,
    Title,
    ColorNamePrefix,
    ColorNameSuffix,
    Description,
    ColorCount,
    PageSize,
    PageMidPoint,
    ColorSpaceId,
    /// A color record, zero-based.
    ColorRecord { index: u16 },
    Trailer,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Signature => f.write_str("signature"),
            Step::Version => f.write_str("version"),
            Step::Id => f.write_str("id"),
            Step::Title => f.write_str("title"),
            Step::ColorNamePrefix => f.write_str("color name prefix"),
            Step::ColorNameSuffix => f.write_str("color name suffix"),
            Step::Description => f.write_str("description"),
            Step::ColorCount => f.write_str("color count"),
            Step::PageSize => f.write_str("page size"),
            Step::PageMidPoint => f.write_str("page mid point"),
            Step::ColorSpaceId => f.write_str("color space id"),
            Step::ColorRecord { index } => write!(f, "color record {index}"),
            Step::Trailer => f.write_str("trailer"),
        }
    }
}

/// Structurally invalid ACB input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The first four bytes are not `"8BCB"`.
    #[error("not an ACB file (signature {0:02x?}, expected \"8BCB\")")]
    InvalidSignature([u8; 4]),

    /// Only version 1 is supported.
    #[error("unsupported ACB version {0}")]
    UnsupportedVersion(u16),

    /// The color space id is not one of 0 (RGB), 2 (CMYK) or 7 (Lab).
    #[error("unknown color space id {0}")]
    UnknownColorSpace(u16),

    /// A string length prefix exceeds the configured maximum.
    #[error("string too long ({len} code units, max {max})")]
    StringTooLong { len: u32, max: u32 },
}

/// The input ended while a read was still outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("stream truncated ({requested} bytes requested, {buffered} buffered)")]
pub struct TruncatedStream {
    pub requested: usize,
    pub buffered: usize,
}

/// Errors that terminate a decode.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input is not a valid ACB v1 stream.
    #[error("malformed {step}: {source}")]
    Format {
        step: Step,
        #[source]
        source: FormatError,
    },

    /// The input ended before the book was complete.
    #[error("stream truncated while reading {step}")]
    Truncated { step: Step },

    /// An I/O error occurred on the underlying source.
    #[error("ACB I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// The step that failed, if the failure happened inside the decoder.
    pub fn step(&self) -> Option<Step> {
        match self {
            DecodeError::Format { step, .. } | DecodeError::Truncated { step } => Some(*step),
            DecodeError::Io(_) => None,
        }
    }

    /// Returns true for structural format violations.
    pub fn is_format(&self) -> bool {
        matches!(self, DecodeError::Format { .. })
    }

    /// Returns true when the input ended early.
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }
}

/// A caller-supplied book violates an encoding invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The color space name is not RGB, CMYK or Lab.
    #[error("unknown color space: {0}")]
    UnknownColorSpace(String),

    /// The wire color count is a 16-bit field.
    #[error("too many colors ({0}, max 65535)")]
    TooManyColors(usize),

    /// Color codes are exactly six ASCII bytes on the wire.
    #[error("color {index}: code {code:?} is not exactly 6 ASCII bytes")]
    InvalidCode { index: usize, code: String },

    /// Component count does not match the book's color space.
    #[error("color {index}: {space} expects {expected} components, got {actual}")]
    ComponentCount {
        index: usize,
        space: ColorSpace,
        expected: usize,
        actual: usize,
    },

    /// A string does not fit a 32-bit length prefix.
    #[error("{field} too long ({len} UTF-16 code units)")]
    StringTooLong { field: &'static str, len: usize },
}

/// Errors from writing an encoded book.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The book failed validation; nothing was written.
    #[error("invalid color book: {0}")]
    Validation(#[from] ValidationError),

    /// An I/O error occurred on the destination.
    #[error("ACB I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
