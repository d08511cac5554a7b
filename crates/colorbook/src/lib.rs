//! Read, write and validate Adobe Color Book (ACB) palettes.
//!
//! # Crate Structure
//!
//! - [`codec`]: streaming ACB decoder and encoder, color-space conversion
//! - [`schema`]: JSON shape validation for books (behind `schema` feature)
//!
//! The `colorbook` binary (behind the `cli` feature) wraps both.

/// Re-export codec types.
pub mod codec {
    pub use colorbook_codec::*;
}

/// Re-export schema types (requires `schema` feature).
#[cfg(feature = "schema")]
pub mod schema {
    pub use colorbook_schema::*;
}
