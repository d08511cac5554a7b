//! JSON shape validation for color books.
//!
//! Checks a JSON document against the embedded JSON Schema 2020-12 for a
//! [`ColorBook`](colorbook_codec::ColorBook), then against the range
//! invariants the schema cannot express, before handing back a typed book
//! that is ready to encode.

pub mod config;
pub mod error;
pub mod schema;
pub mod validator;

pub use config::ValidatorConfig;
pub use error::{Result, SchemaError};
pub use schema::BOOK_SCHEMA;
pub use validator::{check_invariants, BookValidator};
