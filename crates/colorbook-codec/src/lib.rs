//! Streaming decoder and encoder for Adobe Color Book (ACB) palettes.
//!
//! An ACB file is a big-endian, length-prefixed sequence of header fields,
//! a count-bounded run of color records and an 8-byte trailer:
//! - `"8BCB"` signature and version `1`
//! - book id, four UTF-16 strings, color count, page layout, color space id
//! - per color: name, 6-byte ASCII code, 3 or 4 component bytes
//! - `"spflspot"` / `"spflproc"` trailer
//!
//! Decoding never depends on how the input is chunked: bytes are fed into a
//! [`ChunkSink`] in whatever fragments the transport delivers, and the
//! [`AcbDecoder`] pulls exact-length reads from the paired [`ChunkReader`].

pub mod chunk;
pub mod codec;
pub mod config;
pub mod convert;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod reader;
pub mod types;
pub mod writer;

pub use chunk::{chunk_channel, ChunkReader, ChunkSink, ReadBytes};
pub use codec::{CODE_LEN, PROCESS_TRAILER, SIGNATURE, SPOT_TRAILER, VERSION};
pub use config::{CodecConfig, DEFAULT_MAX_STRING_LEN, DEFAULT_READ_CHUNK_SIZE};
pub use convert::{component_range, from_components, to_components};
pub use decoder::{decode_book, decode_bytes, AcbDecoder};
pub use encoder::{encode_book, encode_to_vec, AcbEncoder};
pub use error::{
    DecodeError, EncodeError, FormatError, Result, Step, TruncatedStream, ValidationError,
};
pub use reader::AcbReader;
#[cfg(feature = "async")]
pub use reader::read_book_async;
pub use types::{Color, ColorBook, ColorSpace};
pub use writer::AcbWriter;
#[cfg(feature = "async")]
pub use writer::write_book_async;
