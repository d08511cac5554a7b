/// Default maximum string length: no limit below the 32-bit length prefix.
///
/// Anything the encoder accepts decodes with the default configuration.
/// Callers reading untrusted files can lower it.
pub const DEFAULT_MAX_STRING_LEN: u32 = u32::MAX;

/// Default chunk size when pumping bytes from a source.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 8 * 1024;

/// Configuration for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Longest string length prefix accepted, in code units. Default: unlimited.
    pub max_string_len: u32,
    /// Bytes requested per read from a blocking or async source. Default: 8 KiB.
    pub read_chunk_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_string_len: DEFAULT_MAX_STRING_LEN,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}
