use bytes::{BufMut, BytesMut};

use crate::error::ValidationError;

/// File signature: "8BCB".
pub const SIGNATURE: [u8; 4] = *b"8BCB";

/// The only supported format version.
pub const VERSION: u16 = 1;

/// Width of a color code on the wire.
pub const CODE_LEN: usize = 6;

/// Trailer marking a spot color book.
pub const SPOT_TRAILER: [u8; 8] = *b"spflspot";

/// Trailer marking a process color book.
pub const PROCESS_TRAILER: [u8; 8] = *b"spflproc";

/// Encode a string field.
///
/// Wire format:
/// ```text
/// ┌──────────────────┬──────────────────────────────┐
/// │ Length (4B BE)   │ Text (Length × 2B)           │
/// │ in code units    │ UTF-16, big-endian per unit  │
/// └──────────────────┴──────────────────────────────┘
/// ```
/// An empty string is the length field alone.
pub fn put_string(
    dst: &mut BytesMut,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    let units: Vec<u16> = value.encode_utf16().collect();
    let len = u32::try_from(units.len()).map_err(|_| ValidationError::StringTooLong {
        field,
        len: units.len(),
    })?;

    dst.reserve(4 + units.len() * 2);
    dst.put_u32(len);
    for unit in units {
        dst.put_u16(unit);
    }
    Ok(())
}

/// Decode string payload bytes: every code unit is big-endian on disk.
///
/// Unpaired surrogates become U+FFFD. A trailing odd byte is ignored.
pub fn decode_utf16(data: &[u8]) -> String {
    let units = data
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));

    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Decode fixed-width ASCII; bytes above 0x7F become U+FFFD.
pub fn decode_ascii(data: &[u8]) -> String {
    data.iter()
        .map(|&b| {
            if b.is_ascii() {
                char::from(b)
            } else {
                char::REPLACEMENT_CHARACTER
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_is_length_prefixed_big_endian_units() {
        let mut buf = BytesMut::new();
        put_string(&mut buf, "title", "hello").unwrap();
        assert_eq!(
            buf.as_ref(),
            b"\x00\x00\x00\x05\x00h\x00e\x00l\x00l\x00o".as_ref()
        );
    }

    #[test]
    fn empty_string_is_bare_length() {
        let mut buf = BytesMut::new();
        put_string(&mut buf, "title", "").unwrap();
        assert_eq!(buf.as_ref(), &[0, 0, 0, 0]);
    }

    #[test]
    fn length_counts_code_units_not_chars() {
        let mut buf = BytesMut::new();
        put_string(&mut buf, "name", "a\u{1F3A8}").unwrap();
        assert_eq!(&buf[..4], &[0, 0, 0, 3]);
        assert_eq!(decode_utf16(&buf[4..]), "a\u{1F3A8}");
    }

    #[test]
    fn decodes_non_latin_text() {
        let encoded: Vec<u8> = "Grün 色"
            .encode_utf16()
            .flat_map(|unit| unit.to_be_bytes())
            .collect();
        assert_eq!(decode_utf16(&encoded), "Grün 色");
    }

    #[test]
    fn lone_surrogate_is_replaced() {
        assert_eq!(decode_utf16(&[0xD8, 0x00, 0x00, 0x41]), "\u{FFFD}A");
    }

    #[test]
    fn ascii_replaces_high_bytes() {
        assert_eq!(decode_ascii(b"AB 12 "), "AB 12 ");
        assert_eq!(decode_ascii(&[b'A', 0xE9]), "A\u{FFFD}");
    }
}
