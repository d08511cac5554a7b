use std::iter::FusedIterator;

use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::{put_string, CODE_LEN, PROCESS_TRAILER, SIGNATURE, SPOT_TRAILER, VERSION};
use crate::convert::from_components;
use crate::error::ValidationError;
use crate::types::{Color, ColorBook};

const HEADER_CAPACITY: usize = 128;

/// Lazy, consume-once ACB encoder.
///
/// Yields one header chunk, one chunk per color and one trailer chunk. Chunk
/// boundaries carry no meaning; only the concatenation does. The first
/// validation error is yielded in place of the offending chunk and ends the
/// sequence, so the bytes produced so far must be discarded.
pub struct AcbEncoder<'a> {
    book: &'a ColorBook,
    state: State,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Header,
    Color(usize),
    Done,
}

impl<'a> AcbEncoder<'a> {
    pub fn new(book: &'a ColorBook) -> Self {
        Self {
            book,
            state: State::Header,
        }
    }

    fn encode_header(&self) -> Result<Bytes, ValidationError> {
        let book = self.book;
        // The wire count is always derived from the colors themselves.
        let color_count = u16::try_from(book.colors.len())
            .map_err(|_| ValidationError::TooManyColors(book.colors.len()))?;

        let mut buf = BytesMut::with_capacity(HEADER_CAPACITY);
        buf.put_slice(&SIGNATURE);
        buf.put_u16(VERSION);
        buf.put_u16(book.id);
        put_string(&mut buf, "title", &book.title)?;
        put_string(&mut buf, "color name prefix", &book.color_name_prefix)?;
        put_string(&mut buf, "color name suffix", &book.color_name_suffix)?;
        put_string(&mut buf, "description", &book.description)?;
        buf.put_u16(color_count);
        buf.put_u16(book.page_size);
        buf.put_u16(book.page_mid_point);
        buf.put_u16(book.color_space.id());
        Ok(buf.freeze())
    }

    fn encode_color(&self, index: usize, color: &Color) -> Result<Bytes, ValidationError> {
        let space = self.book.color_space;

        if !color.code.is_ascii() || color.code.len() != CODE_LEN {
            return Err(ValidationError::InvalidCode {
                index,
                code: color.code.clone(),
            });
        }

        let expected = space.component_count();
        if color.components.len() != expected {
            return Err(ValidationError::ComponentCount {
                index,
                space,
                expected,
                actual: color.components.len(),
            });
        }

        let mut buf = BytesMut::with_capacity(4 + color.name.len() * 2 + CODE_LEN + expected);
        put_string(&mut buf, "color name", &color.name)?;
        buf.put_slice(color.code.as_bytes());
        buf.put_slice(&from_components(space, &color.components));
        Ok(buf.freeze())
    }

    fn trailer(&self) -> Bytes {
        if self.book.is_spot {
            Bytes::from_static(&SPOT_TRAILER)
        } else {
            Bytes::from_static(&PROCESS_TRAILER)
        }
    }
}

impl Iterator for AcbEncoder<'_> {
    type Item = Result<Bytes, ValidationError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (item, next) = match self.state {
            State::Header => (self.encode_header(), State::Color(0)),
            State::Color(index) => match self.book.colors.get(index) {
                Some(color) => (self.encode_color(index, color), State::Color(index + 1)),
                None => (Ok(self.trailer()), State::Done),
            },
            State::Done => return None,
        };

        self.state = match &item {
            Ok(_) => next,
            Err(err) => {
                tracing::debug!(error = %err, "ACB encoding aborted");
                State::Done
            }
        };
        Some(item)
    }
}

impl FusedIterator for AcbEncoder<'_> {}

/// Encode a book as a lazy sequence of chunks.
pub fn encode_book(book: &ColorBook) -> AcbEncoder<'_> {
    AcbEncoder::new(book)
}

/// Encode a book into one contiguous buffer.
pub fn encode_to_vec(book: &ColorBook) -> Result<Vec<u8>, ValidationError> {
    let mut out = Vec::new();
    for chunk in encode_book(book) {
        out.extend_from_slice(&chunk?);
    }
    Ok(out)
}
