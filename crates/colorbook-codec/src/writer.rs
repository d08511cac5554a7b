use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::encoder::encode_book;
use crate::error::{EncodeError, ValidationError};
use crate::types::ColorBook;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes complete color books to any `Write` stream.
///
/// A book is fully encoded before the first byte is written, so a
/// validation failure never leaves a partial file behind.
pub struct AcbWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> AcbWriter<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Encode and write a book (blocking).
    pub fn write_book(&mut self, book: &ColorBook) -> Result<(), EncodeError> {
        self.buf.clear();
        encode_into(book, &mut self.buf)?;

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(EncodeError::Io(std::io::Error::from(ErrorKind::WriteZero))),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(EncodeError::Io(err)),
            }
        }

        tracing::debug!(id = book.id, bytes = self.buf.len(), "wrote ACB book");
        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<(), EncodeError> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(EncodeError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

/// Encode and write a book to an async stream.
#[cfg(feature = "async")]
pub async fn write_book_async<W>(dst: &mut W, book: &ColorBook) -> Result<(), EncodeError>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    use tokio::io::AsyncWriteExt;

    let mut buf = BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY);
    encode_into(book, &mut buf)?;
    dst.write_all(&buf).await?;
    dst.flush().await?;
    Ok(())
}

fn encode_into(book: &ColorBook, dst: &mut BytesMut) -> Result<(), ValidationError> {
    for chunk in encode_book(book) {
        dst.extend_from_slice(&chunk?);
    }
    Ok(())
}
