use std::future::Future;
use std::io::{ErrorKind, Read};
use std::pin::pin;
use std::task::{Context, Poll, Waker};

use crate::chunk::chunk_channel;
use crate::config::CodecConfig;
use crate::decoder::AcbDecoder;
use crate::error::{DecodeError, Result};
use crate::types::ColorBook;

/// Reads a color book from any blocking `Read` source.
///
/// Bytes are pumped into a chunk channel in `read_chunk_size` pieces and the
/// decoder is advanced after each piece, so short reads are handled
/// internally and no async runtime is needed.
pub struct AcbReader<T> {
    inner: T,
    config: CodecConfig,
}

impl<T: Read> AcbReader<T> {
    /// Create a reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, CodecConfig::default())
    }

    /// Create a reader with explicit configuration.
    pub fn with_config(inner: T, config: CodecConfig) -> Self {
        Self { inner, config }
    }

    /// Read one complete book (blocking).
    ///
    /// Returns `Err(DecodeError::Truncated { .. })` when EOF arrives first.
    /// Bytes past the trailer that were already read from the source are
    /// discarded.
    pub fn read_book(&mut self) -> Result<ColorBook> {
        let (mut sink, reader) = chunk_channel();
        let mut decode = pin!(AcbDecoder::with_config(reader, self.config).decode());
        // Every wakeup comes from our own feed() calls, so polling after each
        // one is enough.
        let mut cx = Context::from_waker(Waker::noop());
        let mut chunk = vec![0u8; self.config.read_chunk_size.max(1)];

        loop {
            if let Poll::Ready(result) = decode.as_mut().poll(&mut cx) {
                return result;
            }

            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(DecodeError::Io(err)),
            };

            if read == 0 {
                tracing::trace!("source reached EOF");
                sink.close();
                // Closing fails every outstanding read, so the decoder resolves here.
                return match decode.as_mut().poll(&mut cx) {
                    Poll::Ready(result) => result,
                    Poll::Pending => Err(DecodeError::Io(std::io::Error::new(
                        ErrorKind::UnexpectedEof,
                        "decoder stalled at end of input",
                    ))),
                };
            }

            sink.feed(&chunk[..read]);
        }
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying source.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner source.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current reader configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

/// Read one complete book from an async source.
///
/// The source is pumped concurrently with decoding. If decoding finishes
/// (successfully or not) before EOF, the rest of the source is left unread.
#[cfg(feature = "async")]
pub async fn read_book_async<R>(src: R, config: CodecConfig) -> Result<ColorBook>
where
    R: tokio::io::AsyncRead + Unpin,
{
    use futures_util::StreamExt;
    use tokio_util::io::ReaderStream;

    let (mut sink, reader) = chunk_channel();
    let mut decode = pin!(AcbDecoder::with_config(reader, config).decode());
    let mut stream = ReaderStream::with_capacity(src, config.read_chunk_size.max(1));

    loop {
        tokio::select! {
            biased;
            result = decode.as_mut() => return result,
            next = stream.next() => match next {
                Some(Ok(bytes)) => {
                    sink.feed(&bytes);
                }
                Some(Err(err)) => return Err(DecodeError::Io(err)),
                None => {
                    tracing::trace!("source reached EOF");
                    sink.close();
                    return decode.await;
                }
            },
        }
    }
}
