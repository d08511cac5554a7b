//! Exact-length reads over a byte stream that arrives in arbitrary fragments.
//!
//! [`chunk_channel`] returns a producer half ([`ChunkSink`]) for the
//! transport and a consumer half ([`ChunkReader`]) for the decoder. Reads are
//! queued in issue order and are never partially satisfied. The accumulator
//! is unbounded; callers that need a memory cap must apply it upstream.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use tokio::sync::oneshot;

use crate::error::TruncatedStream;

type ReadResult = std::result::Result<Bytes, TruncatedStream>;

/// Create a connected sink/reader pair for one decode operation.
pub fn chunk_channel() -> (ChunkSink, ChunkReader) {
    let shared = Arc::new(Mutex::new(Shared::default()));
    (
        ChunkSink {
            shared: Arc::clone(&shared),
        },
        ChunkReader { shared },
    )
}

#[derive(Default)]
struct Shared {
    buf: BytesMut,
    pending: VecDeque<PendingRead>,
    closed: bool,
}

struct PendingRead {
    len: usize,
    reply: oneshot::Sender<ReadResult>,
}

impl Shared {
    /// Complete queued reads from the front while the head fits.
    fn satisfy_pending(&mut self) -> usize {
        let mut satisfied = 0;
        while self
            .pending
            .front()
            .is_some_and(|head| head.len <= self.buf.len())
        {
            let Some(head) = self.pending.pop_front() else {
                break;
            };
            let bytes = self.buf.split_to(head.len).freeze();
            // A dropped read still consumes its bytes so later reads keep their offsets.
            let _ = head.reply.send(Ok(bytes));
            satisfied += 1;
        }
        satisfied
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if self.pending.is_empty() {
            return;
        }

        let buffered = self.buf.len();
        tracing::debug!(
            pending = self.pending.len(),
            buffered,
            "input closed with reads outstanding"
        );
        for read in self.pending.drain(..) {
            let _ = read.reply.send(Err(TruncatedStream {
                requested: read.len,
                buffered,
            }));
        }
        // Bytes owed to a failed read must not be handed to a later one.
        self.buf.clear();
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Producer half: accepts fragments from the transport.
///
/// Dropping the sink closes the stream, exactly like [`ChunkSink::close`].
pub struct ChunkSink {
    shared: Arc<Mutex<Shared>>,
}

impl ChunkSink {
    /// Append a fragment and complete every queued read it makes satisfiable.
    ///
    /// Returns the number of reads completed. When this returns, the whole
    /// fragment has been handed to reads or buffered.
    pub fn feed(&mut self, chunk: &[u8]) -> usize {
        let mut shared = lock(&self.shared);
        shared.buf.extend_from_slice(chunk);
        let satisfied = shared.satisfy_pending();
        tracing::trace!(
            len = chunk.len(),
            satisfied,
            buffered = shared.buf.len(),
            "fed chunk"
        );
        satisfied
    }

    /// Signal end of input. Outstanding and unsatisfiable future reads fail.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for ChunkSink {
    fn drop(&mut self) {
        lock(&self.shared).close();
    }
}

/// Consumer half: exact-length reads in issue order.
pub struct ChunkReader {
    shared: Arc<Mutex<Shared>>,
}

impl ChunkReader {
    /// Request exactly `len` bytes.
    ///
    /// The request joins the queue when this is called, not when the future
    /// is first polled. It completes immediately when nothing is queued ahead
    /// of it and enough bytes are buffered.
    pub fn read(&self, len: usize) -> ReadBytes {
        let mut shared = lock(&self.shared);

        if shared.pending.is_empty() && shared.buf.len() >= len {
            let bytes = shared.buf.split_to(len).freeze();
            return ReadBytes::ready(Ok(bytes));
        }

        if shared.closed {
            return ReadBytes::ready(Err(TruncatedStream {
                requested: len,
                buffered: shared.buf.len(),
            }));
        }

        let (reply, rx) = oneshot::channel();
        shared.pending.push_back(PendingRead { len, reply });
        ReadBytes {
            state: ReadState::Waiting { requested: len, rx },
        }
    }

    /// Bytes buffered and not yet claimed by a read.
    pub fn buffered(&self) -> usize {
        lock(&self.shared).buf.len()
    }

    /// Reads waiting for more input.
    pub fn pending(&self) -> usize {
        lock(&self.shared).pending.len()
    }

    /// Returns true once the sink has been closed or dropped.
    pub fn is_closed(&self) -> bool {
        lock(&self.shared).closed
    }
}

/// Future returned by [`ChunkReader::read`].
#[must_use = "futures do nothing unless polled"]
pub struct ReadBytes {
    state: ReadState,
}

enum ReadState {
    Ready(Option<ReadResult>),
    Waiting {
        requested: usize,
        rx: oneshot::Receiver<ReadResult>,
    },
}

impl ReadBytes {
    fn ready(result: ReadResult) -> Self {
        Self {
            state: ReadState::Ready(Some(result)),
        }
    }
}

impl Future for ReadBytes {
    type Output = ReadResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            ReadState::Ready(result) => {
                Poll::Ready(result.take().expect("`ReadBytes` polled after completion"))
            }
            ReadState::Waiting { requested, rx } => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                Poll::Ready(Err(_)) => Poll::Ready(Err(TruncatedStream {
                    requested: *requested,
                    buffered: 0,
                })),
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::task::Waker;

    use super::*;

    fn poll_once(fut: &mut ReadBytes) -> Poll<ReadResult> {
        let mut cx = Context::from_waker(Waker::noop());
        Pin::new(fut).poll(&mut cx)
    }

    #[tokio::test]
    async fn read_completes_immediately_when_buffered() {
        let (mut sink, reader) = chunk_channel();
        sink.feed(b"8BCB\x00\x01");

        assert_eq!(reader.read(4).await.unwrap().as_ref(), b"8BCB");
        assert_eq!(reader.read(2).await.unwrap().as_ref(), &[0, 1]);
        assert_eq!(reader.buffered(), 0);
    }

    #[tokio::test]
    async fn read_waits_for_enough_bytes() {
        let (mut sink, reader) = chunk_channel();
        let mut read = reader.read(4);

        assert!(poll_once(&mut read).is_pending());
        assert_eq!(sink.feed(b"ab"), 0);
        assert!(poll_once(&mut read).is_pending());
        assert_eq!(sink.feed(b"cdef"), 1);

        assert_eq!(read.await.unwrap().as_ref(), b"abcd");
        assert_eq!(reader.buffered(), 2);
    }

    #[tokio::test]
    async fn reads_complete_in_issue_order() {
        let (mut sink, reader) = chunk_channel();
        let first = reader.read(2);
        let second = reader.read(3);
        assert_eq!(reader.pending(), 2);

        assert_eq!(sink.feed(b"a"), 0);
        assert_eq!(sink.feed(b"bcd"), 1);
        assert_eq!(sink.feed(b"ef"), 1);

        assert_eq!(second.await.unwrap().as_ref(), b"cde");
        assert_eq!(first.await.unwrap().as_ref(), b"ab");
        assert_eq!(reader.read(1).await.unwrap().as_ref(), b"f");
    }

    #[tokio::test]
    async fn later_read_never_overtakes_blocked_head() {
        let (mut sink, reader) = chunk_channel();
        let mut big = reader.read(5);
        let mut small = reader.read(1);

        sink.feed(b"abc");
        assert!(poll_once(&mut big).is_pending());
        assert!(poll_once(&mut small).is_pending());

        // Queue is non-empty, so even a satisfiable request must wait its turn.
        let mut tiny = reader.read(1);
        assert!(poll_once(&mut tiny).is_pending());
        assert_eq!(reader.pending(), 3);

        sink.feed(b"defg");
        assert_eq!(big.await.unwrap().as_ref(), b"abcde");
        assert_eq!(small.await.unwrap().as_ref(), b"f");
        assert_eq!(tiny.await.unwrap().as_ref(), b"g");
    }

    #[tokio::test]
    async fn close_fails_outstanding_reads() {
        let (mut sink, reader) = chunk_channel();
        let first = reader.read(8);
        let second = reader.read(1);
        sink.feed(b"spfl");
        sink.close();

        assert_eq!(
            first.await.unwrap_err(),
            TruncatedStream {
                requested: 8,
                buffered: 4
            }
        );
        assert!(second.await.is_err());
        assert!(reader.read(1).await.is_err());
        assert!(reader.is_closed());
    }

    #[tokio::test]
    async fn buffered_bytes_survive_close() {
        let (mut sink, reader) = chunk_channel();
        sink.feed(b"spflspot");
        drop(sink);

        assert_eq!(reader.read(8).await.unwrap().as_ref(), b"spflspot");
        assert_eq!(
            reader.read(2).await.unwrap_err(),
            TruncatedStream {
                requested: 2,
                buffered: 0
            }
        );
    }

    #[tokio::test]
    async fn zero_length_read_is_empty() {
        let (_sink, reader) = chunk_channel();
        assert!(reader.read(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn dropped_read_still_consumes_its_bytes() {
        let (mut sink, reader) = chunk_channel();
        let abandoned = reader.read(2);
        let kept = reader.read(2);
        drop(abandoned);

        sink.feed(b"xxok");
        assert_eq!(kept.await.unwrap().as_ref(), b"ok");
    }
}
