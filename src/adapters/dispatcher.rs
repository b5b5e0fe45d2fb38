//! Channel adapter that hands requests to an async transport task.
//!
//! The item posts synchronously from the UI thread; the requests are queued on
//! an unbounded tokio channel and picked up by whichever task talks to the
//! backend.

use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::mpsc;

use crate::error::ChannelError;
use crate::models::{OutboundRequest, Payload, RequestKind, Seq};
use crate::traits::MessageChannel;

/// [`MessageChannel`] backed by an mpsc queue.
///
/// # Example
///
/// ```ignore
/// use chat_event::adapters::DispatcherChannel;
///
/// let (channel, mut rx) = DispatcherChannel::new();
/// tokio::spawn(async move {
///     while let Some(request) = rx.recv().await {
///         // forward to the backend
///     }
/// });
/// ```
#[derive(Debug)]
pub struct DispatcherChannel {
    next_seq: AtomicI64,
    tx: mpsc::UnboundedSender<OutboundRequest>,
}

impl DispatcherChannel {
    /// Create the channel and the receiving end for the transport task.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                next_seq: AtomicI64::new(1),
                tx,
            },
            rx,
        )
    }

    /// Whether the transport task has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl MessageChannel for DispatcherChannel {
    fn post(&self, kind: RequestKind, payload: Payload) -> Result<Seq, ChannelError> {
        let seq = Seq(self.next_seq.fetch_add(1, Ordering::SeqCst));
        self.tx
            .send(OutboundRequest { seq, kind, payload })
            .map_err(|_| ChannelError::Closed)?;
        tracing::debug!("Queued {} as {}", kind, seq);
        Ok(seq)
    }
}
