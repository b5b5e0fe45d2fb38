//! Recording messaging channel for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::ChannelError;
use crate::events::{Notification, NotificationBus};
use crate::models::{OutboundRequest, Payload, RequestKind, Seq};
use crate::traits::MessageChannel;

/// Channel that records every request and hands out increasing tokens.
///
/// # Example
///
/// ```ignore
/// use chat_event::adapters::mock::RecordingChannel;
///
/// let channel = RecordingChannel::new();
/// // ... drive an item ...
/// let about = channel.requests_of(RequestKind::ModAbout);
/// assert_eq!(about.len(), 1);
/// channel.reply_mod_about(about[0].seq, 0);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingChannel {
    requests: Arc<Mutex<Vec<OutboundRequest>>>,
    next_seq: Arc<AtomicI64>,
    should_fail: Arc<AtomicBool>,
    failing_kinds: Arc<Mutex<HashSet<RequestKind>>>,
    bus: Option<NotificationBus>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            next_seq: Arc::new(AtomicI64::new(1)),
            should_fail: Arc::new(AtomicBool::new(false)),
            failing_kinds: Arc::new(Mutex::new(HashSet::new())),
            bus: None,
        }
    }

    /// Replies injected with [`reply_mod_about`](Self::reply_mod_about) go to `bus`.
    pub fn with_bus(mut self, bus: NotificationBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_of(&self, kind: RequestKind) -> Vec<OutboundRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<OutboundRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Clear all recorded requests.
    pub fn clear(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Configure whether `post` should fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Make `post` fail for one request kind only.
    pub fn fail_kind(&self, kind: RequestKind) {
        self.failing_kinds.lock().unwrap().insert(kind);
    }

    /// Publish a `chats/mod/about` reply for `seq`.
    pub fn reply_mod_about(&self, seq: Seq, error: i32) -> usize {
        match &self.bus {
            Some(bus) => bus.publish(Notification::ModChatAboutResult { seq, error }),
            None => 0,
        }
    }
}

impl Default for RecordingChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageChannel for RecordingChannel {
    fn post(&self, kind: RequestKind, payload: Payload) -> Result<Seq, ChannelError> {
        if self.should_fail.load(Ordering::SeqCst)
            || self.failing_kinds.lock().unwrap().contains(&kind)
        {
            return Err(ChannelError::Closed);
        }
        let seq = Seq(self.next_seq.fetch_add(1, Ordering::SeqCst));
        self.requests
            .lock()
            .unwrap()
            .push(OutboundRequest { seq, kind, payload });
        Ok(seq)
    }
}
