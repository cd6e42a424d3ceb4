// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request/reply correlation.
//!
//! The correlator owns the only shared mutable state on a connection: the
//! monotonic request-id counter and the table of requests awaiting a reply.
//! Both sit behind a single mutex because the reader task and arbitrary
//! caller tasks touch them concurrently.

use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use rig_proto::{Envelope, MessageType};

use crate::error::ClientError;

/// Completion handle resolved with the correlated reply or a failure.
pub type ReplyReceiver = oneshot::Receiver<Result<Envelope, ClientError>>;

/// One outstanding request awaiting its reply.
struct Pending {
    expected: MessageType,
    tx: oneshot::Sender<Result<Envelope, ClientError>>,
}

struct Inner {
    next_id: i64,
    pending: HashMap<i64, Pending>,
}

/// Result of offering a reply frame to the correlator.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The pending caller received its reply.
    Delivered { request_id: i64 },
    /// The reply's type differed from the declared reply type; the caller
    /// received a `ReplyTypeMismatch` failure instead of a coerced value.
    Mismatched {
        request_id: i64,
        expected: MessageType,
        actual: MessageType,
    },
    /// No pending entry: an id that was never issued, a duplicate reply for
    /// a completed request, or a reply arriving after abandonment. The frame
    /// must be dropped with a diagnostic, never delivered.
    Unmatched { request_id: i64 },
}

/// Assigns request ids and matches incoming replies to waiting callers.
pub struct Correlator {
    inner: Mutex<Inner>,
}

impl Correlator {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner { next_id: 1, pending: HashMap::new() }),
        }
    }

    /// Assign the next request id and record the pending entry.
    ///
    /// Ids start at 1 and are never reused within a connection's lifetime;
    /// a 64-bit counter cannot realistically wrap, so no reclamation scheme
    /// is carried.
    pub fn register(&self, expected: MessageType) -> (i64, ReplyReceiver) {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.pending.insert(id, Pending { expected, tx });
        (id, rx)
    }

    /// Offer a reply frame; exactly one reply resolves exactly one pending
    /// request.
    pub fn complete(&self, reply: Envelope) -> Outcome {
        let request_id = reply.request_id();
        let entry = self.inner.lock().pending.remove(&request_id);
        let Some(Pending { expected, tx }) = entry else {
            return Outcome::Unmatched { request_id };
        };

        let actual = reply.msg_type();
        if actual != expected {
            // surface the mismatch to the waiting caller, never coerce
            let _ = tx.send(Err(ClientError::ReplyTypeMismatch { expected, actual }));
            return Outcome::Mismatched { request_id, expected, actual };
        }

        if tx.send(Ok(reply)).is_err() {
            // receiver dropped (caller gave up between removal and send)
            return Outcome::Unmatched { request_id };
        }
        Outcome::Delivered { request_id }
    }

    /// Drop a pending entry (timeout or caller cancellation). A reply
    /// arriving later is unmatched and will be dropped.
    pub fn abandon(&self, request_id: i64) -> bool {
        self.inner.lock().pending.remove(&request_id).is_some()
    }

    /// Resolve every pending request with a failure (connection teardown).
    pub fn fail_all(&self, make_err: impl Fn() -> ClientError) {
        let drained: Vec<Pending> = {
            let mut inner = self.inner.lock();
            inner.pending.drain().map(|(_, p)| p).collect()
        };
        for pending in drained {
            let _ = pending.tx.send(Err(make_err()));
        }
    }

    /// Number of requests currently awaiting replies.
    pub fn outstanding(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

impl Default for Correlator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "correlator_tests.rs"]
mod tests;
