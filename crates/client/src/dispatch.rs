// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound request dispatch.
//!
//! The sidecar issues its own requests back to the library (workflow and
//! activity invocations, stop notifications). Handlers are registered per
//! message type before the connection is spawned; the reader task hands each
//! inbound request to the dispatcher, which always produces a reply of the
//! request's declared reply type — synthesizing an error reply when no
//! handler exists or the handler fails.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use rig_proto::{Envelope, MessageType, RemoteError, RemoteErrorKind};

/// Application hook for one inbound request type.
#[async_trait]
pub trait InboundHandler: Send + Sync {
    /// Handle a request and build its reply envelope. The dispatcher stamps
    /// the correlation id; the handler only fills reply properties.
    async fn handle(&self, request: Envelope) -> Result<Envelope, RemoteError>;
}

/// Registry of inbound handlers keyed by request type. Immutable once the
/// connection is spawned.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<MessageType, Arc<dyn InboundHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    /// Register a handler for one request type, replacing any previous one.
    pub fn register(mut self, msg_type: MessageType, handler: Arc<dyn InboundHandler>) -> Self {
        self.handlers.insert(msg_type, handler);
        self
    }

    pub fn registered_types(&self) -> Vec<MessageType> {
        self.handlers.keys().copied().collect()
    }

    /// Dispatch an inbound request and build the reply to send back.
    ///
    /// Returns `None` only when the envelope is not a request (no declared
    /// reply type), which the caller drops with a diagnostic.
    pub async fn dispatch(&self, request: Envelope) -> Option<Envelope> {
        let msg_type = request.msg_type();
        let reply_type = msg_type.reply_type()?;
        let request_id = request.request_id();

        let mut reply = match self.handlers.get(&msg_type) {
            Some(handler) => match handler.handle(request).await {
                Ok(reply) if reply.msg_type() == reply_type => reply,
                Ok(reply) => {
                    warn!(
                        request = %msg_type,
                        expected = %reply_type,
                        actual = %reply.msg_type(),
                        "handler produced a reply of the wrong type"
                    );
                    error_reply(
                        reply_type,
                        RemoteError::new(
                            RemoteErrorKind::Generic,
                            format!("handler for {msg_type} produced {}", reply.msg_type()),
                        ),
                    )
                }
                Err(err) => error_reply(reply_type, err),
            },
            None => {
                warn!(request = %msg_type, "no handler registered for inbound request");
                error_reply(
                    reply_type,
                    RemoteError::new(
                        RemoteErrorKind::Generic,
                        format!("no handler registered for {msg_type}"),
                    ),
                )
            }
        };

        reply.set_request_id(request_id);
        Some(reply)
    }
}

fn error_reply(reply_type: MessageType, err: RemoteError) -> Envelope {
    let mut reply = Envelope::new(reply_type);
    reply.set_error(Some(&err));
    reply
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
