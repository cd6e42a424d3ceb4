// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client-side error taxonomy.

use rig_proto::{MessageType, ProtocolError, RemoteError};
use thiserror::Error;

/// Errors surfaced to callers of a [`crate::Connection`].
///
/// Framing failures are recovered per-frame or tear down the connection;
/// correlation failures are per-request; remote errors are delivered intact.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed frame or codec failure.
    #[error("protocol error")]
    Protocol(#[from] ProtocolError),

    /// The reply's concrete type did not match the request's declared
    /// reply type. Never coerced.
    #[error("reply type mismatch: expected {expected}, got {actual}")]
    ReplyTypeMismatch {
        expected: MessageType,
        actual: MessageType,
    },

    /// No reply arrived before the deadline; the pending entry was
    /// abandoned and a late reply will be dropped.
    #[error("request timed out awaiting reply")]
    Timeout,

    /// The connection closed with the request still outstanding.
    #[error("connection closed")]
    ConnectionClosed,

    /// The remote operation itself failed; transported successfully.
    #[error("remote operation failed")]
    Remote(#[from] RemoteError),

    /// Transport failure while sending.
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}
