// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Protocol error taxonomy and the application-level remote error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::MessageType;

/// Errors raised while encoding, decoding, or framing messages.
///
/// Malformed-frame errors are fatal to the frame, not the connection: the
/// length prefix has already been consumed, so the reader can log and move
/// on to the next frame.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame ended before the expected field.
    #[error("truncated frame: needed {needed} more byte(s) for {context}")]
    Truncated {
        needed: usize,
        context: &'static str,
    },

    /// Frame decoded fully but bytes remained.
    #[error("frame has {remaining} trailing byte(s) after the last attachment")]
    TrailingBytes { remaining: usize },

    /// Property key was not valid UTF-8.
    #[error("property key is not valid utf-8")]
    InvalidKey,

    /// Text property value was not valid UTF-8.
    #[error("text value for {context} is not valid utf-8")]
    InvalidText { context: &'static str },

    /// A length field was negative where no "absent" encoding is defined.
    #[error("invalid length {len} for {context}")]
    InvalidLength { context: &'static str, len: i32 },

    /// Property value-kind tag was not a known kind.
    #[error("invalid property value kind: {0}")]
    InvalidValueKind(u32),

    /// Type tag is not in the registry.
    #[error("unknown message type tag: {0}")]
    UnknownMessageType(i32),

    /// Envelope carried a different type than the typed view expects.
    #[error("unexpected message type: expected {expected}, got {actual}")]
    UnexpectedType {
        expected: MessageType,
        actual: MessageType,
    },

    /// Frame length prefix exceeds the configured maximum.
    #[error("frame of {len} bytes exceeds the {max} byte limit")]
    FrameTooLarge { len: usize, max: usize },

    /// Underlying stream failure while reading or writing a frame.
    #[error("frame i/o failed")]
    Io(#[from] std::io::Error),
}

/// Category of a remote operation failure, mirroring the sidecar's
/// error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteErrorKind {
    /// Operation was cancelled before completing.
    Cancelled,
    /// Application-defined error raised by workflow/activity code.
    Custom,
    /// Unclassified failure.
    Generic,
    /// Remote code panicked.
    Panic,
    /// Workflow or worker was terminated.
    Terminated,
    /// Remote operation timed out.
    Timeout,
}

/// Application-level error carried in a reply's property bag.
///
/// This is a normal, successfully transported outcome — the remote operation
/// itself failed — and is always delivered to the caller intact, distinct
/// from transport and framing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind:?}: {message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
}

impl RemoteError {
    /// Build a remote error with an explicit kind.
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    /// Build a `Custom` remote error (the common application case).
    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(RemoteErrorKind::Custom, message)
    }
}
