// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tagged message envelope: type tag + property bag + attachments.
//!
//! The envelope is the single runtime representation of every message
//! variant; typed views in [`crate::messages`] are newtype wrappers over it.
//! It owns its bag and attachments exclusively, so `Clone` is a deep,
//! alias-free copy by construction.

use crate::bag::PropertyBag;
use crate::error::RemoteError;
use crate::types::MessageType;

/// Well-known base property keys shared by all variants.
const REQUEST_ID: &str = "RequestId";
const CLIENT_ID: &str = "ClientId";
const ERROR: &str = "Error";

/// One protocol message: the wire discriminator, the property bag holding
/// every variant-specific field, and raw argument attachments.
///
/// Attachments distinguish absent (`None`) from explicitly empty
/// (`Some(vec![])`) entries, matching the wire encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    msg_type: MessageType,
    bag: PropertyBag,
    attachments: Vec<Option<Vec<u8>>>,
}

impl Envelope {
    /// New empty envelope of the given type. The type is fixed for the
    /// lifetime of the envelope.
    pub fn new(msg_type: MessageType) -> Self {
        Self {
            msg_type,
            bag: PropertyBag::new(),
            attachments: Vec::new(),
        }
    }

    pub fn msg_type(&self) -> MessageType {
        self.msg_type
    }

    pub fn bag(&self) -> &PropertyBag {
        &self.bag
    }

    pub fn bag_mut(&mut self) -> &mut PropertyBag {
        &mut self.bag
    }

    pub fn attachments(&self) -> &[Option<Vec<u8>>] {
        &self.attachments
    }

    pub fn push_attachment(&mut self, attachment: Option<Vec<u8>>) {
        self.attachments.push(attachment);
    }

    // ---- base properties ----

    /// Correlation id; `0` until assigned by the correlator.
    pub fn request_id(&self) -> i64 {
        self.bag.get_long(REQUEST_ID)
    }

    pub fn set_request_id(&mut self, value: i64) {
        self.bag.set_long(REQUEST_ID, value);
    }

    /// Owning client id for multi-client sidecars; `0` when unused.
    pub fn client_id(&self) -> i64 {
        self.bag.get_long(CLIENT_ID)
    }

    pub fn set_client_id(&mut self, value: i64) {
        self.bag.set_long(CLIENT_ID, value);
    }

    /// Application-level error carried by replies; `None` on success.
    pub fn error(&self) -> Option<RemoteError> {
        self.bag.get_json(ERROR)
    }

    pub fn set_error(&mut self, value: Option<&RemoteError>) {
        self.bag.set_json(ERROR, value);
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
