// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rig-proto: wire protocol for the workflow sidecar proxy.
//!
//! Defines the property-bag payload container, the tagged message envelope,
//! the closed message-type registry, the typed message variants, and the
//! length-prefixed binary frame codec shared by the client and the sidecar.

pub mod bag;
pub mod envelope;
pub mod error;
pub mod messages;
pub mod types;
pub mod wire;


pub use bag::{PropertyBag, PropertyValue};
pub use envelope::Envelope;
pub use error::{ProtocolError, RemoteError, RemoteErrorKind};
pub use messages::{Message, Reply, Request};
pub use types::MessageType;
