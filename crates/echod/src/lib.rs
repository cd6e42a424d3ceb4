// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rig-echod: frame echo service for exercising the proxy wire protocol.
//!
//! Accepts connections on a unix socket (and optionally TCP), decodes each
//! incoming frame, and writes the re-encoded envelope straight back. Useful
//! as a stand-in sidecar for integration tests and manual protocol checks:
//! a successful round trip proves framing, codec, and property fidelity
//! end to end.

pub mod server;

pub use server::EchoServer;
