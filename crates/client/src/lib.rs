// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rig-client: correlated request/reply client for the workflow sidecar.
//!
//! A [`Connection`] owns one duplex byte stream to the sidecar: a dedicated
//! reader task pulls frames and resolves them against the [`Correlator`],
//! while any number of callers issue requests concurrently through a
//! serialized writer. [`ProxyClient`] layers the typed operation surface on
//! top.

pub mod client;
pub mod connection;
pub mod correlator;
pub mod dispatch;
pub mod env;
pub mod error;

pub use client::{DomainDescription, ProxyClient, WorkflowRun};
pub use connection::Connection;
pub use correlator::Correlator;
pub use dispatch::{Dispatcher, InboundHandler};
pub use error::ClientError;
