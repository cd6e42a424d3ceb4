// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the client crate.

use std::time::Duration;

/// Default per-request deadline (`RIG_CALL_TIMEOUT_MS`, default 10s).
pub fn call_timeout() -> Duration {
    std::env::var("RIG_CALL_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(10))
}

/// Interval between liveness heartbeats to the sidecar
/// (`RIG_HEARTBEAT_INTERVAL_MS`, default 1s).
pub fn heartbeat_interval() -> Duration {
    std::env::var("RIG_HEARTBEAT_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(1))
}
