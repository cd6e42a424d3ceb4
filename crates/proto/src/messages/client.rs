// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client lifecycle messages: initialize, connect, terminate, heartbeat,
//! and cancellation of an outstanding operation.

use super::{define_reply, define_request};

define_request! {
    /// Tells the sidecar where the library is listening for inbound
    /// proxy messages.
    pub struct InitializeRequest => InitializeReply {
        str "LibraryAddress" => library_address / set_library_address;
        int "LibraryPort" => library_port / set_library_port;
    }
}

define_reply! {
    pub struct InitializeReply {}
}

define_request! {
    /// Asks the sidecar to establish its connection to the workflow cluster.
    pub struct ConnectRequest => ConnectReply {
        /// Comma-separated cluster endpoints.
        str "Endpoints" => endpoints / set_endpoints;
        str "Identity" => identity / set_identity;
        str "Domain" => domain / set_domain;
        /// Connection timeout in seconds.
        long "ClientTimeout" => client_timeout / set_client_timeout;
    }
}

define_reply! {
    pub struct ConnectReply {}
}

define_request! {
    /// Signals the sidecar to terminate gracefully after replying.
    pub struct TerminateRequest => TerminateReply {}
}

define_reply! {
    pub struct TerminateReply {}
}

define_request! {
    /// Periodic liveness probe.
    pub struct HeartbeatRequest => HeartbeatReply {}
}

define_reply! {
    pub struct HeartbeatReply {}
}

define_request! {
    /// Requests cancellation of a previously issued operation.
    pub struct CancelRequest => CancelReply {
        /// `RequestId` of the operation to cancel.
        long "TargetRequestId" => target_request_id / set_target_request_id;
    }
}

define_reply! {
    pub struct CancelReply {
        /// True when the operation was actually cancelled, false when it had
        /// already completed or no longer exists.
        bool "WasCancelled" => was_cancelled / set_was_cancelled;
    }
}
