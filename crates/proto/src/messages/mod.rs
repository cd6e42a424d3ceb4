// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed message variants.
//!
//! Every variant is a newtype over [`Envelope`] whose struct name matches its
//! [`MessageType`] variant. The per-variant boilerplate (constructor, typed
//! property accessors, trait impls) is generated by `define_request!` and
//! `define_reply!`, keeping the hand-written surface to the property tables.

mod activity;
mod client;
mod domain;
mod workflow;

pub use activity::{
    ActivityCompleteReply, ActivityCompleteRequest, ActivityExecuteReply, ActivityExecuteRequest,
    ActivityRecordHeartbeatReply, ActivityRecordHeartbeatRequest, ActivityRegisterReply,
    ActivityRegisterRequest, ActivityStoppingReply, ActivityStoppingRequest,
};
pub use client::{
    CancelReply, CancelRequest, ConnectReply, ConnectRequest, HeartbeatReply, HeartbeatRequest,
    InitializeReply, InitializeRequest, TerminateReply, TerminateRequest,
};
pub use domain::{
    DomainDescribeReply, DomainDescribeRequest, DomainRegisterReply, DomainRegisterRequest,
};
pub use workflow::{
    WorkflowCancelReply, WorkflowCancelRequest, WorkflowExecuteReply, WorkflowExecuteRequest,
    WorkflowGetResultReply, WorkflowGetResultRequest, WorkflowQueryReply, WorkflowQueryRequest,
    WorkflowRegisterReply, WorkflowRegisterRequest, WorkflowSignalReply, WorkflowSignalRequest,
};

use crate::envelope::Envelope;
use crate::error::{ProtocolError, RemoteError};
use crate::types::MessageType;

/// Common contract of every typed message variant.
pub trait Message: Sized {
    /// The variant's wire discriminator.
    const TYPE: MessageType;

    /// Typed view over a decoded envelope. Fails with `UnexpectedType` when
    /// the envelope carries a different tag; never coerces.
    fn from_envelope(envelope: Envelope) -> Result<Self, ProtocolError>;

    fn envelope(&self) -> &Envelope;

    fn envelope_mut(&mut self) -> &mut Envelope;

    fn into_envelope(self) -> Envelope;

    /// Correlation id; `0` until assigned.
    fn request_id(&self) -> i64 {
        self.envelope().request_id()
    }

    fn set_request_id(&mut self, value: i64) {
        self.envelope_mut().set_request_id(value);
    }
}

/// A request variant with its declared reply association.
pub trait Request: Message {
    /// The exact reply variant this request expects. A reply of any other
    /// type is a correlation failure, not a candidate for coercion.
    type Reply: Reply;
}

/// A reply variant, optionally carrying a remote operation failure.
pub trait Reply: Message {
    fn error(&self) -> Option<RemoteError> {
        self.envelope().error()
    }

    fn set_error(&mut self, error: Option<&RemoteError>) {
        self.envelope_mut().set_error(error);
    }

    /// Split a transported reply into success or its remote error.
    fn into_result(self) -> Result<Self, RemoteError> {
        match self.envelope().error() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

/// Generate a typed getter/setter pair delegating to the property bag.
macro_rules! message_property {
    ($(#[$meta:meta])* str $key:literal, $get:ident, $set:ident) => {
        $(#[$meta])*
        pub fn $get(&self) -> Option<&str> {
            self.0.bag().get_str($key)
        }

        pub fn $set(&mut self, value: Option<&str>) {
            self.0.bag_mut().set_str($key, value);
        }
    };
    ($(#[$meta:meta])* bool $key:literal, $get:ident, $set:ident) => {
        $(#[$meta])*
        pub fn $get(&self) -> bool {
            self.0.bag().get_bool($key)
        }

        pub fn $set(&mut self, value: bool) {
            self.0.bag_mut().set_bool($key, value);
        }
    };
    ($(#[$meta:meta])* long $key:literal, $get:ident, $set:ident) => {
        $(#[$meta])*
        pub fn $get(&self) -> i64 {
            self.0.bag().get_long($key)
        }

        pub fn $set(&mut self, value: i64) {
            self.0.bag_mut().set_long($key, value);
        }
    };
    ($(#[$meta:meta])* int $key:literal, $get:ident, $set:ident) => {
        $(#[$meta])*
        pub fn $get(&self) -> i32 {
            self.0.bag().get_int($key)
        }

        pub fn $set(&mut self, value: i32) {
            self.0.bag_mut().set_int($key, value);
        }
    };
    ($(#[$meta:meta])* bytes $key:literal, $get:ident, $set:ident) => {
        $(#[$meta])*
        pub fn $get(&self) -> Option<&[u8]> {
            self.0.bag().get_bytes($key)
        }

        pub fn $set(&mut self, value: Option<&[u8]>) {
            self.0.bag_mut().set_bytes($key, value);
        }
    };
}

/// Shared expansion for both message directions: newtype struct,
/// constructor, accessors, and the `Message` impl.
macro_rules! define_message_body {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$pmeta:meta])* $kind:ident $key:literal => $get:ident / $set:ident; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(pub(crate) $crate::envelope::Envelope);

        impl $name {
            /// New message with an empty property bag.
            pub fn new() -> Self {
                Self($crate::envelope::Envelope::new($crate::types::MessageType::$name))
            }

            $(
                $crate::messages::message_property!($(#[$pmeta])* $kind $key, $get, $set);
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::messages::Message for $name {
            const TYPE: $crate::types::MessageType = $crate::types::MessageType::$name;

            fn from_envelope(
                envelope: $crate::envelope::Envelope,
            ) -> Result<Self, $crate::error::ProtocolError> {
                if envelope.msg_type() != Self::TYPE {
                    return Err($crate::error::ProtocolError::UnexpectedType {
                        expected: Self::TYPE,
                        actual: envelope.msg_type(),
                    });
                }
                Ok(Self(envelope))
            }

            fn envelope(&self) -> &$crate::envelope::Envelope {
                &self.0
            }

            fn envelope_mut(&mut self) -> &mut $crate::envelope::Envelope {
                &mut self.0
            }

            fn into_envelope(self) -> $crate::envelope::Envelope {
                self.0
            }
        }
    };
}

/// Define a request variant and bind its declared reply type.
macro_rules! define_request {
    (
        $(#[$meta:meta])*
        pub struct $name:ident => $reply:ident {
            $( $(#[$pmeta:meta])* $kind:ident $key:literal => $get:ident / $set:ident; )*
        }
    ) => {
        $crate::messages::define_message_body! {
            $(#[$meta])*
            pub struct $name {
                $( $(#[$pmeta])* $kind $key => $get / $set; )*
            }
        }

        impl $crate::messages::Request for $name {
            type Reply = $reply;
        }
    };
}

/// Define a reply variant.
macro_rules! define_reply {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$pmeta:meta])* $kind:ident $key:literal => $get:ident / $set:ident; )*
        }
    ) => {
        $crate::messages::define_message_body! {
            $(#[$meta])*
            pub struct $name {
                $( $(#[$pmeta])* $kind $key => $get / $set; )*
            }
        }

        impl $crate::messages::Reply for $name {}
    };
}

pub(crate) use {define_message_body, define_reply, define_request, message_property};

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;
