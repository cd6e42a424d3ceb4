// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message type registry: the closed set of wire type tags.
//!
//! The tag space is versioned and closed, so the registry is a compile-time
//! table rather than anything reflective: one macro invocation declares every
//! request/reply pair, its wire tags, and the request→reply association.
//! Tag `0` (unspecified) is deliberately not a member; decoding it is an
//! `UnknownMessageType` protocol error.

/// Declare the closed message-type enum from request/reply tag pairs.
///
/// Generates `from_tag`, `as_tag`, `reply_type`, `is_request`/`is_reply`,
/// `name`, and `Display`. Every request tag has exactly one reply tag.
macro_rules! declare_message_types {
    ( $( $req:ident = $req_tag:literal => $reply:ident = $reply_tag:literal; )* ) => {
        /// Wire discriminator for every message variant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum MessageType {
            $( $req = $req_tag, $reply = $reply_tag, )*
        }

        impl MessageType {
            /// All registered message types, requests and replies interleaved.
            pub const ALL: &'static [MessageType] = &[
                $( MessageType::$req, MessageType::$reply, )*
            ];

            /// Registry lookup: map a wire tag to its message type.
            pub fn from_tag(tag: i32) -> Option<Self> {
                match tag {
                    $( $req_tag => Some(MessageType::$req),
                       $reply_tag => Some(MessageType::$reply), )*
                    _ => None,
                }
            }

            /// The numeric wire tag.
            pub fn as_tag(self) -> i32 {
                self as i32
            }

            /// The declared reply type for a request; `None` for replies.
            pub fn reply_type(self) -> Option<MessageType> {
                match self {
                    $( MessageType::$req => Some(MessageType::$reply), )*
                    _ => None,
                }
            }

            /// True for request variants.
            pub fn is_request(self) -> bool {
                self.reply_type().is_some()
            }

            /// True for reply variants.
            pub fn is_reply(self) -> bool {
                !self.is_request()
            }

            /// Stable name for diagnostics and logs.
            pub fn name(self) -> &'static str {
                match self {
                    $( MessageType::$req => stringify!($req),
                       MessageType::$reply => stringify!($reply), )*
                }
            }
        }

        impl std::fmt::Display for MessageType {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}

declare_message_types! {
    // Client lifecycle
    InitializeRequest = 1 => InitializeReply = 2;
    ConnectRequest = 3 => ConnectReply = 4;
    TerminateRequest = 5 => TerminateReply = 6;
    HeartbeatRequest = 13 => HeartbeatReply = 14;
    CancelRequest = 15 => CancelReply = 16;

    // Domain management
    DomainRegisterRequest = 7 => DomainRegisterReply = 8;
    DomainDescribeRequest = 9 => DomainDescribeReply = 10;

    // Workflow operations
    WorkflowRegisterRequest = 100 => WorkflowRegisterReply = 101;
    WorkflowExecuteRequest = 102 => WorkflowExecuteReply = 103;
    WorkflowSignalRequest = 104 => WorkflowSignalReply = 105;
    WorkflowCancelRequest = 108 => WorkflowCancelReply = 109;
    WorkflowQueryRequest = 118 => WorkflowQueryReply = 119;
    WorkflowGetResultRequest = 138 => WorkflowGetResultReply = 139;

    // Activity operations
    ActivityExecuteRequest = 200 => ActivityExecuteReply = 201;
    ActivityRecordHeartbeatRequest = 208 => ActivityRecordHeartbeatReply = 209;
    ActivityStoppingRequest = 212 => ActivityStoppingReply = 213;
    ActivityRegisterRequest = 218 => ActivityRegisterReply = 219;
    ActivityCompleteRequest = 222 => ActivityCompleteReply = 223;
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
