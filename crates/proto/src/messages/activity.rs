// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Activity lifecycle messages.

use crate::error::RemoteError;

use super::{define_reply, define_request};

define_request! {
    /// Registers an activity implementation under a name.
    pub struct ActivityRegisterRequest => ActivityRegisterReply {
        str "Name" => name / set_name;
    }
}

define_reply! {
    pub struct ActivityRegisterReply {}
}

define_request! {
    /// Schedules an activity and waits for its result.
    pub struct ActivityExecuteRequest => ActivityExecuteReply {
        str "Activity" => activity / set_activity;
        /// Serialized activity arguments.
        bytes "Args" => args / set_args;
        str "TaskQueue" => task_queue / set_task_queue;
    }
}

define_reply! {
    pub struct ActivityExecuteReply {
        bytes "Result" => result / set_result;
    }
}

define_request! {
    /// Records a heartbeat for a running activity.
    pub struct ActivityRecordHeartbeatRequest => ActivityRecordHeartbeatReply {
        /// Opaque token identifying the activity task.
        bytes "TaskToken" => task_token / set_task_token;
        bytes "Details" => details / set_details;
    }
}

define_reply! {
    pub struct ActivityRecordHeartbeatReply {}
}

define_request! {
    /// Notifies activity code that its worker is stopping.
    pub struct ActivityStoppingRequest => ActivityStoppingReply {
        str "ActivityId" => activity_id / set_activity_id;
    }
}

define_reply! {
    pub struct ActivityStoppingReply {}
}

define_request! {
    /// Completes an externally-completed activity, successfully or with an
    /// application failure.
    pub struct ActivityCompleteRequest => ActivityCompleteReply {
        bytes "TaskToken" => task_token / set_task_token;
        bytes "Result" => result / set_result;
    }
}

impl ActivityCompleteRequest {
    /// Failure to complete the activity with; `None` completes successfully.
    pub fn error(&self) -> Option<RemoteError> {
        self.0.error()
    }

    pub fn set_error(&mut self, error: Option<&RemoteError>) {
        self.0.set_error(error);
    }
}

define_reply! {
    pub struct ActivityCompleteReply {}
}
