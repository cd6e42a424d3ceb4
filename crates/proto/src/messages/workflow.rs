// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow lifecycle messages.

use super::{define_reply, define_request};

define_request! {
    /// Registers a workflow implementation under a name.
    pub struct WorkflowRegisterRequest => WorkflowRegisterReply {
        str "Name" => name / set_name;
    }
}

define_reply! {
    pub struct WorkflowRegisterReply {}
}

define_request! {
    /// Starts a workflow execution.
    pub struct WorkflowExecuteRequest => WorkflowExecuteReply {
        str "Domain" => domain / set_domain;
        str "Workflow" => workflow / set_workflow;
        /// Serialized workflow arguments.
        bytes "Args" => args / set_args;
    }
}

define_reply! {
    pub struct WorkflowExecuteReply {
        str "WorkflowId" => workflow_id / set_workflow_id;
        str "RunId" => run_id / set_run_id;
    }
}

define_request! {
    /// Delivers a signal to a running workflow.
    pub struct WorkflowSignalRequest => WorkflowSignalReply {
        str "WorkflowId" => workflow_id / set_workflow_id;
        str "RunId" => run_id / set_run_id;
        str "SignalName" => signal_name / set_signal_name;
        bytes "SignalArgs" => signal_args / set_signal_args;
    }
}

define_reply! {
    pub struct WorkflowSignalReply {}
}

define_request! {
    /// Requests cancellation of a workflow execution.
    pub struct WorkflowCancelRequest => WorkflowCancelReply {
        str "WorkflowId" => workflow_id / set_workflow_id;
        str "RunId" => run_id / set_run_id;
    }
}

define_reply! {
    pub struct WorkflowCancelReply {}
}

define_request! {
    /// Queries a workflow's state without mutating it.
    pub struct WorkflowQueryRequest => WorkflowQueryReply {
        str "WorkflowId" => workflow_id / set_workflow_id;
        str "RunId" => run_id / set_run_id;
        str "QueryName" => query_name / set_query_name;
        bytes "QueryArgs" => query_args / set_query_args;
    }
}

define_reply! {
    pub struct WorkflowQueryReply {
        bytes "Result" => result / set_result;
    }
}

define_request! {
    /// Waits for a workflow execution to complete and returns its result.
    pub struct WorkflowGetResultRequest => WorkflowGetResultReply {
        str "WorkflowId" => workflow_id / set_workflow_id;
        str "RunId" => run_id / set_run_id;
    }
}

define_reply! {
    pub struct WorkflowGetResultReply {
        bytes "Result" => result / set_result;
    }
}
