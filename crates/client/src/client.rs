// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed operation surface over a [`Connection`].
//!
//! Each method builds the request variant, issues it through the correlated
//! call path, and unwraps the reply: a reply carrying a remote error surfaces
//! as [`ClientError::Remote`], so callers only see domain values on success.

use std::path::Path;
use std::sync::Arc;

use tokio::net::ToSocketAddrs;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use rig_proto::messages::{
    ActivityCompleteRequest, ActivityExecuteRequest, ActivityRecordHeartbeatRequest,
    ActivityRegisterRequest, ActivityStoppingRequest, CancelRequest, ConnectRequest,
    DomainDescribeRequest, DomainRegisterRequest, HeartbeatRequest, InitializeRequest,
    Reply, Request, TerminateRequest, WorkflowCancelRequest, WorkflowExecuteRequest,
    WorkflowGetResultRequest, WorkflowQueryRequest, WorkflowRegisterRequest,
    WorkflowSignalRequest,
};
use rig_proto::RemoteError;

use crate::connection::Connection;
use crate::dispatch::Dispatcher;
use crate::env;
use crate::error::ClientError;

/// Details of a registered domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainDescription {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub owner_email: Option<String>,
}

/// Identity of a started workflow execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRun {
    pub workflow_id: String,
    pub run_id: String,
}

/// High-level client for the workflow sidecar.
pub struct ProxyClient {
    conn: Arc<Connection>,
}

impl ProxyClient {
    pub fn new(conn: Arc<Connection>) -> Self {
        Self { conn }
    }

    /// Connect to a sidecar over a unix domain socket.
    pub async fn connect_unix(
        path: impl AsRef<Path>,
        dispatcher: Dispatcher,
    ) -> Result<Self, ClientError> {
        Ok(Self::new(Connection::connect_unix(path, dispatcher).await?))
    }

    /// Connect to a sidecar over TCP.
    pub async fn connect_tcp(
        addr: impl ToSocketAddrs,
        dispatcher: Dispatcher,
    ) -> Result<Self, ClientError> {
        Ok(Self::new(Connection::connect_tcp(addr, dispatcher).await?))
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.conn
    }

    pub async fn close(&self) {
        self.conn.close().await;
    }

    /// Issue one request and unwrap the reply's remote-error slot.
    async fn call<R: Request>(&self, request: R) -> Result<R::Reply, ClientError> {
        let reply = self.conn.call(request).await?;
        Ok(reply.into_result()?)
    }

    // ---- client lifecycle ----

    /// Tell the sidecar where the library listens for inbound requests.
    pub async fn initialize(&self, address: &str, port: i32) -> Result<(), ClientError> {
        let mut request = InitializeRequest::new();
        request.set_library_address(Some(address));
        request.set_library_port(port);
        self.call(request).await?;
        Ok(())
    }

    /// Ask the sidecar to establish its cluster connection.
    pub async fn connect(
        &self,
        endpoints: &str,
        identity: &str,
        domain: &str,
        client_timeout_secs: i64,
    ) -> Result<(), ClientError> {
        let mut request = ConnectRequest::new();
        request.set_endpoints(Some(endpoints));
        request.set_identity(Some(identity));
        request.set_domain(Some(domain));
        request.set_client_timeout(client_timeout_secs);
        self.call(request).await?;
        Ok(())
    }

    /// Request graceful sidecar shutdown. The reply arrives before the
    /// sidecar exits.
    pub async fn terminate(&self) -> Result<(), ClientError> {
        self.call(TerminateRequest::new()).await?;
        Ok(())
    }

    /// Single liveness probe.
    pub async fn heartbeat(&self) -> Result<(), ClientError> {
        self.call(HeartbeatRequest::new()).await?;
        Ok(())
    }

    /// Spawn a background task probing the sidecar until the connection
    /// closes. Interval from `RIG_HEARTBEAT_INTERVAL_MS`.
    pub fn spawn_heartbeat(&self) -> tokio::task::JoinHandle<()> {
        let conn = Arc::clone(&self.conn);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(env::heartbeat_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if conn.is_closed() {
                    break;
                }
                if let Err(err) = conn.call(HeartbeatRequest::new()).await {
                    warn!(error = %err, "heartbeat failed");
                }
            }
        })
    }

    /// Ask the sidecar to cancel an outstanding operation. Returns whether
    /// the operation was actually cancelled.
    pub async fn cancel(&self, target_request_id: i64) -> Result<bool, ClientError> {
        let mut request = CancelRequest::new();
        request.set_target_request_id(target_request_id);
        let reply = self.call(request).await?;
        Ok(reply.was_cancelled())
    }

    // ---- domains ----

    pub async fn register_domain(
        &self,
        name: &str,
        description: Option<&str>,
        owner_email: Option<&str>,
        retention_days: i32,
    ) -> Result<(), ClientError> {
        let mut request = DomainRegisterRequest::new();
        request.set_name(Some(name));
        request.set_description(description);
        request.set_owner_email(owner_email);
        request.set_retention_days(retention_days);
        self.call(request).await?;
        Ok(())
    }

    pub async fn describe_domain(&self, name: &str) -> Result<DomainDescription, ClientError> {
        let mut request = DomainDescribeRequest::new();
        request.set_name(Some(name));
        let reply = self.call(request).await?;
        Ok(DomainDescription {
            name: reply.domain_info_name().map(str::to_owned),
            description: reply.domain_info_description().map(str::to_owned),
            status: reply.domain_info_status().map(str::to_owned),
            owner_email: reply.domain_info_owner_email().map(str::to_owned),
        })
    }

    // ---- workflows ----

    pub async fn register_workflow(&self, name: &str) -> Result<(), ClientError> {
        let mut request = WorkflowRegisterRequest::new();
        request.set_name(Some(name));
        self.call(request).await?;
        Ok(())
    }

    /// Start a workflow execution and return its identity.
    pub async fn execute_workflow(
        &self,
        domain: &str,
        workflow: &str,
        args: Option<&[u8]>,
    ) -> Result<WorkflowRun, ClientError> {
        let mut request = WorkflowExecuteRequest::new();
        request.set_domain(Some(domain));
        request.set_workflow(Some(workflow));
        request.set_args(args);
        let reply = self.call(request).await?;
        Ok(WorkflowRun {
            workflow_id: reply.workflow_id().unwrap_or_default().to_owned(),
            run_id: reply.run_id().unwrap_or_default().to_owned(),
        })
    }

    pub async fn signal_workflow(
        &self,
        workflow_id: &str,
        run_id: Option<&str>,
        signal_name: &str,
        signal_args: Option<&[u8]>,
    ) -> Result<(), ClientError> {
        let mut request = WorkflowSignalRequest::new();
        request.set_workflow_id(Some(workflow_id));
        request.set_run_id(run_id);
        request.set_signal_name(Some(signal_name));
        request.set_signal_args(signal_args);
        self.call(request).await?;
        Ok(())
    }

    pub async fn cancel_workflow(
        &self,
        workflow_id: &str,
        run_id: Option<&str>,
    ) -> Result<(), ClientError> {
        let mut request = WorkflowCancelRequest::new();
        request.set_workflow_id(Some(workflow_id));
        request.set_run_id(run_id);
        self.call(request).await?;
        Ok(())
    }

    pub async fn query_workflow(
        &self,
        workflow_id: &str,
        run_id: Option<&str>,
        query_name: &str,
        query_args: Option<&[u8]>,
    ) -> Result<Option<Vec<u8>>, ClientError> {
        let mut request = WorkflowQueryRequest::new();
        request.set_workflow_id(Some(workflow_id));
        request.set_run_id(run_id);
        request.set_query_name(Some(query_name));
        request.set_query_args(query_args);
        let reply = self.call(request).await?;
        Ok(reply.result().map(<[u8]>::to_vec))
    }

    /// Wait for a workflow execution to complete and return its result.
    pub async fn workflow_result(
        &self,
        workflow_id: &str,
        run_id: Option<&str>,
    ) -> Result<Option<Vec<u8>>, ClientError> {
        let mut request = WorkflowGetResultRequest::new();
        request.set_workflow_id(Some(workflow_id));
        request.set_run_id(run_id);
        let reply = self.call(request).await?;
        Ok(reply.result().map(<[u8]>::to_vec))
    }

    // ---- activities ----

    pub async fn register_activity(&self, name: &str) -> Result<(), ClientError> {
        let mut request = ActivityRegisterRequest::new();
        request.set_name(Some(name));
        self.call(request).await?;
        Ok(())
    }

    pub async fn execute_activity(
        &self,
        activity: &str,
        args: Option<&[u8]>,
        task_queue: Option<&str>,
    ) -> Result<Option<Vec<u8>>, ClientError> {
        let mut request = ActivityExecuteRequest::new();
        request.set_activity(Some(activity));
        request.set_args(args);
        request.set_task_queue(task_queue);
        let reply = self.call(request).await?;
        Ok(reply.result().map(<[u8]>::to_vec))
    }

    pub async fn record_activity_heartbeat(
        &self,
        task_token: &[u8],
        details: Option<&[u8]>,
    ) -> Result<(), ClientError> {
        let mut request = ActivityRecordHeartbeatRequest::new();
        request.set_task_token(Some(task_token));
        request.set_details(details);
        self.call(request).await?;
        Ok(())
    }

    /// Complete an externally-completed activity, either with a result or
    /// with an application failure.
    pub async fn complete_activity(
        &self,
        task_token: &[u8],
        result: Option<&[u8]>,
        error: Option<&RemoteError>,
    ) -> Result<(), ClientError> {
        let mut request = ActivityCompleteRequest::new();
        request.set_task_token(Some(task_token));
        request.set_result(result);
        request.set_error(error);
        self.call(request).await?;
        Ok(())
    }

    pub async fn activity_stopping(&self, activity_id: &str) -> Result<(), ClientError> {
        let mut request = ActivityStoppingRequest::new();
        request.set_activity_id(Some(activity_id));
        self.call(request).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
