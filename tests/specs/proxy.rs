// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end client specs against a scripted sidecar.

use std::path::PathBuf;

use tokio::net::{UnixListener, UnixStream};
use tokio::task::JoinHandle;

use rig_client::{ClientError, Dispatcher, ProxyClient};
use rig_proto::{wire, Envelope, MessageType, RemoteError, RemoteErrorKind};

/// Build the canned reply a well-behaved sidecar would send.
fn canned_reply(request: &Envelope) -> Envelope {
    let reply_type = request.msg_type().reply_type().expect("inbound frame must be a request");
    let mut reply = Envelope::new(reply_type);
    reply.set_request_id(request.request_id());
    match reply_type {
        MessageType::WorkflowExecuteReply => {
            reply.bag_mut().set_str("WorkflowId", Some("wf-1"));
            reply.bag_mut().set_str("RunId", Some("run-1"));
        }
        MessageType::DomainDescribeReply => {
            reply.bag_mut().set_str("DomainInfoName", request.bag().get_str("Name"));
            reply.bag_mut().set_str("DomainInfoStatus", Some("REGISTERED"));
        }
        MessageType::CancelReply => {
            reply.bag_mut().set_bool("WasCancelled", true);
        }
        MessageType::ActivityExecuteReply | MessageType::WorkflowGetResultReply => {
            reply.bag_mut().set_bytes("Result", Some(b"done"));
        }
        _ => {}
    }
    reply
}

/// Spawn a sidecar that serves one connection with canned replies until it
/// sees a terminate request.
async fn spawn_sidecar() -> (tempfile::TempDir, PathBuf, JoinHandle<()>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sidecar.sock");
    let listener = UnixListener::bind(&path).expect("bind");

    let task = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        loop {
            let request = match wire::read_envelope(&mut stream).await {
                Ok(request) => request,
                Err(_) => break,
            };
            let terminate = request.msg_type() == MessageType::TerminateRequest;
            let reply = canned_reply(&request);
            wire::write_envelope(&mut stream, &reply).await.expect("reply write");
            if terminate {
                break;
            }
        }
    });

    (dir, path, task)
}

#[tokio::test]
async fn full_client_lifecycle_against_a_scripted_sidecar() {
    let (_dir, path, sidecar) = spawn_sidecar().await;
    let client = ProxyClient::connect_unix(&path, Dispatcher::new()).await.expect("connect");

    client.initialize("127.0.0.1", 5000).await.expect("initialize");
    client.connect("127.0.0.1:7933", "worker-1", "orders", 30).await.expect("connect op");
    client.register_domain("orders", Some("order processing"), None, 7).await.expect("register");

    let info = client.describe_domain("orders").await.expect("describe");
    assert_eq!(info.name.as_deref(), Some("orders"));
    assert_eq!(info.status.as_deref(), Some("REGISTERED"));

    client.register_workflow("bill-customer").await.expect("register workflow");
    let run = client.execute_workflow("orders", "bill-customer", Some(b"{}")).await.expect("start");
    assert_eq!(run.workflow_id, "wf-1");
    assert_eq!(run.run_id, "run-1");

    let result = client.workflow_result(&run.workflow_id, Some(&run.run_id)).await.expect("result");
    assert_eq!(result.as_deref(), Some(&b"done"[..]));

    client.register_activity("charge-card").await.expect("register activity");
    let result =
        client.execute_activity("charge-card", Some(b"{}"), None).await.expect("activity");
    assert_eq!(result.as_deref(), Some(&b"done"[..]));

    assert!(client.cancel(3).await.expect("cancel"));

    client.terminate().await.expect("terminate");
    sidecar.await.expect("sidecar panicked");
}

#[tokio::test]
async fn replies_arriving_out_of_order_resolve_concurrent_calls() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sidecar.sock");
    let listener = UnixListener::bind(&path).expect("bind");

    let sidecar = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        let first = wire::read_envelope(&mut stream).await.expect("first request");
        let second = wire::read_envelope(&mut stream).await.expect("second request");
        // resolve the later request first
        wire::write_envelope(&mut stream, &canned_reply(&second)).await.expect("second reply");
        wire::write_envelope(&mut stream, &canned_reply(&first)).await.expect("first reply");
    });

    let client = ProxyClient::connect_unix(&path, Dispatcher::new()).await.expect("connect");
    let (run, cancelled) = tokio::join!(
        client.execute_workflow("orders", "bill-customer", None),
        client.cancel(1),
    );
    let run = run.expect("execute failed");
    assert_eq!(run.workflow_id, "wf-1");
    assert!(cancelled.expect("cancel failed"));

    sidecar.await.expect("sidecar panicked");
}

#[tokio::test]
async fn remote_errors_propagate_to_the_caller() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sidecar.sock");
    let listener = UnixListener::bind(&path).expect("bind");

    let sidecar = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        let request = wire::read_envelope(&mut stream).await.expect("request");
        let mut reply = Envelope::new(
            request.msg_type().reply_type().expect("request"),
        );
        reply.set_request_id(request.request_id());
        reply.set_error(Some(&RemoteError::new(
            RemoteErrorKind::Terminated,
            "workflow was terminated",
        )));
        wire::write_envelope(&mut stream, &reply).await.expect("reply write");
    });

    let client = ProxyClient::connect_unix(&path, Dispatcher::new()).await.expect("connect");
    match client.workflow_result("wf-1", None).await {
        Err(ClientError::Remote(err)) => {
            assert_eq!(err.kind, RemoteErrorKind::Terminated);
            assert_eq!(err.message, "workflow was terminated");
        }
        other => panic!("expected Remote, got {other:?}"),
    }

    sidecar.await.expect("sidecar panicked");
}

#[tokio::test]
async fn unknown_frames_do_not_break_the_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sidecar.sock");
    let listener = UnixListener::bind(&path).expect("bind");

    let sidecar = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        let request = wire::read_envelope(&mut stream).await.expect("request");

        // an unregistered tag, then the real reply
        let mut bogus = Vec::new();
        bogus.extend_from_slice(&9999i32.to_le_bytes());
        bogus.extend_from_slice(&0u32.to_le_bytes());
        bogus.extend_from_slice(&0u32.to_le_bytes());
        wire::write_message(&mut stream, &bogus).await.expect("bogus frame");
        wire::write_envelope(&mut stream, &canned_reply(&request)).await.expect("reply write");
    });

    let client = ProxyClient::connect_unix(&path, Dispatcher::new()).await.expect("connect");
    client.heartbeat().await.expect("heartbeat");

    sidecar.await.expect("sidecar panicked");
}
