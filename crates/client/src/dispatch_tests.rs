// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use rig_proto::RemoteErrorKind;

use super::*;

struct EchoNameHandler;

#[async_trait]
impl InboundHandler for EchoNameHandler {
    async fn handle(&self, request: Envelope) -> Result<Envelope, RemoteError> {
        let mut reply = Envelope::new(MessageType::ActivityExecuteReply);
        reply
            .bag_mut()
            .set_bytes("Result", request.bag().get_bytes("Args"));
        Ok(reply)
    }
}

struct FailingHandler;

#[async_trait]
impl InboundHandler for FailingHandler {
    async fn handle(&self, _request: Envelope) -> Result<Envelope, RemoteError> {
        Err(RemoteError::new(RemoteErrorKind::Panic, "activity panicked"))
    }
}

struct WrongTypeHandler;

#[async_trait]
impl InboundHandler for WrongTypeHandler {
    async fn handle(&self, _request: Envelope) -> Result<Envelope, RemoteError> {
        Ok(Envelope::new(MessageType::HeartbeatReply))
    }
}

fn request(ty: MessageType, request_id: i64) -> Envelope {
    let mut env = Envelope::new(ty);
    env.set_request_id(request_id);
    env
}

#[tokio::test]
async fn handler_reply_is_stamped_with_the_request_id() {
    let dispatcher =
        Dispatcher::new().register(MessageType::ActivityExecuteRequest, Arc::new(EchoNameHandler));

    let mut req = request(MessageType::ActivityExecuteRequest, 77);
    req.bag_mut().set_bytes("Args", Some(b"payload"));

    let reply = dispatcher.dispatch(req).await.expect("request type");
    assert_eq!(reply.msg_type(), MessageType::ActivityExecuteReply);
    assert_eq!(reply.request_id(), 77);
    assert_eq!(reply.bag().get_bytes("Result"), Some(&b"payload"[..]));
    assert!(reply.error().is_none());
}

#[tokio::test]
async fn missing_handler_yields_an_error_reply_of_the_declared_type() {
    let dispatcher = Dispatcher::new();

    let reply = dispatcher
        .dispatch(request(MessageType::WorkflowSignalRequest, 5))
        .await
        .expect("request type");
    assert_eq!(reply.msg_type(), MessageType::WorkflowSignalReply);
    assert_eq!(reply.request_id(), 5);
    let err = reply.error().expect("error reply");
    assert_eq!(err.kind, RemoteErrorKind::Generic);
}

#[tokio::test]
async fn handler_failure_becomes_an_error_reply() {
    let dispatcher =
        Dispatcher::new().register(MessageType::ActivityExecuteRequest, Arc::new(FailingHandler));

    let reply = dispatcher
        .dispatch(request(MessageType::ActivityExecuteRequest, 9))
        .await
        .expect("request type");
    assert_eq!(reply.msg_type(), MessageType::ActivityExecuteReply);
    assert_eq!(reply.request_id(), 9);
    let err = reply.error().expect("error reply");
    assert_eq!(err.kind, RemoteErrorKind::Panic);
    assert_eq!(err.message, "activity panicked");
}

#[tokio::test]
async fn wrong_typed_handler_reply_is_replaced_with_an_error_reply() {
    let dispatcher =
        Dispatcher::new().register(MessageType::ActivityExecuteRequest, Arc::new(WrongTypeHandler));

    let reply = dispatcher
        .dispatch(request(MessageType::ActivityExecuteRequest, 3))
        .await
        .expect("request type");
    assert_eq!(reply.msg_type(), MessageType::ActivityExecuteReply);
    assert_eq!(reply.request_id(), 3);
    assert!(reply.error().is_some());
}

#[tokio::test]
async fn non_request_envelopes_are_not_dispatched() {
    let dispatcher = Dispatcher::new();
    assert!(dispatcher.dispatch(request(MessageType::HeartbeatReply, 1)).await.is_none());
}
