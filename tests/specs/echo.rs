// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Echo fidelity specs: frames written to the echo service come back
//! byte-for-byte equivalent after a decode/encode round trip.

use std::path::PathBuf;

use tokio::net::{UnixListener, UnixStream};
use tokio_util::sync::CancellationToken;

use rig_echod::EchoServer;
use rig_proto::{wire, Envelope, MessageType};

async fn spawn_echo() -> (tempfile::TempDir, PathBuf, CancellationToken) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("echo.sock");
    let listener = UnixListener::bind(&path).expect("bind");
    let server = EchoServer::new(listener);
    let shutdown = server.shutdown_handle();
    tokio::spawn(server.run());
    (dir, path, shutdown)
}

#[tokio::test]
async fn every_message_type_echoes_intact() {
    let (_dir, path, shutdown) = spawn_echo().await;
    let mut stream = UnixStream::connect(&path).await.expect("connect");

    for (i, &msg_type) in MessageType::ALL.iter().enumerate() {
        let mut envelope = Envelope::new(msg_type);
        envelope.set_request_id(i as i64 + 1);
        envelope.bag_mut().set_str("Marker", Some(msg_type.name()));

        wire::write_envelope(&mut stream, &envelope).await.expect("write");
        let echoed = wire::read_envelope(&mut stream).await.expect("read");
        assert_eq!(echoed, envelope, "{msg_type} did not round-trip");
    }

    shutdown.cancel();
}

#[tokio::test]
async fn populated_request_echoes_with_all_properties() {
    let (_dir, path, shutdown) = spawn_echo().await;
    let mut stream = UnixStream::connect(&path).await.expect("connect");

    let mut envelope = Envelope::new(MessageType::ActivityRegisterRequest);
    envelope.set_request_id(555);
    envelope.bag_mut().set_str("Name", Some("Foo"));

    wire::write_envelope(&mut stream, &envelope).await.expect("write");
    let echoed = wire::read_envelope(&mut stream).await.expect("read");

    assert_eq!(echoed.msg_type(), MessageType::ActivityRegisterRequest);
    assert_eq!(echoed.request_id(), 555);
    assert_eq!(echoed.bag().get_str("Name"), Some("Foo"));

    shutdown.cancel();
}

#[tokio::test]
async fn attachments_keep_their_absent_empty_data_distinction() {
    let (_dir, path, shutdown) = spawn_echo().await;
    let mut stream = UnixStream::connect(&path).await.expect("connect");

    let mut envelope = Envelope::new(MessageType::ActivityExecuteRequest);
    envelope.push_attachment(None);
    envelope.push_attachment(Some(Vec::new()));
    envelope.push_attachment(Some(vec![0xde, 0xad, 0xbe, 0xef]));

    wire::write_envelope(&mut stream, &envelope).await.expect("write");
    let echoed = wire::read_envelope(&mut stream).await.expect("read");

    assert_eq!(echoed.attachments().len(), 3);
    assert_eq!(echoed.attachments()[0], None);
    assert_eq!(echoed.attachments()[1], Some(Vec::new()));
    assert_eq!(echoed.attachments()[2], Some(vec![0xde, 0xad, 0xbe, 0xef]));

    shutdown.cancel();
}

#[tokio::test]
async fn blob_and_text_properties_survive_the_round_trip() {
    let (_dir, path, shutdown) = spawn_echo().await;
    let mut stream = UnixStream::connect(&path).await.expect("connect");

    let mut envelope = Envelope::new(MessageType::WorkflowExecuteRequest);
    envelope.bag_mut().set_str("Workflow", Some("bill-customer"));
    envelope.bag_mut().set_bytes("Args", Some(&[0x00, 0xff, 0x10]));
    envelope.bag_mut().set_long("ClientId", 7);

    wire::write_envelope(&mut stream, &envelope).await.expect("write");
    let echoed = wire::read_envelope(&mut stream).await.expect("read");

    assert_eq!(echoed.bag().get_str("Workflow"), Some("bill-customer"));
    assert_eq!(echoed.bag().get_bytes("Args"), Some(&[0x00u8, 0xff, 0x10][..]));
    assert_eq!(echoed.bag().get_long("ClientId"), 7);

    shutdown.cancel();
}
