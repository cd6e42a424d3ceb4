// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Echo server accept loops and per-connection sessions.
//!
//! Each accepted connection gets its own task. A session reads frames one at
//! a time: a frame that decodes is re-encoded and written back; a frame that
//! does not is dropped with a diagnostic and the session keeps reading, since
//! the length prefix preserves frame sync.

use std::io;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, UnixListener};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use rig_proto::wire;

/// Echo server over a unix socket, optionally also listening on TCP.
pub struct EchoServer {
    unix: UnixListener,
    tcp: Option<TcpListener>,
    shutdown: CancellationToken,
}

impl EchoServer {
    /// New server on a unix socket only.
    pub fn new(unix: UnixListener) -> Self {
        Self { unix, tcp: None, shutdown: CancellationToken::new() }
    }

    /// New server on both a unix socket and TCP.
    pub fn with_tcp(unix: UnixListener, tcp: TcpListener) -> Self {
        Self { unix, tcp: Some(tcp), shutdown: CancellationToken::new() }
    }

    /// Token that stops the accept loop and every open session.
    pub fn shutdown_handle(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Accept and serve connections until the shutdown token fires.
    pub async fn run(mut self) {
        match self.tcp.take() {
            Some(tcp) => self.run_dual(tcp).await,
            None => self.run_unix_only().await,
        }
    }

    async fn run_unix_only(self) {
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                result = self.unix.accept() => match result {
                    Ok((stream, _)) => {
                        let shutdown = self.shutdown.clone();
                        tokio::spawn(async move {
                            let (reader, writer) = stream.into_split();
                            echo_session(reader, writer, shutdown).await;
                        });
                    }
                    Err(e) => error!("unix accept error: {}", e),
                },
            }
        }
        info!("echo server stopped");
    }

    async fn run_dual(self, tcp: TcpListener) {
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                result = self.unix.accept() => match result {
                    Ok((stream, _)) => {
                        let shutdown = self.shutdown.clone();
                        tokio::spawn(async move {
                            let (reader, writer) = stream.into_split();
                            echo_session(reader, writer, shutdown).await;
                        });
                    }
                    Err(e) => error!("unix accept error: {}", e),
                },
                result = tcp.accept() => match result {
                    Ok((stream, addr)) => {
                        debug!("tcp connection from {}", addr);
                        let shutdown = self.shutdown.clone();
                        tokio::spawn(async move {
                            let (reader, writer) = stream.into_split();
                            echo_session(reader, writer, shutdown).await;
                        });
                    }
                    Err(e) => error!("tcp accept error: {}", e),
                },
            }
        }
        info!("echo server stopped");
    }
}

/// Serve one connection: decode each frame and echo the envelope back.
async fn echo_session<R, W>(mut reader: R, mut writer: W, shutdown: CancellationToken)
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    loop {
        let payload = tokio::select! {
            _ = shutdown.cancelled() => break,
            frame = wire::read_message(&mut reader) => match frame {
                Ok(payload) => payload,
                Err(wire_err) => {
                    if !is_disconnect(&wire_err) {
                        warn!("session read failed: {}", wire_err);
                    }
                    break;
                }
            },
        };

        let envelope = match wire::decode(&payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("dropping malformed frame: {}", e);
                continue;
            }
        };

        debug!("echoing {} frame", envelope.msg_type());
        if let Err(e) = wire::write_envelope(&mut writer, &envelope).await {
            warn!("session write failed: {}", e);
            break;
        }
    }
}

fn is_disconnect(err: &rig_proto::ProtocolError) -> bool {
    matches!(
        err,
        rig_proto::ProtocolError::Io(io_err)
            if io_err.kind() == io::ErrorKind::UnexpectedEof
    )
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
