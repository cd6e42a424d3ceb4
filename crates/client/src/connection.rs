// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message-channel connection: framed transport, reader task, and the
//! request/reply call surface.
//!
//! One connection owns one duplex byte stream. A single reader task pulls
//! frames off the stream: replies go to the [`Correlator`], inbound requests
//! are handed to the [`Dispatcher`] on their own task so a slow handler never
//! stalls the reader. Writes from caller tasks and dispatch tasks interleave
//! whole frames under an async mutex.
//!
//! A malformed frame is dropped with a diagnostic and the reader keeps going;
//! stream errors and EOF tear the connection down and fail every pending
//! request with `ConnectionClosed`.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs, UnixStream};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use rig_proto::messages::{Message, Request};
use rig_proto::{wire, Envelope};

use crate::correlator::{Correlator, Outcome};
use crate::dispatch::Dispatcher;
use crate::env;
use crate::error::ClientError;

type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;
type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// A live message channel to the sidecar.
pub struct Connection {
    correlator: Arc<Correlator>,
    writer: Arc<Mutex<BoxedWriter>>,
    shutdown: CancellationToken,
}

impl Connection {
    /// Take ownership of a duplex stream and spawn the reader task.
    pub fn spawn<S>(stream: S, dispatcher: Dispatcher) -> Arc<Self>
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (read_half, write_half) = tokio::io::split(stream);
        let correlator = Arc::new(Correlator::new());
        let writer: Arc<Mutex<BoxedWriter>> = Arc::new(Mutex::new(Box::new(write_half)));
        let shutdown = CancellationToken::new();

        tokio::spawn(reader_loop(
            Box::new(read_half),
            Arc::clone(&correlator),
            Arc::new(dispatcher),
            Arc::clone(&writer),
            shutdown.clone(),
        ));

        Arc::new(Self { correlator, writer, shutdown })
    }

    /// Connect over a unix domain socket.
    pub async fn connect_unix(
        path: impl AsRef<Path>,
        dispatcher: Dispatcher,
    ) -> Result<Arc<Self>, ClientError> {
        let stream = UnixStream::connect(path.as_ref()).await?;
        Ok(Self::spawn(stream, dispatcher))
    }

    /// Connect over TCP.
    pub async fn connect_tcp(
        addr: impl ToSocketAddrs,
        dispatcher: Dispatcher,
    ) -> Result<Arc<Self>, ClientError> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::spawn(stream, dispatcher))
    }

    /// Send one typed request and await its correlated reply, bounded by the
    /// default call deadline.
    pub async fn call<R: Request>(&self, request: R) -> Result<R::Reply, ClientError> {
        self.call_with_timeout(request, env::call_timeout()).await
    }

    /// Send one typed request and await its correlated reply.
    ///
    /// The correlation id is assigned here; any id the caller stamped is
    /// overwritten. On timeout the pending entry is abandoned, so a late
    /// reply is dropped instead of resolving a reused id.
    pub async fn call_with_timeout<R: Request>(
        &self,
        mut request: R,
        deadline: Duration,
    ) -> Result<R::Reply, ClientError> {
        if self.shutdown.is_cancelled() {
            return Err(ClientError::ConnectionClosed);
        }

        let (request_id, rx) = self.correlator.register(<R::Reply as Message>::TYPE);
        request.set_request_id(request_id);

        if let Err(err) = self.send(request.envelope()).await {
            self.correlator.abandon(request_id);
            return Err(err);
        }

        match tokio::time::timeout(deadline, rx).await {
            Ok(Ok(outcome)) => {
                let envelope = outcome?;
                Ok(R::Reply::from_envelope(envelope)?)
            }
            // sender dropped without resolving: teardown raced the reply
            Ok(Err(_)) => Err(ClientError::ConnectionClosed),
            Err(_) => {
                self.correlator.abandon(request_id);
                warn!(request_id, "request timed out; late reply will be dropped");
                Err(ClientError::Timeout)
            }
        }
    }

    /// Write one envelope as a single frame.
    pub async fn send(&self, envelope: &Envelope) -> Result<(), ClientError> {
        if self.shutdown.is_cancelled() {
            return Err(ClientError::ConnectionClosed);
        }
        let mut writer = self.writer.lock().await;
        wire::write_envelope(&mut *writer, envelope).await?;
        Ok(())
    }

    /// Tear the connection down: stop the reader, fail every pending request,
    /// and shut the write half.
    pub async fn close(&self) {
        self.shutdown.cancel();
        self.correlator.fail_all(|| ClientError::ConnectionClosed);
        let mut writer = self.writer.lock().await;
        let _ = writer.shutdown().await;
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Requests currently awaiting replies.
    pub fn outstanding(&self) -> usize {
        self.correlator.outstanding()
    }
}

async fn reader_loop(
    mut reader: BoxedReader,
    correlator: Arc<Correlator>,
    dispatcher: Arc<Dispatcher>,
    writer: Arc<Mutex<BoxedWriter>>,
    shutdown: CancellationToken,
) {
    loop {
        let payload = tokio::select! {
            _ = shutdown.cancelled() => break,
            frame = wire::read_message(&mut reader) => match frame {
                Ok(payload) => payload,
                Err(err) => {
                    if !shutdown.is_cancelled() {
                        debug!(error = %err, "connection read failed");
                    }
                    break;
                }
            },
        };

        // frame sync is intact past this point, so a bad payload only
        // costs this one frame
        let envelope = match wire::decode(&payload) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(error = %err, "dropping malformed frame");
                continue;
            }
        };

        if envelope.msg_type().is_reply() {
            match correlator.complete(envelope) {
                Outcome::Delivered { .. } => {}
                Outcome::Mismatched { request_id, expected, actual } => {
                    warn!(request_id, %expected, %actual, "reply type mismatch");
                }
                Outcome::Unmatched { request_id } => {
                    warn!(request_id, "dropping reply with no pending request");
                }
            }
        } else {
            let dispatcher = Arc::clone(&dispatcher);
            let writer = Arc::clone(&writer);
            tokio::spawn(async move {
                if let Some(reply) = dispatcher.dispatch(envelope).await {
                    let mut writer = writer.lock().await;
                    if let Err(err) = wire::write_envelope(&mut *writer, &reply).await {
                        warn!(error = %err, "failed to write dispatch reply");
                    }
                }
            });
        }
    }

    shutdown.cancel();
    correlator.fail_all(|| ClientError::ConnectionClosed);
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;
