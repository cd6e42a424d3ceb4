// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rig-echod binary: bind the echo listener(s) and serve until ctrl-c.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::{TcpListener, UnixListener};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rig_echod::EchoServer;

#[derive(Parser)]
#[command(name = "rig-echod", about = "Frame echo service for the proxy wire protocol")]
struct Args {
    /// Unix socket path to listen on.
    #[arg(long)]
    socket: PathBuf,

    /// Also listen on this TCP port (loopback).
    #[arg(long)]
    tcp_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.socket.exists() {
        std::fs::remove_file(&args.socket)?;
    }
    let unix = UnixListener::bind(&args.socket)?;
    info!("listening on {}", args.socket.display());

    let server = match args.tcp_port {
        Some(port) => {
            let tcp = TcpListener::bind(("127.0.0.1", port)).await?;
            info!("listening on 127.0.0.1:{}", port);
            EchoServer::with_tcp(unix, tcp)
        }
        None => EchoServer::new(unix),
    };

    let shutdown = server.shutdown_handle();
    let task = tokio::spawn(server.run());

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    shutdown.cancel();
    let _ = task.await;

    let _ = std::fs::remove_file(&args.socket);
    Ok(())
}
