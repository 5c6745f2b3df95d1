//! Module: metrics::server
//!
//! Minimal HTTP/1.1 endpoint for the Prometheus text format. One route,
//! `GET /metrics`; anything else gets a 404. Connections are closed after
//! a single response.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

use super::MqMetrics;

// -----------------------------------------------------------------------------
// ----- Serve -----------------------------------------------------------------

pub async fn serve(addr: SocketAddr, metrics: Arc<MqMetrics>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;

    info!("metrics endpoint listening on {addr}");

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(v) => v,
            Err(e) => {
                error!("metrics accept error: {e}");
                continue;
            }
        };

        let metrics = Arc::clone(&metrics);

        tokio::spawn(async move {
            if let Err(e) = handle(stream, &metrics).await {
                debug!("metrics client {peer} error: {e}");
            }
        });
    }
}

// -----------------------------------------------------------------------------
// ----- Request Handling ------------------------------------------------------

async fn handle(mut stream: TcpStream, metrics: &MqMetrics) -> std::io::Result<()> {
    // One read is enough for a GET request line + headers.
    let mut buf = [0u8; 4096];
    let n = stream.read(&mut buf).await?;

    let response = if is_metrics_request(&buf[..n]) {
        let body = metrics.render();
        format!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/plain; version=0.0.4\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    } else {
        "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n".to_owned()
    };

    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn is_metrics_request(head: &[u8]) -> bool {
    head.starts_with(b"GET /metrics ") || head.starts_with(b"GET /metrics\r")
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
