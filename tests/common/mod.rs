//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use item_stack::config::{ApiConfig, GatewayConfig};
use item_stack::{ApiServer, GatewayServer, ItemStore, Shutdown};
use std::sync::Arc;

/// Bind an ephemeral localhost port.
pub async fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Start the item API over `store`. Returns its address.
pub async fn start_api(store: Arc<ItemStore>, shutdown: &Shutdown) -> SocketAddr {
    let (listener, addr) = bind().await;
    let server = ApiServer::with_store(ApiConfig::default(), store);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

/// Start a gateway. Returns its address.
#[allow(dead_code)]
pub async fn start_gateway(config: GatewayConfig, shutdown: &Shutdown) -> SocketAddr {
    let (listener, addr) = bind().await;
    let server = GatewayServer::new(config).unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

/// Start a raw HTTP/1.1 upstream that answers every request with the
/// request head and body it received, as plain text.
#[allow(dead_code)]
pub async fn start_echo_backend() -> SocketAddr {
    let (listener, addr) = bind().await;

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut received = Vec::new();
                let mut buffer = [0u8; 4096];
                loop {
                    let n = match socket.read(&mut buffer).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => n,
                    };
                    received.extend_from_slice(&buffer[..n]);
                    if request_complete(&received) {
                        break;
                    }
                }

                let echo = String::from_utf8_lossy(&received).into_owned();
                let response = format!(
                    "HTTP/1.1 201 Created\r\nContent-Type: text/plain\r\nX-Upstream: echo\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    echo.len(),
                    echo
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

#[allow(dead_code)]
fn request_complete(received: &[u8]) -> bool {
    let text = String::from_utf8_lossy(received);
    let Some(head_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..head_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    received.len() >= head_end + 4 + content_length
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
