//! Gateway server setup.
//!
//! # Responsibilities
//! - Dispatch every request to the forwarder or the static asset directory
//! - Wire up middleware (tracing, request ID)
//! - Serve on a listener until shutdown is signalled

use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{uri::InvalidUri, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::gateway::forward::{http_client, Forwarder};
use crate::http::request::{
    mark_assigned_request_id, propagate_request_id_layer, request_span, set_request_id_layer,
};
use crate::lifecycle::shutdown::recv as wait_for_shutdown;
use crate::observability::metrics;

/// Error type for gateway construction.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid upstream address: {0}")]
    InvalidUpstream(#[from] InvalidUri),
}

#[derive(Clone)]
struct GatewayState {
    forwarder: Option<Forwarder>,
    assets: Option<ServeDir>,
}

/// Build the gateway router from its configuration.
pub fn build_gateway_router(config: &GatewayConfig) -> Result<Router, GatewayError> {
    let forwarder = config
        .forward
        .as_ref()
        .map(|forward| Forwarder::new(forward, http_client()))
        .transpose()?;
    let assets = config.static_dir.as_ref().map(ServeDir::new);

    let state = GatewayState { forwarder, assets };

    Ok(Router::new()
        .fallback(gateway_handler)
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(set_request_id_layer())
        .layer(middleware::from_fn(mark_assigned_request_id)))
}

async fn gateway_handler(State(state): State<GatewayState>, request: Request) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    if let Some(forwarder) = state
        .forwarder
        .as_ref()
        .filter(|f| f.matches(request.uri().path()))
    {
        let response = forwarder.forward(request).await.into_response();
        metrics::record_request(&method, "forward", response.status().as_u16(), start);
        return response;
    }

    let response = match state.assets {
        Some(assets) => serve_asset(assets, request).await,
        None => StatusCode::NOT_FOUND.into_response(),
    };
    metrics::record_request(&method, "static", response.status().as_u16(), start);
    response
}

async fn serve_asset(assets: ServeDir, request: Request<Body>) -> Response {
    match assets.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// HTTP server for the frontend gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let router = build_gateway_router(&config)?;
        Ok(Self { router, config })
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let forward = self.config.forward.as_ref();
        tracing::info!(
            address = %addr,
            upstream = forward.map_or("none", |f| f.upstream.as_str()),
            path_prefix = forward.map_or("-", |f| f.path_prefix.as_str()),
            static_dir = self.config.static_dir.as_deref().unwrap_or("none"),
            "Gateway listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("Gateway stopped");
        Ok(())
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForwardConfig;

    fn get(uri: &str) -> Request {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_static_assets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>items</h1>").unwrap();

        let config = GatewayConfig {
            static_dir: Some(dir.path().to_string_lossy().into_owned()),
            ..GatewayConfig::default()
        };
        let router = build_gateway_router(&config).unwrap();

        let response = router.clone().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<h1>items</h1>");

        let response = router.oneshot(get("/missing.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_returns_json_502() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = GatewayConfig {
            forward: Some(ForwardConfig::new(addr.to_string())),
            ..GatewayConfig::default()
        };
        let router = build_gateway_router(&config).unwrap();

        let response = router.clone().oneshot(get("/items")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "Bad gateway: upstream service is unreachable"})
        );

        // Outside the prefix with no static dir configured.
        let response = router.oneshot(get("/app.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_upstream_rejected() {
        let config = GatewayConfig {
            forward: Some(ForwardConfig::new("not a host")),
            ..GatewayConfig::default()
        };
        assert!(matches!(
            GatewayServer::new(config),
            Err(GatewayError::InvalidUpstream(_))
        ));
    }
}
