//! Item API server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the item routes
//! - Wire up middleware (tracing, request ID, body limit, metrics)
//! - Serve on a listener until shutdown is signalled

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::api::handlers::{create_item, delete_item, list_items, update_item};
use crate::config::ApiConfig;
use crate::http::request::{propagate_request_id_layer, request_span, set_request_id_layer};
use crate::lifecycle::shutdown::recv as wait_for_shutdown;
use crate::observability::metrics::track_metrics;
use crate::store::ItemStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ItemStore>,
}

/// Build the Axum router with all middleware layers.
pub fn build_router(store: Arc<ItemStore>, max_body_size: usize) -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", put(update_item).delete(delete_item))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(AppState { store })
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(set_request_id_layer())
}

/// HTTP server for the item API.
pub struct ApiServer {
    router: Router,
    store: Arc<ItemStore>,
    config: ApiConfig,
}

impl ApiServer {
    /// Create a server with a fresh store, seeded when `config.seed` is set.
    pub fn new(config: ApiConfig) -> Self {
        let store = if config.seed {
            ItemStore::seeded()
        } else {
            ItemStore::new()
        };
        Self::with_store(config, Arc::new(store))
    }

    /// Create a server over an existing store.
    pub fn with_store(config: ApiConfig, store: Arc<ItemStore>) -> Self {
        let router = build_router(store.clone(), config.max_body_size);
        Self {
            router,
            store,
            config,
        }
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            items = self.store.len(),
            max_body_size = self.config.max_body_size,
            "Item API listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("Item API stopped");
        Ok(())
    }

    /// The store this server operates on.
    pub fn store(&self) -> Arc<ItemStore> {
        self.store.clone()
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::payload::{CREATE_HINT, UPDATE_HINT};
    use crate::http::request::X_REQUEST_ID;

    fn app() -> (Router, Arc<ItemStore>) {
        let store = Arc::new(ItemStore::seeded());
        (build_router(store.clone(), 1024), store)
    }

    fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_items() {
        let (app, _) = app();
        let response = app.oneshot(request(Method::GET, "/items", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(
            body["items"],
            json!([
                {"id": 1, "name": "Notebook", "quantity": 5},
                {"id": 2, "name": "Pencil", "quantity": 10}
            ])
        );
        assert_eq!(body["requestExamples"]["post"], json!({"name": "Marker", "quantity": 3}));
    }

    #[tokio::test]
    async fn test_simulated_failures_skip_store() {
        let (app, store) = app();
        for failure in crate::api::SimulatedFailure::ALL {
            let uri = format!("/items?simulate={}", failure.key);
            let response = app
                .clone()
                .oneshot(request(Method::GET, &uri, None))
                .await
                .unwrap();
            assert_eq!(response.status(), failure.status);
            assert_eq!(json_body(response).await, json!({"error": failure.message}));
        }
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_simulate_key_lists() {
        let (app, _) = app();
        let response = app
            .oneshot(request(Method::GET, "/items?simulate=nope&other=1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["items"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_simulate_key_uses_first_value() {
        let (app, _) = app();
        let response = app
            .clone()
            .oneshot(request(Method::GET, "/items?simulate=nope&simulate=x", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["items"].as_array().unwrap().len(), 2);

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/items?simulate=teapot&simulate=x", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(json_body(response).await["error"], "Simulated teapot: I'm a teapot");

        let response = app
            .oneshot(request(Method::GET, "/items?simulate=x&simulate=teapot", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_item() {
        let (app, store) = app();
        let response = app
            .oneshot(request(
                Method::POST,
                "/items",
                Some(json!({"name": "Marker", "quantity": 3})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            json_body(response).await,
            json!({"message": "Item created", "item": {"id": 3, "name": "Marker", "quantity": 3}})
        );
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let (app, store) = app();
        let response = app
            .oneshot(request(Method::POST, "/items", Some(json!({"name": "", "quantity": 3}))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({"error": CREATE_HINT}));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_create_without_content_type_is_parsed() {
        let (app, _) = app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/items")
            .body(Body::from(r#"{"name":"Clip","quantity":2.5}"#))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["item"]["quantity"], json!(2.5));
    }

    #[tokio::test]
    async fn test_update_item() {
        let (app, store) = app();
        let response = app
            .oneshot(request(
                Method::PUT,
                "/items/1",
                Some(json!({"name": "Notebook A5", "quantity": 7})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Item updated");
        assert_eq!(body["item"], json!({"id": 1, "name": "Notebook A5", "quantity": 7}));
        assert_eq!(store.find(1).unwrap().name, "Notebook A5");
    }

    #[tokio::test]
    async fn test_update_checks_id_before_body() {
        let (app, store) = app();
        let before = store.list();

        let response = app
            .clone()
            .oneshot(request(Method::PUT, "/items/9999", Some(json!({"name": ""}))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, json!({"error": "Item not found"}));

        let response = app
            .oneshot(request(Method::PUT, "/items/2", Some(json!({"name": "Pen"}))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({"error": UPDATE_HINT}));

        assert_eq!(store.list(), before);
    }

    #[tokio::test]
    async fn test_delete_item_twice() {
        let (app, store) = app();
        let response = app
            .clone()
            .oneshot(request(Method::DELETE, "/items/2", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"message": "Item deleted", "item": {"id": 2, "name": "Pencil", "quantity": 10}})
        );

        let response = app
            .oneshot(request(Method::DELETE, "/items/2", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found() {
        let (app, store) = app();
        let response = app
            .clone()
            .oneshot(request(Method::DELETE, "/items/pencil", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(request(
                Method::PUT,
                "/items/abc",
                Some(json!({"name": "Marker", "quantity": 3})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, json!({"error": "Item not found"}));
        assert_eq!(store.len(), 2);
        assert_eq!(store.find(1).unwrap().name, "Notebook");
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let (app, store) = app();
        let name = "x".repeat(2048);
        let response = app
            .oneshot(request(Method::POST, "/items", Some(json!({"name": name, "quantity": 1}))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_request_id_generated_and_propagated() {
        let (app, _) = app();
        let response = app
            .clone()
            .oneshot(request(Method::GET, "/items", None))
            .await
            .unwrap();
        assert!(response.headers().contains_key(X_REQUEST_ID));

        let req = Request::builder()
            .uri("/items")
            .header(X_REQUEST_ID, "trace-me")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "trace-me");
    }
}
