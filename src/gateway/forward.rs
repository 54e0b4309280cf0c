//! Request relay to the upstream item API.
//!
//! # Responsibilities
//! - Decide whether a path belongs to the relayed prefix
//! - Rewrite the target URI (and optionally strip the prefix)
//! - Send the request once and stream the upstream response back

use std::str::FromStr;

use axum::{
    body::Body,
    http::{
        header::HOST,
        uri::{Authority, InvalidUri, PathAndQuery, Scheme},
        HeaderValue, Request, Uri, Version,
    },
    response::Response,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::ForwardConfig;
use crate::http::request::{request_id, AssignedRequestId, X_REQUEST_ID};
use crate::http::response::ApiError;

pub type HttpClient = Client<HttpConnector, Body>;

/// Build the HTTP client used for upstream requests.
pub fn http_client() -> HttpClient {
    Client::builder(TokioExecutor::new()).build(HttpConnector::new())
}

/// Matches paths at or below a prefix, on segment boundaries.
///
/// `/items` matches `/items`, `/items/` and `/items/3`, not `/itemsx`.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    prefix: String,
}

impl PrefixMatcher {
    /// Trailing slashes are ignored, so `/api/` behaves like `/api`.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(&self.prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// The part of `path` after the prefix, always starting with `/`.
    pub fn strip<'a>(&self, path: &'a str) -> &'a str {
        match path.strip_prefix(&self.prefix) {
            Some(rest) if rest.starts_with('/') => rest,
            _ => "/",
        }
    }
}

/// Relays matching requests to one upstream.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: HttpClient,
    upstream: Authority,
    host: HeaderValue,
    matcher: PrefixMatcher,
    strip_prefix: bool,
}

impl Forwarder {
    pub fn new(config: &ForwardConfig, client: HttpClient) -> Result<Self, InvalidUri> {
        let upstream = Authority::from_str(&config.upstream)?;
        let host = HeaderValue::from_str(upstream.as_str())
            .unwrap_or_else(|_| HeaderValue::from_static("localhost"));
        Ok(Self {
            client,
            upstream,
            host,
            matcher: PrefixMatcher::new(config.path_prefix.as_str()),
            strip_prefix: config.strip_prefix,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }

    pub fn upstream(&self) -> &Authority {
        &self.upstream
    }

    /// Absolute upstream URI for an incoming request URI, query preserved.
    pub fn upstream_uri(&self, uri: &Uri) -> Result<Uri, ApiError> {
        let path = if self.strip_prefix {
            self.matcher.strip(uri.path())
        } else {
            uri.path()
        };
        let path_and_query = match uri.query() {
            Some(query) => format!("{path}?{query}"),
            None => path.to_string(),
        };

        let mut parts = uri.clone().into_parts();
        parts.scheme = Some(Scheme::HTTP);
        parts.authority = Some(self.upstream.clone());
        parts.path_and_query = Some(
            PathAndQuery::from_str(&path_and_query).map_err(|_| ApiError::BadGateway)?,
        );
        Uri::from_parts(parts).map_err(|_| ApiError::BadGateway)
    }

    /// Send `request` upstream and hand back its response unchanged.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, ApiError> {
        let (mut parts, body) = request.into_parts();
        let request_id = request_id(&parts.headers).to_string();

        // Only the client's own request ID travels upstream.
        if parts.extensions.remove::<AssignedRequestId>().is_some() {
            parts.headers.remove(X_REQUEST_ID);
        }
        parts.uri = self.upstream_uri(&parts.uri)?;
        parts.version = Version::HTTP_11;
        parts.headers.insert(HOST, self.host.clone());

        tracing::debug!(
            request_id = %request_id,
            method = %parts.method,
            uri = %parts.uri,
            "Forwarding request"
        );

        match self.client.request(Request::from_parts(parts, body)).await {
            Ok(response) => {
                let (parts, body) = response.into_parts();
                Ok(Response::from_parts(parts, Body::new(body)))
            }
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    upstream = %self.upstream,
                    error = %e,
                    "Upstream request failed"
                );
                Err(ApiError::BadGateway)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forwarder(prefix: &str, strip_prefix: bool) -> Forwarder {
        let config = ForwardConfig {
            upstream: "backend:3000".into(),
            path_prefix: prefix.into(),
            strip_prefix,
        };
        Forwarder::new(&config, http_client()).unwrap()
    }

    #[test]
    fn test_prefix_matcher() {
        let matcher = PrefixMatcher::new("/items");
        assert!(matcher.matches("/items"));
        assert!(matcher.matches("/items/"));
        assert!(matcher.matches("/items/3"));
        assert!(!matcher.matches("/itemsx"));
        assert!(!matcher.matches("/"));
        assert!(!matcher.matches("/api/items"));
    }

    #[test]
    fn test_prefix_matcher_trailing_slash_and_root() {
        let matcher = PrefixMatcher::new("/api/");
        assert!(matcher.matches("/api"));
        assert!(matcher.matches("/api/items"));
        assert_eq!(matcher.strip("/api/items"), "/items");
        assert_eq!(matcher.strip("/api"), "/");

        let root = PrefixMatcher::new("/");
        assert!(root.matches("/"));
        assert!(root.matches("/anything"));
    }

    #[tokio::test]
    async fn test_upstream_uri_verbatim() {
        let fwd = forwarder("/items", false);
        let uri: Uri = "/items/3?simulate=teapot".parse().unwrap();
        assert_eq!(
            fwd.upstream_uri(&uri).unwrap().to_string(),
            "http://backend:3000/items/3?simulate=teapot"
        );
    }

    #[tokio::test]
    async fn test_upstream_uri_strips_prefix() {
        let fwd = forwarder("/api", true);
        let uri: Uri = "/api/items?simulate=forbidden".parse().unwrap();
        assert_eq!(
            fwd.upstream_uri(&uri).unwrap().to_string(),
            "http://backend:3000/items?simulate=forbidden"
        );

        let uri: Uri = "/api".parse().unwrap();
        assert_eq!(fwd.upstream_uri(&uri).unwrap().to_string(), "http://backend:3000/");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fwd = Forwarder::new(&ForwardConfig::new(addr.to_string()), http_client()).unwrap();
        let request = Request::builder()
            .uri("/items")
            .body(Body::empty())
            .unwrap();
        let err = fwd.forward(request).await.unwrap_err();
        assert!(matches!(err, ApiError::BadGateway));
    }
}
