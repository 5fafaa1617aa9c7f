//! HTTP transport used by the network fetchers.
//!
//! Fetchers only ever issue JSON `GET` requests, so the transport contract
//! is kept small: one request envelope, one response envelope, and an
//! object-safe [`HttpClient`] trait that can be swapped for an in-memory
//! double in tests.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

const USER_AGENT: &str = concat!("sentix/", env!("CARGO_PKG_VERSION"));

/// Default per-request timeout budget.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// HTTP `GET` request envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// HTTP response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level HTTP error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("request timeout: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("network access is disabled")]
    Offline,
}

impl HttpError {
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Boxed future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;

/// Transport contract shared by the fetchers.
pub trait HttpClient: Debug + Send + Sync {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a>;
}

/// Production HTTP client backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent(USER_AGENT)
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        Box::pin(async move {
            let mut builder = self
                .client
                .get(&request.url)
                .timeout(request.timeout());

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout(e.to_string())
                } else if e.is_connect() {
                    HttpError::Connect(e.to_string())
                } else {
                    HttpError::Request(e.to_string())
                }
            })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| HttpError::Body(e.to_string()))?;

            Ok(HttpResponse { status, body })
        })
    }
}

/// Transport that refuses every request, forcing the fallback path.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineHttpClient;

impl HttpClient for OfflineHttpClient {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        let _ = request;
        Box::pin(async move { Err(HttpError::Offline) })
    }
}

#[derive(Debug, Clone)]
struct ScriptedRoute {
    url_fragment: String,
    response: Result<HttpResponse, HttpError>,
}

/// In-memory transport with canned responses keyed by URL fragment.
///
/// Every request is recorded, which lets tests assert how many upstream
/// calls a fetcher actually made. Requests that match no route fail with
/// [`HttpError::Connect`].
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    routes: Mutex<Vec<ScriptedRoute>>,
    requests: Mutex<Vec<HttpRequest>>,
    delay: Option<Duration>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL contains `url_fragment` with `response`.
    pub fn route(
        self,
        url_fragment: impl Into<String>,
        response: Result<HttpResponse, HttpError>,
    ) -> Self {
        self.set_route(url_fragment, response);
        self
    }

    /// Replace (or add) the canned response for `url_fragment`.
    pub fn set_route(
        &self,
        url_fragment: impl Into<String>,
        response: Result<HttpResponse, HttpError>,
    ) {
        let url_fragment = url_fragment.into();
        let mut routes = lock(&self.routes);
        routes.retain(|route| route.url_fragment != url_fragment);
        routes.push(ScriptedRoute {
            url_fragment,
            response,
        });
    }

    /// Delay every response, e.g. to provoke timeouts or overlapping calls.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn requests_matching(&self, url_fragment: &str) -> usize {
        lock(&self.requests)
            .iter()
            .filter(|request| request.url.contains(url_fragment))
            .count()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        let response = lock(&self.routes)
            .iter()
            .find(|route| request.url.contains(&route.url_fragment))
            .map(|route| route.response.clone())
            .unwrap_or_else(|| Err(HttpError::Connect(format!("no route for {}", request.url))));
        lock(&self.requests).push(request);
        let delay = self.delay;

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            response
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_headers_are_lowercased() {
        let request = HttpRequest::get("https://example.test/price").with_header("Accept", "application/json");

        assert_eq!(
            request.headers.get("accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(HttpResponse::with_status(204, "").is_success());
        assert!(!HttpResponse::with_status(301, "").is_success());
        assert!(!HttpResponse::with_status(500, "").is_success());
    }

    #[tokio::test]
    async fn offline_client_always_fails() {
        let error = OfflineHttpClient
            .execute(HttpRequest::get("https://example.test"))
            .await
            .expect_err("offline client must fail");
        assert_eq!(error, HttpError::Offline);
    }

    #[tokio::test]
    async fn scripted_client_routes_and_records() {
        let client = ScriptedHttpClient::new()
            .route("/price", Ok(HttpResponse::ok_json("{}")))
            .route("/fng", Ok(HttpResponse::with_status(503, "")));

        let price = client
            .execute(HttpRequest::get("https://example.test/price?ids=a"))
            .await
            .expect("price route exists");
        assert!(price.is_success());

        let fng = client
            .execute(HttpRequest::get("https://example.test/fng?limit=7"))
            .await
            .expect("fng route exists");
        assert_eq!(fng.status, 503);

        let missing = client
            .execute(HttpRequest::get("https://example.test/other"))
            .await;
        assert!(matches!(missing, Err(HttpError::Connect(_))));

        assert_eq!(client.request_count(), 3);
        assert_eq!(client.requests_matching("/price"), 1);
    }
}
