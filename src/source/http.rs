//! HTTP signal source.
//!
//! Polls `GET {api_base}/api/signal` and returns the decoded JSON body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{FetchError, SignalSource};

/// Path of the signal endpoint relative to the API base.
pub const SIGNAL_PATH: &str = "/api/signal";

/// Loopback API base used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// A source that fetches signal snapshots from the backend over HTTP.
///
/// The source itself does not bound the request; wrap calls in
/// [`super::fetch_bounded`] so every source shares the same timeout.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    endpoint: String,
    description: String,
}

impl HttpSource {
    /// Create a source for the given API base with default client settings.
    pub fn new(api_base: &str) -> Result<Self, FetchError> {
        Self::builder().api_base(api_base).build()
    }

    /// Create a new builder for configuring the source.
    pub fn builder() -> HttpSourceBuilder {
        HttpSourceBuilder::default()
    }

    /// The full URL being polled.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SignalSource for HttpSource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        Ok(body)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for [`HttpSource`].
#[derive(Debug, Default)]
pub struct HttpSourceBuilder {
    api_base: Option<String>,
    connect_timeout: Option<Duration>,
}

impl HttpSourceBuilder {
    /// Set the API base (e.g. "http://localhost:8000").
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the TCP connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the source.
    pub fn build(self) -> Result<HttpSource, FetchError> {
        let mut client = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = self.connect_timeout {
            client = client.connect_timeout(timeout);
        }
        let client = client.build()?;

        let api_base = self.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let endpoint = endpoint_url(&api_base);

        Ok(HttpSource {
            client,
            description: format!("http: {}", endpoint),
            endpoint,
        })
    }
}

/// Join an API base and the signal path, tolerating a trailing slash.
pub fn endpoint_url(api_base: &str) -> String {
    format!("{}{}", api_base.trim_end_matches('/'), SIGNAL_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fetch_bounded;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_endpoint_url() {
        assert_eq!(endpoint_url("http://localhost:8000"), "http://localhost:8000/api/signal");
        assert_eq!(endpoint_url("http://localhost:8000/"), "http://localhost:8000/api/signal");
    }

    #[test]
    fn test_builder_defaults() {
        let source = HttpSource::builder().build().unwrap();
        assert_eq!(source.endpoint(), "http://127.0.0.1:8000/api/signal");
        assert_eq!(source.description(), "http: http://127.0.0.1:8000/api/signal");
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/signal"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sureness": 81.5,
                "action": "BUY"
            })))
            .mount(&server)
            .await;

        let source = HttpSource::new(&server.uri()).unwrap();
        let body = source.fetch().await.unwrap();
        assert_eq!(body["sureness"], json!(81.5));
        assert_eq!(body["action"], json!("BUY"));
    }

    #[tokio::test]
    async fn test_builder_with_connect_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/signal"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"call": "BUY"})))
            .mount(&server)
            .await;

        let source = HttpSource::builder()
            .api_base(format!("{}/", server.uri()))
            .connect_timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        assert_eq!(source.endpoint(), format!("{}/api/signal", server.uri()));
        assert_eq!(source.fetch().await.unwrap()["call"], json!("BUY"));
    }

    #[tokio::test]
    async fn test_fetch_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/signal"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = HttpSource::new(&server.uri()).unwrap();
        assert_eq!(source.fetch().await, Err(FetchError::Status(503)));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/signal"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let source = HttpSource::new(&server.uri()).unwrap();
        assert!(matches!(source.fetch().await, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop a listener so the port is closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSource::new(&format!("http://{}", addr)).unwrap();
        assert!(source.fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/signal"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let source = HttpSource::new(&server.uri()).unwrap();
        let result = fetch_bounded(&source, Duration::from_millis(50)).await;
        assert_eq!(result, Err(FetchError::Timeout));
    }
}
