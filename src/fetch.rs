//! Page fetching: the request type, the fetch outcome and the HTTP-backed fetcher

use crate::config::NetworkConfig;
use crate::error::{AuditError, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

/// Identifies the auditor to the sites it fetches
pub const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; ",
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// A single page to audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRequest {
    input: String,
    url: Url,
    timeout_ms: u64,
}

impl AuditRequest {
    /// Validate an absolute http(s) URL and a positive timeout
    pub fn new(url: &str, timeout_ms: u64) -> Result<Self> {
        if timeout_ms == 0 {
            return Err(AuditError::config("timeout must be greater than 0 ms"));
        }

        let input = url.trim();
        let parsed = Url::parse(input)
            .map_err(|e| AuditError::invalid_url(format!("{}: {}", input, e)))?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(AuditError::invalid_url(format!(
                    "unsupported scheme '{}' in {}",
                    other, input
                )))
            }
        }
        if parsed.host_str().is_none() {
            return Err(AuditError::invalid_url(format!("missing host in {}", input)));
        }

        Ok(Self {
            input: input.to_string(),
            url: parsed,
            timeout_ms,
        })
    }

    /// The URL as supplied by the caller
    pub fn as_str(&self) -> &str {
        &self.input
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    pub fn is_https(&self) -> bool {
        self.url.scheme() == "https"
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Everything the pipeline learns from one GET
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchResult {
    pub status_ok: bool,
    pub status_code: Option<u16>,
    pub body: String,
    /// Header names are lowercase; repeated headers are joined with ", "
    pub headers: BTreeMap<String, String>,
    pub elapsed_ms: u64,
    pub error: Option<String>,
}

impl FetchResult {
    /// A successful 200 response
    pub fn ok(body: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            status_ok: true,
            status_code: Some(200),
            body: body.into(),
            headers: BTreeMap::new(),
            elapsed_ms,
            error: None,
        }
    }

    /// A transport-level failure
    pub fn failed(error: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            status_ok: false,
            elapsed_ms,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Add a response header, normalizing the name to lowercase
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Reason the fetch cannot be audited, if any
    pub fn failure_reason(&self) -> Option<String> {
        if self.status_ok {
            return None;
        }
        Some(
            self.error
                .clone()
                .unwrap_or_else(|| "request did not complete".to_string()),
        )
    }
}

/// Source of page content for the audit pipeline
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform one timed GET. Failures are reported through the result, never panics.
    async fn fetch(&self, request: &AuditRequest) -> FetchResult;
}

/// Fetcher backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_deref().unwrap_or(USER_AGENT))
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| AuditError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &AuditRequest) -> FetchResult {
        debug!("Fetching {} (timeout {:?})", request.as_str(), request.timeout());
        let started = Instant::now();

        let response = match self
            .client
            .get(request.url().clone())
            .timeout(request.timeout())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let reason = describe_error(&e, request);
                warn!("Fetch of {} failed: {}", request.as_str(), reason);
                return FetchResult::failed(reason, elapsed_ms(started));
            }
        };

        let status = response.status();
        let headers = collect_headers(response.headers());

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let reason = describe_error(&e, request);
                warn!("Reading body of {} failed: {}", request.as_str(), reason);
                return FetchResult::failed(reason, elapsed_ms(started));
            }
        };
        let elapsed = elapsed_ms(started);

        debug!(
            "Fetched {}: HTTP {} in {} ms ({} bytes)",
            request.as_str(),
            status.as_u16(),
            elapsed,
            body.len()
        );

        let error = if status.is_success() {
            None
        } else {
            warn!("{} answered HTTP {}", request.as_str(), status);
            Some(format!("HTTP {}", status))
        };

        FetchResult {
            status_ok: status.is_success(),
            status_code: Some(status.as_u16()),
            body,
            headers,
            elapsed_ms: elapsed,
            error,
        }
    }
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match collected.get_mut(name.as_str()) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            None => {
                collected.insert(name.as_str().to_ascii_lowercase(), value);
            }
        }
    }
    collected
}

fn describe_error(error: &reqwest::Error, request: &AuditRequest) -> String {
    if error.is_timeout() {
        format!("timed out after {} ms", request.timeout().as_millis())
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_requires_scheme_and_host() {
        assert!(AuditRequest::new("https://example.com", 1000).is_ok());
        assert!(matches!(
            AuditRequest::new("example.com", 1000),
            Err(AuditError::InvalidUrl(_))
        ));
        assert!(matches!(
            AuditRequest::new("ftp://example.com", 1000),
            Err(AuditError::InvalidUrl(_))
        ));
        assert!(matches!(
            AuditRequest::new("https://example.com", 0),
            Err(AuditError::ConfigError(_))
        ));
    }

    #[test]
    fn test_request_keeps_input_url() {
        let request = AuditRequest::new("  https://Example.com  ", 500).unwrap();
        assert_eq!(request.as_str(), "https://Example.com");
        assert_eq!(request.host(), Some("example.com"));
        assert!(request.is_https());
        assert_eq!(request.timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let result = FetchResult::ok("", 10).with_header("X-Frame-Options", "DENY");
        assert_eq!(result.header("x-frame-options"), Some("DENY"));
        assert_eq!(result.header("X-FRAME-OPTIONS"), Some("DENY"));
        assert_eq!(result.header("x-xss-protection"), None);
    }

    #[test]
    fn test_failure_reason() {
        assert_eq!(FetchResult::ok("", 1).failure_reason(), None);
        assert_eq!(
            FetchResult::failed("timed out", 1).failure_reason().as_deref(),
            Some("timed out")
        );
    }

    #[tokio::test]
    async fn test_http_fetcher_collects_body_and_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_header("X-Content-Type-Options", "nosniff")
            .with_header("Content-Type", "text/html")
            .with_body("<html><title>Hi</title></html>")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(&NetworkConfig::default()).unwrap();
        let request = AuditRequest::new(&server.url(), 5_000).unwrap();
        let result = fetcher.fetch(&request).await;

        mock.assert_async().await;
        assert!(result.status_ok);
        assert_eq!(result.status_code, Some(200));
        assert_eq!(result.body, "<html><title>Hi</title></html>");
        assert_eq!(result.header("x-content-type-options"), Some("nosniff"));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_http_fetcher_reports_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("not here")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(&NetworkConfig::default()).unwrap();
        let request = AuditRequest::new(&format!("{}/missing", server.url()), 5_000).unwrap();
        let result = fetcher.fetch(&request).await;

        assert!(!result.status_ok);
        assert_eq!(result.status_code, Some(404));
        assert!(result.failure_reason().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_http_fetcher_reports_connection_failure() {
        let fetcher = HttpFetcher::new(&NetworkConfig::default()).unwrap();
        let request = AuditRequest::new("http://127.0.0.1:9/", 2_000).unwrap();
        let result = fetcher.fetch(&request).await;

        assert!(!result.status_ok);
        assert!(result.error.is_some());
        assert!(result.status_code.is_none());
    }
}
