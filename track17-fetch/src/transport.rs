//! The transport capability interface and its `reqwest` implementation.
//!
//! The session layer only ever sees [`Transport`] and [`RawResponse`], so
//! swapping the HTTP primitive (tests use a scripted in-memory transport)
//! never touches request or cookie logic.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::FetchError;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string sent with every request.
const USER_AGENT: &str = concat!("track17/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Raw Response
// ============================================================================

/// A normalized HTTP response: status, flattened headers, body text.
///
/// Header lookup is case-insensitive and single-valued; a header the
/// transport saw multiple times is exposed joined with `", "`.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: String,
}

impl RawResponse {
    /// Builds a response from its parts. Header keys are lower-cased for
    /// case-insensitive lookup.
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<String>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// True for any 2xx status.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Looks up a header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The response body as text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Parses the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error when the body is not valid JSON
    /// for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

// ============================================================================
// Transport
// ============================================================================

/// One HTTP round trip: method, url, headers, optional body in; a
/// [`RawResponse`] out.
///
/// Implementations decide nothing about cookies, retries, or payloads;
/// all of that lives above this seam.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a single request and returns the normalized response.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when the request cannot be
    /// completed (network failure, timeout) and
    /// [`FetchError::InvalidMethod`] when `method` is not an HTTP method.
    async fn send(
        &self,
        method: &str,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<String>,
    ) -> Result<RawResponse, FetchError>;
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// The standard [`Transport`] over a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Creates a transport with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when the HTTP client cannot be
    /// built; this means the hosting environment has no working TLS stack
    /// and is a configuration error, not a retryable one.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom request timeout.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::new`].
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { inner: client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: &str,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<String>,
    ) -> Result<RawResponse, FetchError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| FetchError::InvalidMethod(method.to_string()))?;

        debug!(%method, url, has_body = body.is_some(), "Sending request");

        let mut request = self.inner.request(method, url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();

        // Flatten to single-valued headers; repeats join with ", ".
        let mut flat = HashMap::new();
        for name in response.headers().keys() {
            let joined = response
                .headers()
                .get_all(name)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .collect::<Vec<_>>()
                .join(", ");
            flat.insert(name.as_str().to_string(), joined);
        }

        let body = response.text().await?;
        debug!(status, "Response received");

        Ok(RawResponse::new(status, flat, body))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(status: u16, headers: &[(&str, &str)]) -> RawResponse {
        let headers = headers
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        RawResponse::new(status, headers, "")
    }

    #[test]
    fn test_ok_flag() {
        assert!(response_with(200, &[]).ok());
        assert!(response_with(204, &[]).ok());
        assert!(!response_with(199, &[]).ok());
        assert!(!response_with(301, &[]).ok());
        assert!(!response_with(500, &[]).ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = response_with(200, &[("Set-Cookie", "uid=1; Path=/")]);
        assert_eq!(response.header("set-cookie"), Some("uid=1; Path=/"));
        assert_eq!(response.header("SET-COOKIE"), Some("uid=1; Path=/"));
        assert_eq!(response.header("content-type"), None);
    }

    #[test]
    fn test_json_reader() {
        let response = RawResponse::new(200, HashMap::new(), r#"{"Code": 0}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["Code"], 0);

        let garbage = RawResponse::new(200, HashMap::new(), "not json");
        assert!(garbage.json::<serde_json::Value>().is_err());
    }
}
