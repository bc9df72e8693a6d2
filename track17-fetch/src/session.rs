//! The cookie-tracking session client.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::cookies::filter_set_cookie;
use crate::error::FetchError;
use crate::transport::{HttpTransport, Transport};

/// Error envelope the service puts in non-2xx bodies.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "Code")]
    code: i64,
    #[serde(rename = "Message", default)]
    message: Option<String>,
}

// ============================================================================
// Session Client
// ============================================================================

/// Issues JSON requests through a [`Transport`] while maintaining the two
/// session cookies across calls.
///
/// The cookie map lives for the lifetime of this client and is never
/// persisted. Updates go through one mutex-guarded merge path and the
/// lock is never held across an await, so concurrent requests on a shared
/// client cannot interleave partial writes (a lost merge under a race is
/// acceptable; a corrupt map is not).
pub struct SessionClient {
    transport: Arc<dyn Transport>,
    cookies: Mutex<HashMap<String, String>>,
}

impl SessionClient {
    /// Creates a session client over the standard [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] when no HTTP transport can be
    /// constructed in this environment.
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new()?)))
    }

    /// Creates a session client over the given transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cookies: Mutex::new(HashMap::new()),
        }
    }

    /// Snapshot of the current session cookies (diagnostics only).
    pub fn cookies(&self) -> HashMap<String, String> {
        self.lock_cookies().clone()
    }

    /// Issues one request and returns the parsed JSON body.
    ///
    /// Per call: `Content-Type: application/json` always; a `Cookie`
    /// header only when the session map is non-empty; the body omitted
    /// entirely when `data` is `None`; the method upper-cased. Any
    /// `Set-Cookie` in the response is filtered and merged into the
    /// session map before the success/error branch, so even a failed
    /// login propagates its cookies.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Transport`] when the round trip itself fails.
    /// - [`FetchError::RemoteStatus`] / [`FetchError::RemoteStatusRaw`]
    ///   for non-2xx responses, depending on whether the body carries the
    ///   service's error envelope.
    /// - [`FetchError::Json`] when a 2xx body is not valid JSON.
    pub async fn request(
        &self,
        method: &str,
        url: &str,
        data: Option<Value>,
    ) -> Result<Value, FetchError> {
        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/json".to_string(),
        );

        let cookie_header = {
            let cookies = self.lock_cookies();
            cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ")
        };
        if !cookie_header.is_empty() {
            headers.insert("Cookie".to_string(), cookie_header);
        }

        let body = match &data {
            Some(data) => Some(serde_json::to_string(data)?),
            None => None,
        };

        let response = self
            .transport
            .send(&method.to_uppercase(), url, &headers, body)
            .await?;

        if let Some(raw) = response.header("Set-Cookie") {
            let parsed = filter_set_cookie(raw);
            if !parsed.is_empty() {
                debug!(count = parsed.len(), "Merging session cookies");
                self.lock_cookies().extend(parsed);
            }
        }

        if !response.ok() {
            let text = response.text();
            return Err(match serde_json::from_str::<ErrorBody>(text) {
                Ok(error) => FetchError::RemoteStatus {
                    status: response.status(),
                    code: error.code,
                    message: error.message.unwrap_or_default(),
                },
                Err(_) => FetchError::RemoteStatusRaw {
                    status: response.status(),
                    body: text.to_string(),
                },
            });
        }

        Ok(response.json()?)
    }

    fn lock_cookies(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Tests
// ============================================================================
