//! HTTP transports for executing routes against the RedGifs API.
//!
//! Two variants share one contract: [`SyncTransport`] blocks the calling
//! thread for the full round trip, [`AsyncTransport`] suspends only the
//! issuing task. The pieces that must not drift between them live here as
//! shared pure helpers: the fixed outgoing header set, proxy wiring, and
//! the status-gating step that turns a (status, parsed body) pair into a
//! result.

mod async_impl;
mod blocking;

use std::fmt;
use std::time::Duration;

use reqwest::Proxy;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::debug;

pub use async_impl::AsyncTransport;
pub use blocking::SyncTransport;

use crate::constants::API_BASE;
use crate::error::Error;
use crate::user_agent;

/// Hard timeout ceiling applied to blocking requests when none is configured.
pub const DEFAULT_SYNC_TIMEOUT_SECS: u64 = 60;

/// Credentials for the proxy hop. Passed opaquely to the transport and
/// attached as basic authentication to the proxy only, never to the origin.
#[derive(Clone)]
pub struct ProxyCredentials {
    pub username: String,
    pub password: String,
}

impl ProxyCredentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Manual Debug keeps the password out of logs and error chains.
impl fmt::Debug for ProxyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Proxy configuration, owned by a transport for its entire lifetime.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Proxy origin, e.g. `http://proxy.example:8080`.
    pub url: String,
    /// Optional basic-auth credentials for the proxy hop.
    pub credentials: Option<ProxyCredentials>,
}

/// Construction-time transport configuration.
///
/// `timeout` semantics differ by variant: the sync transport falls back to
/// a hard [`DEFAULT_SYNC_TIMEOUT_SECS`] ceiling when unset, the async
/// transport applies no override beyond the connector defaults.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Optional proxy for every request through this transport.
    pub proxy: Option<ProxyConfig>,
    /// Per-request timeout override.
    pub timeout: Option<Duration>,
    /// API origin; only tests should point this away from the fixed base.
    pub api_base: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: None,
            api_base: API_BASE.to_string(),
        }
    }
}

/// Builds the fixed outgoing header set, computed once per transport and
/// reused verbatim on every request.
pub(crate) fn client_headers() -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    let ua = user_agent::client_user_agent();
    let value = HeaderValue::from_str(&ua)
        .map_err(|e| Error::configuration(format!("invalid User-Agent header '{ua}': {e}")))?;
    headers.insert(USER_AGENT, value);
    Ok(headers)
}

/// Builds a reqwest proxy from the configuration, attaching credentials as
/// basic auth scoped to the proxy hop.
pub(crate) fn build_proxy(config: &ProxyConfig) -> Result<Proxy, Error> {
    let mut proxy = Proxy::all(&config.url)
        .map_err(|e| Error::configuration(format!("invalid proxy URL '{}': {e}", config.url)))?;
    if let Some(credentials) = &config.credentials {
        proxy = proxy.basic_auth(&credentials.username, &credentials.password);
    }
    Ok(proxy)
}

/// Status-gates a completed request: returns the parsed body for 200,
/// otherwise a [`Error::Remote`] carrying it. Pure; both transports
/// funnel every API response through here.
pub(crate) fn gate_response(
    method: &str,
    url: &str,
    status: u16,
    body: Value,
) -> Result<Value, Error> {
    debug!(%method, %url, status, "request completed");
    if status == 200 {
        debug!(%method, %url, %body, "response body");
        Ok(body)
    } else {
        Err(Error::remote(url, status, body))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gate_response_returns_body_unchanged_for_200() {
        let body = json!({"gif": {"id": "abc"}, "views": 42});
        let gated = gate_response("GET", "https://api.redgifs.com/v2/gifs/abc", 200, body.clone())
            .unwrap();
        assert_eq!(gated, body);
    }

    #[test]
    fn test_gate_response_maps_non_200_to_remote_error() {
        let body = json!({"error": {"code": "NotFound"}});
        let err = gate_response("GET", "https://api.redgifs.com/v2/gifs/x", 404, body.clone())
            .unwrap_err();
        match err {
            Error::Remote {
                status,
                body: attached,
                url,
            } => {
                assert_eq!(status, 404);
                assert_eq!(attached, body);
                assert_eq!(url, "https://api.redgifs.com/v2/gifs/x");
            }
            other => panic!("Expected Remote, got: {other:?}"),
        }
    }

    #[test]
    fn test_gate_response_gates_every_non_200_status() {
        for status in [201, 301, 401, 429, 500] {
            let err = gate_response("GET", "https://api.redgifs.com/v1/tags", status, json!({}))
                .unwrap_err();
            assert!(matches!(err, Error::Remote { .. }), "status {status}");
        }
    }

    #[test]
    fn test_client_headers_contains_user_agent() {
        let headers = client_headers().unwrap();
        let ua = headers.get(USER_AGENT).unwrap().to_str().unwrap();
        assert!(ua.starts_with("redgifs ("), "unexpected UA: {ua}");
    }

    #[test]
    fn test_build_proxy_rejects_malformed_url() {
        let config = ProxyConfig {
            url: "::not a proxy::".to_string(),
            credentials: None,
        };
        let err = build_proxy(&config).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }), "got: {err:?}");
    }

    #[test]
    fn test_build_proxy_accepts_credentials() {
        let config = ProxyConfig {
            url: "http://proxy.example:8080".to_string(),
            credentials: Some(ProxyCredentials::new("user", "hunter2")),
        };
        assert!(build_proxy(&config).is_ok());
    }

    #[test]
    fn test_proxy_credentials_debug_redacts_password() {
        let credentials = ProxyCredentials::new("user", "hunter2");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"), "password leaked: {rendered}");
    }

    #[test]
    fn test_default_config_targets_fixed_origin() {
        let config = TransportConfig::default();
        assert_eq!(config.api_base, "https://api.redgifs.com");
        assert!(config.proxy.is_none());
        assert!(config.timeout.is_none());
    }
}
