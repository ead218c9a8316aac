//! Error types for the RedGifs client.
//!
//! This module defines the structured error taxonomy for route resolution,
//! request dispatch, and media downloads, providing context-rich messages
//! for debugging and user feedback.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while resolving a route template into a URL.
#[derive(Debug, Clone, Error)]
pub enum RouteError {
    /// A `{name}` placeholder in the path template has no matching parameter.
    #[error("missing parameter '{name}' for route template '{template}'")]
    MissingParameter {
        /// The placeholder name that was not covered.
        name: String,
        /// The path template containing the placeholder.
        template: String,
    },
}

/// Errors that can occur during API requests and downloads.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport construction failed (bad proxy URL, client build failure).
    /// Raised before any network activity.
    #[error("transport configuration error: {reason}")]
    Configuration {
        /// Why construction failed.
        reason: String,
    },

    /// The API returned a non-200 status. Carries the parsed JSON error
    /// payload; never retried internally.
    #[error("HTTP {status} from {url}")]
    Remote {
        /// The request URL.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// The parsed response body (upstream returns structured errors).
        body: serde_json::Value,
    },

    /// The input URL matches neither the direct-asset nor the watch-page
    /// grammar, or matches the media host but fails the asset path grammar.
    #[error("invalid RedGifs URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why classification failed.
        reason: String,
    },

    /// Network-level failure (DNS, connection refused, timeout, TLS,
    /// malformed response body). The underlying error is preserved as the
    /// source; nothing is retried.
    #[error("network error for {url}: {source}")]
    Network {
        /// The URL being requested.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// File system error while writing a download target.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Write failure on a caller-supplied sink.
    #[error("IO error writing to caller-supplied sink: {source}")]
    Sink {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A 200 response body is missing a field the client relies on.
    #[error("unexpected payload from {url}: missing field '{field}'")]
    Payload {
        /// The request URL.
        url: String,
        /// The dotted path of the missing field.
        field: &'static str,
    },

    /// Route template resolution failed.
    #[error(transparent)]
    Route(#[from] RouteError),
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates a remote (non-200) error carrying the parsed body.
    pub fn remote(url: impl Into<String>, status: u16, body: serde_json::Value) -> Self {
        Self::Remote {
            url: url.into(),
            status,
            body,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an IO error for a download target path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a sink write error.
    pub fn sink(source: std::io::Error) -> Self {
        Self::Sink { source }
    }

    /// Creates a missing-field payload error.
    pub fn payload(url: impl Into<String>, field: &'static str) -> Self {
        Self::Payload {
            url: url.into(),
            field,
        }
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` or
// `From<std::io::Error>` because the variants require context (url, path)
// that the source errors don't carry. The helper constructors are the
// pattern here; call sites attach the context they have.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_error_display() {
        let err = RouteError::MissingParameter {
            name: "id".to_string(),
            template: "/v2/gifs/{id}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'id'"), "Expected parameter name in: {msg}");
        assert!(msg.contains("/v2/gifs/"), "Expected template in: {msg}");
    }

    #[test]
    fn test_remote_error_display_and_body() {
        let body = json!({"error": {"code": "Gone", "message": "gone"}});
        let err = Error::remote("https://api.redgifs.com/v2/gifs/x", 410, body.clone());
        let msg = err.to_string();
        assert!(msg.contains("410"), "Expected status in: {msg}");
        assert!(msg.contains("api.redgifs.com"), "Expected URL in: {msg}");
        match err {
            Error::Remote { body: attached, .. } => assert_eq!(attached, body),
            other => panic!("Expected Remote, got: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_url_display() {
        let err = Error::invalid_url("https://example.com/x", "neither direct nor watch");
        let msg = err.to_string();
        assert!(msg.contains("invalid RedGifs URL"), "Expected label in: {msg}");
        assert!(msg.contains("example.com"), "Expected URL in: {msg}");
    }

    #[test]
    fn test_configuration_display() {
        let err = Error::configuration("invalid proxy URL 'nope'");
        assert!(err.to_string().contains("invalid proxy URL"));
    }

    #[test]
    fn test_io_display_carries_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io(PathBuf::from("/tmp/out.mp4"), io);
        assert!(err.to_string().contains("/tmp/out.mp4"));
    }

    #[test]
    fn test_payload_display_names_field() {
        let err = Error::payload("https://api.redgifs.com/v2/gifs/x", "gif.urls.hd");
        assert!(err.to_string().contains("gif.urls.hd"));
    }

    #[test]
    fn test_route_error_converts_into_client_error() {
        let route_err = RouteError::MissingParameter {
            name: "id".to_string(),
            template: "/v2/gifs/{id}".to_string(),
        };
        let err: Error = route_err.into();
        assert!(matches!(err, Error::Route(_)));
    }
}
