//! Async transport over `reqwest::Client`.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};

use super::{TransportConfig, build_proxy, client_headers, gate_response};
use crate::download::{MediaUrl, classify, hd_asset_url};
use crate::enums::Order;
use crate::error::Error;
use crate::route::Route;
use crate::routes;

/// Async transport: each call suspends the issuing task at the network
/// round trip and while reading the body, yielding to the scheduler.
///
/// Owns exactly one connection pool for its lifetime; the pool is safe for
/// concurrent in-flight requests, with no ordering guarantee between their
/// completions. Dropping an in-flight call closes the partially-read
/// response stream.
#[derive(Debug)]
pub struct AsyncTransport {
    client: reqwest::Client,
    headers: HeaderMap,
    api_base: String,
}

impl AsyncTransport {
    /// Creates a transport with default configuration (fixed origin, no
    /// proxy, connector-default timeouts).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the underlying client cannot be
    /// built.
    pub fn new() -> Result<Self, Error> {
        Self::with_config(TransportConfig::default())
    }

    /// Creates a transport from explicit configuration.
    ///
    /// Unlike the sync variant, no timeout is applied unless one is
    /// configured; the connector defaults stand.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for a malformed proxy URL or a
    /// client build failure, before any network activity.
    #[instrument(level = "debug", skip(config), fields(proxy = config.proxy.is_some()))]
    pub fn with_config(config: TransportConfig) -> Result<Self, Error> {
        let headers = client_headers()?;
        let mut builder = reqwest::Client::builder().gzip(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(proxy_config) = &config.proxy {
            builder = builder.proxy(build_proxy(proxy_config)?);
        }
        let client = builder
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            headers,
            api_base: config.api_base,
        })
    }

    /// Creates a transport around a caller-supplied client.
    ///
    /// The parameter type guarantees at compile time that the connection
    /// object matches the expected transport; timeout and proxy settings
    /// are whatever the caller built into it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the fixed header set cannot be
    /// constructed.
    pub fn from_client(client: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            client,
            headers: client_headers()?,
            api_base: TransportConfig::default().api_base,
        })
    }

    /// Executes a route and returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Remote`] for any non-200 status (the error payload
    /// is still parsed as JSON) and [`Error::Network`] for transport-level
    /// failures. Nothing is retried.
    pub async fn request(&self, route: &Route) -> Result<Value, Error> {
        let url = format!("{}{}", self.api_base, route.path());
        let response = self
            .client
            .request(route.method().clone(), &url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|e| Error::network(url.as_str(), e))?;
        let status = response.status().as_u16();
        let body: Value = response.json().await.map_err(|e| Error::network(url.as_str(), e))?;
        gate_response(route.method().as_str(), &url, status, body)
    }

    /// Downloads the media behind a content URL into a fresh file at
    /// `path` (created or truncated), returning the bytes written.
    ///
    /// Watch-page URLs cost one metadata lookup before the byte fetch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] when the URL matches neither grammar,
    /// plus any request or IO error. On failure a partially-written file
    /// may exist; treat its contents as indeterminate.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn download_to_file(&self, url: &str, path: &Path) -> Result<u64, Error> {
        let asset_url = self.resolve_asset_url(url).await?;
        let response = self.fetch(&asset_url).await?;
        let file = File::create(path).await.map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        let written = stream_body(response, &mut writer)
            .await
            .map_err(|failure| match failure {
                StreamFailure::Transfer(e) => Error::network(asset_url.as_str(), e),
                StreamFailure::Write(e) => Error::io(path, e),
            })?;
        writer.flush().await.map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), bytes = written, "download complete");
        Ok(written)
    }

    /// Downloads the media behind a content URL into a caller-supplied
    /// sink, returning the bytes written. The sink is flushed but never
    /// shut down.
    ///
    /// # Errors
    ///
    /// Same as [`download_to_file`](Self::download_to_file).
    #[instrument(skip(self, writer), fields(url = %url))]
    pub async fn download_to_writer<W: AsyncWrite + Unpin>(
        &self,
        url: &str,
        writer: &mut W,
    ) -> Result<u64, Error> {
        let asset_url = self.resolve_asset_url(url).await?;
        let response = self.fetch(&asset_url).await?;
        let written = stream_body(response, writer)
            .await
            .map_err(|failure| match failure {
                StreamFailure::Transfer(e) => Error::network(asset_url.as_str(), e),
                StreamFailure::Write(e) => Error::sink(e),
            })?;
        writer.flush().await.map_err(Error::sink)?;
        debug!(bytes = written, "download complete");
        Ok(written)
    }

    /// Classifies the content URL and, for watch pages, resolves it to the
    /// HD asset URL via one metadata lookup.
    async fn resolve_asset_url(&self, url: &str) -> Result<String, Error> {
        match classify(url)? {
            MediaUrl::Direct(direct) => Ok(direct),
            MediaUrl::Watch { id } => {
                let route = routes::gif(&id)?;
                let lookup_url = format!("{}{}", self.api_base, route.path());
                let body = self.request(&route).await?;
                hd_asset_url(&body, &lookup_url)
            }
        }
    }

    /// Raw GET bypassing the structured-JSON pipeline; no status gating
    /// beyond what the connection itself raises.
    async fn fetch(&self, url: &str) -> Result<reqwest::Response, Error> {
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|e| Error::network(url, e))?;
        debug!(%url, status = response.status().as_u16(), "media fetch");
        Ok(response)
    }

    /// Consumes the transport, releasing its connection pool. Taking
    /// `self` by value makes a double close unrepresentable; callers must
    /// let outstanding requests complete first.
    pub fn close(self) {}

    // Endpoint wrappers

    /// `GET /v1/tags`
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn get_tags(&self) -> Result<Value, Error> {
        self.request(&routes::tags()?).await
    }

    /// `GET /v2/gifs/{id}`
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn get_gif(&self, id: &str) -> Result<Value, Error> {
        self.request(&routes::gif(id)?).await
    }

    /// `GET /v2/gifs/search?...`
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn search(
        &self,
        search_text: &str,
        order: Order,
        count: u32,
        page: u32,
    ) -> Result<Value, Error> {
        self.request(&routes::search(search_text, order, count, page)?)
            .await
    }

    /// `GET /v2/gifs/search?...&type=i`
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn search_image(
        &self,
        search_text: &str,
        order: Order,
        count: u32,
        page: u32,
    ) -> Result<Value, Error> {
        self.request(&routes::search_image(search_text, order, count, page)?)
            .await
    }

    /// `GET /v1/creators/search?...`
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn search_creators(
        &self,
        page: u32,
        order: Order,
        verified: bool,
        creator_tags: &[&str],
    ) -> Result<Value, Error> {
        self.request(&routes::search_creators(page, order, verified, creator_tags)?)
            .await
    }
}

/// Distinguishes body-transfer failures from destination write failures so
/// callers can attach the right context (URL vs. path/sink).
enum StreamFailure {
    Transfer(reqwest::Error),
    Write(std::io::Error),
}

/// Streams a response body chunk-by-chunk into the writer, returning bytes
/// written.
async fn stream_body<W: AsyncWrite + Unpin>(
    response: reqwest::Response,
    writer: &mut W,
) -> Result<u64, StreamFailure> {
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(StreamFailure::Transfer)?;
        writer
            .write_all(&chunk)
            .await
            .map_err(StreamFailure::Write)?;
        written += chunk.len() as u64;
    }
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_proxy_fails_before_any_network_activity() {
        let config = TransportConfig {
            proxy: Some(super::super::ProxyConfig {
                url: "::not a proxy::".to_string(),
                credentials: None,
            }),
            ..TransportConfig::default()
        };
        let err = AsyncTransport::with_config(config).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }), "got: {err:?}");
    }

    #[test]
    fn test_from_client_accepts_caller_supplied_client() {
        let client = reqwest::Client::new();
        let transport = AsyncTransport::from_client(client).unwrap();
        assert_eq!(transport.api_base, "https://api.redgifs.com");
    }

    #[tokio::test]
    async fn test_download_rejects_unrelated_url_without_io() {
        let transport = AsyncTransport::new().unwrap();
        let mut sink = Vec::new();
        let err = transport
            .download_to_writer("https://example.com/unrelated", &mut sink)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }), "got: {err:?}");
        assert!(sink.is_empty(), "no bytes may be written for invalid URLs");
    }

    #[tokio::test]
    async fn test_direct_asset_url_resolves_without_a_metadata_lookup() {
        // The API base is unroutable, so any attempted lookup would fail.
        let config = TransportConfig {
            api_base: "http://127.0.0.1:9".to_string(),
            ..TransportConfig::default()
        };
        let transport = AsyncTransport::with_config(config).unwrap();
        let direct = "https://thumbs44.redgifs.com/SomeAsset-mobile.mp4";
        let resolved = transport.resolve_asset_url(direct).await.unwrap();
        assert_eq!(resolved, direct, "direct URLs must pass through unchanged");
    }
}
