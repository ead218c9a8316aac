//! Blocking transport over `reqwest::blocking::Client`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{
    DEFAULT_SYNC_TIMEOUT_SECS, TransportConfig, build_proxy, client_headers, gate_response,
};
use crate::download::{MediaUrl, classify, hd_asset_url};
use crate::enums::Order;
use crate::error::Error;
use crate::route::Route;
use crate::routes;

/// Blocking transport: each call occupies the calling thread for the full
/// request/response round trip.
///
/// Owns exactly one connection pool for its lifetime. The pool is not
/// treated as thread-safe; use one transport per thread or synchronize
/// externally.
#[derive(Debug)]
pub struct SyncTransport {
    client: reqwest::blocking::Client,
    headers: HeaderMap,
    api_base: String,
}

impl SyncTransport {
    /// Creates a transport with default configuration (fixed origin, no
    /// proxy, 60-second request timeout).
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
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for a malformed proxy URL or a
    /// client build failure, before any network activity.
    #[instrument(level = "debug", skip(config), fields(proxy = config.proxy.is_some()))]
    pub fn with_config(config: TransportConfig) -> Result<Self, Error> {
        let headers = client_headers()?;
        let timeout = config
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_SYNC_TIMEOUT_SECS));
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .gzip(true);
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
    pub fn from_client(client: reqwest::blocking::Client) -> Result<Self, Error> {
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
    pub fn request(&self, route: &Route) -> Result<Value, Error> {
        let url = format!("{}{}", self.api_base, route.path());
        let response = self
            .client
            .request(route.method().clone(), &url)
            .headers(self.headers.clone())
            .send()
            .map_err(|e| Error::network(url.as_str(), e))?;
        let status = response.status().as_u16();
        let body: Value = response.json().map_err(|e| Error::network(url.as_str(), e))?;
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
    pub fn download_to_file(&self, url: &str, path: &Path) -> Result<u64, Error> {
        let asset_url = self.resolve_asset_url(url)?;
        let mut response = self.fetch(&asset_url)?;
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        let written = response
            .copy_to(&mut writer)
            .map_err(|e| Error::network(asset_url.as_str(), e))?;
        writer.flush().map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), bytes = written, "download complete");
        Ok(written)
    }

    /// Downloads the media behind a content URL into a caller-supplied
    /// sink, returning the bytes written. The sink is never closed.
    ///
    /// # Errors
    ///
    /// Same as [`download_to_file`](Self::download_to_file), with writer
    /// failures surfacing through the transfer error.
    #[instrument(skip(self, writer), fields(url = %url))]
    pub fn download_to_writer<W: Write>(&self, url: &str, writer: &mut W) -> Result<u64, Error> {
        let asset_url = self.resolve_asset_url(url)?;
        let mut response = self.fetch(&asset_url)?;
        let written = response
            .copy_to(writer)
            .map_err(|e| Error::network(asset_url.as_str(), e))?;
        debug!(bytes = written, "download complete");
        Ok(written)
    }

    /// Classifies the content URL and, for watch pages, resolves it to the
    /// HD asset URL via one metadata lookup.
    fn resolve_asset_url(&self, url: &str) -> Result<String, Error> {
        match classify(url)? {
            MediaUrl::Direct(direct) => Ok(direct),
            MediaUrl::Watch { id } => {
                let route = routes::gif(&id)?;
                let lookup_url = format!("{}{}", self.api_base, route.path());
                let body = self.request(&route)?;
                hd_asset_url(&body, &lookup_url)
            }
        }
    }

    /// Raw GET bypassing the structured-JSON pipeline; no status gating
    /// beyond what the connection itself raises.
    fn fetch(&self, url: &str) -> Result<reqwest::blocking::Response, Error> {
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .map_err(|e| Error::network(url, e))?;
        debug!(%url, status = response.status().as_u16(), "media fetch");
        Ok(response)
    }

    /// Consumes the transport, releasing its connection pool. Taking
    /// `self` by value makes a double close unrepresentable.
    pub fn close(self) {}

    // Endpoint wrappers

    /// `GET /v1/tags`
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub fn get_tags(&self) -> Result<Value, Error> {
        self.request(&routes::tags()?)
    }

    /// `GET /v2/gifs/{id}`
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub fn get_gif(&self, id: &str) -> Result<Value, Error> {
        self.request(&routes::gif(id)?)
    }

    /// `GET /v2/gifs/search?...`
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub fn search(
        &self,
        search_text: &str,
        order: Order,
        count: u32,
        page: u32,
    ) -> Result<Value, Error> {
        self.request(&routes::search(search_text, order, count, page)?)
    }

    /// `GET /v2/gifs/search?...&type=i`
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub fn search_image(
        &self,
        search_text: &str,
        order: Order,
        count: u32,
        page: u32,
    ) -> Result<Value, Error> {
        self.request(&routes::search_image(search_text, order, count, page)?)
    }

    /// `GET /v1/creators/search?...`
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub fn search_creators(
        &self,
        page: u32,
        order: Order,
        verified: bool,
        creator_tags: &[&str],
    ) -> Result<Value, Error> {
        self.request(&routes::search_creators(page, order, verified, creator_tags)?)
    }
}
