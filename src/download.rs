//! Classification of RedGifs content URLs for downloading.
//!
//! A content URL is either a direct media asset (fetch it as-is), a watch
//! page (one metadata lookup resolves it to the HD asset URL), or invalid.
//! The transports own the byte fetching; this module owns the grammar.

use serde_json::Value;
use url::Url;

use crate::constants::{BRAND_HOST_MARKER, THUMBS_ASSET_RE, THUMBS_HOST_MARKER, WATCH_SEGMENT};
use crate::error::Error;

/// Outcome of classifying a content URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaUrl {
    /// Points straight at downloadable media bytes.
    Direct(String),
    /// A watch-page URL; `id` is the gif identifier for the metadata lookup.
    Watch { id: String },
}

/// Classifies a content URL as a direct asset or a watch page.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] when the input is not a parseable URL,
/// matches the media host but fails the asset path grammar, or matches
/// neither grammar.
pub fn classify(input: &str) -> Result<MediaUrl, Error> {
    let parsed = Url::parse(input)
        .map_err(|_| Error::invalid_url(input, "not a well-formed URL"))?;
    let host = parsed.host_str().unwrap_or_default();

    if host.contains(THUMBS_HOST_MARKER) && host.contains(BRAND_HOST_MARKER) {
        if THUMBS_ASSET_RE.is_match(input) {
            return Ok(MediaUrl::Direct(input.to_string()));
        }
        return Err(Error::invalid_url(
            input,
            "media host but the path does not match the asset grammar",
        ));
    }

    if let Some(id) = watch_id(&parsed) {
        return Ok(MediaUrl::Watch { id });
    }

    Err(Error::invalid_url(
        input,
        "neither a direct media URL nor a watch page",
    ))
}

/// Extracts the gif identifier from a watch-page path: the trailing
/// non-empty segment after a literal `watch` segment.
fn watch_id(parsed: &Url) -> Option<String> {
    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
    let watch_pos = segments.iter().position(|s| *s == WATCH_SEGMENT)?;
    segments
        .get(watch_pos + 1)
        .map(|id| (*id).to_string())
        .filter(|id| !id.is_empty())
}

/// Reads the HD asset URL from a gif metadata body (`gif.urls.hd`).
///
/// # Errors
///
/// Returns [`Error::Payload`] when the field is absent or not a string.
pub fn hd_asset_url(body: &Value, request_url: &str) -> Result<String, Error> {
    body.pointer("/gif/urls/hd")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| Error::payload(request_url, "gif.urls.hd"))
}
