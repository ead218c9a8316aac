//! Constants for the RedGifs API (origin, media URL grammar).

use std::sync::LazyLock;

use regex::Regex;

/// Fixed API origin; every route resolves against this base.
pub const API_BASE: &str = "https://api.redgifs.com";

/// Host marker identifying the media-thumbnail subdomain family.
pub const THUMBS_HOST_MARKER: &str = "thumbs";

/// Host marker identifying the RedGifs brand.
pub const BRAND_HOST_MARKER: &str = "redgifs";

/// Literal path segment identifying a watch-page URL.
pub const WATCH_SEGMENT: &str = "watch";

/// Grammar for direct media asset URLs on the thumbnail hosts,
/// e.g. `https://thumbs44.redgifs.com/SomeAsset-mobile.mp4`.
pub static THUMBS_ASSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r"^https://[A-Za-z0-9-]+\.redgifs\.com/[A-Za-z0-9]+(?:-[A-Za-z0-9]+)?\.(?:mp4|webm|gif|jpg|png)(?:\?.*)?$",
    )
});

/// Compiles a regex known to be valid at build time.
///
/// # Panics
///
/// Panics if the pattern is invalid; all call sites use static literals
/// covered by unit tests, so this cannot fire at runtime.
#[allow(clippy::expect_used)]
pub(crate) fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex pattern must compile")
}
