//! Client signature string attached to every outgoing request.
//!
//! Single source for the User-Agent format so API and media-fetch traffic
//! stay consistent: `redgifs (<project-url> <version>) Rust/<rust-version>`.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/redgifs-rs/redgifs";

/// Builds the client User-Agent string.
#[must_use]
pub(crate) fn client_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let rust_version = env!("CARGO_PKG_RUST_VERSION");
    format!("redgifs ({PROJECT_UA_URL} {version}) Rust/{rust_version}")
}
