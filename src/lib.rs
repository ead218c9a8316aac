//! RedGifs API client library.
//!
//! Builds request URLs from path templates with safe parameter
//! interpolation, dispatches them over a blocking or async transport
//! through one shared request/response/error pipeline, and resolves
//! arbitrary RedGifs content URLs (direct asset or watch page) into
//! downloadable bytes.
//!
//! # Architecture
//!
//! - [`route`] - path-template resolution into fully-qualified URLs
//! - [`routes`] - route constructors for the consumed endpoints
//! - [`transport`] - blocking and async transports over one shared pipeline
//! - [`download`] - content URL classification (direct asset vs watch page)
//! - [`error`] - typed error taxonomy
//!
//! # Example
//!
//! ```no_run
//! use redgifs::AsyncTransport;
//!
//! # async fn example() -> Result<(), redgifs::Error> {
//! let transport = AsyncTransport::new()?;
//! let gif = transport.get_gif("somename").await?;
//! println!("views: {}", gif["gif"]["views"]);
//!
//! let written = transport
//!     .download_to_file(
//!         "https://www.redgifs.com/watch/somename",
//!         std::path::Path::new("./somename.mp4"),
//!     )
//!     .await?;
//! println!("wrote {written} bytes");
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod download;
pub mod enums;
pub mod error;
pub mod route;
pub mod routes;
pub mod transport;
mod user_agent;

// Re-export commonly used types
pub use download::{MediaUrl, classify};
pub use enums::Order;
pub use error::{Error, RouteError};
pub use route::{ParamValue, Route};
pub use transport::{
    AsyncTransport, ProxyConfig, ProxyCredentials, SyncTransport, TransportConfig,
};
