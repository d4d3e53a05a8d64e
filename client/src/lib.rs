//! An async client for the Figma REST API.
//!
//! The [Client] only moves bytes: it authenticates, builds endpoint URLs and
//! turns non-200 answers into errors. Bodies are decoded with the types and
//! the node tree decoder of [figma_api].

mod client;
mod errors;
mod options;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use errors::Error;
pub use options::{FileOptions, ImageOptions};
