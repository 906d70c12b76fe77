//! fontdl Core Library
//!
//! Downloads the WOFF2 files of a web font family: one stylesheet request,
//! `@font-face` extraction, then one request per asset, skipping files that
//! are already on disk.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`request`] - The font to fetch and the stylesheet URL built from it
//! - [`parser`] - `@font-face` extraction from stylesheet text
//! - [`download`] - HTTP client, file naming, and the download engine
//! - [`user_agent`] - Browser identification sent with every request

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod parser;
pub mod request;
pub mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use download::{
    AssetOutcome, DownloadError, DownloadOptions, FetchSummary, FilenameScheme, FontDownloader,
    HttpClient,
};
pub use parser::{DEFAULT_ASSET_HOST, FontAsset, extract_font_faces, has_font_face_blocks};
pub use request::{DEFAULT_OUTPUT_DIR, DEFAULT_STYLESHEET_ENDPOINT, FontRequest};
pub use user_agent::BROWSER_USER_AGENT;
