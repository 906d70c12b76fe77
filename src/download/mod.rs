//! HTTP fetching and on-disk storage of font assets.
//!
//! This module provides the client used for the stylesheet and asset
//! requests, the naming rules for downloaded files, and the engine that runs
//! the whole fetch for one font family.
//!
//! # Features
//!
//! - Browser User-Agent on every request
//! - Streaming asset bodies to disk
//! - Skip-if-exists: an existing file is never re-fetched or overwritten
//! - Structured error types with the failing URL or path
//!
//! # Example
//!
//! ```no_run
//! use fontdl_core::download::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let bytes = client
//!     .download_to_path(
//!         "https://fonts.gstatic.com/s/roboto/v30/KFOmCnqEu92Fr1Mu4mxK.woff2",
//!         Path::new("fonts/Roboto/Roboto.woff2"),
//!     )
//!     .await?;
//! println!("wrote {bytes} bytes");
//! # Ok(())
//! # }
//! ```

mod client;
mod engine;
mod error;
mod filename;

pub use client::HttpClient;
pub use engine::{AssetOutcome, DownloadOptions, FetchSummary, FontDownloader};
pub use error::DownloadError;
pub use filename::{FilenameScheme, WOFF2_EXTENSION, asset_filename, font_folder_name};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
