//! Download engine: stylesheet fetch, extraction, then one asset at a time.
//!
//! # Example
//!
//! ```no_run
//! use fontdl_core::{DownloadOptions, FontDownloader, FontRequest, HttpClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = FontDownloader::new(HttpClient::new(), DownloadOptions::default());
//! let summary = downloader.run(&FontRequest::new("Noto Sans", "fonts")).await?;
//! println!("downloaded {}, skipped {}", summary.downloaded.len(), summary.skipped.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::filename::{FilenameScheme, asset_filename};
use super::{DownloadError, HttpClient};
use crate::parser::{DEFAULT_ASSET_HOST, FontAsset, extract_font_faces_from, has_font_face_blocks};
use crate::request::{DEFAULT_STYLESHEET_ENDPOINT, FontRequest};

/// Where to fetch from and how to name what is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Base of the stylesheet URL; `?family=..&subset=all` is appended.
    pub stylesheet_endpoint: String,
    /// Prefix an asset URL must have to be downloaded.
    pub asset_host: String,
    /// File naming for assets.
    pub naming: FilenameScheme,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            stylesheet_endpoint: DEFAULT_STYLESHEET_ENDPOINT.to_string(),
            asset_host: DEFAULT_ASSET_HOST.to_string(),
            naming: FilenameScheme::default(),
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Family folder, or `None` when the stylesheet had no `@font-face` block.
    pub folder: Option<PathBuf>,
    /// Files written by this run, in stylesheet order.
    pub downloaded: Vec<PathBuf>,
    /// Files that already existed and were left untouched.
    pub skipped: Vec<PathBuf>,
}

/// Result of handling a single asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    /// The asset was fetched and written, `bytes` long.
    Downloaded {
        /// Written file.
        path: PathBuf,
        /// Body length.
        bytes: u64,
    },
    /// A file was already present at the target path; nothing was requested.
    Skipped {
        /// Existing file.
        path: PathBuf,
    },
}

/// Runs the stylesheet -> extraction -> asset pipeline for one font request.
#[derive(Debug, Clone)]
pub struct FontDownloader {
    client: HttpClient,
    options: DownloadOptions,
}

impl FontDownloader {
    /// Creates a downloader using `client` for every request.
    #[must_use]
    pub fn new(client: HttpClient, options: DownloadOptions) -> Self {
        Self { client, options }
    }

    /// The options this downloader was built with.
    #[must_use]
    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }

    /// Downloads every WOFF2 variant of the requested font.
    ///
    /// Assets are processed strictly in sequence. The first failing request
    /// or write aborts the run; files written before it stay on disk.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if a directory cannot be created, the
    /// stylesheet or an asset cannot be fetched, or a file cannot be written.
    #[instrument(skip(self, request), fields(font = %request.font_name()))]
    pub async fn run(&self, request: &FontRequest) -> Result<FetchSummary, DownloadError> {
        let output_dir = request.output_dir();
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| DownloadError::io(output_dir, e))?;

        let stylesheet_url = request.stylesheet_url(&self.options.stylesheet_endpoint)?;
        info!(url = %stylesheet_url, "Fetching CSS for {}", request.font_name());
        let css = self.client.fetch_text(&stylesheet_url).await?;

        if !has_font_face_blocks(&css) {
            info!("No font-face blocks found");
            return Ok(FetchSummary::default());
        }

        let folder = request.family_folder();
        tokio::fs::create_dir_all(&folder)
            .await
            .map_err(|e| DownloadError::io(&folder, e))?;

        let mut summary = FetchSummary {
            folder: Some(folder.clone()),
            ..FetchSummary::default()
        };

        for asset in extract_font_faces_from(&css, &self.options.asset_host) {
            match self.download_asset(&asset, &folder).await? {
                AssetOutcome::Downloaded { path, .. } => summary.downloaded.push(path),
                AssetOutcome::Skipped { path } => summary.skipped.push(path),
            }
        }

        info!(
            downloaded = summary.downloaded.len(),
            skipped = summary.skipped.len(),
            "All fonts saved to {}",
            folder.display()
        );
        Ok(summary)
    }

    /// Downloads one asset into `folder` unless its target file already exists.
    ///
    /// The existence check happens before any request, so an existing file is
    /// never re-fetched or overwritten.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if the existence check, the request, or the
    /// write fails.
    #[instrument(skip(self, asset), fields(url = %asset.url))]
    pub async fn download_asset(
        &self,
        asset: &FontAsset,
        folder: &Path,
    ) -> Result<AssetOutcome, DownloadError> {
        let filename = asset_filename(asset, self.options.naming);
        let path = folder.join(&filename);

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DownloadError::io(&path, e))?;
        if exists {
            info!("Skipping {filename}, already exists");
            return Ok(AssetOutcome::Skipped { path });
        }

        info!("Downloading {filename}");
        let bytes = self.client.download_to_path(&asset.url, &path).await?;
        debug!(path = %path.display(), bytes, "asset saved");
        Ok(AssetOutcome::Downloaded { path, bytes })
    }
}
