//! The font family to fetch and where to put it.

use std::path::{Path, PathBuf};

use url::Url;

use crate::download::{DownloadError, font_folder_name};

/// Stylesheet endpoint of the public font service.
pub const DEFAULT_STYLESHEET_ENDPOINT: &str = "https://fonts.googleapis.com/css";

/// Default output root when neither the command line nor the config names one.
pub const DEFAULT_OUTPUT_DIR: &str = "fonts";

/// A font family to download and the directory to download it into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontRequest {
    font_name: String,
    output_dir: PathBuf,
}

impl FontRequest {
    /// Creates a request for `font_name` (display name, e.g. `"Noto Sans"`).
    pub fn new(font_name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            font_name: font_name.into(),
            output_dir: output_dir.into(),
        }
    }

    /// The display name as given.
    #[must_use]
    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// The output root.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Folder the family's files are written to: `<output_dir>/<Font_Name>`.
    #[must_use]
    pub fn family_folder(&self) -> PathBuf {
        self.output_dir.join(font_folder_name(&self.font_name))
    }

    /// Builds `<endpoint>?family=<name>&subset=all`, with spaces in the name as `+`.
    ///
    /// No other escaping is applied to the name.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::InvalidUrl`] if the result does not parse as a URL.
    pub fn stylesheet_url(&self, endpoint: &str) -> Result<String, DownloadError> {
        let family = self.font_name.replace(' ', "+");
        let url = format!("{endpoint}?family={family}&subset=all");
        Url::parse(&url).map_err(|_| DownloadError::invalid_url(url.clone()))?;
        Ok(url)
    }
}
