//! File and folder naming for downloaded fonts.

use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use crate::parser::FontAsset;

/// File extension of every downloaded asset.
pub const WOFF2_EXTENSION: &str = ".woff2";

/// How a [`FontAsset`] is turned into a file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilenameScheme {
    /// `<family>.woff2`. Every weight and style of a family shares one path, so
    /// only the first variant in the stylesheet is kept.
    #[default]
    Family,
    /// `<family>-<weight>-<style>.woff2`, omitting parts the block doesn't declare.
    Variant,
}

impl FilenameScheme {
    /// Returns the stable label used in config files and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Variant => "variant",
        }
    }
}

impl fmt::Display for FilenameScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilenameScheme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "family" => Ok(Self::Family),
            "variant" => Ok(Self::Variant),
            other => Err(format!(
                "unknown naming scheme '{other}', expected one of: family, variant"
            )),
        }
    }
}

/// Builds the file name for `asset` under `scheme`.
#[must_use]
pub fn asset_filename(asset: &FontAsset, scheme: FilenameScheme) -> String {
    let stem = match scheme {
        FilenameScheme::Family => asset.family.clone(),
        FilenameScheme::Variant => [
            Some(asset.family.as_str()),
            asset.weight.as_deref(),
            asset.style.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("-"),
    };
    format!("{}{WOFF2_EXTENSION}", sanitize_filename(&stem))
}

/// Folder name for a font: spaces become underscores (`"Noto Sans"` -> `Noto_Sans`).
#[must_use]
pub fn font_folder_name(font_name: &str) -> String {
    sanitize_filename(&font_name.replace(' ', "_"))
}

/// Sanitizes a filename for safe filesystem storage.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized.replace('.', "_")
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}
