//! `@font-face` extraction from stylesheet text.

use std::sync::LazyLock;

use regex::{Matches, Regex};
use tracing::trace;

/// Host every accepted asset URL must start with.
pub const DEFAULT_ASSET_HOST: &str = "https://fonts.gstatic.com/";

/// One `@font-face` block: an opening marker, anything but `}`, then `}`.
#[allow(clippy::expect_used)]
static BLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@font-face\s*\{[^}]+\}").expect("block regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static FAMILY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"font-family:\s*['"]([^'"]+)['"]"#).expect("family regex is valid")
});

/// `url(...)` ending in `.woff2`, with optional quotes around the target.
#[allow(clippy::expect_used)]
static WOFF2_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(\s*['"]?([^)'"\s]+?\.woff2)['"]?\s*\)"#).expect("url regex is valid")
});

#[allow(clippy::expect_used)]
static WEIGHT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"font-weight:\s*(\d+)").expect("weight regex is valid"));

#[allow(clippy::expect_used)]
static STYLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"font-style:\s*(\w+)").expect("style regex is valid"));

/// A downloadable font variant found in the stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontAsset {
    /// Family label with all spaces removed (`"Noto Sans"` becomes `"NotoSans"`).
    pub family: String,
    /// Absolute URL of the `.woff2` file.
    pub url: String,
    /// Numeric `font-weight`, when the block declares one.
    pub weight: Option<String>,
    /// `font-style` keyword, when the block declares one.
    pub style: Option<String>,
}

/// Returns true if the stylesheet contains at least one `@font-face` block.
///
/// Blocks that later turn out to lack a family or URL still count.
#[must_use]
pub fn has_font_face_blocks(css: &str) -> bool {
    BLOCK_PATTERN.is_match(css)
}

/// Extracts font assets hosted on [`DEFAULT_ASSET_HOST`].
///
/// # Examples
///
/// ```
/// use fontdl_core::parser::extract_font_faces;
///
/// let css = "@font-face { font-family: 'Roboto'; \
///     src: url(https://fonts.gstatic.com/s/roboto/abc.woff2) format('woff2'); }";
/// let assets: Vec<_> = extract_font_faces(css).collect();
/// assert_eq!(assets.len(), 1);
/// assert_eq!(assets[0].family, "Roboto");
/// ```
#[must_use]
pub fn extract_font_faces(css: &str) -> FontFaces<'_, '_> {
    extract_font_faces_from(css, DEFAULT_ASSET_HOST)
}

/// Extracts font assets whose URL starts with `asset_host`.
///
/// The returned iterator is lazy and makes a single pass over `css`.
#[must_use]
pub fn extract_font_faces_from<'c, 'h>(css: &'c str, asset_host: &'h str) -> FontFaces<'c, 'h> {
    FontFaces {
        blocks: BLOCK_PATTERN.find_iter(css),
        asset_host,
    }
}

/// Lazy iterator over the [`FontAsset`]s of a stylesheet.
///
/// Blocks without a family label or a matching asset URL are skipped.
#[derive(Debug)]
pub struct FontFaces<'c, 'h> {
    blocks: Matches<'static, 'c>,
    asset_host: &'h str,
}

impl Iterator for FontFaces<'_, '_> {
    type Item = FontAsset;

    fn next(&mut self) -> Option<Self::Item> {
        for block in self.blocks.by_ref() {
            if let Some(asset) = parse_block(block.as_str(), self.asset_host) {
                return Some(asset);
            }
            trace!(offset = block.start(), "dropping incomplete @font-face block");
        }
        None
    }
}

fn parse_block(block: &str, asset_host: &str) -> Option<FontAsset> {
    let family = FAMILY_PATTERN.captures(block)?.get(1)?.as_str().replace(' ', "");
    let url = WOFF2_URL_PATTERN
        .captures_iter(block)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|candidate| candidate.starts_with(asset_host))?
        .to_string();

    let weight = capture_first(&WEIGHT_PATTERN, block);
    let style = capture_first(&STYLE_PATTERN, block);

    Some(FontAsset {
        family,
        url,
        weight,
        style,
    })
}

fn capture_first(pattern: &Regex, block: &str) -> Option<String> {
    pattern
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
