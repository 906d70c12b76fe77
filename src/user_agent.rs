//! Browser User-Agent sent with every request.
//!
//! The font service chooses the stylesheet syntax and font formats from the
//! client identification; without a modern desktop browser UA it serves
//! legacy formats and no `.woff2` URLs.

/// Desktop Chrome User-Agent used for stylesheet and asset requests.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";
