//! Stylesheet parsing.
//!
//! Pulls the downloadable `.woff2` variants out of the CSS the font service
//! generates. Matching is textual (regular expressions over `@font-face`
//! blocks); no CSS parser is involved.
//!
//! # Example
//!
//! ```
//! use fontdl_core::parser::{extract_font_faces, has_font_face_blocks};
//!
//! let css = "@font-face { font-family: 'Noto Sans'; font-weight: 400; \
//!     src: url(https://fonts.gstatic.com/s/notosans/a.woff2) format('woff2'); }";
//! assert!(has_font_face_blocks(css));
//! let asset = extract_font_faces(css).next().unwrap();
//! assert_eq!(asset.family, "NotoSans");
//! assert_eq!(asset.weight.as_deref(), Some("400"));
//! ```

mod font_face;

pub use font_face::{
    DEFAULT_ASSET_HOST, FontAsset, FontFaces, extract_font_faces, extract_font_faces_from,
    has_font_face_blocks,
};
