//! Font resolution.
//!
//! Four faces ship embedded in the binary so stamping works on a machine with
//! no font packages installed. A settings value that is not one of the
//! embedded family names is treated as a path to a `.ttf`/`.otf` file.

use ab_glyph::FontArc;
use std::path::Path;
use thiserror::Error;

const SANS: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");
const SANS_BOLD: &[u8] = include_bytes!("../fonts/DejaVuSans-Bold.ttf");
const MONO: &[u8] = include_bytes!("../fonts/DejaVuSansMono.ttf");
const SERIF: &[u8] = include_bytes!("../fonts/DejaVuSerif.ttf");

/// Family name used when no font is configured.
pub const DEFAULT_FAMILY: &str = "sans";

/// Embedded family names accepted by [`resolve`], for help text and errors.
pub const EMBEDDED_FAMILIES: [&str; 4] = ["sans", "sans-bold", "mono", "serif"];

#[derive(Debug, Error)]
pub enum FontError {
    #[error(
        "unknown font '{0}' (embedded families: sans, sans-bold, mono, serif; \
         or pass a path to a .ttf/.otf file)"
    )]
    UnknownFamily(String),

    #[error("failed to read font file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' is not a parseable font file")]
    InvalidFont(String),
}

/// Resolve a configured font value to a loaded face.
///
/// Embedded family names match case-insensitively; anything containing a path
/// separator or a `.ttf`/`.otf` extension is loaded from disk.
pub fn resolve(family: &str) -> Result<FontArc, FontError> {
    let bytes = match family.to_ascii_lowercase().as_str() {
        "sans" => Some(SANS),
        "sans-bold" => Some(SANS_BOLD),
        "mono" => Some(MONO),
        "serif" => Some(SERIF),
        _ => None,
    };

    if let Some(bytes) = bytes {
        // Embedded faces are validated at build time by the test suite;
        // a parse failure here means a corrupted binary.
        return FontArc::try_from_slice(bytes)
            .map_err(|_| FontError::InvalidFont(family.to_string()));
    }

    let path = Path::new(family);
    let looks_like_file = family.contains(std::path::MAIN_SEPARATOR)
        || matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("ttf" | "otf" | "TTF" | "OTF")
        );
    if !looks_like_file {
        return Err(FontError::UnknownFamily(family.to_string()));
    }

    let bytes = std::fs::read(path).map_err(|source| FontError::Io {
        path: family.to_string(),
        source,
    })?;
    FontArc::try_from_vec(bytes).map_err(|_| FontError::InvalidFont(family.to_string()))
}
