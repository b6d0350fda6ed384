//! Input collection and the per-image pipeline.
//!
//! [`collect_entries`] turns CLI inputs (files and directories) into a flat,
//! deterministic list of [`Entry`] values and extracts metadata for each in
//! parallel. [`render_all`] then decodes and stamps each entry in turn.
//!
//! One bad file never sinks a batch: a decode failure leaves that entry
//! without a surface and records the error text on it, and the run summary
//! reports it. Only inputs that are wrong at the command line — an explicit
//! path that does not exist or has an unsupported extension — abort up front.

use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use image::RgbImage;
use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use crate::metadata::{self, Metadata};
use crate::render;
use crate::settings::StyleSettings;

/// Extensions accepted as image inputs, lowercase.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "tif", "tiff", "webp"];

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("input '{0}' does not exist or is not a supported image")]
    SourceNotFound(PathBuf),

    #[error("failed to scan directory '{path}': {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// One image moving through the pipeline.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: usize,
    pub source_path: PathBuf,
    /// Source filename without extension; names the outputs.
    pub stem: String,
    pub metadata: Metadata,
    /// Stamped surface, present once rendering succeeded.
    pub surface: Option<RgbImage>,
    /// Decode or render failure for this entry, if any.
    pub error: Option<String>,
}

impl Entry {
    pub fn new(id: usize, source_path: PathBuf) -> Self {
        let stem = source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("image-{id}"));
        Entry {
            id,
            source_path,
            stem,
            metadata: Metadata::unavailable(),
            surface: None,
            error: None,
        }
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// Expand inputs into entries and extract metadata for each.
///
/// Explicit file arguments must exist and carry a supported extension.
/// Directory arguments are walked recursively; non-image files inside them
/// are silently ignored, and the directory's matches are sorted by path so
/// entry ids are stable across runs.
pub fn collect_entries(inputs: &[PathBuf]) -> Result<Vec<Entry>, BatchError> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut matches = Vec::new();
            for item in WalkDir::new(input).sort_by_file_name() {
                let item = item.map_err(|source| BatchError::Scan {
                    path: input.clone(),
                    source,
                })?;
                if item.file_type().is_file() && is_supported(item.path()) {
                    matches.push(item.path().to_path_buf());
                }
            }
            matches.sort();
            paths.extend(matches);
        } else if input.is_file() && is_supported(input) {
            paths.push(input.clone());
        } else {
            return Err(BatchError::SourceNotFound(input.clone()));
        }
    }

    let mut entries: Vec<Entry> = paths
        .into_iter()
        .enumerate()
        .map(|(id, path)| Entry::new(id, path))
        .collect();

    // Extraction is pure per-file work, the natural parallel stage.
    entries
        .par_iter_mut()
        .for_each(|entry| entry.metadata = metadata::extract(&entry.source_path));

    Ok(entries)
}

/// Decode and stamp every entry. Failures are recorded on the entry.
pub fn render_all(entries: &mut [Entry], settings: &StyleSettings, font: &FontArc) {
    for entry in entries.iter_mut() {
        match image::open(&entry.source_path) {
            Ok(source) => match render::render(&source, &entry.metadata, settings, font) {
                Ok(surface) => entry.surface = Some(surface),
                Err(e) => entry.error = Some(e.to_string()),
            },
            Err(e) => entry.error = Some(format!("failed to decode: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_jpeg;
    use tempfile::TempDir;

    fn font() -> FontArc {
        crate::fonts::resolve("sans").unwrap()
    }

    #[test]
    fn explicit_files_keep_argument_order() {
        let tmp = TempDir::new().unwrap();
        let b = tmp.path().join("b.jpg");
        let a = tmp.path().join("a.jpg");
        create_test_jpeg(&b, 32, 32);
        create_test_jpeg(&a, 32, 32);

        let entries = collect_entries(&[b.clone(), a.clone()]).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source_path, b);
        assert_eq!(entries[1].source_path, a);
        assert_eq!(entries[0].id, 0);
        assert_eq!(entries[1].id, 1);
    }

    #[test]
    fn directories_expand_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        create_test_jpeg(&tmp.path().join("zebra.jpg"), 16, 16);
        create_test_jpeg(&tmp.path().join("apple.jpeg"), 16, 16);
        std::fs::write(tmp.path().join("notes.txt"), "not an image").unwrap();

        let entries = collect_entries(&[tmp.path().to_path_buf()]).unwrap();
        let stems: Vec<&str> = entries.iter().map(|e| e.stem.as_str()).collect();
        assert_eq!(stems, vec!["apple", "zebra"]);
    }

    #[test]
    fn missing_explicit_file_aborts() {
        let result = collect_entries(&[PathBuf::from("/nonexistent/photo.jpg")]);
        assert!(matches!(result, Err(BatchError::SourceNotFound(_))));
    }

    #[test]
    fn unsupported_extension_aborts() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("document.pdf");
        std::fs::write(&path, "%PDF").unwrap();

        let result = collect_entries(&[path]);
        assert!(matches!(result, Err(BatchError::SourceNotFound(_))));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.JPG");
        create_test_jpeg(&path, 16, 16);

        let entries = collect_entries(&[path]).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn exifless_entries_get_placeholder_metadata() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plain.jpg");
        create_test_jpeg(&path, 16, 16);

        let entries = collect_entries(&[path]).unwrap();
        assert_eq!(entries[0].metadata, Metadata::unavailable());
    }

    #[test]
    fn render_all_stamps_good_entries() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        create_test_jpeg(&path, 200, 150);

        let mut entries = collect_entries(&[path]).unwrap();
        render_all(&mut entries, &StyleSettings::default(), &font());

        assert!(entries[0].surface.is_some());
        assert!(entries[0].error.is_none());
        let surface = entries[0].surface.as_ref().unwrap();
        assert_eq!((surface.width(), surface.height()), (200, 150));
    }

    #[test]
    fn render_all_records_decode_failures_and_continues() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("good.jpg");
        let bad = tmp.path().join("bad.jpg");
        create_test_jpeg(&good, 64, 64);
        std::fs::write(&bad, b"truncated garbage").unwrap();

        let mut entries = collect_entries(&[bad, good]).unwrap();
        render_all(&mut entries, &StyleSettings::default(), &font());

        assert!(entries[0].surface.is_none());
        assert!(entries[0].error.is_some());
        assert!(entries[1].surface.is_some());
        assert!(entries[1].error.is_none());
    }
}
