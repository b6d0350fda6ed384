//! JPEG encoding and output writing.
//!
//! Stamped surfaces leave the tool one of two ways: as individual
//! `<stem>_exif.jpg` files next to each other in an output directory, or
//! bundled into a single `exif_images.zip` whose entries live under an
//! `exif_images/` folder. Both paths encode with the configured quality.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use thiserror::Error;
use zip::ZipWriter;
use zip::write::FileOptions;

use crate::batch::Entry;

/// Folder name inside the batch archive.
pub const ZIP_FOLDER: &str = "exif_images";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Output filename for a stamped image: `photo.jpg` becomes `photo_exif.jpg`.
pub fn output_filename(stem: &str) -> String {
    format!("{stem}_exif.jpg")
}

/// Encode a surface as JPEG bytes at the given quality.
pub fn encode_jpeg(surface: &RgbImage, quality: u8) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality).encode_image(surface)?;
    Ok(buffer.into_inner())
}

/// Write one stamped image into `out_dir`, returning the path written.
pub fn export_one(
    surface: &RgbImage,
    stem: &str,
    quality: u8,
    out_dir: &Path,
) -> Result<PathBuf, ExportError> {
    let bytes = encode_jpeg(surface, quality)?;
    let path = out_dir.join(output_filename(stem));
    std::fs::write(&path, bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Result of a batch archive export.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ZipSummary {
    /// Output filenames written into the archive, in entry order.
    pub written: Vec<String>,
    /// Stems of entries skipped because they never got a surface.
    pub skipped: Vec<String>,
}

/// Write every rendered entry into a zip archive at `zip_path`.
///
/// Entries without a surface (decode or render failures) are skipped, not
/// fabricated; the summary reports them so the caller can surface the gap.
/// No explicit directory record is written, so the archive's entry count
/// equals the number of images it holds.
pub fn export_zip(
    entries: &[Entry],
    quality: u8,
    zip_path: &Path,
) -> Result<ZipSummary, ExportError> {
    let io_err = |source| ExportError::Io {
        path: zip_path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(zip_path).map_err(io_err)?;
    let mut archive = ZipWriter::new(file);
    let options = FileOptions::default();
    let mut summary = ZipSummary::default();

    for entry in entries {
        let Some(surface) = &entry.surface else {
            summary.skipped.push(entry.stem.clone());
            continue;
        };
        let name = output_filename(&entry.stem);
        let bytes = encode_jpeg(surface, quality)?;
        archive.start_file(format!("{ZIP_FOLDER}/{name}"), options)?;
        archive.write_all(&bytes).map_err(io_err)?;
        summary.written.push(name);
    }

    archive.finish()?;
    Ok(summary)
}
