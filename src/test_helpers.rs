//! Shared test utilities for the exif-stamp test suite.
//!
//! All pipeline stages run in-process, so tests work entirely against
//! synthetic images written into temp directories — no fixture photos are
//! checked in.

use std::path::Path;

use image::{ImageEncoder, RgbImage};

/// Write a synthetic JPEG with a deterministic gradient pattern.
///
/// The gradient makes resize output non-uniform, which keeps dimension and
/// pixel assertions honest.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = test_image(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// The same gradient as [`create_test_jpeg`], as an in-memory buffer.
pub fn test_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Metadata with a realistic spread: some fields present, GPS and
/// description missing.
pub fn sample_metadata() -> crate::metadata::Metadata {
    let na = crate::metadata::Metadata::PLACEHOLDER.to_string();
    crate::metadata::Metadata {
        camera: "PENTAX K-3".to_string(),
        date: "2024:06:01 10:30:00".to_string(),
        iso: "400".to_string(),
        shutter: "1/200".to_string(),
        aperture: "f/2.8".to_string(),
        focal: "50mm".to_string(),
        gps: na.clone(),
        description: na,
    }
}
