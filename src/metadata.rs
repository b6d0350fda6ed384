//! EXIF metadata extraction and display formatting.
//!
//! Every image entry carries exactly eight display fields. Extraction is
//! best-effort and *never fails to the caller*: a file with no EXIF container,
//! a malformed container, or an unreadable file all produce the same result as
//! a field-by-field miss — the [`Metadata::PLACEHOLDER`] string `"N/A"`.
//! Each field degrades independently, so a photo with aperture but no GPS
//! still shows its aperture.
//!
//! ## Field formatting
//!
//! | Field | EXIF source | Display |
//! |---|---|---|
//! | camera | `Model` | tag text, quotes stripped |
//! | date | `DateTimeOriginal`, fallback `DateTime` | tag text |
//! | iso | `PhotographicSensitivity` | plain number (`400`) |
//! | shutter | `ExposureTime` | `1/round(1/t)` (`1/200`) |
//! | aperture | `FNumber` | `f/2.8` |
//! | focal | `FocalLength` | `50mm` |
//! | gps | `GPSLatitude(+Ref)`, `GPSLongitude(+Ref)` | `48.858093, 2.294694` |
//! | description | `ImageDescription` | tag text, quotes stripped |
//!
//! GPS is only shown when both coordinates resolve; a hemisphere ref of `S`
//! or `W` negates the decimal value.

use clap::ValueEnum;
use exif::{In, Tag, Value};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// The eight recognized metadata fields, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExifField {
    Camera,
    Date,
    Iso,
    Shutter,
    Aperture,
    Focal,
    Gps,
    Description,
}

impl ExifField {
    pub const ALL: [ExifField; 8] = [
        ExifField::Camera,
        ExifField::Date,
        ExifField::Iso,
        ExifField::Shutter,
        ExifField::Aperture,
        ExifField::Focal,
        ExifField::Gps,
        ExifField::Description,
    ];

    /// Human-facing label used when stamping `"<Label>: <value>"` lines.
    pub fn label(self) -> &'static str {
        match self {
            ExifField::Camera => "Camera",
            ExifField::Date => "Date",
            ExifField::Iso => "ISO",
            ExifField::Shutter => "Shutter",
            ExifField::Aperture => "Aperture",
            ExifField::Focal => "Focal Length",
            ExifField::Gps => "GPS",
            ExifField::Description => "Description",
        }
    }
}

/// Extracted metadata for one image. Every field is always present; absent or
/// unparsable values hold [`Metadata::PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub camera: String,
    pub date: String,
    pub iso: String,
    pub shutter: String,
    pub aperture: String,
    pub focal: String,
    pub gps: String,
    pub description: String,
}

impl Metadata {
    pub const PLACEHOLDER: &'static str = "N/A";

    /// All-placeholder metadata, used when the EXIF container is missing or
    /// unreadable.
    pub fn unavailable() -> Self {
        let na = || Self::PLACEHOLDER.to_string();
        Metadata {
            camera: na(),
            date: na(),
            iso: na(),
            shutter: na(),
            aperture: na(),
            focal: na(),
            gps: na(),
            description: na(),
        }
    }

    pub fn get(&self, field: ExifField) -> &str {
        match field {
            ExifField::Camera => &self.camera,
            ExifField::Date => &self.date,
            ExifField::Iso => &self.iso,
            ExifField::Shutter => &self.shutter,
            ExifField::Aperture => &self.aperture,
            ExifField::Focal => &self.focal,
            ExifField::Gps => &self.gps,
            ExifField::Description => &self.description,
        }
    }

    /// True if at least one field carries a real value.
    pub fn any_available(&self) -> bool {
        ExifField::ALL
            .iter()
            .any(|&f| self.get(f) != Self::PLACEHOLDER)
    }
}

/// Extract display metadata from an image file. Never errors: any failure,
/// per file or per field, degrades to the placeholder.
pub fn extract(path: &Path) -> Metadata {
    match read_container(path) {
        Some(exif) => from_exif(&exif),
        None => Metadata::unavailable(),
    }
}

fn read_container(path: &Path) -> Option<exif::Exif> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    exif::Reader::new().read_from_container(&mut reader).ok()
}

fn from_exif(exif: &exif::Exif) -> Metadata {
    let or_na = |v: Option<String>| v.unwrap_or_else(|| Metadata::PLACEHOLDER.to_string());

    Metadata {
        camera: or_na(text_field(exif, Tag::Model)),
        date: or_na(
            text_field(exif, Tag::DateTimeOriginal).or_else(|| text_field(exif, Tag::DateTime)),
        ),
        iso: or_na(uint_field(exif, Tag::PhotographicSensitivity).map(|v| v.to_string())),
        shutter: or_na(rational_field(exif, Tag::ExposureTime).and_then(format_shutter)),
        aperture: or_na(rational_field(exif, Tag::FNumber).map(format_aperture)),
        focal: or_na(rational_field(exif, Tag::FocalLength).map(format_focal)),
        gps: or_na(gps_field(exif)),
        description: or_na(text_field(exif, Tag::ImageDescription)),
    }
}

// ---------------------------------------------------------------------------
// Tag readers
// ---------------------------------------------------------------------------

/// Text tag as displayed by the exif crate, surrounding quotes stripped.
fn text_field(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let text = field
        .display_value()
        .to_string()
        .trim_matches('"')
        .trim()
        .to_string();
    (!text.is_empty()).then_some(text)
}

fn uint_field(exif: &exif::Exif, tag: Tag) -> Option<u32> {
    exif.get_field(tag, In::PRIMARY)?.value.get_uint(0)
}

/// First numeric component of a tag, covering the storage types cameras
/// actually use for exposure values.
fn rational_field(exif: &exif::Exif, tag: Tag) -> Option<f64> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Rational(v) => v.first().map(|r| r.to_f64()),
        Value::SRational(v) => v.first().map(|r| r.to_f64()),
        Value::Short(v) => v.first().map(|&n| n as f64),
        Value::Long(v) => v.first().map(|&n| n as f64),
        _ => None,
    }
}

fn gps_field(exif: &exif::Exif) -> Option<String> {
    let lat = gps_coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, "S")?;
    let lon = gps_coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, "W")?;
    Some(format!(
        "{}, {}",
        format_coordinate(lat),
        format_coordinate(lon)
    ))
}

/// Degrees/minutes/seconds rationals to signed decimal degrees.
fn gps_coordinate(exif: &exif::Exif, tag: Tag, ref_tag: Tag, negative_ref: &str) -> Option<f64> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let Value::Rational(parts) = &field.value else {
        return None;
    };
    let degrees = parts.first()?.to_f64();
    let minutes = parts.get(1).map(|r| r.to_f64()).unwrap_or(0.0);
    let seconds = parts.get(2).map(|r| r.to_f64()).unwrap_or(0.0);
    let mut decimal = degrees + minutes / 60.0 + seconds / 3600.0;

    if let Some(hemisphere) = text_field(exif, ref_tag) {
        if hemisphere.eq_ignore_ascii_case(negative_ref) {
            decimal = -decimal;
        }
    }
    Some(decimal)
}

// ---------------------------------------------------------------------------
// Display formatting (pure)
// ---------------------------------------------------------------------------

/// Shutter speed as the conventional reciprocal: `0.005 → "1/200"`.
pub fn format_shutter(exposure_seconds: f64) -> Option<String> {
    if exposure_seconds <= 0.0 {
        return None;
    }
    Some(format!("1/{}", (1.0 / exposure_seconds).round() as u64))
}

/// Aperture as `f/<number>`: `2.8 → "f/2.8"`, `8.0 → "f/8"`.
pub fn format_aperture(f_number: f64) -> String {
    format!("f/{}", format_number(f_number))
}

/// Focal length as `<number>mm`: `50.0 → "50mm"`.
pub fn format_focal(millimeters: f64) -> String {
    format!("{}mm", format_number(millimeters))
}

/// Round to one decimal, drop the decimal when it is zero.
fn format_number(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}

/// Decimal degrees with six places, trailing zeros trimmed.
fn format_coordinate(value: f64) -> String {
    let text = format!("{value:.6}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
