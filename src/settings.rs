//! Styling settings and their on-disk persistence.
//!
//! [`StyleSettings`] is the full description of how text is stamped: face,
//! size, color, outline, anchor, field selection, scaling limit, and export
//! quality. [`Preferences`] wraps it together with the UI theme and
//! round-trips through a JSON file in the platform config directory, so a run
//! picks up where the previous one left off.
//!
//! Field names in the JSON are camelCase to stay compatible with preference
//! files written by earlier versions of the tool.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::layout::Anchor;
use crate::metadata::ExifField;

/// Font size bounds, pixels.
pub const MIN_FONT_SIZE: u32 = 10;
pub const MAX_FONT_SIZE: u32 = 150;

/// JPEG export quality bounds.
pub const MIN_QUALITY: u8 = 50;
pub const MAX_QUALITY: u8 = 100;

/// Width limits offered for downscaling, ascending.
pub const MAX_WIDTH_PRESETS: [u32; 5] = [800, 1280, 1920, 2560, 3840];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid max width '{0}': expected 'original' or one of 800, 1280, 1920, 2560, 3840")]
    InvalidMaxWidth(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("no config directory available on this platform")]
    NoConfigDir,

    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// MaxWidth
// ---------------------------------------------------------------------------

/// Output width limit. Images wider than the limit are downscaled
/// proportionally; narrower images are never enlarged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxWidth {
    #[default]
    KeepOriginal,
    Limit(u32),
}

impl MaxWidth {
    pub fn limit(self) -> Option<u32> {
        match self {
            MaxWidth::KeepOriginal => None,
            MaxWidth::Limit(px) => Some(px),
        }
    }
}

impl FromStr for MaxWidth {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("original") {
            return Ok(MaxWidth::KeepOriginal);
        }
        let px: u32 = s
            .parse()
            .map_err(|_| SettingsError::InvalidMaxWidth(s.to_string()))?;
        if MAX_WIDTH_PRESETS.contains(&px) {
            Ok(MaxWidth::Limit(px))
        } else {
            Err(SettingsError::InvalidMaxWidth(s.to_string()))
        }
    }
}

impl fmt::Display for MaxWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxWidth::KeepOriginal => write!(f, "original"),
            MaxWidth::Limit(px) => write!(f, "{px}"),
        }
    }
}

// JSON form: a bare number for a limit, the string "original" otherwise.
impl Serialize for MaxWidth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MaxWidth::KeepOriginal => serializer.serialize_str("original"),
            MaxWidth::Limit(px) => serializer.serialize_u32(*px),
        }
    }
}

impl<'de> Deserialize<'de> for MaxWidth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl serde::de::Visitor<'_> for Visitor {
            type Value = MaxWidth;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a pixel width or the string \"original\"")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<MaxWidth, E> {
                u32::try_from(v)
                    .ok()
                    .filter(|px| MAX_WIDTH_PRESETS.contains(px))
                    .map(MaxWidth::Limit)
                    .ok_or_else(|| E::custom(format!("unsupported max width {v}")))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<MaxWidth, E> {
                MaxWidth::from_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

// ---------------------------------------------------------------------------
// StyleSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSettings {
    /// Embedded family name or a path to a font file. See [`crate::fonts`].
    pub font_family: String,
    pub font_size: u32,
    /// Fill color as `#rrggbb`.
    pub text_color: String,
    pub show_outline: bool,
    pub anchor_position: Anchor,
    /// Fields to stamp, in draw order.
    pub selected_exif_fields: Vec<ExifField>,
    pub max_width: MaxWidth,
    pub export_quality: u8,
}

impl Default for StyleSettings {
    fn default() -> Self {
        StyleSettings {
            font_family: crate::fonts::DEFAULT_FAMILY.to_string(),
            font_size: 32,
            text_color: "#ffffff".to_string(),
            show_outline: true,
            anchor_position: Anchor::BottomLeft,
            selected_exif_fields: vec![
                ExifField::Camera,
                ExifField::Date,
                ExifField::Iso,
                ExifField::Shutter,
                ExifField::Aperture,
                ExifField::Focal,
            ],
            max_width: MaxWidth::KeepOriginal,
            export_quality: 100,
        }
    }
}

impl StyleSettings {
    /// Clamp numeric values into their supported ranges and drop duplicate
    /// field selections (first occurrence wins). Out-of-range values from a
    /// hand-edited settings file land here instead of panicking downstream.
    pub fn sanitize(&mut self) {
        self.font_size = self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.export_quality = self.export_quality.clamp(MIN_QUALITY, MAX_QUALITY);

        let mut seen = Vec::new();
        self.selected_exif_fields.retain(|&f| {
            if seen.contains(&f) {
                false
            } else {
                seen.push(f);
                true
            }
        });
    }
}

/// Parse `#rrggbb` into an RGB color.
pub fn parse_hex_color(text: &str) -> Result<image::Rgb<u8>, SettingsError> {
    let invalid = || SettingsError::InvalidColor(text.to_string());
    let hex = text.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 {
        return Err(invalid());
    }
    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
    Ok(image::Rgb([r, g, b]))
}

// ---------------------------------------------------------------------------
// Preferences file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Everything persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    pub exif_settings: StyleSettings,
}

impl Preferences {
    /// Platform settings path: `<config_dir>/exif-stamp/settings.json`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(base.join("exif-stamp").join("settings.json"))
    }

    /// Load preferences, falling back to defaults when the file does not
    /// exist yet. A present-but-corrupt file is an error rather than a silent
    /// reset, so a typo in a hand edit does not wipe the configuration.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let mut prefs: Preferences =
            serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        prefs.exif_settings.sanitize();
        Ok(prefs)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        // to_string_pretty on these types cannot fail; map keys are strings.
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        std::fs::write(path, json).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_documented_values() {
        let s = StyleSettings::default();
        assert_eq!(s.font_family, "sans");
        assert_eq!(s.font_size, 32);
        assert_eq!(s.text_color, "#ffffff");
        assert!(s.show_outline);
        assert_eq!(s.anchor_position, Anchor::BottomLeft);
        assert_eq!(s.selected_exif_fields.len(), 6);
        assert_eq!(s.max_width, MaxWidth::KeepOriginal);
        assert_eq!(s.export_quality, 100);
    }

    #[test]
    fn sanitize_clamps_ranges() {
        let mut s = StyleSettings {
            font_size: 500,
            export_quality: 10,
            ..Default::default()
        };
        s.sanitize();
        assert_eq!(s.font_size, MAX_FONT_SIZE);
        assert_eq!(s.export_quality, MIN_QUALITY);

        s.font_size = 1;
        s.sanitize();
        assert_eq!(s.font_size, MIN_FONT_SIZE);
    }

    #[test]
    fn sanitize_dedups_fields_keeping_order() {
        let mut s = StyleSettings {
            selected_exif_fields: vec![
                ExifField::Iso,
                ExifField::Camera,
                ExifField::Iso,
                ExifField::Date,
                ExifField::Camera,
            ],
            ..Default::default()
        };
        s.sanitize();
        assert_eq!(
            s.selected_exif_fields,
            vec![ExifField::Iso, ExifField::Camera, ExifField::Date]
        );
    }

    #[test]
    fn hex_color_parses() {
        assert_eq!(parse_hex_color("#ffffff").unwrap(), image::Rgb([255, 255, 255]));
        assert_eq!(parse_hex_color("#1a2b3c").unwrap(), image::Rgb([0x1a, 0x2b, 0x3c]));
    }

    #[test]
    fn hex_color_rejects_malformed() {
        for bad in ["ffffff", "#fff", "#gggggg", "#12345", "", "#1234567"] {
            assert!(parse_hex_color(bad).is_err(), "accepted '{bad}'");
        }
    }

    #[test]
    fn max_width_parses_presets_and_original() {
        assert_eq!("original".parse::<MaxWidth>().unwrap(), MaxWidth::KeepOriginal);
        assert_eq!("1920".parse::<MaxWidth>().unwrap(), MaxWidth::Limit(1920));
        assert!("1000".parse::<MaxWidth>().is_err());
        assert!("wide".parse::<MaxWidth>().is_err());
    }

    #[test]
    fn max_width_json_forms() {
        assert_eq!(serde_json::to_string(&MaxWidth::KeepOriginal).unwrap(), "\"original\"");
        assert_eq!(serde_json::to_string(&MaxWidth::Limit(800)).unwrap(), "800");

        let w: MaxWidth = serde_json::from_str("2560").unwrap();
        assert_eq!(w, MaxWidth::Limit(2560));
        let w: MaxWidth = serde_json::from_str("\"original\"").unwrap();
        assert_eq!(w, MaxWidth::KeepOriginal);
        assert!(serde_json::from_str::<MaxWidth>("123").is_err());
    }

    #[test]
    fn preferences_round_trip_keeps_every_field() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");

        let prefs = Preferences {
            theme: Theme::Light,
            exif_settings: StyleSettings {
                font_family: "mono".to_string(),
                font_size: 48,
                text_color: "#101010".to_string(),
                show_outline: false,
                anchor_position: Anchor::TopRight,
                selected_exif_fields: vec![ExifField::Gps, ExifField::Camera],
                max_width: MaxWidth::Limit(1280),
                export_quality: 85,
            },
        };
        prefs.save(&path).unwrap();

        let loaded = Preferences::load_or_default(&path).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn persisted_json_uses_camel_case_keys() {
        let json = serde_json::to_string(&Preferences::default()).unwrap();
        assert!(json.contains("\"fontFamily\""));
        assert!(json.contains("\"selectedExifFields\""));
        assert!(json.contains("\"exifSettings\""));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let prefs = Preferences::load_or_default(&tmp.path().join("absent.json")).unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_reset() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Preferences::load_or_default(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn load_sanitizes_out_of_range_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"exifSettings": {"fontSize": 9999, "exportQuality": 1}}"#,
        )
        .unwrap();

        let prefs = Preferences::load_or_default(&path).unwrap();
        assert_eq!(prefs.exif_settings.font_size, MAX_FONT_SIZE);
        assert_eq!(prefs.exif_settings.export_quality, MIN_QUALITY);
    }

    #[test]
    fn save_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/settings.json");
        Preferences::default().save(&path).unwrap();
        assert!(path.exists());
    }
}
