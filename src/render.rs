//! Text stamping onto image surfaces.
//!
//! The pipeline for a single image: decide output dimensions from the
//! configured width limit, downscale if needed (Lanczos3, the same filter the
//! rest of the photo tooling here uses), format the selected metadata fields
//! into `"Label: value"` lines, measure them, place the block via
//! [`crate::layout`], and draw each line — outline pass first, fill pass on
//! top.
//!
//! The outline color is derived from the fill color rather than configured:
//! black behind light text, white behind dark text, picked by integer luma.

use ab_glyph::{FontArc, PxScale};
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};

use thiserror::Error;

use crate::layout::{compute_origin, line_baseline};
use crate::metadata::{ExifField, Metadata};
use crate::settings::{MaxWidth, SettingsError, StyleSettings, parse_hex_color};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Outline thickness in pixels, stamped at the eight surrounding offsets.
const OUTLINE_OFFSET: i32 = 2;

/// Output dimensions after applying the width limit. Height scales
/// proportionally, rounded to nearest; images at or under the limit keep
/// their native size.
pub fn compute_output_dimensions(native: (u32, u32), max_width: MaxWidth) -> (u32, u32) {
    let (width, height) = native;
    match max_width.limit() {
        Some(limit) if width > limit => {
            let scaled = (height as u64 * limit as u64 + width as u64 / 2) / width as u64;
            (limit, scaled.max(1) as u32)
        }
        _ => (width, height),
    }
}

/// The text lines to stamp: one `"Label: value"` per selected field, in
/// selection order. Unavailable fields still appear, as `"Label: N/A"`.
pub fn formatted_lines(metadata: &Metadata, fields: &[ExifField]) -> Vec<String> {
    fields
        .iter()
        .map(|&f| format!("{}: {}", f.label(), metadata.get(f)))
        .collect()
}

/// Outline color for a given fill color: black for light text, white for
/// dark, by Rec. 601 luma in integer arithmetic.
pub fn contrast_color(fill: Rgb<u8>) -> Rgb<u8> {
    let Rgb([r, g, b]) = fill;
    let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
    if luma >= 128 {
        Rgb([0, 0, 0])
    } else {
        Rgb([255, 255, 255])
    }
}

/// Produce the stamped output surface for one image.
///
/// The source is downscaled to the configured limit and converted to RGB
/// (output is always JPEG, which has no alpha). With an empty field
/// selection, the scaled surface comes back untouched.
pub fn render(
    source: &DynamicImage,
    metadata: &Metadata,
    settings: &StyleSettings,
    font: &FontArc,
) -> Result<RgbImage, RenderError> {
    let fill = parse_hex_color(&settings.text_color)?;

    let native = (source.width(), source.height());
    let (out_w, out_h) = compute_output_dimensions(native, settings.max_width);
    let mut canvas = if (out_w, out_h) == native {
        source.to_rgb8()
    } else {
        source
            .resize_exact(out_w, out_h, FilterType::Lanczos3)
            .to_rgb8()
    };

    let lines = formatted_lines(metadata, &settings.selected_exif_fields);
    if lines.is_empty() {
        return Ok(canvas);
    }

    let scale = PxScale::from(settings.font_size as f32);
    let widths: Vec<u32> = lines
        .iter()
        .map(|line| text_size(scale, font, line).0)
        .collect();
    let (origin_x, origin_y) =
        compute_origin(&widths, settings.font_size, settings.anchor_position, out_w, out_h);

    let outline = contrast_color(fill);
    for (i, line) in lines.iter().enumerate() {
        let baseline = line_baseline(origin_y, i, settings.font_size);
        // draw_text_mut positions the glyph top, the layout speaks baselines.
        let top = baseline - settings.font_size as i32;

        if settings.show_outline {
            for dx in [-OUTLINE_OFFSET, 0, OUTLINE_OFFSET] {
                for dy in [-OUTLINE_OFFSET, 0, OUTLINE_OFFSET] {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    draw_text_mut(&mut canvas, outline, origin_x + dx, top + dy, scale, font, line);
                }
            }
        }
        draw_text_mut(&mut canvas, fill, origin_x, top, scale, font, line);
    }

    Ok(canvas)
}
