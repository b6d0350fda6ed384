//! Text block placement math.
//!
//! All functions here are pure and testable without any I/O or fonts: the
//! renderer measures lines, this module decides where the block goes.
//!
//! The coordinate contract is baseline-oriented: `compute_origin` returns the
//! position of the *first line's baseline*, and each subsequent baseline sits
//! [`line_pitch`] pixels below it. Callers drawing with glyph-top APIs convert
//! by subtracting the font size.
//!
//! There is no collision detection against image content and no wrapping: a
//! line wider than the canvas overflows visually. Both are specified behavior.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Distance kept between the text block and any canvas edge, in pixels.
pub const EDGE_PADDING: i32 = 20;

/// Vertical distance between consecutive baselines.
pub fn line_pitch(font_size_px: u32) -> u32 {
    font_size_px + 5
}

/// The five supported text block placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    BottomCenter,
}

impl Anchor {
    fn is_top(self) -> bool {
        matches!(self, Anchor::TopLeft | Anchor::TopRight)
    }
}

/// Compute the origin (first line's baseline) for a block of text lines.
///
/// # Arguments
/// * `line_widths` - Measured pixel width of each line, in draw order
/// * `font_size_px` - Font size; also the assumed ascent above the baseline
/// * `anchor` - Which corner/edge the block hangs from
/// * `canvas_width`, `canvas_height` - Output surface dimensions
///
/// # Placement rules
/// * Left anchors: `x = EDGE_PADDING`
/// * Right anchors: `x = canvas_width - EDGE_PADDING - max_line_width`
/// * Bottom-center: `x = (canvas_width - max_line_width) / 2`
/// * Top anchors: `y = EDGE_PADDING + font_size_px`
/// * Bottom anchors: `y = canvas_height - line_count * line_pitch`
///
/// The result may lie outside the canvas when a line is wider than the canvas
/// itself; that overflow is accepted, not clamped.
pub fn compute_origin(
    line_widths: &[u32],
    font_size_px: u32,
    anchor: Anchor,
    canvas_width: u32,
    canvas_height: u32,
) -> (i32, i32) {
    let max_text_width = line_widths.iter().copied().max().unwrap_or(0) as i32;
    let canvas_w = canvas_width as i32;
    let canvas_h = canvas_height as i32;

    let x = match anchor {
        Anchor::TopLeft | Anchor::BottomLeft => EDGE_PADDING,
        Anchor::TopRight | Anchor::BottomRight => canvas_w - EDGE_PADDING - max_text_width,
        Anchor::BottomCenter => (canvas_w - max_text_width) / 2,
    };

    let y = if anchor.is_top() {
        EDGE_PADDING + font_size_px as i32
    } else {
        canvas_h - line_widths.len() as i32 * line_pitch(font_size_px) as i32
    };

    (x, y)
}

/// Baseline y-coordinate of the line at `index`, given the block origin.
pub fn line_baseline(origin_y: i32, index: usize, font_size_px: u32) -> i32 {
    origin_y + index as i32 * line_pitch(font_size_px) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_font_size_plus_five() {
        assert_eq!(line_pitch(20), 25);
        assert_eq!(line_pitch(10), 15);
        assert_eq!(line_pitch(150), 155);
    }

    #[test]
    fn bottom_right_three_lines_scenario() {
        // 3 lines, 20px font, 800x600 canvas, widest line 150px:
        // x = 800 - 20 - 150 = 630, y = 600 - 3 * 25 = 525
        let (x, y) = compute_origin(&[150, 120, 90], 20, Anchor::BottomRight, 800, 600);
        assert_eq!((x, y), (630, 525));
    }

    #[test]
    fn top_left_uses_padding_and_font_size() {
        let (x, y) = compute_origin(&[100], 32, Anchor::TopLeft, 800, 600);
        assert_eq!(x, EDGE_PADDING);
        assert_eq!(y, EDGE_PADDING + 32);
    }

    #[test]
    fn top_right_subtracts_widest_line() {
        let (x, y) = compute_origin(&[80, 200, 150], 24, Anchor::TopRight, 1000, 700);
        assert_eq!(x, 1000 - EDGE_PADDING - 200);
        assert_eq!(y, EDGE_PADDING + 24);
    }

    #[test]
    fn bottom_left_counts_lines() {
        let (x, y) = compute_origin(&[50, 50], 30, Anchor::BottomLeft, 640, 480);
        assert_eq!(x, EDGE_PADDING);
        assert_eq!(y, 480 - 2 * 35);
    }

    #[test]
    fn bottom_center_centers_widest_line() {
        let (x, _) = compute_origin(&[100], 20, Anchor::BottomCenter, 800, 600);
        assert_eq!(x, (800 - 100) / 2);
    }

    #[test]
    fn top_anchors_never_place_first_baseline_above_zero() {
        for anchor in [Anchor::TopLeft, Anchor::TopRight] {
            for font_size in [10, 24, 80, 150] {
                let (_, y) = compute_origin(&[10, 10, 10], font_size, anchor, 300, 200);
                assert!(y >= 0, "baseline {y} above canvas for size {font_size}");
            }
        }
    }

    #[test]
    fn overflowing_line_is_not_clamped() {
        // Line wider than the canvas: right anchor goes negative. Accepted.
        let (x, _) = compute_origin(&[900], 20, Anchor::BottomRight, 800, 600);
        assert_eq!(x, 800 - EDGE_PADDING - 900);
        assert!(x < 0);
    }

    #[test]
    fn empty_block_is_total() {
        let (x, y) = compute_origin(&[], 20, Anchor::BottomLeft, 800, 600);
        assert_eq!(x, EDGE_PADDING);
        assert_eq!(y, 600);
    }

    #[test]
    fn baselines_step_by_pitch() {
        assert_eq!(line_baseline(525, 0, 20), 525);
        assert_eq!(line_baseline(525, 1, 20), 550);
        assert_eq!(line_baseline(525, 2, 20), 575);
    }
}
