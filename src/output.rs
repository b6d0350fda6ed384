//! CLI output formatting for all commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entry is its positional index and stem, with filesystem detail
//! as secondary context. An inspect run reads as a metadata inventory, a
//! stamp run as a ledger of what was produced.
//!
//! # Output Format
//!
//! ## Inspect
//!
//! ```text
//! 001 IMG_0042
//!     Camera: PENTAX K-3
//!     Date: 2024:06:01 10:30:00
//!     ISO: 400
//!     ...
//! ```
//!
//! ## Stamp
//!
//! ```text
//! 001 IMG_0042 → IMG_0042_exif.jpg
//! 002 broken ✗ failed to decode: ...
//!
//! Stamped 1 image, 1 failed
//! ```
//!
//! ## Zip
//!
//! ```text
//! 001 IMG_0042 → exif_images/IMG_0042_exif.jpg
//!
//! Archived 1 image to exif_images.zip
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use std::path::Path;

use crate::batch::Entry;
use crate::export::{ZIP_FOLDER, ZipSummary, output_filename};
use crate::metadata::ExifField;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// Inspect
// ============================================================================

/// One block per entry: header line, then every field indented.
pub fn format_inspect(entries: &[Entry]) -> Vec<String> {
    let mut lines = Vec::new();
    for (pos, entry) in entries.iter().enumerate() {
        if pos > 0 {
            lines.push(String::new());
        }
        lines.push(format!("{} {}", format_index(pos + 1), entry.stem));
        for &field in &ExifField::ALL {
            lines.push(format!("    {}: {}", field.label(), entry.metadata.get(field)));
        }
    }
    lines
}

pub fn print_inspect(entries: &[Entry]) {
    for line in format_inspect(entries) {
        println!("{line}");
    }
}

// ============================================================================
// Stamp
// ============================================================================

/// Per-entry result lines plus a trailing count summary.
pub fn format_stamp(entries: &[Entry]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stamped = 0;
    let mut failed = 0;

    for (pos, entry) in entries.iter().enumerate() {
        let index = format_index(pos + 1);
        match &entry.error {
            None => {
                stamped += 1;
                lines.push(format!("{index} {} → {}", entry.stem, output_filename(&entry.stem)));
            }
            Some(error) => {
                failed += 1;
                lines.push(format!("{index} {} ✗ {error}", entry.stem));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Stamped {}{}",
        count_noun(stamped, "image"),
        if failed > 0 {
            format!(", {failed} failed")
        } else {
            String::new()
        }
    ));
    lines
}

pub fn print_stamp(entries: &[Entry]) {
    for line in format_stamp(entries) {
        println!("{line}");
    }
}

// ============================================================================
// Zip
// ============================================================================

/// Archived entry lines, skip diagnostics, and a trailing summary.
pub fn format_zip(entries: &[Entry], summary: &ZipSummary, zip_path: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pos = 0;

    for entry in entries {
        if entry.surface.is_some() {
            pos += 1;
            lines.push(format!(
                "{} {} → {ZIP_FOLDER}/{}",
                format_index(pos),
                entry.stem,
                output_filename(&entry.stem)
            ));
        }
    }
    for stem in &summary.skipped {
        lines.push(format!("    skipped {stem}"));
    }

    lines.push(String::new());
    lines.push(format!(
        "Archived {} to {}",
        count_noun(summary.written.len(), "image"),
        zip_path.display()
    ));
    lines
}

pub fn print_zip(entries: &[Entry], summary: &ZipSummary, zip_path: &Path) {
    for line in format_zip(entries, summary, zip_path) {
        println!("{line}");
    }
}

fn count_noun(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
