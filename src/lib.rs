//! # exif-stamp
//!
//! Batch-stamp EXIF metadata as styled text onto photographs. Point it at
//! files or directories and it reads each image's EXIF block, formats the
//! fields you selected, draws them onto the photo, and writes the results as
//! individual JPEGs or a single zip archive.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! Every command runs the same linear pipeline over a flat entry list:
//!
//! ```text
//! 1. Collect   inputs    →  Vec<Entry>     (expand dirs, extract EXIF in parallel)
//! 2. Render    entries   →  RgbImage each  (scale, measure, place, stamp text)
//! 3. Export    surfaces  →  *_exif.jpg / exif_images.zip
//! ```
//!
//! Each stage recomputes from its inputs; there is no incremental state or
//! cache between runs. Errors are isolated per entry: a photo that fails to
//! decode is reported in the run summary, and the rest of the batch proceeds.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`batch`] | Stage 1 — input expansion, parallel EXIF extraction, the per-image render loop |
//! | [`metadata`] | Infallible EXIF reading into eight display fields, `N/A` on any miss |
//! | [`layout`] | Pure placement math for the five text anchors |
//! | [`fonts`] | Embedded DejaVu faces plus user font file loading |
//! | [`render`] | Stage 2 — Lanczos3 downscale, text measurement, outline and fill passes |
//! | [`export`] | Stage 3 — JPEG encoding, `<stem>_exif.jpg` naming, zip archiving |
//! | [`settings`] | Styling settings, clamping, and JSON persistence in the config dir |
//! | [`output`] | CLI output formatting — per-entry result lines and run summaries |
//!
//! # Design Decisions
//!
//! ## JPEG-Only Output
//!
//! Inputs may be JPEG, PNG, TIFF, or WebP, but stamped output is always JPEG:
//! it is the lingua franca for sharing photos, quality is a single dial, and
//! the no-alpha constraint matches a text overlay burned into the pixels.
//! Surfaces are RGB throughout for the same reason.
//!
//! ## Embedded Fonts
//!
//! Four DejaVu faces are compiled into the binary via `include_bytes!`, so
//! stamping works identically on a bare server and a desktop. A settings
//! value that is not a known family name is treated as a path to a font
//! file, which covers everyone who wants their own face.
//!
//! ## Explicit Recompute Over Reactive State
//!
//! Changing a setting and re-running re-renders everything from the original
//! sources. Renders are cheap relative to the cost of tracking which cached
//! surface a given setting invalidates, and originals are never mutated, so
//! the pipeline stays a pure function from (sources, settings) to outputs.
//!
//! ## One Flat Settings File
//!
//! Preferences persist as a single pretty-printed JSON object under the
//! platform config directory. Every styleable field round-trips, camelCase
//! keys keep old preference files readable, and out-of-range values are
//! clamped on load rather than rejected.

pub mod batch;
pub mod export;
pub mod fonts;
pub mod layout;
pub mod metadata;
pub mod output;
pub mod render;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_helpers;
