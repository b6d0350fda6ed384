use clap::{Parser, Subcommand};
use exif_stamp::layout::Anchor;
use exif_stamp::metadata::ExifField;
use exif_stamp::settings::{MaxWidth, Preferences, StyleSettings, Theme};
use exif_stamp::{batch, export, fonts, output};
use std::path::PathBuf;

/// Styling overrides. Every flag is optional; anything not given comes from
/// the persisted settings file, and given flags are persisted back unless
/// `--no-save` is set.
#[derive(clap::Args, Clone)]
struct StyleArgs {
    /// Font: embedded family (sans, sans-bold, mono, serif) or a .ttf/.otf path
    #[arg(long, global = true)]
    font: Option<String>,

    /// Font size in pixels (10-150)
    #[arg(long, global = true)]
    font_size: Option<u32>,

    /// Text color as #rrggbb
    #[arg(long, global = true)]
    color: Option<String>,

    /// Draw a contrast outline behind the text
    #[arg(long, global = true, overrides_with = "no_outline")]
    outline: bool,

    /// Disable the contrast outline
    #[arg(long, global = true)]
    no_outline: bool,

    /// Where the text block sits on the image
    #[arg(long, global = true)]
    anchor: Option<Anchor>,

    /// Fields to stamp, comma-separated, in draw order
    /// (camera,date,iso,shutter,aperture,focal,gps,description)
    #[arg(long, global = true, value_delimiter = ',')]
    fields: Option<Vec<ExifField>>,

    /// Downscale limit: 'original' or one of 800, 1280, 1920, 2560, 3840
    #[arg(long, global = true)]
    max_width: Option<MaxWidth>,

    /// JPEG export quality (50-100)
    #[arg(long, global = true)]
    quality: Option<u8>,

    /// UI theme recorded in the settings file
    #[arg(long, global = true)]
    theme: Option<Theme>,
}

impl StyleArgs {
    fn apply(&self, settings: &mut StyleSettings) {
        if let Some(font) = &self.font {
            settings.font_family = font.clone();
        }
        if let Some(size) = self.font_size {
            settings.font_size = size;
        }
        if let Some(color) = &self.color {
            settings.text_color = color.clone();
        }
        if self.outline {
            settings.show_outline = true;
        }
        if self.no_outline {
            settings.show_outline = false;
        }
        if let Some(anchor) = self.anchor {
            settings.anchor_position = anchor;
        }
        if let Some(fields) = &self.fields {
            settings.selected_exif_fields = fields.clone();
        }
        if let Some(max_width) = self.max_width {
            settings.max_width = max_width;
        }
        if let Some(quality) = self.quality {
            settings.export_quality = quality;
        }
    }
}

#[derive(Parser)]
#[command(name = "exif-stamp")]
#[command(about = "Stamp EXIF metadata as styled text onto photographs")]
#[command(long_about = "\
Stamp EXIF metadata as styled text onto photographs

Inputs may be image files or directories (walked recursively). Each image's
EXIF block is read, the selected fields are formatted as 'Label: value'
lines, and the lines are drawn onto the photo at the configured anchor.
Fields a photo is missing show as 'N/A'. Originals are never modified.

Outputs:
  stamp    one <name>_exif.jpg per input, written to --out
  zip      a single archive with every stamped image under exif_images/

Styling flags given on the command line are saved to the settings file
(<config dir>/exif-stamp/settings.json) and become the defaults for the
next run. Use --no-save to try a style without keeping it.

Run 'exif-stamp gen-config' to print a stock settings.json.")]
#[command(version)]
struct Cli {
    /// Settings file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Do not persist this run's styling flags
    #[arg(long, global = true)]
    no_save: bool,

    #[command(flatten)]
    style: StyleArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stamp each input and write individual <name>_exif.jpg files
    Stamp {
        /// Image files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Stamp each input and bundle the results into one zip archive
    Zip {
        /// Image files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Archive path
        #[arg(long, default_value = "exif_images.zip")]
        out: PathBuf,
    },
    /// Show extracted metadata without writing anything
    Inspect {
        /// Image files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Print a stock settings.json with default values
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if matches!(cli.command, Command::GenConfig) {
        println!("{}", serde_json::to_string_pretty(&Preferences::default())?);
        return Ok(());
    }

    let settings_path = match &cli.config {
        Some(path) => path.clone(),
        None => Preferences::default_path()?,
    };
    let mut prefs = Preferences::load_or_default(&settings_path)?;
    if let Some(theme) = cli.style.theme {
        prefs.theme = theme;
    }
    cli.style.apply(&mut prefs.exif_settings);
    prefs.exif_settings.sanitize();
    let settings = prefs.exif_settings.clone();

    match &cli.command {
        Command::Inspect { inputs } => {
            let entries = batch::collect_entries(inputs)?;
            output::print_inspect(&entries);
        }
        Command::Stamp { inputs, out } => {
            let font = fonts::resolve(&settings.font_family)?;
            let mut entries = batch::collect_entries(inputs)?;
            batch::render_all(&mut entries, &settings, &font);

            std::fs::create_dir_all(out)?;
            for entry in &mut entries {
                if let Some(surface) = &entry.surface {
                    if let Err(e) =
                        export::export_one(surface, &entry.stem, settings.export_quality, out)
                    {
                        entry.error = Some(e.to_string());
                        entry.surface = None;
                    }
                }
            }
            output::print_stamp(&entries);
        }
        Command::Zip { inputs, out } => {
            let font = fonts::resolve(&settings.font_family)?;
            let mut entries = batch::collect_entries(inputs)?;
            batch::render_all(&mut entries, &settings, &font);

            let summary = export::export_zip(&entries, settings.export_quality, out)?;
            output::print_zip(&entries, &summary, out);
        }
        Command::GenConfig => unreachable!("handled above"),
    }

    if !cli.no_save {
        prefs.save(&settings_path)?;
    }

    Ok(())
}
