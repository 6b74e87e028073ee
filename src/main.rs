use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use webpify::batch::{self, DirSink};
use webpify::convert::{SourceFormat, SourceImage};
use webpify::naming::{RenamePattern, RenameSettings};
use webpify::settings::{ConversionSettings, Quality};
use webpify::{archive, output, validate};

/// Flags shared by commands that resize.
#[derive(clap::Args, Clone)]
struct ResizeArgs {
    /// Target width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Resize to the exact dimensions given, ignoring the source aspect ratio
    #[arg(long)]
    no_aspect: bool,
}

/// Flags for SEO bulk renaming.
#[derive(clap::Args, Clone)]
struct RenameArgs {
    /// Rename outputs using this base text (slugified; Vietnamese diacritics fold to ASCII)
    #[arg(long)]
    slug: Option<String>,

    /// Filename pattern for renamed outputs
    #[arg(long, default_value = "slug-number", value_parser = parse_pattern)]
    pattern: RenamePattern,

    /// First index assigned when renaming
    #[arg(long, default_value_t = 1)]
    start_index: usize,

    /// Zero-pad indexes to a uniform width
    #[arg(long)]
    zero_pad: bool,

    /// Separator between slug and index
    #[arg(long, default_value = "-")]
    separator: String,
}

fn parse_pattern(s: &str) -> Result<RenamePattern, String> {
    match s {
        "slug-number" => Ok(RenamePattern::SlugNumber),
        "slug-padded" => Ok(RenamePattern::SlugPadded),
        "number-slug" => Ok(RenamePattern::NumberSlug),
        "slug-image-number" => Ok(RenamePattern::SlugImageNumber),
        other => Err(format!(
            "unknown pattern '{other}' (expected slug-number, slug-padded, number-slug, or slug-image-number)"
        )),
    }
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "webpify")]
#[command(about = "Batch-convert JPEG/PNG/GIF/BMP images to WebP")]
#[command(long_about = "\
Batch-convert JPEG/PNG/GIF/BMP images to WebP

Everything runs locally and in-process: no network, no external binaries,
no data leaving the machine. Images are converted one at a time, in
submission order, so memory stays bounded even for large batches.

Each image flows through the same pipeline:

  source → EXIF orientation → resize plan → raster → WebP encode (+retry)

By default EXIF metadata is stripped and the orientation tag is baked into
the pixels first, so rotated photos come out upright. When the result of a
high-quality encode is larger than the source, the encoder retries once at
reduced quality and keeps the smaller file.

Limits: 50 files per batch, 10 MB per file.

Examples:

  webpify convert photos/                     # whole directory → webp-out/
  webpify convert a.jpg b.png --quality 70    # explicit files
  webpify convert photos/ --width 1200        # resize, aspect preserved
  webpify convert photos/ --slug \"du học úc\"  # du-hoc-uc-1.webp, ...
  webpify convert photos/ --zip bundle.zip    # ZIP instead of loose files
  webpify check photos/                       # validate without converting")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert images to WebP
    Convert {
        /// Input files or directories
        inputs: Vec<PathBuf>,

        /// Output directory for converted images
        #[arg(long, default_value = "webp-out")]
        out_dir: PathBuf,

        /// Encoding quality, 10-100 (clamped)
        #[arg(long)]
        quality: Option<u8>,

        #[command(flatten)]
        resize: ResizeArgs,

        /// Keep EXIF metadata (skips orientation correction)
        #[arg(long)]
        keep_exif: bool,

        /// Bundle outputs into a ZIP archive at this path instead of loose files
        #[arg(long)]
        zip: Option<PathBuf>,

        #[command(flatten)]
        rename: RenameArgs,

        /// Write a JSON report of per-image outcomes to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Load conversion settings from a TOML file (CLI flags override)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Validate inputs without converting
    Check {
        /// Input files or directories
        inputs: Vec<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            inputs,
            out_dir,
            quality,
            resize,
            keep_exif,
            zip,
            rename,
            report,
            settings,
        } => {
            let candidates = expand_inputs(&inputs)?;
            let validated = validate::validate_batch(&candidates);
            for error in &validated.errors {
                eprintln!("skipped: {error}");
            }
            if validated.valid.is_empty() {
                return Err("no valid input files".into());
            }

            let settings = resolve_settings(settings.as_deref(), quality, &resize, keep_exif)?;
            let rename_settings = rename.slug.map(|base_slug| RenameSettings {
                base_slug,
                pattern: rename.pattern,
                start_index: rename.start_index,
                zero_padding: rename.zero_pad,
                separator: rename.separator,
            });

            let sources = load_sources(&validated.valid);
            let total = sources.len();

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_batch_event(&event, total) {
                        println!("{}", line);
                    }
                }
            });

            let batch_report = match &zip {
                Some(zip_path) => {
                    let mut sink = archive::ZipSink::create(zip_path)?;
                    let report = batch::run_batch(
                        &sources,
                        &settings,
                        rename_settings.as_ref(),
                        &mut sink,
                        Some(tx),
                    );
                    sink.finish()?;
                    report
                }
                None => {
                    let mut sink = DirSink::new(&out_dir)?;
                    batch::run_batch(
                        &sources,
                        &settings,
                        rename_settings.as_ref(),
                        &mut sink,
                        Some(tx),
                    )
                }
            };
            printer.join().unwrap();

            output::print_report_summary(&batch_report);
            match &zip {
                Some(zip_path) => println!("Archive: {}", zip_path.display()),
                None => println!("Output: {}", out_dir.display()),
            }

            if let Some(report_path) = report {
                let json = serde_json::to_string_pretty(&batch_report)?;
                std::fs::write(&report_path, json)?;
                println!("Report: {}", report_path.display());
            }

            if batch_report.stats.files_completed == 0 {
                return Err("no images were converted".into());
            }
        }
        Command::Check { inputs } => {
            let candidates = expand_inputs(&inputs)?;
            let validated = validate::validate_batch(&candidates);
            for path in &validated.valid {
                println!("ok: {}", path.display());
            }
            for error in &validated.errors {
                println!("invalid: {error}");
            }
            println!(
                "==> {} of {} files ready for conversion",
                validated.valid.len(),
                candidates.len()
            );
            if !validated.errors.is_empty() {
                return Err("validation found problems".into());
            }
        }
    }

    Ok(())
}

/// Expand directory inputs into their supported image files, in name order.
/// Explicit file arguments pass through untouched so validation can report
/// them individually.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if inputs.is_empty() {
        return Err("no inputs given (expected files or directories)".into());
    }

    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in walkdir::WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
            {
                if has_supported_extension(entry.path()) {
                    paths.push(entry.path().to_path_buf());
                }
            }
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(SourceFormat::from_extension)
        .is_some()
}

/// Layer settings: defaults ← TOML file ← CLI flags.
fn resolve_settings(
    settings_path: Option<&Path>,
    quality: Option<u8>,
    resize: &ResizeArgs,
    keep_exif: bool,
) -> Result<ConversionSettings, Box<dyn std::error::Error>> {
    let mut settings = match settings_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            ConversionSettings::from_toml_str(&content)?
        }
        None => ConversionSettings::default(),
    };

    if let Some(q) = quality {
        settings.quality = Quality::new(q);
    }
    if resize.width.is_some() {
        settings.width = resize.width;
    }
    if resize.height.is_some() {
        settings.height = resize.height;
    }
    if resize.no_aspect {
        settings.maintain_aspect_ratio = false;
    }
    if keep_exif {
        settings.remove_exif = false;
    }
    Ok(settings)
}

/// Read validated paths into memory, reporting unreadable files without
/// aborting the rest.
fn load_sources(paths: &[PathBuf]) -> Vec<SourceImage> {
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        match SourceImage::from_path(path) {
            Ok(source) => sources.push(source),
            Err(e) => eprintln!("skipped: {}: {e}", path.display()),
        }
    }
    sources
}
