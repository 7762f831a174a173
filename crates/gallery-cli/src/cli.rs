#![forbid(unsafe_code)]

//! Command-line argument parsing for the `gallery` binary.
//!
//! Args are parsed by hand. Environment variables (`GALLERY_*`) set the
//! defaults; explicit flags override them.

use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process;

use gallery_layout::{FrameChrome, RoundingMode};
use gallery_runtime::config::{self, ConfigError, GalleryConfig, parse_px};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
gallery: lay out a justified photo gallery

USAGE:
    gallery --manifest=PATH --gallery=NAME --width=N [OPTIONS]

OPTIONS:
    --manifest=PATH        JSON manifest mapping gallery names to image lists
    --gallery=NAME         Gallery to lay out
    --width=N              Viewport width in pixels
    --root=DIR             Directory image locators are relative to
                           (default: the manifest's directory)
    --target-height=N      Row height before stretching (default: 240)
    --gap=N                Gap between items in a row (default: 24)
    --row-spacing=N        Space between rows (default: the gap)
    --frame-x=N            Horizontal frame chrome per item (default: 0)
    --rounding=MODE        'nearest' (default) or 'exact'
    --jobs=N               Threads used to read image headers
    --format=FORMAT        'json' (default) or 'text'
    --no-captions          Omit captions from the output
    --help, -h             Show this help message
    --version, -V          Show version

ENVIRONMENT VARIABLES:
    GALLERY_MANIFEST            Override --manifest
    GALLERY_NAME                Override --gallery
    GALLERY_WIDTH               Override --width
    GALLERY_ROOT                Override --root
    GALLERY_FORMAT              Override --format
    GALLERY_TARGET_ROW_HEIGHT   Override --target-height
    GALLERY_GAP                 Override --gap
    GALLERY_ROW_SPACING         Override --row-spacing
    GALLERY_FRAME_PADDING       Frame padding per side
    GALLERY_FRAME_BORDER        Frame border per side
    GALLERY_MOBILE_MAX_WIDTH    Widest viewport laid out as a flow (default: 900)
    GALLERY_ROUNDING            Override --rounding
    GALLERY_CAPTIONS            on/off
    GALLERY_LOG                 Log filter, e.g. 'debug' (default: warn)";

pub const ENV_MANIFEST: &str = "GALLERY_MANIFEST";
pub const ENV_NAME: &str = "GALLERY_NAME";
pub const ENV_WIDTH: &str = "GALLERY_WIDTH";
pub const ENV_ROOT: &str = "GALLERY_ROOT";
pub const ENV_FORMAT: &str = "GALLERY_FORMAT";
pub const ENV_LOG: &str = "GALLERY_LOG";

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Text,
}

impl Format {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" | "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub manifest: PathBuf,
    pub gallery: String,
    /// Viewport width in pixels.
    pub width: f64,
    /// Explicit image root; `None` means the manifest's directory.
    pub root: Option<PathBuf>,
    pub format: Format,
    /// Header-reading threads; `None` uses available parallelism.
    pub jobs: Option<NonZeroUsize>,
    pub config: GalleryConfig,
    /// Invalid `GALLERY_*` settings that fell back to defaults.
    pub env_errors: Vec<ConfigError>,
}

impl Opts {
    /// Directory image locators are resolved against.
    pub fn image_root(&self) -> PathBuf {
        match &self.root {
            Some(root) => root.clone(),
            None => self
                .manifest
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Parse process arguments and environment, exiting on `--help`,
    /// `--version`, or a usage error.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match parse_from(&args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => *opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("gallery {VERSION}");
                process::exit(0);
            }
            Err(message) => {
                eprintln!("{message}");
                eprintln!("Run with --help for usage information.");
                process::exit(2);
            }
        }
    }
}

/// What the invocation asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Box<Opts>),
    Help,
    Version,
}

/// Parse `args` (without the program name) with `get` as the environment.
pub fn parse_from<F>(args: &[String], mut get: F) -> Result<Command, String>
where
    F: FnMut(&str) -> Option<String>,
{
    let parsed = config::from_env_with(&mut get);
    let mut config = parsed.config;
    let env_errors = parsed.errors;

    let mut manifest = get(ENV_MANIFEST).map(PathBuf::from);
    let mut gallery = get(ENV_NAME);
    let mut root = get(ENV_ROOT).map(PathBuf::from);
    let mut width = None;
    if let Some(val) = get(ENV_WIDTH) {
        width = Some(parse_width(&val).ok_or_else(|| format!("Invalid {ENV_WIDTH} value: {val}"))?);
    }
    let mut format = Format::default();
    if let Some(val) = get(ENV_FORMAT) {
        format = Format::parse(&val).ok_or_else(|| format!("Invalid {ENV_FORMAT} value: {val}"))?;
    }
    let mut jobs = None;
    let mut explicit_row_spacing = false;

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--no-captions" => config.captions = false,
            other => {
                let Some((flag, val)) = other.split_once('=') else {
                    return Err(format!("Unknown argument: {other}"));
                };
                let invalid = || format!("Invalid {flag} value: {val}");
                match flag {
                    "--manifest" => manifest = Some(PathBuf::from(val)),
                    "--gallery" => gallery = Some(val.to_string()),
                    "--root" => root = Some(PathBuf::from(val)),
                    "--width" => width = Some(parse_width(val).ok_or_else(invalid)?),
                    "--target-height" => {
                        config.target_row_height =
                            parse_px(val).filter(|h| *h > 0.0).ok_or_else(invalid)?;
                    }
                    "--gap" => config.gap = parse_px(val).ok_or_else(invalid)?,
                    "--row-spacing" => {
                        config.row_spacing = parse_px(val).ok_or_else(invalid)?;
                        explicit_row_spacing = true;
                    }
                    "--frame-x" => {
                        let total = parse_px(val).ok_or_else(invalid)?;
                        config.frame = FrameChrome::symmetric(total / 2.0, 0.0);
                    }
                    "--rounding" => {
                        config.rounding = RoundingMode::parse(val).ok_or_else(invalid)?;
                    }
                    "--jobs" => {
                        jobs = Some(val.parse::<NonZeroUsize>().map_err(|_| invalid())?);
                    }
                    "--format" => format = Format::parse(val).ok_or_else(invalid)?,
                    _ => return Err(format!("Unknown argument: {other}")),
                }
            }
        }
    }

    // A `--gap` flag moves row spacing too, unless it was set explicitly.
    if !explicit_row_spacing && get(config::ENV_ROW_SPACING).is_none() {
        config.row_spacing = config.gap;
    }

    let manifest = manifest.ok_or("Missing --manifest")?;
    let gallery = gallery.ok_or("Missing --gallery")?;
    let width = width.ok_or("Missing --width")?;

    Ok(Command::Run(Box::new(Opts {
        manifest,
        gallery,
        width,
        root,
        format,
        jobs,
        config,
        env_errors,
    })))
}

fn parse_width(value: &str) -> Option<f64> {
    parse_px(value).filter(|w| *w > 0.0)
}
