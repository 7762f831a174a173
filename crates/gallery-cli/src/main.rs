#![forbid(unsafe_code)]

//! `gallery` binary entry point.

mod cli;
mod report;

use std::fmt;
use std::process::ExitCode;

use gallery_runtime::{
    ConfigError, FsResolver, Gallery, GalleryEntry, Manifest, ManifestError, RelayoutTrigger,
    resolve_all_parallel,
};
use tracing_subscriber::EnvFilter;

use crate::cli::{Format, Opts};
use crate::report::{Report, render_text};

fn main() -> ExitCode {
    init_tracing();
    let opts = Opts::parse();
    match run(&opts) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("gallery: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(cli::ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Failure of a layout run.
#[derive(Debug)]
enum RunError {
    Manifest(ManifestError),
    Config(Vec<ConfigError>),
    Json(serde_json::Error),
    /// The viewport could not be laid out.
    NoLayout { width: f64 },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest(err) => write!(f, "{err}"),
            Self::Config(errors) => {
                write!(f, "invalid configuration:")?;
                for err in errors {
                    write!(f, " {err};")?;
                }
                Ok(())
            }
            Self::Json(err) => write!(f, "cannot encode layout: {err}"),
            Self::NoLayout { width } => write!(f, "no layout for viewport width {width}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Manifest(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Config(_) | Self::NoLayout { .. } => None,
        }
    }
}

impl From<ManifestError> for RunError {
    fn from(err: ManifestError) -> Self {
        Self::Manifest(err)
    }
}

impl From<serde_json::Error> for RunError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

fn run(opts: &Opts) -> Result<String, RunError> {
    for error in &opts.env_errors {
        tracing::warn!(%error, "ignoring invalid gallery setting");
    }
    opts.config.validate().map_err(RunError::Config)?;

    let manifest = Manifest::load(&opts.manifest)?;
    if !manifest.contains(&opts.gallery) {
        tracing::info!(gallery = %opts.gallery, "gallery not in manifest; treating as empty");
    }

    let locators = manifest.gallery(&opts.gallery);
    let resolver = FsResolver::new(opts.image_root());
    let ratios = resolve_all_parallel(&resolver, locators, opts.jobs);
    let entries = locators
        .iter()
        .zip(ratios)
        .map(|(locator, ratio)| GalleryEntry::new(locator.as_str(), ratio))
        .collect();

    let mut gallery = Gallery::from_entries(opts.gallery.as_str(), entries, opts.config.clone());
    let view = gallery
        .relayout(opts.width, RelayoutTrigger::Loaded)
        .cloned()
        .ok_or(RunError::NoLayout { width: opts.width })?;

    match opts.format {
        Format::Json => Ok(Report::new(&gallery, opts.width, &view).to_json()?),
        Format::Text => Ok(render_text(&gallery, opts.width, &view)),
    }
}
