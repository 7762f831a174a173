#![forbid(unsafe_code)]

//! Gallery configuration.
//!
//! Defaults reproduce the stock gallery: 240 px target rows, 24 px gaps,
//! justified above 900 px, 80 ms resize debounce, captions on.
//!
//! # Environment Variables
//!
//! | Variable | Field | Format |
//! |----------|-------|--------|
//! | `GALLERY_TARGET_ROW_HEIGHT` | `target_row_height` | positive number |
//! | `GALLERY_GAP` | `gap` | non-negative number |
//! | `GALLERY_ROW_SPACING` | `row_spacing` | non-negative number |
//! | `GALLERY_FRAME_PADDING` | `frame` padding, each side | non-negative number |
//! | `GALLERY_FRAME_BORDER` | `frame` border, each side | non-negative number |
//! | `GALLERY_MOBILE_MAX_WIDTH` | `breakpoint` | non-negative number |
//! | `GALLERY_DEBOUNCE_MS` | `debounce` | integer milliseconds |
//! | `GALLERY_CAPTIONS` | `captions` | `on`/`off` (also 1/0/true/false) |
//! | `GALLERY_ROUNDING` | `rounding` | `nearest`/`exact` |
//!
//! Unparseable values keep the default and are reported, never fatal.

use std::env;
use std::fmt;
use std::time::Duration;

use gallery_core::FrameChrome;
use gallery_layout::{Breakpoint, LayoutParams, RoundingMode};

pub const ENV_TARGET_ROW_HEIGHT: &str = "GALLERY_TARGET_ROW_HEIGHT";
pub const ENV_GAP: &str = "GALLERY_GAP";
pub const ENV_ROW_SPACING: &str = "GALLERY_ROW_SPACING";
pub const ENV_FRAME_PADDING: &str = "GALLERY_FRAME_PADDING";
pub const ENV_FRAME_BORDER: &str = "GALLERY_FRAME_BORDER";
pub const ENV_MOBILE_MAX_WIDTH: &str = "GALLERY_MOBILE_MAX_WIDTH";
pub const ENV_DEBOUNCE_MS: &str = "GALLERY_DEBOUNCE_MS";
pub const ENV_CAPTIONS: &str = "GALLERY_CAPTIONS";
pub const ENV_ROUNDING: &str = "GALLERY_ROUNDING";

/// Gap used when the surface cannot report one.
pub const DEFAULT_GAP: f64 = 24.0;
/// Target row height of the stock gallery.
pub const DEFAULT_TARGET_ROW_HEIGHT: f64 = 240.0;
/// Trailing resize debounce of the stock gallery.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(80);

/// Tunables for one gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    /// Row height before stretching.
    pub target_row_height: f64,
    /// Horizontal gap between items in a row.
    pub gap: f64,
    /// Vertical space between rows.
    pub row_spacing: f64,
    /// Chrome drawn around each image.
    pub frame: FrameChrome,
    /// Mobile/desktop threshold.
    pub breakpoint: Breakpoint,
    /// Quiet period before a resize triggers relayout.
    pub debounce: Duration,
    /// Whether captions are shown under images.
    pub captions: bool,
    /// Pixel rounding policy.
    pub rounding: RoundingMode,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            target_row_height: DEFAULT_TARGET_ROW_HEIGHT,
            gap: DEFAULT_GAP,
            row_spacing: DEFAULT_GAP,
            frame: FrameChrome::NONE,
            breakpoint: Breakpoint::DEFAULT,
            debounce: DEFAULT_DEBOUNCE,
            captions: true,
            rounding: RoundingMode::Nearest,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub config: GalleryConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    pub fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl GalleryConfig {
    /// Parse config from environment variables.
    ///
    /// Problems are logged and the affected fields keep their defaults.
    #[must_use]
    pub fn from_env() -> GalleryConfig {
        let parsed = Self::from_env_with_diagnostics();
        for error in &parsed.errors {
            tracing::warn!(%error, "ignoring invalid gallery setting");
        }
        parsed.config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Layout params for a container of the given width.
    pub fn layout_params(&self, container_width: f64) -> LayoutParams {
        LayoutParams::new(container_width, self.target_row_height)
            .with_gap(self.gap)
            .with_frame_chrome(&self.frame)
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if !(self.target_row_height.is_finite() && self.target_row_height > 0.0) {
            errors.push(ConfigError::new(
                "target_row_height",
                self.target_row_height.to_string(),
                "must be > 0",
            ));
        }
        validate_non_negative("gap", self.gap, &mut errors);
        validate_non_negative("row_spacing", self.row_spacing, &mut errors);
        validate_non_negative("frame.padding_left", self.frame.padding_left, &mut errors);
        validate_non_negative("frame.padding_right", self.frame.padding_right, &mut errors);
        validate_non_negative("frame.border_left", self.frame.border_left, &mut errors);
        validate_non_negative("frame.border_right", self.frame.border_right, &mut errors);
        validate_non_negative(
            "mobile_max_width",
            self.breakpoint.mobile_max_width,
            &mut errors,
        );
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Parse config through an arbitrary variable lookup.
pub fn from_env_with<F>(mut get: F) -> ConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = GalleryConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_TARGET_ROW_HEIGHT) {
        match parse_px(&value).filter(|v| *v > 0.0) {
            Some(parsed) => config.target_row_height = parsed,
            None => errors.push(ConfigError::new(
                "target_row_height",
                value,
                "expected positive number",
            )),
        }
    }

    if let Some(value) = get(ENV_GAP) {
        match parse_px(&value) {
            Some(parsed) => config.gap = parsed,
            None => errors.push(ConfigError::new("gap", value, "expected non-negative number")),
        }
    }

    // Rows are spaced like items unless row spacing is set on its own.
    config.row_spacing = config.gap;
    if let Some(value) = get(ENV_ROW_SPACING) {
        match parse_px(&value) {
            Some(parsed) => config.row_spacing = parsed,
            None => errors.push(ConfigError::new(
                "row_spacing",
                value,
                "expected non-negative number",
            )),
        }
    }

    if let Some(value) = get(ENV_FRAME_PADDING) {
        match parse_px(&value) {
            Some(parsed) => {
                config.frame.padding_left = parsed;
                config.frame.padding_right = parsed;
            }
            None => errors.push(ConfigError::new(
                "frame.padding",
                value,
                "expected non-negative number",
            )),
        }
    }

    if let Some(value) = get(ENV_FRAME_BORDER) {
        match parse_px(&value) {
            Some(parsed) => {
                config.frame.border_left = parsed;
                config.frame.border_right = parsed;
            }
            None => errors.push(ConfigError::new(
                "frame.border",
                value,
                "expected non-negative number",
            )),
        }
    }

    if let Some(value) = get(ENV_MOBILE_MAX_WIDTH) {
        match parse_px(&value) {
            Some(parsed) => config.breakpoint = Breakpoint::new(parsed),
            None => errors.push(ConfigError::new(
                "mobile_max_width",
                value,
                "expected non-negative number",
            )),
        }
    }

    if let Some(value) = get(ENV_DEBOUNCE_MS) {
        match value.trim().parse::<u64>() {
            Ok(ms) => config.debounce = Duration::from_millis(ms),
            Err(_) => errors.push(ConfigError::new(
                "debounce",
                value,
                "expected integer milliseconds",
            )),
        }
    }

    if let Some(value) = get(ENV_CAPTIONS) {
        match parse_bool(&value) {
            Some(parsed) => config.captions = parsed,
            None => errors.push(ConfigError::new(
                "captions",
                value,
                "expected on/off (1/0/true/false)",
            )),
        }
    }

    if let Some(value) = get(ENV_ROUNDING) {
        match RoundingMode::parse(&value) {
            Some(parsed) => config.rounding = parsed,
            None => errors.push(ConfigError::new("rounding", value, "expected nearest|exact")),
        }
    }

    ConfigParse { config, errors }
}

/// Parse a pixel length. Accepts an optional `px` suffix.
pub fn parse_px(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parse a boolean switch.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn validate_non_negative(field: &'static str, value: f64, errors: &mut Vec<ConfigError>) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(ConfigError::new(field, value.to_string(), "must be >= 0"));
    }
}
