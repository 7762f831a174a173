#![forbid(unsafe_code)]

//! Relayout driver for one gallery.
//!
//! [`Gallery`] owns the resolved entries of a named gallery and turns a
//! viewport width into a [`GalleryView`]:
//!
//! | State                     | View                                   |
//! |---------------------------|----------------------------------------|
//! | no entries                | [`GalleryView::Empty`]                 |
//! | width at or below mobile  | [`GalleryView::Flow`], one item a row  |
//! | wider                     | [`GalleryView::Justified`]             |
//!
//! Resizes go through a [`ResizeDebouncer`]; crossing the mobile breakpoint
//! skips the debounce and relayouts at once.

use std::time::Instant;

use gallery_core::{AspectRatio, PixelBox};
use gallery_layout::rounding::round_px;
use gallery_layout::{GalleryLayout, LayoutMode, Measured, pack, place};
use serde::Serialize;

use crate::caption::{aria_label, title_from_locator};
use crate::config::GalleryConfig;
use crate::lightbox::{Lightbox, LightboxInput};
use crate::manifest::Manifest;
use crate::resize_debounce::{DebounceAction, DebounceConfig, ResizeDebouncer};
use crate::resolver::{RatioResolver, resolve_all};

/// Text shown in place of an empty gallery.
pub const EMPTY_MESSAGE: &str = "No works uploaded yet.";

/// One image of a gallery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryEntry {
    /// Where the image lives.
    pub locator: String,
    /// Title derived from the locator.
    pub title: String,
    /// Intrinsic aspect ratio.
    pub ratio: AspectRatio,
}

impl GalleryEntry {
    /// Entry with a title derived from `locator`.
    pub fn new(locator: impl Into<String>, ratio: AspectRatio) -> Self {
        let locator = locator.into();
        let title = title_from_locator(&locator);
        Self {
            locator,
            title,
            ratio,
        }
    }
}

impl Measured for GalleryEntry {
    fn aspect_ratio(&self) -> AspectRatio {
        self.ratio
    }
}

/// Why a relayout ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayoutTrigger {
    /// Images finished loading.
    Loaded,
    /// A debounced resize settled.
    Resize,
    /// The viewport crossed the mobile breakpoint.
    BreakpointChange,
}

/// A full-width item in the mobile flow layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowItem {
    /// Index of the entry.
    pub index: usize,
    /// Outer box including frame chrome.
    pub frame: PixelBox,
    pub image_width: u32,
    pub image_height: u32,
}

/// What the surface should draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "layout", rename_all = "snake_case")]
pub enum GalleryView {
    /// Nothing uploaded; show [`EMPTY_MESSAGE`].
    Empty,
    /// Mobile: images stacked at full width and natural height.
    Flow(Vec<FlowItem>),
    /// Desktop: justified rows.
    Justified(GalleryLayout),
}

impl GalleryView {
    /// Placeholder text, for the empty view only.
    pub fn message(&self) -> Option<&'static str> {
        matches!(self, Self::Empty).then_some(EMPTY_MESSAGE)
    }

    /// Number of items drawn.
    pub fn item_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Flow(items) => items.len(),
            Self::Justified(layout) => layout.placements.len(),
        }
    }

    /// Layout mode, if anything is drawn.
    pub fn mode(&self) -> Option<LayoutMode> {
        match self {
            Self::Empty => None,
            Self::Flow(_) => Some(LayoutMode::Flow),
            Self::Justified(_) => Some(LayoutMode::Justified),
        }
    }

    /// Outer box of item `index`.
    pub fn frame_of(&self, index: usize) -> Option<PixelBox> {
        match self {
            Self::Empty => None,
            Self::Flow(items) => items.get(index).map(|item| item.frame),
            Self::Justified(layout) => layout.get(index).map(|p| p.frame),
        }
    }

    /// Total drawn height.
    pub fn total_height(&self) -> u32 {
        match self {
            Self::Empty => 0,
            Self::Flow(items) => items.last().map_or(0, |item| item.frame.bottom()),
            Self::Justified(layout) => layout.total_height(),
        }
    }
}

/// A named gallery bound to a viewport.
#[derive(Debug, Clone)]
pub struct Gallery {
    name: String,
    entries: Vec<GalleryEntry>,
    config: GalleryConfig,
    debouncer: ResizeDebouncer,
    lightbox: Lightbox,
    viewport: Option<f64>,
    view: Option<GalleryView>,
}

impl Gallery {
    /// Resolve the named gallery of `manifest`.
    ///
    /// A name the manifest does not list yields an empty gallery.
    pub fn from_manifest<R>(
        manifest: &Manifest,
        name: &str,
        resolver: &R,
        config: GalleryConfig,
    ) -> Self
    where
        R: RatioResolver + ?Sized,
    {
        let locators = manifest.gallery(name);
        let ratios = resolve_all(resolver, locators);
        let entries = locators
            .iter()
            .zip(ratios)
            .map(|(locator, ratio)| GalleryEntry::new(locator.as_str(), ratio))
            .collect();
        Self::from_entries(name, entries, config)
    }

    /// Gallery over already-resolved entries.
    pub fn from_entries(
        name: impl Into<String>,
        entries: Vec<GalleryEntry>,
        config: GalleryConfig,
    ) -> Self {
        let debounce = DebounceConfig::with_delay(config.debounce);
        Self {
            name: name.into(),
            entries,
            config,
            debouncer: ResizeDebouncer::new(debounce, 0.0),
            lightbox: Lightbox::new(),
            viewport: None,
            view: None,
        }
    }

    /// Recompute the view for `viewport_width`.
    ///
    /// Returns `None` and keeps the previous view when the width is not
    /// positive (the surface has not been measured yet).
    pub fn relayout(
        &mut self,
        viewport_width: f64,
        trigger: RelayoutTrigger,
    ) -> Option<&GalleryView> {
        if self.entries.is_empty() {
            self.view = Some(GalleryView::Empty);
            return self.view.as_ref();
        }
        if !(viewport_width.is_finite() && viewport_width > 0.0) {
            tracing::debug!(gallery = %self.name, viewport_width, "relayout skipped");
            return None;
        }

        let mode = self.config.breakpoint.classify(viewport_width);
        let view = match mode {
            LayoutMode::Flow => GalleryView::Flow(self.flow(viewport_width)),
            LayoutMode::Justified => GalleryView::Justified(self.justified(viewport_width)),
        };
        let rows = match &view {
            GalleryView::Justified(layout) => layout.row_count(),
            _ => view.item_count(),
        };
        tracing::debug!(
            gallery = %self.name,
            viewport_width,
            ?trigger,
            %mode,
            rows,
            "relayout"
        );

        self.viewport = Some(viewport_width);
        self.debouncer.record_external_apply(viewport_width);
        self.view = Some(view);
        self.view.as_ref()
    }

    /// Feed a viewport resize. Returns the new view if one was computed.
    pub fn on_resize_at(&mut self, viewport_width: f64, now: Instant) -> Option<&GalleryView> {
        let crossed = self
            .viewport
            .is_some_and(|prev| self.config.breakpoint.crossed(prev, viewport_width));
        if crossed {
            return self.relayout(viewport_width, RelayoutTrigger::BreakpointChange);
        }
        match self.debouncer.handle_resize_at(viewport_width, now) {
            DebounceAction::Apply { width, .. } => self.relayout(width, RelayoutTrigger::Resize),
            DebounceAction::Pending | DebounceAction::None => None,
        }
    }

    /// [`on_resize_at`](Self::on_resize_at) with the current time.
    pub fn on_resize(&mut self, viewport_width: f64) -> Option<&GalleryView> {
        self.on_resize_at(viewport_width, Instant::now())
    }

    /// Poll the resize debounce. Returns the new view if one was computed.
    pub fn tick_at(&mut self, now: Instant) -> Option<&GalleryView> {
        match self.debouncer.tick_at(now) {
            DebounceAction::Apply { width, .. } => self.relayout(width, RelayoutTrigger::Resize),
            DebounceAction::Pending | DebounceAction::None => None,
        }
    }

    /// Whether a resize is waiting to settle.
    pub fn has_pending_resize(&self) -> bool {
        self.debouncer.has_pending()
    }

    /// Open entry `index` in the lightbox. Returns `false` for a bad index.
    pub fn open(&mut self, index: usize) -> bool {
        let Some(entry) = self.entries.get(index) else {
            return false;
        };
        self.lightbox.open(entry.locator.as_str(), &entry.title);
        true
    }

    /// Route input to the lightbox. Returns whether it changed.
    pub fn handle_lightbox(&mut self, input: LightboxInput) -> bool {
        self.lightbox.handle(input)
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// Caption under entry `index`, when captions are enabled.
    pub fn caption(&self, index: usize) -> Option<&str> {
        if !self.config.captions {
            return None;
        }
        self.entries.get(index).map(|e| e.title.as_str())
    }

    /// Accessible label for the button opening entry `index`.
    pub fn aria_label(&self, index: usize) -> Option<String> {
        self.entries.get(index).map(|e| aria_label(&e.title))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Most recent view, if any relayout ran.
    pub fn view(&self) -> Option<&GalleryView> {
        self.view.as_ref()
    }

    /// Width of the most recent relayout.
    pub fn viewport(&self) -> Option<f64> {
        self.viewport
    }

    fn justified(&self, viewport_width: f64) -> GalleryLayout {
        let params = self.config.layout_params(viewport_width);
        let rows = pack(&self.entries, &params);
        place(&rows, &params, self.config.rounding, self.config.row_spacing)
    }

    fn flow(&self, viewport_width: f64) -> Vec<FlowItem> {
        let chrome = self.config.frame.horizontal_extent();
        let image_width = round_px((viewport_width - chrome).max(0.0));
        let outer = round_px(viewport_width);
        let spacing = round_px(self.config.row_spacing);

        let mut y = 0u32;
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let image_height = round_px(entry.ratio.height_at(f64::from(image_width)));
                let item = FlowItem {
                    index,
                    frame: PixelBox::new(0, y, outer, image_height),
                    image_width,
                    image_height,
                };
                y = y.saturating_add(image_height).saturating_add(spacing);
                item
            })
            .collect()
    }
}
