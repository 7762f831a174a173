#![forbid(unsafe_code)]

//! Runtime for the justified gallery.
//!
//! Everything between a manifest on disk and a laid-out page:
//!
//! - [`manifest`]: named, ordered image lists loaded from JSON.
//! - [`resolver`]: intrinsic image sizes, from file headers or memory.
//! - [`caption`]: titles and accessible labels derived from locators.
//! - [`config`]: tunables with environment overrides.
//! - [`resize_debounce`]: trailing, latest-wins resize coalescing.
//! - [`lightbox`]: the modal viewer state machine.
//! - [`gallery`]: the relayout driver tying the above to
//!   [`gallery_layout`].
//!
//! # Example
//!
//! ```
//! use gallery_runtime::{Gallery, GalleryConfig, GalleryView, Manifest, MemoryResolver, RelayoutTrigger};
//!
//! let manifest = Manifest::from_json(r#"{"prints": ["a.jpg", "b.jpg"]}"#).unwrap();
//! let resolver = MemoryResolver::new().with("a.jpg", 1200, 800).with("b.jpg", 800, 800);
//! let mut gallery = Gallery::from_manifest(&manifest, "prints", &resolver, GalleryConfig::default());
//!
//! let view = gallery.relayout(1280.0, RelayoutTrigger::Loaded).unwrap();
//! assert!(matches!(view, GalleryView::Justified(_)));
//! ```

pub mod caption;
pub mod config;
pub mod gallery;
pub mod lightbox;
pub mod manifest;
pub mod resize_debounce;
pub mod resolver;

pub use caption::{aria_label, title_from_locator};
pub use config::{ConfigError, ConfigParse, GalleryConfig};
pub use gallery::{EMPTY_MESSAGE, FlowItem, Gallery, GalleryEntry, GalleryView, RelayoutTrigger};
pub use lightbox::{FALLBACK_ALT, Key, Lightbox, LightboxInput, LightboxView};
pub use manifest::{Manifest, ManifestError};
pub use resize_debounce::{DebounceAction, DebounceConfig, DebounceStats, ResizeDebouncer};
pub use resolver::{
    FsResolver, MemoryResolver, RatioResolver, ResolveError, resolve_all, resolve_all_parallel,
};
