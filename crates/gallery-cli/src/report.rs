#![forbid(unsafe_code)]

//! Output of a layout run.

use std::fmt::Write as _;

use gallery_runtime::{Gallery, GalleryEntry, GalleryView};
use serde::Serialize;

/// JSON document printed by `--format=json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub gallery: &'a str,
    pub viewport_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub captions: bool,
    pub entries: &'a [GalleryEntry],
    pub view: &'a GalleryView,
}

impl<'a> Report<'a> {
    pub fn new(gallery: &'a Gallery, viewport_width: f64, view: &'a GalleryView) -> Self {
        Self {
            gallery: gallery.name(),
            viewport_width,
            message: view.message(),
            captions: gallery.config().captions,
            entries: gallery.entries(),
            view,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Human-readable table for `--format=text`.
pub fn render_text(gallery: &Gallery, viewport_width: f64, view: &GalleryView) -> String {
    let mut out = String::new();
    let _ = write!(out, "gallery {} at {viewport_width}px: ", gallery.name());

    match view {
        GalleryView::Empty => {
            let _ = writeln!(out, "empty");
            if let Some(message) = view.message() {
                let _ = writeln!(out, "{message}");
            }
        }
        GalleryView::Flow(items) => {
            let _ = writeln!(
                out,
                "flow, {} items, {}px tall",
                items.len(),
                view.total_height()
            );
            for item in items {
                let _ = write!(
                    out,
                    "  #{:<3} y={:<6} {}x{}",
                    item.index, item.frame.y, item.image_width, item.image_height
                );
                push_caption(&mut out, gallery, item.index);
            }
        }
        GalleryView::Justified(layout) => {
            let _ = writeln!(
                out,
                "justified, {} items in {} rows, {}x{}px",
                layout.placements.len(),
                layout.row_count(),
                layout.total_width(),
                layout.total_height()
            );
            for (row_idx, row) in layout.rows.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "row {row_idx}: h={} {}",
                    row.height,
                    if row.stretched { "stretched" } else { "natural" }
                );
                for placement in layout.placements.iter().filter(|p| p.row == row_idx) {
                    let _ = write!(
                        out,
                        "  #{:<3} x={:<6} y={:<6} {}x{}",
                        placement.index,
                        placement.frame.x,
                        placement.frame.y,
                        placement.image_width,
                        placement.image_height
                    );
                    push_caption(&mut out, gallery, placement.index);
                }
            }
        }
    }
    out
}

fn push_caption(out: &mut String, gallery: &Gallery, index: usize) {
    match gallery.caption(index) {
        Some(caption) if !caption.is_empty() => {
            let _ = writeln!(out, "  {caption}");
        }
        _ => out.push('\n'),
    }
}

#[cfg(test)]
mod tests {
    use gallery_runtime::{GalleryConfig, Manifest, MemoryResolver, RelayoutTrigger};

    use super::*;

    fn gallery(captions: bool) -> Gallery {
        let manifest =
            Manifest::from_json(r#"{"prints": ["prints/old_mill.jpg", "prints/river.jpg"]}"#)
                .expect("manifest");
        let resolver = MemoryResolver::new()
            .with("prints/old_mill.jpg", 1200, 800)
            .with("prints/river.jpg", 800, 800);
        let config = GalleryConfig {
            captions,
            ..GalleryConfig::default()
        };
        Gallery::from_manifest(&manifest, "prints", &resolver, config)
    }

    #[test]
    fn text_lists_rows_and_captions() {
        let mut gallery = gallery(true);
        let view = gallery
            .relayout(1280.0, RelayoutTrigger::Loaded)
            .expect("view")
            .clone();
        let text = render_text(&gallery, 1280.0, &view);
        assert!(text.starts_with("gallery prints at 1280px: justified, 2 items in 1 rows"));
        assert!(text.contains("row 0: h=240 natural"));
        assert!(text.contains("360x240  old mill"));
        assert!(text.contains("240x240  river"));
    }

    #[test]
    fn text_without_captions() {
        let mut gallery = gallery(false);
        let view = gallery
            .relayout(600.0, RelayoutTrigger::Loaded)
            .expect("view")
            .clone();
        let text = render_text(&gallery, 600.0, &view);
        assert!(text.contains("flow, 2 items"));
        assert!(!text.contains("old mill"));
        assert!(text.contains("600x400\n"));
    }

    #[test]
    fn empty_gallery_message() {
        let mut empty = Gallery::from_entries("drawings", Vec::new(), GalleryConfig::default());
        let view = empty
            .relayout(1280.0, RelayoutTrigger::Loaded)
            .expect("view")
            .clone();
        assert!(render_text(&empty, 1280.0, &view).contains("No works uploaded yet."));

        let json = Report::new(&empty, 1280.0, &view).to_json().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["message"], "No works uploaded yet.");
        assert_eq!(value["view"]["mode"], "empty");
    }

    #[test]
    fn json_report_shape() {
        let mut gallery = gallery(true);
        let view = gallery
            .relayout(1280.0, RelayoutTrigger::Loaded)
            .expect("view")
            .clone();
        let json = Report::new(&gallery, 1280.0, &view).to_json().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["gallery"], "prints");
        assert!(value.get("message").is_none());
        assert_eq!(value["entries"][0]["title"], "old mill");
        assert_eq!(value["entries"][0]["ratio"], 1.5);
        assert_eq!(value["view"]["mode"], "justified");
        assert_eq!(value["view"]["layout"]["placements"][1]["frame"]["x"], 384);
    }
}
