#![forbid(unsafe_code)]

//! End-to-end: manifest and images on disk to a pixel layout.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use gallery_core::AspectRatio;
use gallery_runtime::{
    FsResolver, Gallery, GalleryConfig, GalleryView, LightboxInput, Manifest, ManifestError,
    RatioResolver, RelayoutTrigger, ResolveError,
};

fn write_png(root: &Path, locator: &str, width: u32, height: u32) {
    let path = root.join(locator);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    image::RgbImage::new(width, height).save(&path).expect("write png");
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write_png(root, "images/paintings/morning_harbour.png", 300, 200);
    write_png(root, "images/paintings/long-coast.png", 400, 100);
    write_png(root, "images/paintings/portrait.png", 100, 200);
    write_png(root, "images/paintings/square.png", 150, 150);
    write_png(root, "images/paintings/field.png", 320, 200);
    fs::write(root.join("images/paintings/corrupt.png"), b"not a png").expect("write");
    fs::write(
        root.join("manifest.json"),
        r#"{
            "paintings": [
                "images/paintings/morning_harbour.png",
                "images/paintings/long-coast.png",
                "images/paintings/portrait.png",
                "images/paintings/square.png",
                "images/paintings/field.png",
                "images/paintings/corrupt.png",
                "images/paintings/absent.png"
            ],
            "drawings": []
        }"#,
    )
    .expect("write manifest");
    dir
}

fn load(dir: &tempfile::TempDir, name: &str) -> Gallery {
    let manifest = Manifest::load(dir.path().join("manifest.json")).expect("manifest");
    let resolver = FsResolver::new(dir.path());
    Gallery::from_manifest(&manifest, name, &resolver, GalleryConfig::default())
}

#[test]
fn header_sizes_become_ratios() {
    let dir = fixture();
    let gallery = load(&dir, "paintings");
    let ratios: Vec<f64> = gallery.entries().iter().map(|e| e.ratio.get()).collect();
    assert_eq!(ratios, vec![1.5, 4.0, 0.5, 1.0, 1.6, 1.0, 1.0]);
    assert_eq!(gallery.entries()[0].title, "morning harbour");
    assert_eq!(gallery.entries()[1].title, "long coast");
}

#[test]
fn broken_files_report_distinct_errors() {
    let dir = fixture();
    let resolver = FsResolver::new(dir.path());
    assert!(matches!(
        resolver.dimensions("images/paintings/corrupt.png"),
        Err(ResolveError::Decode { .. })
    ));
    assert!(matches!(
        resolver.dimensions("images/paintings/absent.png"),
        Err(ResolveError::Io { .. })
    ));
    assert_eq!(
        resolver.resolve_ratio("images/paintings/absent.png"),
        AspectRatio::DEFAULT
    );
}

#[test]
fn desktop_layout_fills_container() {
    let dir = fixture();
    let mut gallery = load(&dir, "paintings");
    let Some(GalleryView::Justified(layout)) =
        gallery.relayout(1000.0, RelayoutTrigger::Loaded).cloned()
    else {
        panic!("expected justified layout");
    };

    assert_eq!(layout.placements.len(), 7);
    // Every item appears once, in order.
    for (i, placement) in layout.placements.iter().enumerate() {
        assert_eq!(placement.index, i);
    }
    // Stretched rows end near the right edge; rounding may add or lose a
    // pixel per item.
    for (row_idx, row) in layout.rows.iter().enumerate() {
        if !row.stretched {
            continue;
        }
        let right = layout
            .placements
            .iter()
            .filter(|p| p.row == row_idx)
            .map(|p| p.frame.right())
            .max()
            .expect("row has items");
        let slack = row.len() as i64;
        assert!((i64::from(right) - 1000).abs() <= slack, "row {row_idx} ends at {right}");
    }
    // No two frames overlap.
    for a in &layout.placements {
        for b in &layout.placements {
            if a.index != b.index {
                assert!(!a.frame.overlaps(&b.frame));
            }
        }
    }
}

#[test]
fn resizing_into_mobile_switches_to_flow() {
    let dir = fixture();
    let mut gallery = load(&dir, "paintings");
    let start = Instant::now();
    gallery.relayout(1000.0, RelayoutTrigger::Loaded);

    assert!(gallery.on_resize_at(960.0, start).is_none());
    let view = gallery
        .on_resize_at(600.0, start + Duration::from_millis(16))
        .cloned();
    let Some(GalleryView::Flow(items)) = view else {
        panic!("expected flow layout");
    };
    assert_eq!(items.len(), 7);
    assert!(items.iter().all(|item| item.image_width == 600));
    assert_eq!(items[1].image_height, 150);
}

#[test]
fn missing_and_empty_galleries_are_not_errors() {
    let dir = fixture();
    for name in ["drawings", "sculpture"] {
        let mut gallery = load(&dir, name);
        let view = gallery.relayout(1000.0, RelayoutTrigger::Loaded).expect("view");
        assert_eq!(view.message(), Some("No works uploaded yet."));
    }
}

#[test]
fn lightbox_round_trip_through_gallery() {
    let dir = fixture();
    let mut gallery = load(&dir, "paintings");
    assert!(gallery.open(2));
    assert_eq!(
        gallery.lightbox().view().map(|v| v.alt.as_str()),
        Some("portrait")
    );
    assert!(gallery.handle_lightbox(LightboxInput::Backdrop));
    assert!(!gallery.lightbox().scroll_locked());
}

#[test]
fn bad_manifest_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("manifest.json");
    fs::write(&path, r#"{"paintings": "not-a-list"}"#).expect("write");
    assert!(matches!(Manifest::load(&path), Err(ManifestError::Parse(_))));
    assert!(matches!(
        Manifest::load(dir.path().join("nope.json")),
        Err(ManifestError::Io { .. })
    ));
}
