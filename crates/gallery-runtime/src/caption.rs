#![forbid(unsafe_code)]

//! Caption text derived from image locators.
//!
//! `images/paintings/sunset_over--the-bay.final.jpg` becomes
//! `sunset over the bay.final`: last path segment, extension dropped,
//! underscores and dashes turned into spaces, whitespace collapsed.

/// Human-readable title for an image locator.
pub fn title_from_locator(locator: &str) -> String {
    let file = locator.rsplit('/').next().unwrap_or("").trim();
    let stem = strip_extension(file);

    let mut title = String::with_capacity(stem.len());
    let mut pending_space = false;
    for ch in stem.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !title.is_empty() {
            title.push(' ');
        }
        pending_space = false;
        title.push(ch);
    }
    title
}

/// Accessible label for the button that opens an image.
pub fn aria_label(title: &str) -> String {
    if title.is_empty() {
        "Open image".to_string()
    } else {
        format!("Open {title}")
    }
}

/// Drop a trailing `.ext`. A name that is only an extension (`.jpg`) drops
/// entirely; a trailing dot alone is kept.
fn strip_extension(file: &str) -> &str {
    match file.rfind('.') {
        Some(dot) if dot + 1 < file.len() => &file[..dot],
        _ => file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_become_single_spaces() {
        assert_eq!(
            title_from_locator("images/paintings/sunset_over--the-bay.jpg"),
            "sunset over the bay"
        );
    }

    #[test]
    fn only_last_extension_is_dropped() {
        assert_eq!(title_from_locator("a/b/study.final.png"), "study.final");
    }

    #[test]
    fn bare_file_and_no_extension() {
        assert_eq!(title_from_locator("portrait"), "portrait");
        assert_eq!(title_from_locator("  _lead_ "), "lead");
    }

    #[test]
    fn empty_segments_give_empty_title() {
        assert_eq!(title_from_locator("images/"), "");
        assert_eq!(title_from_locator(".jpg"), "");
        assert_eq!(title_from_locator(""), "");
    }

    #[test]
    fn trailing_dot_is_kept() {
        assert_eq!(title_from_locator("what."), "what.");
    }

    #[test]
    fn aria_labels() {
        assert_eq!(aria_label("dune"), "Open dune");
        assert_eq!(aria_label(""), "Open image");
    }
}
