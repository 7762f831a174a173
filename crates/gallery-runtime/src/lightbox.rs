#![forbid(unsafe_code)]

//! Modal image viewer state.
//!
//! The lightbox is a small state machine. The surface renders whatever the
//! current state says; every input returns whether anything changed so the
//! caller knows when to redraw.
//!
//! - `open` shows an image, sets its alt text and caption, and locks page
//!   scrolling behind the modal.
//! - The close button, a backdrop click, or `Escape` closes it, clears the
//!   image, and releases the scroll lock.

/// Alt text used when an image has no title.
pub const FALLBACK_ALT: &str = "Artwork";

/// Input the lightbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxInput {
    /// The close (×) button was clicked.
    CloseButton,
    /// The dimmed area around the image was clicked.
    Backdrop,
    /// A key was pressed while the page had focus.
    Key(Key),
}

/// Keys relevant to the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// What the viewer shows while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxView {
    /// Full-size image locator.
    pub src: String,
    /// Alt text: the title, or [`FALLBACK_ALT`].
    pub alt: String,
    /// Caption text: the title, possibly empty.
    pub caption: String,
}

/// Modal viewer state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    view: Option<LightboxView>,
}

impl Lightbox {
    /// A closed lightbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an image. Replaces any image already open.
    pub fn open(&mut self, src: impl Into<String>, title: &str) {
        let alt = if title.is_empty() {
            FALLBACK_ALT.to_string()
        } else {
            title.to_string()
        };
        let view = LightboxView {
            src: src.into(),
            alt,
            caption: title.to_string(),
        };
        tracing::debug!(src = %view.src, "lightbox opened");
        self.view = Some(view);
    }

    /// Close the viewer. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        let was_open = self.view.take().is_some();
        if was_open {
            tracing::debug!("lightbox closed");
        }
        was_open
    }

    /// React to user input. Returns whether the state changed.
    pub fn handle(&mut self, input: LightboxInput) -> bool {
        match input {
            LightboxInput::CloseButton | LightboxInput::Backdrop => self.close(),
            LightboxInput::Key(Key::Escape) if self.is_open() => self.close(),
            LightboxInput::Key(_) => false,
        }
    }

    /// Whether the viewer is showing an image.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.view.is_some()
    }

    /// Whether the page behind the modal must not scroll.
    #[inline]
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    /// Current contents, if open.
    #[inline]
    pub fn view(&self) -> Option<&LightboxView> {
        self.view.as_ref()
    }
}
