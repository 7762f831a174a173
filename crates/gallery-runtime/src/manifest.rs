#![forbid(unsafe_code)]

//! Gallery manifest.
//!
//! A manifest is a JSON object mapping gallery names to ordered lists of
//! image locators:
//!
//! ```json
//! {
//!   "paintings": ["images/paintings/sunset_over-bay.jpg", "images/paintings/dune.png"],
//!   "drawings": []
//! }
//! ```
//!
//! A gallery missing from the manifest is simply empty. That is a valid,
//! displayable "no content" state; only I/O and JSON errors are failures.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Named, ordered image lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    galleries: BTreeMap<String, Vec<String>>,
}

/// Failure to read or parse a manifest.
#[derive(Debug)]
pub enum ManifestError {
    /// The manifest file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The manifest is not a JSON object of string arrays.
    Parse(serde_json::Error),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read manifest {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid manifest: {err}"),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            galleries = manifest.galleries.len(),
            "loaded gallery manifest"
        );
        Ok(manifest)
    }

    /// Locators of a gallery, in display order. Empty if the gallery is absent.
    pub fn gallery(&self, name: &str) -> &[String] {
        self.galleries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the manifest names this gallery (even if it is empty).
    pub fn contains(&self, name: &str) -> bool {
        self.galleries.contains_key(name)
    }

    /// Gallery names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.galleries.keys().map(String::as_str)
    }

    /// Add or replace a gallery.
    pub fn insert(&mut self, name: impl Into<String>, locators: Vec<String>) {
        self.galleries.insert(name.into(), locators);
    }

    /// Number of galleries.
    pub fn len(&self) -> usize {
        self.galleries.len()
    }

    /// Whether the manifest names no galleries.
    pub fn is_empty(&self) -> bool {
        self.galleries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "paintings": ["a/one.jpg", "a/two.png", "a/three.webp"],
        "drawings": []
    }"#;

    #[test]
    fn gallery_preserves_order() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        assert_eq!(
            manifest.gallery("paintings"),
            &["a/one.jpg", "a/two.png", "a/three.webp"]
        );
    }

    #[test]
    fn missing_gallery_is_empty_not_error() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        assert!(manifest.gallery("sculpture").is_empty());
        assert!(!manifest.contains("sculpture"));
        assert!(manifest.contains("drawings"));
        assert!(manifest.gallery("drawings").is_empty());
    }

    #[test]
    fn names_are_sorted() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        assert_eq!(manifest.names().collect::<Vec<_>>(), vec!["drawings", "paintings"]);
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = Manifest::from_json(r#"{"paintings": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
        assert!(err.to_string().starts_with("invalid manifest"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Manifest::load("/definitely/not/here/galleries.json").unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn insert_and_serialize() {
        let mut manifest = Manifest::default();
        assert!(manifest.is_empty());
        manifest.insert("prints", vec!["p.jpg".to_string()]);
        let json = serde_json::to_string(&manifest).unwrap();
        assert_eq!(json, r#"{"prints":["p.jpg"]}"#);
    }
}
