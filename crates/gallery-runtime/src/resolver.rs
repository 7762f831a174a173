#![forbid(unsafe_code)]

//! Intrinsic image size resolution.
//!
//! The packer needs one aspect ratio per image. A [`RatioResolver`] turns a
//! locator into natural pixel dimensions; any failure degrades to the square
//! default ratio so one broken image never blocks the whole gallery.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Component, Path, PathBuf};
use std::thread;

use gallery_core::{AspectRatio, Dimensions};

/// Why an image's size could not be determined.
#[derive(Debug)]
pub enum ResolveError {
    /// The image file could not be opened or read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file exists but its header could not be decoded.
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    /// The image reports a zero width or height.
    ZeroSized { locator: String },
    /// The locator is not something this resolver can look up.
    Unknown { locator: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Decode { path, source } => {
                write!(f, "cannot decode {}: {source}", path.display())
            }
            Self::ZeroSized { locator } => write!(f, "{locator} has zero size"),
            Self::Unknown { locator } => write!(f, "no image known for {locator}"),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::ZeroSized { .. } | Self::Unknown { .. } => None,
        }
    }
}

/// Looks up the natural size of an image.
pub trait RatioResolver {
    /// Natural pixel dimensions of the image behind `locator`.
    fn dimensions(&self, locator: &str) -> Result<Dimensions, ResolveError>;

    /// Aspect ratio of the image, or the square default on any failure.
    fn resolve_ratio(&self, locator: &str) -> AspectRatio {
        match self.dimensions(locator) {
            Ok(dims) if !dims.is_empty() => dims.aspect_ratio(),
            Ok(_) => {
                let error = ResolveError::ZeroSized {
                    locator: locator.to_string(),
                };
                tracing::warn!(%error, "using default aspect ratio");
                AspectRatio::DEFAULT
            }
            Err(error) => {
                tracing::warn!(%error, "using default aspect ratio");
                AspectRatio::DEFAULT
            }
        }
    }
}

impl<R: RatioResolver + ?Sized> RatioResolver for &R {
    fn dimensions(&self, locator: &str) -> Result<Dimensions, ResolveError> {
        (**self).dimensions(locator)
    }
}

/// Resolve every locator in order.
pub fn resolve_all<R: RatioResolver + ?Sized>(resolver: &R, locators: &[String]) -> Vec<AspectRatio> {
    locators.iter().map(|l| resolver.resolve_ratio(l)).collect()
}

/// Resolve every locator on up to `workers` threads, preserving order.
///
/// Header reads are I/O bound; fanning out mirrors waiting on all image
/// loads at once. `workers` of `None` uses the available parallelism.
pub fn resolve_all_parallel<R>(
    resolver: &R,
    locators: &[String],
    workers: Option<NonZeroUsize>,
) -> Vec<AspectRatio>
where
    R: RatioResolver + Sync + ?Sized,
{
    let workers = workers
        .or_else(|| thread::available_parallelism().ok())
        .map_or(1, NonZeroUsize::get);
    if workers <= 1 || locators.len() <= 1 {
        return resolve_all(resolver, locators);
    }

    let chunk = locators.len().div_ceil(workers);
    let mut ratios = vec![AspectRatio::DEFAULT; locators.len()];
    thread::scope(|scope| {
        for (slots, names) in ratios.chunks_mut(chunk).zip(locators.chunks(chunk)) {
            scope.spawn(move || {
                for (slot, name) in slots.iter_mut().zip(names) {
                    *slot = resolver.resolve_ratio(name);
                }
            });
        }
    });
    ratios
}

/// Reads image headers from files under a root directory.
///
/// Locators are interpreted as relative paths. Remote URLs and paths that
/// climb out of the root are rejected as [`ResolveError::Unknown`].
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    /// Resolve locators relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path for a locator, if it stays under the root.
    pub fn path_for(&self, locator: &str) -> Option<PathBuf> {
        if locator.contains("://") {
            return None;
        }
        let relative = Path::new(locator.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if escapes || relative.as_os_str().is_empty() {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl RatioResolver for FsResolver {
    fn dimensions(&self, locator: &str) -> Result<Dimensions, ResolveError> {
        let path = self.path_for(locator).ok_or_else(|| ResolveError::Unknown {
            locator: locator.to_string(),
        })?;
        match image::image_dimensions(&path) {
            Ok((width, height)) => Ok(Dimensions::new(width, height)),
            Err(image::ImageError::IoError(source)) => Err(ResolveError::Io { path, source }),
            Err(source) => Err(ResolveError::Decode { path, source }),
        }
    }
}

/// Sizes known ahead of time (precomputed manifests, tests).
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    sizes: HashMap<String, Dimensions>,
}

impl MemoryResolver {
    /// Empty resolver; every lookup fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the size of one image.
    pub fn insert(&mut self, locator: impl Into<String>, dims: Dimensions) {
        self.sizes.insert(locator.into(), dims);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, locator: impl Into<String>, width: u32, height: u32) -> Self {
        self.insert(locator, Dimensions::new(width, height));
        self
    }
}

impl<S: Into<String>> FromIterator<(S, Dimensions)> for MemoryResolver {
    fn from_iter<I: IntoIterator<Item = (S, Dimensions)>>(iter: I) -> Self {
        Self {
            sizes: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl RatioResolver for MemoryResolver {
    fn dimensions(&self, locator: &str) -> Result<Dimensions, ResolveError> {
        self.sizes
            .get(locator)
            .copied()
            .ok_or_else(|| ResolveError::Unknown {
                locator: locator.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn memory_resolver_returns_ratio() {
        let resolver = MemoryResolver::new().with("wide.jpg", 1600, 900);
        assert_eq!(resolver.resolve_ratio("wide.jpg").get(), 1600.0 / 900.0);
    }

    #[test]
    fn unknown_and_zero_sized_fall_back_to_square() {
        let resolver = MemoryResolver::new().with("broken.jpg", 0, 600);
        assert_eq!(resolver.resolve_ratio("broken.jpg"), AspectRatio::DEFAULT);
        assert_eq!(resolver.resolve_ratio("missing.jpg"), AspectRatio::DEFAULT);
        assert!(matches!(
            resolver.dimensions("missing.jpg"),
            Err(ResolveError::Unknown { .. })
        ));
    }

    #[test]
    fn resolve_all_keeps_order() {
        let resolver: MemoryResolver = [
            ("a", Dimensions::new(200, 100)),
            ("b", Dimensions::new(100, 200)),
        ]
        .into_iter()
        .collect();
        let ratios = resolve_all(&resolver, &names(&["b", "a", "zzz"]));
        let raw: Vec<f64> = ratios.iter().map(|r| r.get()).collect();
        assert_eq!(raw, vec![0.5, 2.0, 1.0]);
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut resolver = MemoryResolver::new();
        let list: Vec<String> = (0..37).map(|i| format!("img-{i}.jpg")).collect();
        for (i, name) in list.iter().enumerate() {
            resolver.insert(name.clone(), Dimensions::new(100 + i as u32 * 10, 150));
        }
        let sequential = resolve_all(&resolver, &list);
        let parallel = resolve_all_parallel(&resolver, &list, NonZeroUsize::new(4));
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn fs_paths_stay_under_root() {
        let resolver = FsResolver::new("/srv/site");
        assert_eq!(
            resolver.path_for("images/a.jpg"),
            Some(PathBuf::from("/srv/site/images/a.jpg"))
        );
        assert_eq!(
            resolver.path_for("/images/a.jpg"),
            Some(PathBuf::from("/srv/site/images/a.jpg"))
        );
        assert_eq!(resolver.path_for("../secret.jpg"), None);
        assert_eq!(resolver.path_for("https://cdn.example/a.jpg"), None);
        assert_eq!(resolver.path_for(""), None);
    }

    #[test]
    fn fs_missing_file_is_io_error() {
        let resolver = FsResolver::new("/definitely/not/a/dir");
        let err = resolver.dimensions("a.png").unwrap_err();
        assert!(matches!(err, ResolveError::Io { .. }), "{err}");
        assert_eq!(resolver.resolve_ratio("a.png"), AspectRatio::DEFAULT);
    }
}
