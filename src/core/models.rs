use crate::utils::{Result, SokuError};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A single asset request, relative to the asset prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    raw_path: String,
}

impl AssetRequest {
    /// Build a request from a path that is already relative to the asset prefix.
    pub fn new(raw_path: &str) -> Result<Self> {
        let trimmed = raw_path.trim_start_matches('/');

        if trimmed.is_empty() {
            return Err(SokuError::InvalidPath("empty asset path".to_string()));
        }

        if trimmed.contains('\\') || trimmed.contains('\0') {
            return Err(SokuError::InvalidPath(raw_path.to_string()));
        }

        if trimmed.split('/').any(|segment| segment == ".." || segment == ".") {
            return Err(SokuError::InvalidPath(raw_path.to_string()));
        }

        Ok(Self {
            raw_path: trimmed.to_string(),
        })
    }

    /// Build a request from an inbound URI path, stripping the asset prefix segment.
    ///
    /// The prefix match is case-insensitive and only applies to the leading segment,
    /// so `/Assets/css/app.css` and `assets/css/app.css` both become `css/app.css`.
    pub fn from_uri(uri: &str, asset_prefix: &str) -> Result<Self> {
        let path = uri.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_start_matches('/');
        let prefix = asset_prefix.trim_matches('/');

        let stripped = match path.split_once('/') {
            Some((first, rest)) if !prefix.is_empty() && first.eq_ignore_ascii_case(prefix) => rest,
            _ => path,
        };

        Self::new(stripped)
    }

    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    pub fn category(&self) -> AssetCategory {
        AssetCategory::classify(&self.raw_path)
    }

    /// Cache key with path separators folded into the reserved `\` character.
    pub fn cache_key(&self) -> String {
        self.raw_path.replace('/', "\\")
    }
}

impl fmt::Display for AssetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Style,
    Script,
    Image,
    Flash,
    Audio,
    Video,
    Unknown,
}

static EXTENSION_TABLE: Lazy<HashMap<&'static str, AssetCategory>> = Lazy::new(|| {
    use AssetCategory::*;

    let entries: &[(&[&str], AssetCategory)] = &[
        (&["css"], Style),
        (&["js"], Script),
        (&["bmp", "gif", "png", "jpg", "jpeg", "jpe", "tiff", "tif"], Image),
        (&["swf"], Flash),
        (
            &[
                "mid", "midi", "mp3", "ogg", "wav", "aif", "aiff", "aifc", "mpga", "mp2", "ram",
                "rm", "rpm", "ra",
            ],
            Audio,
        ),
        (&["rv", "mpeg", "mpe", "mpg", "qt", "mov", "avi", "movie"], Video),
    ];

    entries
        .iter()
        .flat_map(|(exts, category)| exts.iter().map(move |ext| (*ext, *category)))
        .collect()
});

impl AssetCategory {
    /// Classify by the extension of the final path segment. The lookup is case-sensitive.
    pub fn classify(path: &str) -> Self {
        extension_of(path)
            .and_then(|ext| EXTENSION_TABLE.get(ext).copied())
            .unwrap_or(AssetCategory::Unknown)
    }

    pub fn is_cacheable(&self) -> bool {
        self.is_text()
    }

    pub fn is_transformable(&self) -> bool {
        self.is_text()
    }

    pub fn is_combinable(&self) -> bool {
        self.is_text()
    }

    /// Text assets are read into memory; everything else is served from disk.
    pub fn is_text(&self) -> bool {
        matches!(self, AssetCategory::Style | AssetCategory::Script)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Style => "css",
            AssetCategory::Script => "js",
            AssetCategory::Image => "img",
            AssetCategory::Flash => "flash",
            AssetCategory::Audio => "audio",
            AssetCategory::Video => "video",
            AssetCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extension of the last path segment, without the dot.
pub(crate) fn extension_of(path: &str) -> Option<&str> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Candidate source directories, highest priority first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRoots {
    roots: Vec<PathBuf>,
}

impl SourceRoots {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.roots
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedAsset {
    pub absolute_path: PathBuf,
    pub category: AssetCategory,
    /// Only populated for text categories.
    pub raw_bytes: Option<Vec<u8>>,
}

/// Result of the transform stage
#[derive(Debug, Clone)]
pub struct Transformed {
    pub bytes: Vec<u8>,
    pub was_compressed: bool,
    pub was_combined: bool,
}

impl Transformed {
    pub fn untouched(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            was_compressed: false,
            was_combined: false,
        }
    }

    pub fn was_transformed(&self) -> bool {
        self.was_compressed || self.was_combined
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputBody {
    Bytes(Vec<u8>),
    /// Binary asset left on disk for the host to stream.
    File(PathBuf),
}

/// Final response payload handed back to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledOutput {
    pub body: OutputBody,
    pub mime_type: Option<&'static str>,
}

impl CompiledOutput {
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.body {
            OutputBody::Bytes(bytes) => Some(bytes),
            OutputBody::File(_) => None,
        }
    }
}
