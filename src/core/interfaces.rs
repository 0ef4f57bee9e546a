use crate::core::models::*;
use crate::utils::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use async_trait::async_trait;

/// File system operations interface
#[async_trait]
pub trait FileSystemService: Send + Sync {
    async fn is_file(&self, path: &Path) -> bool;
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    /// Immediate child directories, sorted by name. A missing directory yields nothing.
    async fn list_child_dirs(&self, path: &Path) -> Result<Vec<PathBuf>>;
    /// Write through a temporary sibling and rename into place, creating parents.
    async fn write_file_atomic(&self, path: &Path, content: &[u8]) -> std::io::Result<()>;
    /// Copy through a temporary sibling and rename into place, creating parents.
    async fn copy_file_atomic(&self, from: &Path, to: &Path) -> std::io::Result<()>;
}

/// Cache interface
///
/// Backends own their own synchronization; the pipeline treats them as an
/// opaque, possibly remote key/value service.
#[async_trait]
pub trait CacheService: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;
    fn name(&self) -> &str;
}

/// A named minifier for stylesheets and/or scripts
pub trait Compressor: Send + Sync {
    fn name(&self) -> &str;
    fn supports(&self, category: AssetCategory) -> bool;
    fn compress(&self, source: &str) -> Result<String>;
}

/// Hook for joining several sources into one logical asset
#[async_trait]
pub trait Combiner: Send + Sync {
    /// Return `Some` only when the content was actually combined.
    async fn combine(&self, request: &AssetRequest, content: &[u8]) -> Result<Option<Vec<u8>>>;
}
