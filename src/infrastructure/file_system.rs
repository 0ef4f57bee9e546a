use crate::core::interfaces::FileSystemService;
use crate::utils::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

pub struct TokioFileSystemService;

impl TokioFileSystemService {
    /// Hidden sibling so the rename stays on the same filesystem.
    fn temp_sibling(path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("asset");
        path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()))
    }

    async fn ensure_parent(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn place(temp: &Path, path: &Path) -> std::io::Result<()> {
        if let Err(e) = fs::rename(temp, path).await {
            let _ = fs::remove_file(temp).await;
            return Err(e);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl FileSystemService for TokioFileSystemService {
    async fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path).await?)
    }

    async fn list_child_dirs(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = match fs::read_dir(path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut dirs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            // Follows symlinks so linked themes count as directories
            let is_dir = fs::metadata(entry.path())
                .await
                .map(|meta| meta.is_dir())
                .unwrap_or(false);
            if is_dir {
                dirs.push(entry.path());
            }
        }

        dirs.sort();
        Ok(dirs)
    }

    async fn write_file_atomic(&self, path: &Path, content: &[u8]) -> std::io::Result<()> {
        Self::ensure_parent(path).await?;

        let temp = Self::temp_sibling(path);
        if let Err(e) = fs::write(&temp, content).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e);
        }

        Self::place(&temp, path).await
    }

    async fn copy_file_atomic(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        Self::ensure_parent(to).await?;

        let temp = Self::temp_sibling(to);
        if let Err(e) = fs::copy(from, &temp).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e);
        }

        Self::place(&temp, to).await
    }
}
