use crate::core::interfaces::FileSystemService;
use crate::core::models::{AssetRequest, ResolvedAsset};
use crate::utils::{Logger, Result, SokuError};
use std::path::PathBuf;
use std::sync::Arc;

/// Materializes compiled assets under the public asset directory
pub struct Publisher {
    fs_service: Arc<dyn FileSystemService>,
    public_root: PathBuf,
}

impl Publisher {
    /// `public_root` is the directory the web server serves `/<asset_prefix>/` from.
    pub fn new(fs_service: Arc<dyn FileSystemService>, public_root: PathBuf) -> Self {
        Self {
            fs_service,
            public_root,
        }
    }

    /// Destination mirroring the request path; empty segments are dropped.
    pub fn destination(&self, request: &AssetRequest) -> PathBuf {
        request
            .raw_path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.public_root.clone(), |path, segment| path.join(segment))
    }

    /// Transformed content is written from memory; untouched content is copied
    /// from its source file.
    pub async fn publish(
        &self,
        request: &AssetRequest,
        resolved: &ResolvedAsset,
        compiled: &[u8],
        was_transformed: bool,
    ) -> Result<PathBuf> {
        let destination = self.destination(request);

        if was_transformed {
            self.fs_service
                .write_file_atomic(&destination, compiled)
                .await
                .map_err(|source| SokuError::PublishWrite {
                    path: destination.clone(),
                    source,
                })?;
        } else {
            self.fs_service
                .copy_file_atomic(&resolved.absolute_path, &destination)
                .await
                .map_err(|source| SokuError::PublishCopy {
                    path: destination.clone(),
                    source,
                })?;
        }

        Logger::published(
            request.raw_path(),
            &destination.display().to_string(),
            !was_transformed,
        );

        Ok(destination)
    }
}
