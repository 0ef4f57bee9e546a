use crate::core::interfaces::FileSystemService;
use crate::core::models::{AssetRequest, ResolvedAsset, SourceRoots};
use crate::utils::{Logger, Result, SokuError};

/// First root holding the requested file wins; later roots are never consulted.
pub async fn locate(
    fs_service: &dyn FileSystemService,
    request: &AssetRequest,
    roots: &SourceRoots,
) -> Result<ResolvedAsset> {
    let category = request.category();

    for root in roots.iter() {
        let candidate = root.join(request.raw_path());

        if !fs_service.is_file(&candidate).await {
            continue;
        }

        Logger::located(request.raw_path(), &candidate.display().to_string());

        let raw_bytes = if category.is_text() {
            Some(fs_service.read_file(&candidate).await?)
        } else {
            None
        };

        return Ok(ResolvedAsset {
            absolute_path: candidate,
            category,
            raw_bytes,
        });
    }

    Logger::not_found(request.raw_path());
    Err(SokuError::NotFound(request.raw_path().to_string()))
}
