use crate::config::Config;
use crate::core::interfaces::FileSystemService;
use crate::core::models::SourceRoots;
use crate::utils::{Logger, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Builds the ordered source roots: application assets first, then one
/// `assets/` folder per theme found under each template base.
pub struct RootResolver {
    fs_service: Arc<dyn FileSystemService>,
    app_asset_dir: PathBuf,
    template_bases: Vec<PathBuf>,
    resolved: OnceCell<Arc<SourceRoots>>,
}

impl RootResolver {
    pub fn new(
        fs_service: Arc<dyn FileSystemService>,
        app_asset_dir: PathBuf,
        template_bases: Vec<PathBuf>,
    ) -> Self {
        Self {
            fs_service,
            app_asset_dir,
            template_bases,
            resolved: OnceCell::new(),
        }
    }

    pub fn from_config(fs_service: Arc<dyn FileSystemService>, config: &Config) -> Self {
        Self::new(fs_service, config.app_asset_dir(), config.template_bases())
    }

    /// Roots are computed on first use and shared afterwards.
    pub async fn roots(&self) -> Result<Arc<SourceRoots>> {
        self.resolved
            .get_or_try_init(|| async { self.resolve().await.map(Arc::new) })
            .await
            .cloned()
    }

    /// Walk the template bases again, bypassing the memoized value.
    pub async fn resolve(&self) -> Result<SourceRoots> {
        let mut roots = vec![self.app_asset_dir.clone()];

        for base in &self.template_bases {
            let themes = match self.fs_service.list_child_dirs(base).await {
                Ok(themes) => themes,
                Err(e) => {
                    Logger::warn(&format!(
                        "Skipping template path {}: {}",
                        base.display(),
                        e
                    ));
                    continue;
                }
            };

            for theme in themes {
                roots.push(theme.join("assets"));
            }
        }

        Logger::roots_resolved(roots.len());
        Ok(SourceRoots::new(roots))
    }
}
