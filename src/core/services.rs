use crate::config::{AssetsConfig, Config};
use crate::core::{interfaces::*, locator::locate, mime::mime_for, models::*, roots::RootResolver};
use crate::infrastructure::{CompressorRegistry, Publisher, TransformPipeline};
use crate::utils::{Logger, Result, Timer};
use std::sync::Arc;
use std::time::Duration;

/// Lifetime of dynamically cached stylesheets and scripts
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// Serves one asset request at a time:
/// classify → cache → locate → transform → publish → cache → emit.
///
/// Holds no per-request state, so a single instance can be shared behind an
/// `Arc` by a concurrent host.
pub struct AssetPipelineService {
    settings: AssetsConfig,
    asset_prefix: String,
    fs_service: Arc<dyn FileSystemService>,
    cache: Arc<dyn CacheService>,
    roots: RootResolver,
    transformer: TransformPipeline,
    publisher: Publisher,
}

impl AssetPipelineService {
    pub fn new(
        config: &Config,
        fs_service: Arc<dyn FileSystemService>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            settings: config.assets.clone(),
            asset_prefix: config.asset_prefix.clone(),
            roots: RootResolver::from_config(Arc::clone(&fs_service), config),
            transformer: TransformPipeline::new(CompressorRegistry::with_builtins()),
            publisher: Publisher::new(Arc::clone(&fs_service), config.public_asset_dir()),
            fs_service,
            cache,
        }
    }

    /// Swap the transform stage, e.g. to add compressors or a combiner
    pub fn with_transformer(mut self, transformer: TransformPipeline) -> Self {
        self.transformer = transformer;
        self
    }

    pub fn settings(&self) -> &AssetsConfig {
        &self.settings
    }

    pub fn root_resolver(&self) -> &RootResolver {
        &self.roots
    }

    pub fn transformer(&self) -> &TransformPipeline {
        &self.transformer
    }

    /// Serve an inbound URI, stripping the asset prefix first.
    pub async fn handle_uri(&self, uri: &str) -> Result<CompiledOutput> {
        let request = AssetRequest::from_uri(uri, &self.asset_prefix)?;
        self.handle(&request).await
    }

    pub async fn handle(&self, request: &AssetRequest) -> Result<CompiledOutput> {
        let _timer = Timer::start(&format!("Serving {}", request));

        let category = request.category();
        let mime_type = mime_for(category, request.raw_path());
        Logger::request_start(request.raw_path(), category.as_str());

        if category.is_cacheable() {
            if let Some(bytes) = self.cached(request).await {
                return Ok(CompiledOutput {
                    body: OutputBody::Bytes(bytes),
                    mime_type,
                });
            }
        }

        let roots = self.roots.roots().await?;
        let mut resolved = locate(self.fs_service.as_ref(), request, &roots).await?;

        let (compiled, was_transformed) = match resolved.raw_bytes.take() {
            Some(raw) => {
                let transformed = self
                    .transformer
                    .transform(request, raw, category, &self.settings)
                    .await?;
                let was_transformed = transformed.was_transformed();
                (Some(transformed.bytes), was_transformed)
            }
            None => (None, false),
        };

        if self.settings.compile {
            self.publisher
                .publish(
                    request,
                    &resolved,
                    compiled.as_deref().unwrap_or_default(),
                    was_transformed,
                )
                .await?;
        }

        let body = match compiled {
            Some(bytes) => {
                if category.is_cacheable() && !self.settings.compile {
                    self.store(request, &bytes).await;
                }
                OutputBody::Bytes(bytes)
            }
            None => OutputBody::File(resolved.absolute_path),
        };

        Ok(CompiledOutput { body, mime_type })
    }

    /// Backend failures count as a miss.
    async fn cached(&self, request: &AssetRequest) -> Option<Vec<u8>> {
        let key = request.cache_key();

        match self.cache.get(&key).await {
            Ok(Some(bytes)) => {
                Logger::cache_hit(&key);
                Some(bytes)
            }
            Ok(None) => {
                Logger::cache_miss(&key);
                None
            }
            Err(e) => {
                Logger::warn(&format!(
                    "{} cache lookup failed for {}, resolving from disk: {}",
                    self.cache.name(),
                    key,
                    e
                ));
                None
            }
        }
    }

    async fn store(&self, request: &AssetRequest, bytes: &[u8]) {
        let key = request.cache_key();

        match self.cache.put(&key, bytes, CACHE_TTL).await {
            Ok(()) => Logger::cache_stored(&key, bytes.len(), CACHE_TTL.as_secs()),
            Err(e) => Logger::warn(&format!(
                "{} cache write failed for {}: {}",
                self.cache.name(),
                key,
                e
            )),
        }
    }
}
