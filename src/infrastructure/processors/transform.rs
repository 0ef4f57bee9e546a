use crate::config::AssetsConfig;
use crate::core::interfaces::{Combiner, Compressor};
use crate::core::models::{AssetCategory, AssetRequest, Transformed};
use crate::infrastructure::processors::CompressorRegistry;
use crate::utils::{Logger, Result, SokuError, Timer};
use std::sync::Arc;

/// Combine hook that never joins anything
pub struct NoopCombiner;

#[async_trait::async_trait]
impl Combiner for NoopCombiner {
    async fn combine(&self, _request: &AssetRequest, _content: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
}

/// Dispatches text assets to the combine hook and the configured compressor
pub struct TransformPipeline {
    registry: CompressorRegistry,
    combiner: Arc<dyn Combiner>,
}

impl TransformPipeline {
    pub fn new(registry: CompressorRegistry) -> Self {
        Self {
            registry,
            combiner: Arc::new(NoopCombiner),
        }
    }

    pub fn with_combiner(mut self, combiner: Arc<dyn Combiner>) -> Self {
        self.combiner = combiner;
        self
    }

    pub fn registry(&self) -> &CompressorRegistry {
        &self.registry
    }

    pub async fn transform(
        &self,
        request: &AssetRequest,
        bytes: Vec<u8>,
        category: AssetCategory,
        settings: &AssetsConfig,
    ) -> Result<Transformed> {
        if !category.is_transformable() {
            return Ok(Transformed::untouched(bytes));
        }

        let mut output = Transformed::untouched(bytes);

        if category.is_combinable() {
            if let Some(joined) = self.combiner.combine(request, &output.bytes).await? {
                Logger::combined(request.raw_path());
                output.bytes = joined;
                output.was_combined = true;
            }
        }

        if settings.compress {
            let identifier = match category {
                AssetCategory::Style => settings.css_compressor.as_str(),
                _ => settings.js_compressor.as_str(),
            };
            let compressor = self.registry.resolve(identifier, category)?;

            let before = output.bytes.len();
            output.bytes = Self::run_compressor(compressor.clone(), std::mem::take(&mut output.bytes)).await?;
            output.was_compressed = true;

            Logger::compressed(request.raw_path(), compressor.name(), before, output.bytes.len());
        }

        Ok(output)
    }

    /// Compression is CPU-bound, so it runs on the blocking pool.
    async fn run_compressor(compressor: Arc<dyn Compressor>, bytes: Vec<u8>) -> Result<Vec<u8>> {
        let name = compressor.name().to_string();

        tokio::task::spawn_blocking(move || {
            let _timer = Timer::start(&format!("Compressing with {}", compressor.name()));
            let source = String::from_utf8(bytes)
                .map_err(|e| SokuError::transform(compressor.name(), format!("source is not UTF-8: {}", e)))?;
            compressor.compress(&source).map(String::into_bytes)
        })
        .await
        .map_err(|e| SokuError::transform(&name, format!("compression task failed: {}", e)))?
    }
}
