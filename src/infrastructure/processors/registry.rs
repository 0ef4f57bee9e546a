use crate::core::interfaces::Compressor;
use crate::core::models::AssetCategory;
use crate::infrastructure::processors::{LightningCssCompressor, OxcMinifier, WhitespaceCompressor};
use crate::utils::{Result, SokuError};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Maps configured compressor identifiers (`name::entry`) to implementations
#[derive(Clone, Default)]
pub struct CompressorRegistry {
    compressors: BTreeMap<String, Arc<dyn Compressor>>,
}

impl CompressorRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in compressor
    pub fn with_builtins() -> Self {
        Self::empty()
            .with(Arc::new(LightningCssCompressor::new()))
            .with(Arc::new(WhitespaceCompressor))
            .with(Arc::new(OxcMinifier::new()))
    }

    pub fn with(mut self, compressor: Arc<dyn Compressor>) -> Self {
        self.register(compressor);
        self
    }

    /// Register under the compressor's own name, replacing any previous entry
    pub fn register(&mut self, compressor: Arc<dyn Compressor>) {
        self.compressors.insert(compressor.name().to_string(), compressor);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.compressors.keys().map(String::as_str)
    }

    /// Look up the compressor configured for a category.
    ///
    /// Unknown identifiers and compressors that do not handle the category are
    /// configuration errors; there is no pass-through fallback.
    pub fn resolve(&self, identifier: &str, category: AssetCategory) -> Result<Arc<dyn Compressor>> {
        let identifier = identifier.trim();

        if identifier.is_empty() {
            return Err(SokuError::transform_config(format!(
                "no compressor configured for {} assets",
                category
            )));
        }

        let compressor = self.compressors.get(identifier).ok_or_else(|| {
            SokuError::transform_config(format!(
                "unknown compressor '{}' (available: {})",
                identifier,
                self.names().collect::<Vec<_>>().join(", ")
            ))
        })?;

        if !compressor.supports(category) {
            return Err(SokuError::transform_config(format!(
                "compressor '{}' cannot handle {} assets",
                identifier, category
            )));
        }

        Ok(Arc::clone(compressor))
    }
}
