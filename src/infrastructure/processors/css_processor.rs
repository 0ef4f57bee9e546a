use crate::core::interfaces::Compressor;
use crate::core::models::AssetCategory;
use crate::utils::{Result, SokuError};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};

pub const LIGHTNINGCSS_MINIFY: &str = "lightningcss::minify";
pub const WHITESPACE_STRIP: &str = "whitespace::strip";

/// Stylesheet minification with lightningcss
pub struct LightningCssCompressor;

impl LightningCssCompressor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LightningCssCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for LightningCssCompressor {
    fn name(&self) -> &str {
        LIGHTNINGCSS_MINIFY
    }

    fn supports(&self, category: AssetCategory) -> bool {
        category == AssetCategory::Style
    }

    fn compress(&self, source: &str) -> Result<String> {
        let mut stylesheet = StyleSheet::parse(source, ParserOptions::default())
            .map_err(|e| SokuError::transform(LIGHTNINGCSS_MINIFY, e.to_string()))?;

        stylesheet
            .minify(MinifyOptions::default())
            .map_err(|e| SokuError::transform(LIGHTNINGCSS_MINIFY, e.to_string()))?;

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..PrinterOptions::default()
            })
            .map_err(|e| SokuError::transform(LIGHTNINGCSS_MINIFY, e.to_string()))?;

        Ok(result.code)
    }
}

/// Line-based stylesheet compressor: trims every line and drops blank ones
pub struct WhitespaceCompressor;

impl Compressor for WhitespaceCompressor {
    fn name(&self) -> &str {
        WHITESPACE_STRIP
    }

    fn supports(&self, category: AssetCategory) -> bool {
        category == AssetCategory::Style
    }

    fn compress(&self, source: &str) -> Result<String> {
        Ok(source
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(""))
    }
}
