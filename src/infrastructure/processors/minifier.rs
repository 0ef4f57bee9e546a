use crate::core::interfaces::Compressor;
use crate::core::models::AssetCategory;
use crate::utils::{Result, SokuError};
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

pub const OXC_MINIFY: &str = "oxc::minify";

/// JavaScript minification using oxc
pub struct OxcMinifier {
    mangle: bool,
}

impl OxcMinifier {
    pub fn new() -> Self {
        Self { mangle: true }
    }

    /// Compress without renaming identifiers
    pub fn without_mangling() -> Self {
        Self { mangle: false }
    }

    /// Minify JavaScript code
    pub fn minify(&self, source_code: &str) -> Result<String> {
        let allocator = Allocator::default();
        // Served assets are classic scripts, not ES modules
        let source_type = SourceType::cjs();

        let parse_result = Parser::new(&allocator, source_code, source_type).parse();

        if !parse_result.errors.is_empty() {
            let errors: Vec<String> = parse_result
                .errors
                .iter()
                .map(|e| format!("Parse error: {}", e))
                .collect();
            return Err(SokuError::transform(OXC_MINIFY, errors.join("\n")));
        }

        let mut program = parse_result.program;
        let options = MinifierOptions {
            mangle: self.mangle.then(MangleOptions::default),
            compress: Some(CompressOptions::default()),
        };
        let minified = Minifier::new(options).minify(&allocator, &mut program);

        let code = Codegen::new()
            .with_options(CodegenOptions::minify())
            .with_scoping(minified.scoping)
            .build(&program)
            .code;

        Ok(code)
    }
}

impl Default for OxcMinifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for OxcMinifier {
    fn name(&self) -> &str {
        OXC_MINIFY
    }

    fn supports(&self, category: AssetCategory) -> bool {
        category == AssetCategory::Script
    }

    fn compress(&self, source: &str) -> Result<String> {
        self.minify(source)
    }
}
