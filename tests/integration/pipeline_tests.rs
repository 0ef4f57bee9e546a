mod common;

use common::{RecordingCache, Site};
use soku_assets::core::interfaces::{CacheService, Combiner};
use soku_assets::core::CACHE_TTL;
use soku_assets::infrastructure::{CompressorRegistry, NullCache, TransformPipeline};
use soku_assets::{AssetCategory, AssetRequest, OutputBody, SokuError};
use std::sync::Arc;
use std::time::Duration;

const APP_CSS: &[u8] = b"body {\n    color: red;\n}\n\n.nav {\n    margin: 0 auto;\n}\n";

#[tokio::test]
async fn test_theme_asset_is_served_raw_and_cached() {
    let site = Site::new();
    site.write(&site.theme_assets("admin"), "css/app.css", APP_CSS);
    let cache = Arc::new(RecordingCache::default());
    let pipeline = site.pipeline(cache.clone());

    let output = pipeline.handle_uri("/assets/css/app.css").await.unwrap();

    assert_eq!(output.body, OutputBody::Bytes(APP_CSS.to_vec()));
    assert_eq!(output.mime_type, Some("text/css"));
    assert_eq!(cache.puts(), 1);
    assert_eq!(cache.last_ttl(), Some(Duration::from_secs(300)));
    assert_eq!(CACHE_TTL, Duration::from_secs(300));
    assert_eq!(cache.peek("css\\app.css").await, Some(APP_CSS.to_vec()));
    assert!(!site.public_assets().join("css/app.css").exists());
}

#[tokio::test]
async fn test_application_root_wins_over_themes() {
    let site = Site::new();
    site.write(&site.app_assets(), "js/app.js", b"var source = 'app';");
    site.write(&site.theme_assets("admin"), "js/app.js", b"var source = 'admin';");
    let pipeline = site.pipeline(Arc::new(NullCache));

    let output = pipeline.handle_uri("assets/js/app.js").await.unwrap();

    assert_eq!(output.bytes(), Some(&b"var source = 'app';"[..]));
    assert_eq!(output.mime_type, Some("text/javascript"));
}

#[tokio::test]
async fn test_cache_hit_skips_filesystem() {
    let site = Site::new();
    let source = site.write(&site.theme_assets("default"), "css/app.css", APP_CSS);
    let cache = Arc::new(RecordingCache::default());
    let pipeline = site.pipeline(cache.clone());

    pipeline.handle_uri("assets/css/app.css").await.unwrap();
    std::fs::remove_file(source).unwrap();

    let output = pipeline.handle_uri("assets/css/app.css").await.unwrap();

    assert_eq!(output.bytes(), Some(APP_CSS));
    assert_eq!(output.mime_type, Some("text/css"));
    assert_eq!(cache.gets(), 2);
    assert_eq!(cache.puts(), 1);
}

#[tokio::test]
async fn test_unavailable_compressor_fails_without_side_effects() {
    let mut site = Site::new();
    site.write(&site.theme_assets("admin"), "css/app.css", APP_CSS);
    site.config.assets.compress = true;
    site.config.assets.css_compressor = "cssmin/CSSMin::minify".to_string();
    let cache = Arc::new(RecordingCache::default());
    let pipeline = site.pipeline(cache.clone());

    let result = pipeline.handle_uri("assets/css/app.css").await;

    assert!(matches!(result, Err(SokuError::TransformConfiguration(_))));
    assert_eq!(cache.puts(), 0);
    assert!(!site.public_assets().exists());
}

#[tokio::test]
async fn test_unavailable_compressor_fails_in_compile_mode_too() {
    let mut site = Site::new();
    site.write(&site.app_assets(), "js/app.js", b"var a = 1;");
    site.config.assets.compress = true;
    site.config.assets.compile = true;
    site.config.assets.js_compressor = "jsmin/JSMin::minify".to_string();
    let pipeline = site.pipeline(Arc::new(NullCache));

    let result = pipeline.handle_uri("assets/js/app.js").await;

    assert!(matches!(result, Err(SokuError::TransformConfiguration(_))));
    assert!(!site.public_assets().join("js/app.js").exists());
}

#[tokio::test]
async fn test_image_skips_transform_and_cache() {
    let mut site = Site::new();
    let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let source = site.write(&site.theme_assets("default"), "img/logo.png", &png);
    site.config.assets.compress = true;
    let cache = Arc::new(RecordingCache::default());
    let pipeline = site.pipeline(cache.clone());

    let request = AssetRequest::from_uri("assets/img/logo.png", "assets").unwrap();
    assert_eq!(request.category(), AssetCategory::Image);

    let output = pipeline.handle(&request).await.unwrap();

    assert_eq!(output.body, OutputBody::File(source));
    assert_eq!(output.mime_type, Some("image/png"));
    assert_eq!(cache.gets(), 0);
    assert_eq!(cache.puts(), 0);
}

#[tokio::test]
async fn test_compile_mode_never_caches() {
    let mut site = Site::new();
    site.write(&site.theme_assets("admin"), "css/app.css", APP_CSS);
    site.config.assets.compile = true;
    let cache = Arc::new(RecordingCache::default());
    let pipeline = site.pipeline(cache.clone());

    let output = pipeline.handle_uri("assets/css/app.css").await.unwrap();

    assert_eq!(output.bytes(), Some(APP_CSS));
    assert_eq!(cache.puts(), 0);
    assert_eq!(
        std::fs::read(site.public_assets().join("css/app.css")).unwrap(),
        APP_CSS
    );
}

#[tokio::test]
async fn test_compressed_output_is_cached() {
    let mut site = Site::new();
    site.write(&site.app_assets(), "js/app.js", b"function greet(name) {\n    return 'hi ' + name;\n}\nconsole.log(greet('soku'));\n");
    site.config.assets.compress = true;
    let cache = Arc::new(RecordingCache::default());
    let pipeline = site.pipeline(cache.clone());

    let output = pipeline.handle_uri("assets/js/app.js").await.unwrap();
    let minified = output.bytes().unwrap().to_vec();

    assert!(String::from_utf8(minified.clone()).unwrap().contains("console.log"));
    assert_eq!(cache.peek("js\\app.js").await, Some(minified));
}

#[tokio::test]
async fn test_missing_asset() {
    let site = Site::new();
    let cache = Arc::new(RecordingCache::default());
    let pipeline = site.pipeline(cache.clone());

    let err = pipeline.handle_uri("assets/css/missing.css").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(cache.puts(), 0);
}

#[tokio::test]
async fn test_traversal_is_rejected() {
    let site = Site::new();
    let pipeline = site.pipeline(Arc::new(NullCache));

    let result = pipeline.handle_uri("assets/../soku.assets.json").await;

    assert!(matches!(result, Err(SokuError::InvalidPath(_))));
}

struct FailingCache;

#[async_trait::async_trait]
impl CacheService for FailingCache {
    async fn get(&self, _key: &str) -> soku_assets::Result<Option<Vec<u8>>> {
        Err(SokuError::cache("backend offline"))
    }

    async fn put(&self, _key: &str, _value: &[u8], _ttl: Duration) -> soku_assets::Result<()> {
        Err(SokuError::cache("backend offline"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[tokio::test]
async fn test_cache_failures_fail_open() {
    let site = Site::new();
    site.write(&site.app_assets(), "css/app.css", APP_CSS);
    let pipeline = site.pipeline(Arc::new(FailingCache));

    let output = pipeline.handle_uri("assets/css/app.css").await.unwrap();

    assert_eq!(output.bytes(), Some(APP_CSS));
}

struct Prepend;

#[async_trait::async_trait]
impl Combiner for Prepend {
    async fn combine(&self, _request: &AssetRequest, content: &[u8]) -> soku_assets::Result<Option<Vec<u8>>> {
        let mut joined = b"/* vendor */\n".to_vec();
        joined.extend_from_slice(content);
        Ok(Some(joined))
    }
}

#[tokio::test]
async fn test_combined_asset_is_written_not_copied() {
    let mut site = Site::new();
    site.write(&site.app_assets(), "css/app.css", APP_CSS);
    site.config.assets.compile = true;
    let pipeline = site.pipeline(Arc::new(NullCache)).with_transformer(
        TransformPipeline::new(CompressorRegistry::with_builtins()).with_combiner(Arc::new(Prepend)),
    );

    pipeline.handle_uri("assets/css/app.css").await.unwrap();

    let published = std::fs::read(site.public_assets().join("css/app.css")).unwrap();
    assert!(published.starts_with(b"/* vendor */\n"));
    assert!(published.ends_with(APP_CSS));
}
