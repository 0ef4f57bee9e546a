mod common;

use common::Site;
use soku_assets::infrastructure::NullCache;
use soku_assets::SokuError;
use std::sync::Arc;

fn temp_leftovers(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .count()
}

#[tokio::test]
async fn test_publish_is_idempotent() {
    let mut site = Site::new();
    site.write(&site.theme_assets("admin"), "css/app.css", b"body {\n  color: red;\n}\n");
    site.config.assets.compile = true;
    site.config.assets.compress = true;
    let pipeline = site.pipeline(Arc::new(NullCache));
    let destination = site.public_assets().join("css/app.css");

    pipeline.handle_uri("assets/css/app.css").await.unwrap();
    let first = std::fs::read(&destination).unwrap();

    pipeline.handle_uri("assets/css/app.css").await.unwrap();
    let second = std::fs::read(&destination).unwrap();

    assert_eq!(first, second);
    assert!(first.len() < b"body {\n  color: red;\n}\n".len());
}

#[tokio::test]
async fn test_binary_asset_is_copied() {
    let mut site = Site::new();
    let mp3 = vec![0x49, 0x44, 0x33, 0x04, 0x00, 0x00];
    site.write(&site.theme_assets("default"), "audio/theme.mp3", &mp3);
    site.config.assets.compile = true;
    let pipeline = site.pipeline(Arc::new(NullCache));

    let output = pipeline.handle_uri("assets/audio/theme.mp3").await.unwrap();

    assert_eq!(output.mime_type, Some("audio/mpeg"));
    assert_eq!(
        std::fs::read(site.public_assets().join("audio/theme.mp3")).unwrap(),
        mp3
    );
}

#[tokio::test]
async fn test_unknown_extension_is_copied_without_mime() {
    let mut site = Site::new();
    site.write(&site.app_assets(), "data/blob.xyz", b"opaque");
    site.config.assets.compile = true;
    let pipeline = site.pipeline(Arc::new(NullCache));

    let output = pipeline.handle_uri("assets/data/blob.xyz").await.unwrap();

    assert_eq!(output.mime_type, None);
    assert_eq!(
        std::fs::read(site.public_assets().join("data/blob.xyz")).unwrap(),
        b"opaque"
    );
}

#[tokio::test]
async fn test_concurrent_publishes_are_benign() {
    let mut site = Site::new();
    site.write(
        &site.app_assets(),
        "js/app.js",
        b"function add(a, b) {\n    return a + b;\n}\nconsole.log(add(1, 2));\n",
    );
    site.config.assets.compile = true;
    site.config.assets.compress = true;
    let pipeline = Arc::new(site.pipeline(Arc::new(NullCache)));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move { pipeline.handle_uri("assets/js/app.js").await })
        })
        .collect();

    let mut outputs = Vec::new();
    for handle in handles {
        outputs.push(handle.await.unwrap().unwrap());
    }

    let published = std::fs::read(site.public_assets().join("js/app.js")).unwrap();
    for output in outputs {
        assert_eq!(output.bytes(), Some(published.as_slice()));
    }
    assert_eq!(temp_leftovers(&site.public_assets().join("js")), 0);
}

#[tokio::test]
async fn test_unwritable_public_root_fails_request() {
    let mut site = Site::new();
    site.write(&site.app_assets(), "img/logo.gif", b"GIF89a");
    // A regular file where the public asset directory should be
    std::fs::write(site.public_assets(), b"not a directory").unwrap();
    site.config.assets.compile = true;
    let pipeline = site.pipeline(Arc::new(NullCache));

    let result = pipeline.handle_uri("assets/img/logo.gif").await;

    assert!(matches!(result, Err(SokuError::PublishCopy { .. })));
}
