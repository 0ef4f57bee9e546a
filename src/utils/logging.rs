use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use std::time::Instant;

pub struct Logger;

impl Logger {
    /// Logs go to stderr; stdout is reserved for asset bodies.
    pub fn init() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("soku_assets=info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn request_start(path: &str, category: &str) {
        debug!("📥 Asset request: {} ({})", path, category);
    }

    pub fn cache_hit(key: &str) {
        debug!("⚡ Cache hit: {}", key);
    }

    pub fn cache_miss(key: &str) {
        debug!("🔍 Cache miss: {}", key);
    }

    pub fn cache_stored(key: &str, size: usize, ttl_secs: u64) {
        debug!("💾 Cached {} ({} bytes, ttl {}s)", key, size, ttl_secs);
    }

    pub fn roots_resolved(count: usize) {
        info!("📁 Resolved {} asset source roots", count);
    }

    pub fn located(path: &str, found: &str) {
        debug!("📦 Located {} at {}", path, found);
    }

    pub fn not_found(path: &str) {
        warn!("⚠️  Asset not found: {}", path);
    }

    pub fn compressed(path: &str, compressor: &str, before: usize, after: usize) {
        let reduction = if before == 0 {
            0.0
        } else {
            (before.saturating_sub(after) as f64 / before as f64) * 100.0
        };
        info!(
            "🗜️  Compressed {} with {}: {} → {} bytes ({:.1}% reduction)",
            path, compressor, before, after, reduction
        );
    }

    pub fn combined(path: &str) {
        debug!("🔗 Combined sources into {}", path);
    }

    pub fn published(path: &str, destination: &str, copied: bool) {
        let mode = if copied { "copied" } else { "written" };
        info!("📤 Published {} → {} ({})", path, destination, mode);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }

    pub fn info(msg: &str) {
        info!("{}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
