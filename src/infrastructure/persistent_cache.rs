use crate::core::interfaces::CacheService;
use crate::utils::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sled::{Db, Tree};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    /// Unix milliseconds
    expires_at: i64,
    value: Vec<u8>,
}

/// Persistent cache using sled, survives process restarts
pub struct SledCache {
    db: Db,
    assets: Tree,
}

impl SledCache {
    pub fn open(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)?;
        let db = sled::open(cache_dir.join("soku_assets.sled"))?;
        let assets = db.open_tree("assets")?;

        Ok(Self { db, assets })
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    fn now_millis() -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[async_trait::async_trait]
impl CacheService for SledCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let Some(bytes) = self.assets.get(key)? else {
            return Ok(None);
        };

        let entry: StoredEntry = bincode::deserialize(&bytes)?;
        if Self::now_millis() >= entry.expires_at {
            self.assets.remove(key)?;
            return Ok(None);
        }

        Ok(Some(entry.value))
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let ttl_millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let entry = StoredEntry {
            expires_at: Self::now_millis().saturating_add(ttl_millis),
            value: value.to_vec(),
        };

        self.assets.insert(key, bincode::serialize(&entry)?)?;
        self.assets.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "sled"
    }
}
