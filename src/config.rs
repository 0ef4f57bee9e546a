use crate::utils::{Result, SokuError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "soku.assets.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Web root; template paths and the publish directory live under it.
    pub public_root: PathBuf,
    /// Application directory; its `assets/` folder outranks every theme.
    pub app_path: PathBuf,
    /// URI segment that prefixes every asset request.
    pub asset_prefix: String,
    pub assets: AssetsConfig,
    pub template: TemplateConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub compress: bool,
    /// Publish to the public asset directory instead of caching dynamically.
    pub compile: bool,
    pub css_compressor: String,
    pub js_compressor: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub template_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Memory,
    Sled,
    None,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_root: PathBuf::from("public"),
            app_path: PathBuf::from("application"),
            asset_prefix: "assets".to_string(),
            assets: AssetsConfig::default(),
            template: TemplateConfig {
                template_paths: vec![PathBuf::from("themes")],
            },
            cache: CacheConfig::default(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            compress: false,
            compile: false,
            css_compressor: "lightningcss::minify".to_string(),
            js_compressor: "oxc::minify".to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            dir: PathBuf::from(".soku-cache"),
        }
    }
}

impl Config {
    /// Load an explicit config file, or `soku.assets.json` from the working
    /// directory when present, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let cwd = std::env::current_dir()?;
                let candidate = cwd.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::from_file(&candidate)
                } else {
                    Self::default().rooted_at(&cwd)
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SokuError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            SokuError::config(format!("invalid {}: {}", path.display(), e))
        })?;

        let base = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir()?,
        };
        config.rooted_at(&base)
    }

    /// Resolve relative paths against `base` and validate.
    pub fn rooted_at(mut self, base: &Path) -> Result<Self> {
        self.public_root = base.join(&self.public_root);
        self.app_path = base.join(&self.app_path);
        self.cache.dir = base.join(&self.cache.dir);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let prefix = self.asset_prefix.trim_matches('/');
        if prefix.is_empty() || prefix.contains('/') || prefix == ".." || prefix == "." {
            return Err(SokuError::config(format!(
                "asset_prefix must be a single path segment, got '{}'",
                self.asset_prefix
            )));
        }
        Ok(())
    }

    /// Where compiled assets are published.
    pub fn public_asset_dir(&self) -> PathBuf {
        self.public_root.join(self.asset_prefix.trim_matches('/'))
    }

    /// The application's own asset directory.
    pub fn app_asset_dir(&self) -> PathBuf {
        self.app_path.join("assets")
    }

    /// Template base directories; relative entries live under the public root.
    pub fn template_bases(&self) -> Vec<PathBuf> {
        self.template
            .template_paths
            .iter()
            .map(|tp| self.public_root.join(tp))
            .collect()
    }
}
