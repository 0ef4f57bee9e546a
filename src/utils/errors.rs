use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SokuError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested asset is absent from every source root.
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid asset path: {0}")]
    InvalidPath(String),

    /// A configured compressor cannot be resolved or does not handle the category.
    #[error("Transform configuration error: {0}")]
    TransformConfiguration(String),

    #[error("Transform failed in '{compressor}': {message}")]
    Transform { compressor: String, message: String },

    #[error("Unable to write to file: {}", .path.display())]
    PublishWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to copy file: {}", .path.display())]
    PublishCopy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cache error: {0}")]
    Cache(String),
}

impl SokuError {
    /// Create a transform configuration error
    pub fn transform_config(message: impl Into<String>) -> Self {
        Self::TransformConfiguration(message.into())
    }

    /// Create a transform error for a compressor that failed on its input
    pub fn transform(compressor: &str, message: impl Into<String>) -> Self {
        Self::Transform {
            compressor: compressor.to_string(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a cache backend error
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache(message.into())
    }

    /// Missing assets are the only outcome a host should map to a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SokuError::NotFound(_))
    }

    /// Format error with a hint for the operator
    pub fn format_detailed(&self) -> String {
        match self {
            SokuError::TransformConfiguration(message) => format!(
                "❌ Transform Configuration Error: {}\n💡 Check assets.css_compressor / assets.js_compressor",
                message
            ),
            SokuError::PublishWrite { path, source } | SokuError::PublishCopy { path, source } => {
                format!("❌ {}\n📁 Destination: {}\n📝 Cause: {}", self, path.display(), source)
            }
            _ => format!("❌ {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SokuError>;

impl From<sled::Error> for SokuError {
    fn from(err: sled::Error) -> Self {
        SokuError::cache(format!("sled: {}", err))
    }
}

impl From<bincode::Error> for SokuError {
    fn from(err: bincode::Error) -> Self {
        SokuError::cache(format!("Failed to (de)serialize cache entry: {}", err))
    }
}
