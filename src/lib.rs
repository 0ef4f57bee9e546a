//! Soku Assets - a request-driven asset pipeline.
//!
//! Resolves an asset path against ordered source roots, optionally minifies
//! stylesheets and scripts, caches the result or publishes it as a static
//! file, and reports the content type to serve it with.

pub mod cli;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod utils;

pub use crate::config::Config;
pub use crate::core::{AssetCategory, AssetPipelineService, AssetRequest, CompiledOutput, OutputBody};
pub use crate::utils::{Result, SokuError};
