use crate::config::Config;
use crate::core::{interfaces::FileSystemService, models::*, services::AssetPipelineService};
use crate::infrastructure::{open_cache, TokioFileSystemService};
use crate::utils::{Logger, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

#[derive(Parser)]
#[command(name = "soku-assets")]
#[command(about = "Soku Assets - resolve, minify, cache and publish static assets")]
pub struct Cli {
    /// Config file (defaults to ./soku.assets.json when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one asset request through the pipeline
    Resolve {
        /// Request URI, with or without the asset prefix
        uri: String,
        /// Write the body here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Force minification on
        #[arg(long)]
        compress: bool,
        /// Force publishing to the public asset directory on
        #[arg(long)]
        compile: bool,
    },
    /// List source roots in priority order
    Roots,
    /// Show effective configuration and registered compressors
    Info,
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        Logger::init();

        let cli = Cli::parse();
        let mut config = Config::load(cli.config.as_deref())?;

        match cli.command {
            Commands::Resolve {
                uri,
                output,
                compress,
                compile,
            } => {
                config.assets.compress |= compress;
                config.assets.compile |= compile;
                self.handle_resolve_command(&config, &uri, output.as_deref()).await
            }
            Commands::Roots => self.handle_roots_command(&config).await,
            Commands::Info => self.handle_info_command(&config),
        }
    }

    fn pipeline(config: &Config) -> Result<AssetPipelineService> {
        let fs_service: Arc<dyn FileSystemService> = Arc::new(TokioFileSystemService);
        let cache = open_cache(&config.cache)?;
        Ok(AssetPipelineService::new(config, fs_service, cache))
    }

    async fn handle_resolve_command(
        &self,
        config: &Config,
        uri: &str,
        output: Option<&Path>,
    ) -> Result<()> {
        let pipeline = Self::pipeline(config)?;
        let compiled = pipeline.handle_uri(uri).await?;

        let body = match &compiled.body {
            OutputBody::Bytes(bytes) => bytes.clone(),
            OutputBody::File(path) => tokio::fs::read(path).await?,
        };

        match output {
            Some(path) => tokio::fs::write(path, &body).await?,
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(&body).await?;
                stdout.flush().await?;
            }
        }

        Logger::info(&format!(
            "✅ {} ({} bytes, {})",
            uri,
            body.len(),
            compiled.mime_type.unwrap_or("default content type")
        ));
        Ok(())
    }

    async fn handle_roots_command(&self, config: &Config) -> Result<()> {
        let pipeline = Self::pipeline(config)?;
        let roots = pipeline.root_resolver().roots().await?;

        for (index, root) in roots.iter().enumerate() {
            let marker = if root.is_dir() {
                "✓".bright_green()
            } else {
                "✗".bright_black()
            };
            println!(
                "  {} {} {}",
                format!("{:>2}.", index + 1).bright_black(),
                marker,
                root.display().to_string().bright_cyan()
            );
        }
        Ok(())
    }

    fn handle_info_command(&self, config: &Config) -> Result<()> {
        let pipeline = Self::pipeline(config)?;
        let settings = pipeline.settings();

        println!("\n  {} {}", "SOKU ASSETS".bright_cyan().bold(), env!("CARGO_PKG_VERSION").bright_white());
        println!();
        println!("  {:<16} {}", "public assets", config.public_asset_dir().display());
        println!("  {:<16} {}", "app assets", config.app_asset_dir().display());
        println!("  {:<16} {}", "compress", settings.compress);
        println!("  {:<16} {}", "compile", settings.compile);
        println!("  {:<16} {}", "css compressor", settings.css_compressor);
        println!("  {:<16} {}", "js compressor", settings.js_compressor);
        println!("  {:<16} {:?}", "cache", config.cache.backend);
        println!();
        println!("  {}", "Registered compressors:".bright_white());
        for name in pipeline.transformer().registry().names() {
            println!("    • {}", name.bright_cyan());
        }
        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}
