// CLI module - command-line argument parsing and handlers
//
// With no subcommand the TUI starts. Subcommands:
// - config --show|--path|--reset: inspect or regenerate the config file
// - upload <FILE>: upload a card image and print its public URL
// - delete <URL>: delete a previously uploaded card image

use crate::config::{Config, VERSION};
use crate::storage::{StorageClient, UploadFile};
use crate::tooltip::InteractionMode;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// regdesk - referral registration desk for the terminal
#[derive(Parser, Debug)]
#[command(name = "regdesk")]
#[command(version = VERSION)]
#[command(about = "Referral registration desk with admin image management", long_about = None)]
pub struct Cli {
    /// Touch interaction: tap to preview, tap again to register
    #[arg(long, conflicts_with = "pointer")]
    pub touch: bool,

    /// Pointer interaction: hover to preview, click to register
    #[arg(long)]
    pub pointer: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Upload a card image and print its public URL
    Upload {
        /// Image file (png, jpg, gif, webp, svg, ...)
        file: PathBuf,

        /// Bucket (defaults to [storage] bucket)
        #[arg(long)]
        bucket: Option<String>,

        /// Folder inside the bucket (defaults to [storage] folder)
        #[arg(long)]
        folder: Option<String>,
    },

    /// Delete a card image by its public URL
    Delete {
        url: String,

        /// Bucket (defaults to [storage] bucket)
        #[arg(long)]
        bucket: Option<String>,
    },
}

impl Cli {
    /// Interaction mode forced from the command line, if any
    pub fn interaction_override(&self) -> Option<InteractionMode> {
        if self.touch {
            Some(InteractionMode::Touch)
        } else if self.pointer {
            Some(InteractionMode::Pointer)
        } else {
            None
        }
    }
}

pub fn handle_config(show: bool, reset: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show();
        Ok(())
    } else if reset {
        handle_config_reset()
    } else {
        println!("Usage: regdesk config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() {
    let config = Config::from_env();
    let state = |set: bool| if set { "set" } else { "not set" };

    println!("# Effective configuration (env > file > defaults)");
    println!(
        "# admin credentials: {}",
        state(config.admin.is_configured())
    );
    println!(
        "# storage credentials: {}",
        state(config.storage.is_configured())
    );
    println!();
    print!("{}", config.to_toml());
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

pub async fn handle_upload(
    config: &Config,
    file: PathBuf,
    bucket: Option<String>,
    folder: Option<String>,
) -> Result<()> {
    let client = StorageClient::new(&config.storage)?;
    let upload = UploadFile::from_path(&file)
        .await
        .with_context(|| format!("Could not read {}", file.display()))?;

    let bucket = bucket.unwrap_or_else(|| config.storage.bucket.clone());
    let folder = folder.unwrap_or_else(|| config.storage.folder.clone());
    let url = client
        .upload(&upload, &bucket, &folder)
        .await
        .context("Upload failed")?;

    println!("{}", url);
    Ok(())
}

pub async fn handle_delete(config: &Config, url: String, bucket: Option<String>) -> Result<()> {
    let client = StorageClient::new(&config.storage)?;
    let bucket = bucket.unwrap_or_else(|| config.storage.bucket.clone());
    client
        .delete(&url, &bucket)
        .await
        .context("Delete failed")?;

    println!("Deleted {}", url);
    Ok(())
}
