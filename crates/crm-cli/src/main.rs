//! `crm`: command-line client for the CRM API.
//!
//! # Usage
//!
//! ```text
//! crm list
//! crm --url http://crm.internal:5000 show 6f1c...
//! crm --config ~/.config/crm/config.toml list
//! ```

mod client;
mod table;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::ApiClient;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_URL: &str = "http://localhost:5000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "crm", about = "Command-line client for the CRM API")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the CRM server (default: http://localhost:5000).
  #[arg(long, env = "CRM_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every contact.
  List,
  /// Show one contact in full.
  Show {
    /// Contact id.
    id: Uuid,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then_some(file_cfg.url))
    .unwrap_or_else(|| DEFAULT_URL.to_string());
  tracing::debug!(%base_url, "using server");

  let client = ApiClient::new(base_url)?;

  match args.command {
    Command::List => {
      let contacts = client
        .list_contacts()
        .await
        .context("Error loading contacts")?;
      print!("{}", table::render_list(&contacts));
    }
    Command::Show { id } => {
      let contact = client
        .get_contact(id)
        .await
        .context("Error loading contact")?
        .with_context(|| format!("Contact {id} not found"))?;
      print!("{}", table::render_detail(&contact));
    }
  }

  Ok(())
}
