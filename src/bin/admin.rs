//! CLI administration tool for bajo.
//!
//! Works directly on the sled database, so the server must be stopped first
//! (sled holds an exclusive lock on its directory).
//!
//! # Usage
//!
//! ```bash
//! # Show the URL bound to a key
//! cargo run --bin bajo-admin -- get oROh-p8o
//!
//! # Shorten a URL, optionally under a custom key
//! cargo run --bin bajo-admin -- shorten https://example.com --key custom
//!
//! # Delete a mapping
//! cargo run --bin bajo-admin -- delete custom
//!
//! # List mappings in key order
//! cargo run --bin bajo-admin -- list --limit 20
//!
//! # Database information
//! cargo run --bin bajo-admin -- db info
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_PATH` (default `url_database`): sled database directory
//! - `URL_PREFIX` (default `https://bajo`): prefix of printed short URLs

use bajo::application::services::{RedirectService, Resolution, ShortenService};
use bajo::config::{DEFAULT_DATABASE_PATH, DEFAULT_URL_PREFIX};
use bajo::domain::repositories::UrlStore;
use bajo::infrastructure::persistence::SledUrlStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing bajo's URL database.
#[derive(Parser)]
#[command(name = "bajo-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// sled database directory (overrides DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Show the URL bound to a key
    Get {
        key: String,
    },

    /// Shorten a URL
    Shorten {
        url: String,

        /// Custom key (at most 32 bytes)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Delete a key
    Delete {
        key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List mappings in key order
    List {
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_path = cli
        .database
        .or_else(|| std::env::var("DATABASE_PATH").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());
    let url_prefix = std::env::var("URL_PREFIX")
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_URL_PREFIX.to_string());

    let store = Arc::new(
        SledUrlStore::open(&database_path).context("Unable to access URL database")?,
    );

    let outcome = match cli.command {
        Commands::Get { key } => get_key(store.clone(), &key).await,
        Commands::Shorten { url, key } => {
            shorten(store.clone(), &url_prefix, &url, key.as_deref()).await
        }
        Commands::Delete { key, yes } => delete_key(store.clone(), &key, yes).await,
        Commands::List { limit } => list_keys(&store, limit),
        Commands::Db {
            action: DbAction::Info,
        } => db_info(&store),
    };

    store.close().await.context("Failed to close URL database")?;

    outcome
}

/// Prints the target of `key`.
async fn get_key(store: Arc<SledUrlStore>, key: &str) -> Result<()> {
    let service = RedirectService::new(store);

    match service.resolve(key).await {
        Resolution::Found(target) => {
            println!("  {} {} {}", key.cyan(), "->".bright_black(), target);
        }
        Resolution::NotFound => {
            println!("{}", format!("Key '{}' is not bound", key).yellow());
        }
        Resolution::InternalFailure => {
            anyhow::bail!("Failed to read key '{}'", key);
        }
    }

    Ok(())
}

/// Binds a URL through the same path as `POST /shorten`.
async fn shorten(
    store: Arc<SledUrlStore>,
    url_prefix: &str,
    url: &str,
    key: Option<&str>,
) -> Result<()> {
    anyhow::ensure!(!url.is_empty(), "URL must not be empty");

    let service = ShortenService::new(store, url_prefix);
    let link = service
        .shorten(url, key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "Short link ready".green().bold());
    println!("  {}", link.short_url.bright_yellow());

    Ok(())
}

/// Deletes `key` after confirmation.
///
/// This is the only way a mapping is ever removed.
async fn delete_key(store: Arc<SledUrlStore>, key: &str, skip_confirm: bool) -> Result<()> {
    let target = match store.get(key.as_bytes()).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if e.is_not_found() => {
            println!("{}", format!("Key '{}' is not bound", key).yellow());
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to read key"),
    };

    println!("  Key:    {}", key.cyan());
    println!("  Target: {}", target);
    println!();
    println!(
        "{}",
        "Clients holding this short URL will get 404 afterwards."
            .red()
            .bold()
    );

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this key?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    store
        .delete(key.as_bytes())
        .await
        .context("Failed to delete key")?;

    println!("{}", "Key deleted".green().bold());

    Ok(())
}

/// Lists up to `limit` mappings in key order.
fn list_keys(store: &SledUrlStore, limit: usize) -> Result<()> {
    let records = store.entries(limit).context("Failed to list keys")?;

    if records.is_empty() {
        println!("{}", "  No keys found".yellow());
        return Ok(());
    }

    println!(
        "  {:<34} {}",
        "Key".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for record in &records {
        println!("  {:<34} {}", record.key.cyan(), record.target);
    }

    println!();
    println!(
        "  Showing {} of {}",
        records.len().to_string().bright_white().bold(),
        store.len()
    );

    Ok(())
}

/// Displays database statistics.
fn db_info(store: &SledUrlStore) -> Result<()> {
    let path = store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(temporary)".to_string());
    let size = store
        .size_on_disk()
        .context("Failed to read database size")?;

    println!("{}", "URL database".bright_blue().bold());
    println!();
    println!("  Path:    {}", path.bright_white());
    println!(
        "  Entries: {}",
        store.len().to_string().bright_green().bold()
    );
    println!("  Size:    {} bytes", size.to_string().bright_green());
    println!();

    Ok(())
}
