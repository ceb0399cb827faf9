//! CLI administration tool for linkgate.
//!
//! Manages links directly against the configured store, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a link, prompting for a secret
//! cargo run --bin admin -- link create https://example.com --secret
//!
//! # Create an expiring link
//! cargo run --bin admin -- link create https://example.com --expires 2030-01-01T00:00:00Z
//!
//! # Show statistics
//! cargo run --bin admin -- link stats 3f9a0c12be
//!
//! # Invalidate without confirmation
//! cargo run --bin admin -- link invalidate 3f9a0c12be -y
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`linkgate::config`].

use linkgate::application::services::{CreateLink, LinkService};
use linkgate::config::{self, Config, StoreKind};
use linkgate::domain::repositories::LinkRepository;
use linkgate::server;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Password};

/// CLI tool for managing linkgate.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a new short link
    Create {
        /// Target URL
        url: String,

        /// Protect the link with a secret; prompts when given without a value
        #[arg(short, long, num_args = 0..=1, default_missing_value = "")]
        secret: Option<String>,

        /// Expiration instant (RFC 3339, e.g. 2030-01-01T00:00:00Z)
        #[arg(short, long, value_parser = parse_expiration)]
        expires: Option<DateTime<Utc>>,
    },

    /// Show link statistics
    Stats {
        /// Short token
        token: String,
    },

    /// Permanently disable a link
    Invalidate {
        /// Short token
        token: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, config: &Config) -> Result<()> {
    if config.store == StoreKind::Memory {
        println!(
            "{}",
            "⚠️  STORE=memory: changes are discarded when this command exits".yellow()
        );
    }

    let repository = server::connect_store(config).await?;
    let service = LinkService::new(repository, server::service_config(config));

    match action {
        LinkAction::Create {
            url,
            secret,
            expires,
        } => create_link(&service, url, secret, expires).await?,
        LinkAction::Stats { token } => show_stats(&service, &token).await?,
        LinkAction::Invalidate { token, yes } => invalidate_link(&service, &token, yes).await?,
    }

    Ok(())
}

/// Creates a link, prompting for the secret with hidden input if requested.
async fn create_link(
    service: &LinkService<dyn LinkRepository>,
    url: String,
    secret: Option<String>,
    expires: Option<DateTime<Utc>>,
) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    let secret = match secret {
        Some(s) if s.is_empty() => Some(
            Password::new()
                .with_prompt("Secret")
                .with_confirmation("Repeat secret", "Secrets do not match")
                .interact()?,
        ),
        other => other,
    };

    let created = service
        .create_link(CreateLink {
            original_url: url,
            secret,
            expiration_date: expires,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!("  Link:   {}", created.link.bright_yellow().bold());
    println!("  Token:  {}", created.token.cyan());
    println!("  Target: {}", created.original_url.bright_white());
    if let Some(expires) = expires {
        println!(
            "  Expires: {}",
            expires.format("%Y-%m-%d %H:%M UTC").to_string().bright_black()
        );
    }
    println!();

    Ok(())
}

/// Displays statistics of a single link.
async fn show_stats(service: &LinkService<dyn LinkRepository>, token: &str) -> Result<()> {
    println!("{}", "📊 Link Statistics".bright_blue().bold());
    println!();

    let stats = service
        .get_stats(token)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let status = if stats.is_valid {
        "VALID".green()
    } else {
        "INVALIDATED".red()
    };

    println!("  Token:   {}", stats.token.cyan());
    println!("  Target:  {}", stats.original_url.bright_white());
    println!(
        "  Clicks:  {}",
        stats.clicks.to_string().bright_green().bold()
    );
    println!("  Status:  {}", status);
    println!(
        "  Created: {}",
        stats
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    match stats.expiration_date {
        Some(at) if at < Utc::now() => println!(
            "  Expires: {} {}",
            at.format("%Y-%m-%d %H:%M").to_string().bright_black(),
            "(expired)".red()
        ),
        Some(at) => println!(
            "  Expires: {}",
            at.format("%Y-%m-%d %H:%M").to_string().bright_black()
        ),
        None => println!("  Expires: {}", "never".bright_black()),
    }
    println!();

    Ok(())
}

/// Invalidates a link after confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Invalidation cannot be undone
async fn invalidate_link(
    service: &LinkService<dyn LinkRepository>,
    token: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔒 Invalidate Link".bright_blue().bold());
    println!();

    let stats = service
        .get_stats(token)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if !stats.is_valid {
        println!("{}", "⚠️  This link is already invalidated".yellow());
        return Ok(());
    }

    println!("  Token:  {}", stats.token.cyan());
    println!("  Target: {}", stats.original_url.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Invalidate this link? This cannot be undone")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .invalidate(token)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to invalidate link: {}", e))?;

    println!();
    println!("{}", "✅ Link invalidated successfully!".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            if config.store != StoreKind::Postgres {
                anyhow::bail!("db check requires STORE=postgres");
            }

            println!("{}", "🔍 Checking database connection...".bright_blue());

            let pool = server::connect_pool(config).await?;
            sqlx::query("SELECT 1")
                .execute(&pool)
                .await
                .context("Database query failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

fn parse_expiration(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected RFC 3339 timestamp: {e}"))
}
