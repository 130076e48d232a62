//! CLI administration tool for affiliate-links-api.
//!
//! Inspects and prunes stored affiliate links without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links, newest first
//! cargo run --bin admin -- links list
//!
//! # List links sharing a tag
//! cargo run --bin admin -- links list --tag electronics --tag books
//!
//! # List links of one merchant
//! cargo run --bin admin -- links merchant amazon
//!
//! # Delete a link
//! cargo run --bin admin -- links delete "https://example.com/ref123"
//!
//! # Check the graph store connection
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `affiliate_links_api::config`.

use affiliate_links_api::application::services::AffiliateService;
use affiliate_links_api::config;
use affiliate_links_api::domain::entities::{AffiliateLink, LinkFilter};
use affiliate_links_api::server::{build_service, connect_store};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing affiliate links.
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
    /// Inspect and delete affiliate links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Graph store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List links, newest first
    List {
        /// Only show links carrying at least one of these tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List links of one merchant
    Merchant {
        /// Merchant name (case-sensitive)
        merchant: String,
    },

    /// Delete a link by its affiliate URL
    Delete {
        /// Affiliate URL of the link
        affiliate_url: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Store subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check the graph store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let store = connect_store(&config).await?;
    let service = build_service(&config, store);

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &service).await?,
        Commands::Store { action } => handle_store_action(action, &service).await?,
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_links_action(action: LinksAction, service: &AffiliateService) -> Result<()> {
    match action {
        LinksAction::List { tags } => {
            println!("{}", "📋 Affiliate Links".bright_blue().bold());
            println!();

            let links = service
                .list_links(LinkFilter::by_tags(tags))
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

            print_links(&links);
        }
        LinksAction::Merchant { merchant } => {
            println!(
                "{} {}",
                "🏷  Links for merchant".bright_blue().bold(),
                merchant.cyan()
            );
            println!();

            let links = service
                .list_by_merchant(&merchant)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

            print_links(&links);
        }
        LinksAction::Delete { affiliate_url, yes } => {
            delete_link(service, affiliate_url, yes).await?;
        }
    }

    Ok(())
}

/// Prints links as a table.
///
/// # Output Format
///
/// ```text
///   Created            Merchant    Tags                     Affiliate URL
///   ─────────────────────────────────────────────────────────────────────
///   2024-01-15 10:30   amazon      electronics, gadgets     https://example.com/ref123
/// ```
fn print_links(links: &[AffiliateLink]) {
    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return;
    }

    println!(
        "  {:<18} {:<11} {:<24} {}",
        "Created".bright_white().bold(),
        "Merchant".bright_white().bold(),
        "Tags".bright_white().bold(),
        "Affiliate URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for link in links {
        let tags = link.tags.as_deref().unwrap_or_default().join(", ");

        println!(
            "  {:<18} {:<11} {:<24} {}",
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.merchant.green(),
            tags,
            link.affiliate_url.as_deref().unwrap_or("-").cyan()
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(
    service: &AffiliateService,
    affiliate_url: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑  Delete Affiliate Link".bright_blue().bold());
    println!();
    println!("  Affiliate URL: {}", affiliate_url.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(&affiliate_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted (if it existed)".green().bold());
    println!();

    Ok(())
}

/// Handles graph store diagnostic commands.
async fn handle_store_action(action: StoreAction, service: &AffiliateService) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!("{}", "🔍 Checking graph store connection...".bright_blue());

            if !service.store_healthy().await {
                anyhow::bail!("Graph store is not reachable");
            }

            println!("{}", "✅ Graph store connection OK".green().bold());
        }
    }

    Ok(())
}
