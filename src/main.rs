//! Summora CLI - article extraction and summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments, mapping errors to user-facing messages, and
//! rendering results.

use clap::{Parser, Subcommand};
use colored::Colorize;
use summora::relay::RelayError;
use summora::shell::ShellError;
use summora::{extractor::ExtractError, History, Settings, Shell, SummaryResult};

#[derive(Parser)]
#[command(name = "summora")]
#[command(author, version, about = "CLI for article extraction and LLM summarisation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a webpage by URL
    Summarise {
        /// URL to summarise
        url: String,
        /// Show raw extracted text instead of summarising
        #[arg(long)]
        raw: bool,
    },
    /// List past summaries, newest first
    History,
    /// List favourite summaries
    Favourites,
    /// Pin or unpin a past summary
    Favourite {
        /// URL of the stored summary
        url: String,
    },
    /// Delete a stored summary
    Delete {
        /// URL of the stored summary
        url: String,
    },
    /// Remove all stored summaries
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load()?;

    match cli.command {
        Commands::Summarise { url, raw } => {
            let shell = Shell::new(settings)?;
            println!("Fetching: {}", url);

            let content = match shell.request_extraction(&url).await {
                Ok(content) => content,
                Err(e) => {
                    report_error(&e);
                    std::process::exit(1);
                }
            };

            if raw {
                println!("\n=== {} ===\n", content.title);
                println!("{}", content.content);
                println!(
                    "\n--- {} characters, ~{} min read ---",
                    content.content.len(),
                    content.reading_time
                );
                return Ok(());
            }

            println!(
                "Summarising {} characters (~{} min read)...\n",
                content.content.len(),
                content.reading_time
            );

            match shell.request_summary(&content).await {
                Ok(result) => {
                    let history = History::open(shell.settings().storage_path())?;
                    if let Err(e) = history.store(&result) {
                        eprintln!("Warning: failed to record summary in history: {}", e);
                    }
                    print_summary(&result);
                }
                Err(e) => {
                    report_error(&e);
                    std::process::exit(1);
                }
            }
        }
        Commands::History => {
            let history = History::open(settings.storage_path())?;
            let entries = history.list_all()?;
            if entries.is_empty() {
                println!("No stored summaries found.");
            } else {
                println!("Stored summaries ({}):\n", entries.len());
                for stored in entries {
                    print_history_line(&stored.result, stored.favourite, &stored.created_at);
                }
            }
        }
        Commands::Favourites => {
            let history = History::open(settings.storage_path())?;
            let entries = history.favourites()?;
            if entries.is_empty() {
                println!("No favourites yet.");
            } else {
                println!("Favourites ({}):\n", entries.len());
                for stored in entries {
                    print_history_line(&stored.result, stored.favourite, &stored.created_at);
                }
            }
        }
        Commands::Favourite { url } => {
            let history = History::open(settings.storage_path())?;
            match history.toggle_favourite(&url) {
                Ok(true) => println!("Pinned: {}", url),
                Ok(false) => println!("Unpinned: {}", url),
                Err(e) => {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Delete { url } => {
            let history = History::open(settings.storage_path())?;
            if history.delete(&url)? {
                println!("Deleted: {}", url);
            } else {
                println!("No stored summary for: {}", url);
            }
        }
        Commands::Clear => {
            let history = History::open(settings.storage_path())?;
            history.clear()?;
            println!("History cleared.");
        }
    }

    Ok(())
}

fn print_summary(result: &SummaryResult) {
    println!("=== {} ===\n", result.title.bold());
    println!("{}\n", result.summary);
    println!(
        "{}",
        format!(
            "~{} min saved | {} ({}) | {}",
            result.time_saved, result.provider, result.model, result.url
        )
        .dimmed()
    );
}

fn print_history_line(
    result: &SummaryResult,
    favourite: bool,
    created_at: &chrono::DateTime<chrono::Utc>,
) {
    let marker = if favourite { "★" } else { " " };
    println!(
        "{} {} ({})",
        marker,
        result.title.bold(),
        created_at.format("%Y-%m-%d %H:%M")
    );
    println!("   {}", result.url);
}

/// Map shell errors to the messages users actually see
fn report_error(error: &ShellError) {
    let message = match error {
        ShellError::Extract(ExtractError::NoContent) => {
            "Could not extract content from this page.".to_string()
        }
        ShellError::Extract(ExtractError::Fetch(e)) => {
            format!("Could not fetch the page: {}", e)
        }
        ShellError::Relay(RelayError::Config(e)) => format!(
            "{}. Add it to summora.toml or set the provider's API key environment variable.",
            e
        ),
        ShellError::Relay(RelayError::Provider(message)) => {
            format!("The provider rejected the request: {}", message)
        }
        ShellError::Relay(RelayError::Network(_)) => {
            "Could not reach the provider. Check your connection and try again.".to_string()
        }
        ShellError::Relay(RelayError::Timeout) => {
            "The provider took too long to respond. Try again.".to_string()
        }
        ShellError::Relay(RelayError::MalformedResponse(provider)) => {
            format!("Unexpected response from {}.", provider)
        }
    };
    eprintln!("{} {}", "Error:".red().bold(), message);
}
