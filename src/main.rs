//! KBase - CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use kbase::cli::{self, Args, Commands};
use kbase::config::Config;
use kbase::documents::{DocumentManager, StorePersistence};
use kbase::enrich::Enricher;
use kbase::provider::OllamaProvider;
use kbase::search::{RankingParams, SearchRequest, SearchService, SemanticRanker};
use kbase::telemetry::TelemetryCollector;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = &args.url {
        config.provider.base_url = url.clone();
    }
    if let Some(dir) = &args.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }

    let data_dir = config.data_dir()?;
    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    let provider = Arc::new(
        OllamaProvider::new(&config.provider).context("Failed to create provider client")?,
    );
    let telemetry = TelemetryCollector::new();
    let enricher = Enricher::new(provider.clone(), telemetry.clone());
    let persistence = StorePersistence::new(data_dir.clone())?;
    let manager = DocumentManager::with_persistence(enricher, persistence)?;

    let user = cli::resolve_user(&data_dir, &args.user, args.admin)?;

    match args.command {
        Commands::Add {
            title,
            content,
            file,
        } => {
            let content = read_content(content, file)?;
            let spinner = spinner("Generating summary and tags");
            let doc = manager.create(title, content, user).await?;
            spinner.finish_and_clear();

            println!("{} {}", "Created".green().bold(), doc.id);
            cli::print_document(&doc);
        }

        Commands::Edit {
            id,
            title,
            content,
            file,
        } => {
            let content = match (content, file) {
                (None, None) => None,
                (content, file) => Some(read_content(content, file)?),
            };

            let spinner = spinner("Updating document");
            let doc = manager.update(id, &user, title, content).await?;
            spinner.finish_and_clear();

            println!("{} {}", "Updated".green().bold(), doc.id);
            cli::print_document(&doc);
        }

        Commands::Remove { id } => {
            manager.delete(id, &user).await?;
            println!("{} {}", "Removed".red().bold(), id);
        }

        Commands::Regenerate { id } => {
            let spinner = spinner("Regenerating summary and tags");
            let doc = manager.regenerate(id, &user).await?;
            spinner.finish_and_clear();

            println!("{} {}", "Regenerated".green().bold(), doc.id);
            cli::print_document(&doc);
        }

        Commands::Show { id } => {
            let doc = manager.get(id).await?;
            cli::print_document(&doc);
        }

        Commands::List { tag } => {
            let docs = manager.list(tag.as_deref()).await;
            if docs.is_empty() {
                println!("{}", "No documents found.".dimmed());
            }
            for doc in &docs {
                cli::print_document_line(doc);
            }
        }

        Commands::Search { query, semantic } => {
            let ranker = SemanticRanker::with_params(
                provider.clone(),
                telemetry.clone(),
                RankingParams {
                    threshold: config.search.similarity_threshold,
                },
            );
            let service = SearchService::new(ranker, telemetry.clone());

            let candidates = manager.all().await;
            let request = SearchRequest { query, semantic };

            let spinner = if semantic {
                Some(spinner("Ranking documents"))
            } else {
                None
            };
            let response = service.search(&request, candidates).await?;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }

            let stats = telemetry.stats();
            if stats.provider_fallbacks > 0 {
                println!(
                    "{}",
                    "Provider unavailable, showing unranked results.".yellow()
                );
            } else if stats.candidates_skipped > 0 {
                println!(
                    "{}",
                    format!(
                        "{} document(s) skipped (provider errors), results partial.",
                        stats.candidates_skipped
                    )
                    .yellow()
                );
            }

            if response.documents.is_empty() {
                println!("{}", "No matches.".dimmed());
            }
            for doc in &response.documents {
                cli::print_document_line(doc);
            }
        }

        Commands::Ask { question } => {
            let spinner = spinner("Thinking");
            let answer = manager.ask(&question).await;
            spinner.finish_and_clear();
            println!("{}", answer);
        }

        Commands::Activity { limit } => {
            let entries = manager.recent_activity(limit).await;
            if entries.is_empty() {
                println!("{}", "No activity yet.".dimmed());
            }
            for entry in &entries {
                cli::print_activity(entry);
            }
        }

        Commands::Status => {
            let available = provider.is_available().await;
            if available {
                println!(
                    "{} provider reachable at {}",
                    "OK".green().bold(),
                    provider.base_url()
                );
            } else {
                println!(
                    "{} provider unreachable at {}",
                    "DOWN".red().bold(),
                    provider.base_url()
                );
                println!("Search degrades to keyword/unranked results while the provider is down.");
            }
            println!("{} documents in store", manager.len().await);
        }

        Commands::Config => {
            let toml = toml::to_string_pretty(&config).context("Failed to render config")?;
            println!("{}", toml);
            println!("{} {}", "config file:".dimmed(), Config::config_path()?.display());
        }
    }

    Ok(())
}

/// Resolve inline content or file content
fn read_content(content: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (content, file) {
        (Some(content), None) => Ok(content),
        (None, Some(path)) => {
            fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
        }
        (None, None) => anyhow::bail!("Provide content inline or with --file"),
        (Some(_), Some(_)) => unreachable!("clap conflicts_with prevents this"),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("static template is valid"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
