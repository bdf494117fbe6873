//! Command-line argument parsing for KBase
//!
//! Provides clap-based CLI with subcommands for document management,
//! search and question answering.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

/// KBase - team knowledge base with AI summaries, tags and semantic search
#[derive(Parser, Debug)]
#[command(name = "kbase")]
#[command(version = "0.3.0")]
#[command(about = "Team knowledge base with AI-generated summaries, tags and semantic search", long_about = None)]
pub struct Args {
    /// Provider base URL (overrides config)
    #[arg(long)]
    pub url: Option<String>,

    /// Acting user name
    #[arg(short, long, default_value = "local")]
    pub user: String,

    /// Act with admin rights
    #[arg(long)]
    pub admin: bool,

    /// Data directory (overrides config)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new document
    Add {
        /// Document title
        title: String,

        /// Document content (inline)
        #[arg(conflicts_with = "file")]
        content: Option<String>,

        /// Read content from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Edit an existing document
    Edit {
        /// Document id
        id: Uuid,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New content (inline)
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,

        /// Read new content from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Remove a document
    Remove {
        /// Document id
        id: Uuid,
    },

    /// Regenerate a document's summary and tags from its current content
    Regenerate {
        /// Document id
        id: Uuid,
    },

    /// Show a document with its summary, tags and version history
    Show {
        /// Document id
        id: Uuid,
    },

    /// List documents
    List {
        /// Only documents carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Search the knowledge base
    Search {
        /// Query text
        query: String,

        /// Use semantic (embedding-based) ranking
        #[arg(short, long)]
        semantic: bool,
    },

    /// Ask a question over the whole corpus
    Ask {
        /// The question
        question: String,
    },

    /// Show recent activity
    Activity {
        /// Maximum entries to show
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// Check provider availability
    Status,

    /// Display current configuration
    Config,
}
