//! KBase - Team Knowledge Base
//!
//! Backend for a team knowledge base: documents with AI-generated
//! summaries and tags, keyword and semantic search, and question
//! answering over the corpus.
//!
//! # Architecture
//!
//! - **documents**: corpus types, store, persistence, lifecycle
//! - **provider**: embedding and generation capabilities over HTTP
//! - **search**: semantic ranking engine + keyword filter
//! - **enrich**: summaries, tags, question answering
//! - **telemetry**: in-process event collection

pub mod config;
pub mod documents;
pub mod enrich;
pub mod errors;
pub mod provider;
pub mod search;
pub mod telemetry;

pub mod cli;

// Re-export commonly used types
pub use errors::{KbaseError, ProviderError, Result};
