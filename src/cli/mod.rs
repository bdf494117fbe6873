//! CLI layer: argument parsing, local identity and display helpers

pub mod args;

pub use args::{Args, Commands};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::documents::types::{ActivityEntry, Document, Role, UserRef};

/// Known local identities, persisted so document ownership survives
/// across runs
#[derive(Debug, Default, Serialize, Deserialize)]
struct IdentityFile {
    users: HashMap<String, UserRef>,
}

/// Resolve (or create) a stable identity for the acting user.
///
/// Admin rights are per invocation, not persisted.
pub fn resolve_user(data_dir: &Path, name: &str, admin: bool) -> Result<UserRef> {
    let path = data_dir.join("identities.json");

    let mut identities: IdentityFile = if path.exists() {
        let json = fs::read_to_string(&path).context("Failed to read identity file")?;
        serde_json::from_str(&json).context("Failed to parse identity file")?
    } else {
        IdentityFile::default()
    };

    let mut user = identities
        .users
        .get(name)
        .cloned()
        .unwrap_or_else(|| UserRef::member(name));

    if !identities.users.contains_key(name) {
        identities.users.insert(name.to_string(), user.clone());
        let json =
            serde_json::to_string_pretty(&identities).context("Failed to serialize identities")?;
        fs::write(&path, json).context("Failed to write identity file")?;
    }

    user.role = if admin { Role::Admin } else { Role::Member };
    Ok(user)
}

/// Print a one-line document listing entry
pub fn print_document_line(doc: &Document) {
    let tags = if doc.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", doc.tags.join(", "))
    };

    println!(
        "{}  {}{}",
        doc.id.to_string().dimmed(),
        doc.title.bold(),
        tags.cyan()
    );
}

/// Print a full document view
pub fn print_document(doc: &Document) {
    println!("{}", doc.title.bold().underline());
    println!("{} {}", "id:".dimmed(), doc.id);
    println!(
        "{} {} ({})",
        "owner:".dimmed(),
        doc.created_by.name,
        match doc.created_by.role {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    );
    println!(
        "{} {}  {} {}",
        "created:".dimmed(),
        doc.created_at.format("%Y-%m-%d %H:%M"),
        "updated:".dimmed(),
        doc.updated_at.format("%Y-%m-%d %H:%M")
    );

    if let Some(summary) = &doc.summary {
        println!("\n{}\n{}", "Summary".green().bold(), summary);
    }

    if !doc.tags.is_empty() {
        println!("\n{} {}", "Tags".green().bold(), doc.tags.join(", ").cyan());
    }

    println!("\n{}\n{}", "Content".green().bold(), doc.content);

    if !doc.versions.is_empty() {
        println!("\n{}", "Versions".green().bold());
        for (i, version) in doc.versions.iter().enumerate().rev() {
            println!(
                "  {} {} ({} chars)",
                format!("#{}", i + 1).dimmed(),
                version.updated_at.format("%Y-%m-%d %H:%M"),
                version.content.chars().count()
            );
        }
    }
}

/// Print an activity feed entry
pub fn print_activity(entry: &ActivityEntry) {
    let action = match entry.action {
        crate::documents::types::ActivityAction::Created => "created".green(),
        crate::documents::types::ActivityAction::Updated => "updated".yellow(),
    };

    println!(
        "{}  {} {} {} ({})",
        entry.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
        entry.user.bold(),
        action,
        entry.document_title,
        entry.document_id.to_string().dimmed()
    );
}
