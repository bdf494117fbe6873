//! Keyword search over title, content and tags

use regex::RegexBuilder;

use crate::documents::types::Document;
use crate::errors::{KbaseError, Result};

/// Case-insensitive keyword filter.
///
/// The query is matched literally (regex-escaped) against a document's
/// title, content and every tag; any hit includes the document. Input
/// order is preserved.
pub fn keyword_filter(query: &str, candidates: Vec<Document>) -> Result<Vec<Document>> {
    let pattern = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .map_err(|e| KbaseError::InvalidInput(format!("bad search query: {}", e)))?;

    Ok(candidates
        .into_iter()
        .filter(|doc| {
            pattern.is_match(&doc.title)
                || pattern.is_match(&doc.content)
                || doc.tags.iter().any(|tag| pattern.is_match(tag))
        })
        .collect())
}
