//! In-memory document store
//!
//! Holds the full document corpus, enforces ownership on mutation and
//! maintains the append-only version history. Persistence to disk is
//! handled separately by [`crate::documents::persistence`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::documents::types::{
    ActivityAction, ActivityEntry, Document, DocumentId, UserRef,
};
use crate::errors::{KbaseError, Result};

/// In-memory store for the document corpus
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DocumentStore {
    documents: HashMap<DocumentId, Document>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    /// Number of documents in the store
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Insert a freshly created document
    pub fn insert(&mut self, document: Document) -> DocumentId {
        let id = document.id;
        self.documents.insert(id, document);
        id
    }

    /// Get a document by id
    pub fn get(&self, id: DocumentId) -> Result<&Document> {
        self.documents.get(&id).ok_or(KbaseError::NotFound(id))
    }

    /// Get a mutable document, checking the actor's mutation rights
    pub fn get_mut_authorized(
        &mut self,
        id: DocumentId,
        actor: &UserRef,
        action: &str,
    ) -> Result<&mut Document> {
        let document = self
            .documents
            .get_mut(&id)
            .ok_or(KbaseError::NotFound(id))?;

        if !document.can_mutate(actor) {
            return Err(KbaseError::Forbidden {
                user: actor.name.clone(),
                action: action.to_string(),
            });
        }

        Ok(document)
    }

    /// Remove a document, checking the actor's mutation rights
    pub fn remove(&mut self, id: DocumentId, actor: &UserRef) -> Result<Document> {
        self.get_mut_authorized(id, actor, "delete")?;
        self.documents.remove(&id).ok_or(KbaseError::NotFound(id))
    }

    /// All documents, most recently created first
    pub fn all(&self) -> Vec<Document> {
        let mut docs: Vec<Document> = self.documents.values().cloned().collect();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        docs
    }

    /// Documents carrying the given tag (exact match)
    pub fn by_tag(&self, tag: &str) -> Vec<Document> {
        let mut docs: Vec<Document> = self
            .documents
            .values()
            .filter(|d| d.tags.iter().any(|t| t == tag))
            .cloned()
            .collect();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        docs
    }

    /// Most recently updated documents as an activity feed
    pub fn recent_activity(&self, limit: usize) -> Vec<ActivityEntry> {
        let mut docs: Vec<&Document> = self.documents.values().collect();
        docs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        docs.into_iter()
            .take(limit)
            .map(|doc| ActivityEntry {
                document_id: doc.id,
                document_title: doc.title.clone(),
                action: if doc.created_at == doc.updated_at {
                    ActivityAction::Created
                } else {
                    ActivityAction::Updated
                },
                user: doc.created_by.name.clone(),
                timestamp: doc.updated_at,
            })
            .collect()
    }
}
