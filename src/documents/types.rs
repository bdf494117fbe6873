//! Core data types for documents and their lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for documents
pub type DocumentId = Uuid;

/// Maximum number of prior content snapshots kept per document
pub const MAX_VERSIONS: usize = 10;

/// Role of a user, controls mutation rights on documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular team member, may only mutate own documents
    Member,
    /// Administrator, may mutate any document
    Admin,
}

/// Reference to the user performing or owning an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// User identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// User role
    pub role: Role,
}

impl UserRef {
    /// Create a regular member reference
    pub fn member(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role: Role::Member,
        }
    }

    /// Create an admin reference
    pub fn admin(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role: Role::Admin,
        }
    }
}

/// Snapshot of a document's prior content, taken before a content edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentVersion {
    /// The content as it was before the edit
    pub content: String,
    /// User who made the edit that displaced this content
    pub updated_by: Uuid,
    /// When the snapshot was taken
    pub updated_at: DateTime<Utc>,
}

/// A knowledge base document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier
    pub id: DocumentId,
    /// Document title
    pub title: String,
    /// Current textual content
    pub content: String,
    /// AI-generated summary
    pub summary: Option<String>,
    /// AI-generated tags
    pub tags: Vec<String>,
    /// Owning user
    pub created_by: UserRef,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Prior content snapshots, oldest first, capped at [`MAX_VERSIONS`].
    /// The current content is never inside this list.
    pub versions: Vec<DocumentVersion>,
}

impl Document {
    /// Create a new document with no versions yet
    pub fn new(title: String, content: String, created_by: UserRef) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            summary: None,
            tags: Vec::new(),
            created_by,
            created_at: now,
            updated_at: now,
            versions: Vec::new(),
        }
    }

    /// Whether the given user may mutate this document
    pub fn can_mutate(&self, user: &UserRef) -> bool {
        user.role == Role::Admin || self.created_by.id == user.id
    }

    /// Snapshot the current content into the version list.
    ///
    /// Call before replacing `content`. Keeps only the most recent
    /// [`MAX_VERSIONS`] snapshots.
    pub fn snapshot_content(&mut self, updated_by: Uuid) {
        self.versions.push(DocumentVersion {
            content: self.content.clone(),
            updated_by,
            updated_at: Utc::now(),
        });

        if self.versions.len() > MAX_VERSIONS {
            let excess = self.versions.len() - MAX_VERSIONS;
            self.versions.drain(..excess);
        }
    }
}

/// Action recorded in the activity feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Created,
    Updated,
}

/// Entry in the recent activity feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Document the activity refers to
    pub document_id: DocumentId,
    /// Document title at the time of listing
    pub document_title: String,
    /// Whether the latest touch was a create or an update
    pub action: ActivityAction,
    /// Name of the document owner
    pub user: String,
    /// When the document was last touched
    pub timestamp: DateTime<Utc>,
}

/// Pairing of a document with its similarity to a query.
///
/// Transient, constructed per ranking request; scores never leave the
/// ranking engine.
#[derive(Debug, Clone)]
pub struct SimilarityResult {
    pub document: Document,
    /// Cosine similarity in [-1, 1]
    pub score: f32,
}
