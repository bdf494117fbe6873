//! Document lifecycle coordination
//!
//! Wires the store, the enrichment operations and disk persistence
//! together: creating a document generates its summary and tags,
//! editing content snapshots the prior revision and regenerates both.

use anyhow::{Context, Result};
use tokio::sync::Mutex;

use crate::documents::persistence::StorePersistence;
use crate::documents::store::DocumentStore;
use crate::documents::types::{ActivityEntry, Document, DocumentId, UserRef};
use crate::enrich::Enricher;

/// Manager over the document corpus
pub struct DocumentManager {
    store: Mutex<DocumentStore>,
    enricher: Enricher,
    persistence: Option<StorePersistence>,
}

impl DocumentManager {
    /// Create a manager with an empty in-memory store
    pub fn new(enricher: Enricher) -> Self {
        Self {
            store: Mutex::new(DocumentStore::new()),
            enricher,
            persistence: None,
        }
    }

    /// Create a manager backed by disk persistence, loading any
    /// existing corpus
    pub fn with_persistence(enricher: Enricher, persistence: StorePersistence) -> Result<Self> {
        let store = persistence
            .load()
            .context("Failed to load document store")?;

        Ok(Self {
            store: Mutex::new(store),
            enricher,
            persistence: Some(persistence),
        })
    }

    /// Create a document, generating its summary and tags
    pub async fn create(
        &self,
        title: String,
        content: String,
        author: UserRef,
    ) -> Result<Document> {
        let (summary, tags) = tokio::join!(
            self.enricher.summarize(&content),
            self.enricher.suggest_tags(&content),
        );

        let mut document = Document::new(title, content, author);
        document.summary = Some(summary);
        document.tags = tags;

        let created = document.clone();
        {
            let mut store = self.store.lock().await;
            store.insert(document);
            self.persist(&store)?;
        }

        Ok(created)
    }

    /// Update a document's title and/or content.
    ///
    /// Content changes snapshot the prior revision and regenerate the
    /// summary and tags; an identical content value changes nothing.
    pub async fn update(
        &self,
        id: DocumentId,
        actor: &UserRef,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Document> {
        let changed_content = {
            let mut store = self.store.lock().await;
            // Authorize before any provider work
            let document = store.get_mut_authorized(id, actor, "update")?;
            match content {
                Some(new) if new != document.content => Some(new),
                _ => None,
            }
        };

        // Regenerate outside the store lock; enrichment is a network
        // round trip
        let enriched = match changed_content {
            Some(new_content) => {
                let (summary, tags) = tokio::join!(
                    self.enricher.summarize(&new_content),
                    self.enricher.suggest_tags(&new_content),
                );
                Some((new_content, summary, tags))
            }
            None => None,
        };

        let mut store = self.store.lock().await;
        let document = store.get_mut_authorized(id, actor, "update")?;

        if let Some(new_title) = title {
            document.title = new_title;
        }

        if let Some((new_content, summary, tags)) = enriched {
            // Re-check against the live document: a concurrent update
            // may have committed this content while the lock was
            // released for enrichment. Snapshotting then would put the
            // current content into the version list.
            if new_content != document.content {
                document.snapshot_content(actor.id);
                document.content = new_content;
                document.summary = Some(summary);
                document.tags = tags;
            }
        }

        document.updated_at = chrono::Utc::now();
        let updated = document.clone();

        self.persist(&store)?;
        Ok(updated)
    }

    /// Regenerate the summary and tags for a document's current
    /// content, without editing it.
    ///
    /// No version snapshot is taken; the content is untouched.
    pub async fn regenerate(&self, id: DocumentId, actor: &UserRef) -> Result<Document> {
        let current_content = {
            let mut store = self.store.lock().await;
            let document = store.get_mut_authorized(id, actor, "regenerate")?;
            document.content.clone()
        };

        let (summary, tags) = tokio::join!(
            self.enricher.summarize(&current_content),
            self.enricher.suggest_tags(&current_content),
        );

        let mut store = self.store.lock().await;
        let document = store.get_mut_authorized(id, actor, "regenerate")?;
        document.summary = Some(summary);
        document.tags = tags;
        document.updated_at = chrono::Utc::now();
        let updated = document.clone();

        self.persist(&store)?;
        Ok(updated)
    }

    /// Delete a document (owner or admin only)
    pub async fn delete(&self, id: DocumentId, actor: &UserRef) -> Result<()> {
        let mut store = self.store.lock().await;
        store.remove(id, actor)?;
        self.persist(&store)?;
        Ok(())
    }

    /// Get a document by id
    pub async fn get(&self, id: DocumentId) -> Result<Document> {
        let store = self.store.lock().await;
        Ok(store.get(id)?.clone())
    }

    /// List documents, optionally filtered by tag
    pub async fn list(&self, tag: Option<&str>) -> Vec<Document> {
        let store = self.store.lock().await;
        match tag {
            Some(tag) => store.by_tag(tag),
            None => store.all(),
        }
    }

    /// The full corpus, for search
    pub async fn all(&self) -> Vec<Document> {
        self.store.lock().await.all()
    }

    /// Recent activity feed
    pub async fn recent_activity(&self, limit: usize) -> Vec<ActivityEntry> {
        self.store.lock().await.recent_activity(limit)
    }

    /// Number of documents
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Answer a question over the whole corpus
    pub async fn ask(&self, question: &str) -> String {
        let documents = self.all().await;
        self.enricher.answer(question, &documents).await
    }

    fn persist(&self, store: &DocumentStore) -> Result<()> {
        if let Some(persistence) = &self.persistence {
            persistence
                .save(store)
                .context("Failed to persist document store")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProviderError;
    use crate::provider::GenerationProvider;
    use crate::telemetry::TelemetryCollector;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Generation provider that answers tag prompts with a fixed tag
    /// list and everything else with a fixed summary.
    struct CannedProvider;

    #[async_trait]
    impl GenerationProvider for CannedProvider {
        async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
            if prompt.starts_with("Extract") {
                Ok("alpha, beta".to_string())
            } else {
                Ok("A canned summary.".to_string())
            }
        }
    }

    /// Generation provider counting every call it serves
    struct CountingProvider {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                calls: std::sync::atomic::AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationProvider for CountingProvider {
        async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
            self.calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if prompt.starts_with("Extract") {
                Ok("tag".to_string())
            } else {
                Ok("summary".to_string())
            }
        }
    }

    /// Generation provider whose answers change once switched, so a
    /// regeneration is distinguishable from the original enrichment
    struct SwitchableProvider {
        switched: std::sync::atomic::AtomicBool,
    }

    impl SwitchableProvider {
        fn new() -> Self {
            Self {
                switched: std::sync::atomic::AtomicBool::new(false),
            }
        }

        fn switch(&self) {
            self.switched
                .store(true, std::sync::atomic::Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl GenerationProvider for SwitchableProvider {
        async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
            let switched = self.switched.load(std::sync::atomic::Ordering::SeqCst);
            if prompt.starts_with("Extract") {
                Ok(if switched { "fresh" } else { "stale" }.to_string())
            } else {
                Ok(if switched {
                    "Fresh summary."
                } else {
                    "Stale summary."
                }
                .to_string())
            }
        }
    }

    fn manager() -> DocumentManager {
        let enricher = Enricher::new(Arc::new(CannedProvider), TelemetryCollector::new());
        DocumentManager::new(enricher)
    }

    #[tokio::test]
    async fn test_create_enriches_document() {
        let m = manager();
        let author = UserRef::member("alice");

        let doc = m
            .create("Title".to_string(), "Body text".to_string(), author)
            .await
            .unwrap();

        assert_eq!(doc.summary.as_deref(), Some("A canned summary."));
        assert_eq!(doc.tags, vec!["alpha", "beta"]);
        assert_eq!(m.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_content_snapshots_and_regenerates() {
        let m = manager();
        let author = UserRef::member("alice");
        let doc = m
            .create("Title".to_string(), "v1".to_string(), author.clone())
            .await
            .unwrap();

        let updated = m
            .update(doc.id, &author, None, Some("v2".to_string()))
            .await
            .unwrap();

        assert_eq!(updated.content, "v2");
        assert_eq!(updated.versions.len(), 1);
        assert_eq!(updated.versions[0].content, "v1");
        assert!(updated.updated_at > updated.created_at);
    }

    #[tokio::test]
    async fn test_update_identical_content_does_not_snapshot() {
        let m = manager();
        let author = UserRef::member("alice");
        let doc = m
            .create("Title".to_string(), "same".to_string(), author.clone())
            .await
            .unwrap();

        let updated = m
            .update(doc.id, &author, None, Some("same".to_string()))
            .await
            .unwrap();

        assert!(updated.versions.is_empty());
    }

    #[tokio::test]
    async fn test_update_title_only_does_not_snapshot() {
        let m = manager();
        let author = UserRef::member("alice");
        let doc = m
            .create("Old".to_string(), "body".to_string(), author.clone())
            .await
            .unwrap();

        let updated = m
            .update(doc.id, &author, Some("New".to_string()), None)
            .await
            .unwrap();

        assert_eq!(updated.title, "New");
        assert!(updated.versions.is_empty());
    }

    #[tokio::test]
    async fn test_update_by_stranger_is_forbidden() {
        let m = manager();
        let author = UserRef::member("alice");
        let stranger = UserRef::member("bob");
        let doc = m
            .create("Title".to_string(), "body".to_string(), author)
            .await
            .unwrap();

        let result = m
            .update(doc.id, &stranger, Some("Hijack".to_string()), None)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_forbidden_update_makes_no_provider_calls() {
        let provider = Arc::new(CountingProvider::new());
        let enricher = Enricher::new(provider.clone(), TelemetryCollector::new());
        let m = DocumentManager::new(enricher);

        let author = UserRef::member("alice");
        let stranger = UserRef::member("bob");
        let doc = m
            .create("Title".to_string(), "body".to_string(), author)
            .await
            .unwrap();

        let calls_after_create = provider.call_count();
        let result = m
            .update(doc.id, &stranger, None, Some("hijacked".to_string()))
            .await;

        // Rejected before any enrichment round trip
        assert!(result.is_err());
        assert_eq!(provider.call_count(), calls_after_create);
    }

    #[tokio::test]
    async fn test_regenerate_refreshes_summary_and_tags() {
        let provider = Arc::new(SwitchableProvider::new());
        let enricher = Enricher::new(provider.clone(), TelemetryCollector::new());
        let m = DocumentManager::new(enricher);

        let author = UserRef::member("alice");
        let doc = m
            .create("Title".to_string(), "body".to_string(), author.clone())
            .await
            .unwrap();
        assert_eq!(doc.summary.as_deref(), Some("Stale summary."));

        provider.switch();
        let regenerated = m.regenerate(doc.id, &author).await.unwrap();

        assert_eq!(regenerated.summary.as_deref(), Some("Fresh summary."));
        assert_eq!(regenerated.tags, vec!["fresh"]);
        // Content untouched, no snapshot taken
        assert_eq!(regenerated.content, "body");
        assert!(regenerated.versions.is_empty());
    }

    #[tokio::test]
    async fn test_regenerate_by_stranger_is_forbidden() {
        let provider = Arc::new(CountingProvider::new());
        let enricher = Enricher::new(provider.clone(), TelemetryCollector::new());
        let m = DocumentManager::new(enricher);

        let author = UserRef::member("alice");
        let stranger = UserRef::member("bob");
        let doc = m
            .create("Title".to_string(), "body".to_string(), author)
            .await
            .unwrap();

        let calls_after_create = provider.call_count();
        assert!(m.regenerate(doc.id, &stranger).await.is_err());
        assert_eq!(provider.call_count(), calls_after_create);
    }

    #[tokio::test]
    async fn test_delete_by_admin() {
        let m = manager();
        let author = UserRef::member("alice");
        let admin = UserRef::admin("root");
        let doc = m
            .create("Title".to_string(), "body".to_string(), author)
            .await
            .unwrap();

        m.delete(doc.id, &admin).await.unwrap();
        assert_eq!(m.len().await, 0);
    }

    #[tokio::test]
    async fn test_list_by_tag() {
        let m = manager();
        let author = UserRef::member("alice");
        m.create("Title".to_string(), "body".to_string(), author)
            .await
            .unwrap();

        assert_eq!(m.list(Some("alpha")).await.len(), 1);
        assert!(m.list(Some("missing")).await.is_empty());
        assert_eq!(m.list(None).await.len(), 1);
    }

    #[tokio::test]
    async fn test_ask_uses_corpus() {
        let m = manager();
        let author = UserRef::member("alice");
        m.create("Title".to_string(), "body".to_string(), author)
            .await
            .unwrap();

        let answer = m.ask("what is this?").await;
        assert_eq!(answer, "A canned summary.");
    }
}
