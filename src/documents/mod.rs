//! Documents: types, store, persistence and lifecycle management

pub mod manager;
pub mod persistence;
pub mod store;
pub mod types;

pub use manager::DocumentManager;
pub use persistence::StorePersistence;
pub use store::DocumentStore;
pub use types::{
    ActivityAction, ActivityEntry, Document, DocumentId, DocumentVersion, Role,
    SimilarityResult, UserRef,
};
