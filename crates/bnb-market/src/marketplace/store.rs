use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field map written to a collection, mirroring a JSON object.
pub type Fields = Map<String, Value>;

pub const AGENTS_COLLECTION: &str = "agents";
pub const PROPERTIES_COLLECTION: &str = "properties";
pub const CONTACTS_COLLECTION: &str = "contacts";

/// Identifier assigned by the store for `add_document` writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Write-only view of the hosted document database.
pub trait DocumentStore: Send + Sync {
    /// Create or overwrite the document at `collection/id`.
    fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;
    /// Append a document and return the identifier the store picked.
    fn add_document(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document store rejected write to '{collection}': {reason}")]
    Rejected { collection: String, reason: String },
}
