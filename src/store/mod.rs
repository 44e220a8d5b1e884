//! Vector store boundary: collections, query results and typed metadata.

pub mod memory;
pub mod metadata;

#[cfg(feature = "embeddings")]
pub mod embedder;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use memory::{MemoryStore, Snapshot, StoredRecord};
pub use metadata::{DiseaseFields, DiseaseMetadata, DrugFields, DrugMetadata};

/// String-keyed record metadata as held by the store.
pub type Metadata = serde_json::Map<String, Value>;

/// The two entity classes, each backed by its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityClass {
    Drug,
    Disease,
}

impl EntityClass {
    pub fn collection(self) -> &'static str {
        match self {
            Self::Drug => "drugs",
            Self::Disease => "diseases",
        }
    }

    /// Metadata key holding the canonical name.
    pub fn name_field(self) -> &'static str {
        match self {
            Self::Drug => "drug_name",
            Self::Disease => "disease_name",
        }
    }
}

/// Index-aligned nearest-neighbour results, closest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub ids: Vec<String>,
    pub metadatas: Vec<Metadata>,
    pub distances: Vec<f64>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reading index {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed index data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("embedding has {actual} dimensions, collection expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("text queries need a text embedder")]
    TextQueryUnsupported,
    #[error("text embedding failed: {0}")]
    Embedding(String),
}

/// Produces query vectors for free text.
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, StoreError>;
}

/// Nearest-neighbour access to the drug and disease collections.
///
/// Query methods return at most `n_results` hits sorted by ascending
/// distance, with `metadatas` and `distances` of equal length.
pub trait VectorStore: Send + Sync {
    /// Metadata of every record in the collection, in storage order.
    fn list(&self, class: EntityClass) -> Result<Vec<Metadata>, StoreError>;

    /// Stored embedding of the first record whose name field equals `name`.
    fn embedding_for(&self, class: EntityClass, name: &str)
        -> Result<Option<Vec<f32>>, StoreError>;

    fn query_embedding(
        &self,
        class: EntityClass,
        embedding: &[f32],
        n_results: usize,
    ) -> Result<QueryResult, StoreError>;

    fn query_text(
        &self,
        class: EntityClass,
        text: &str,
        n_results: usize,
    ) -> Result<QueryResult, StoreError>;
}
