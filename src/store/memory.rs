//! In-process vector store loaded from a JSON index snapshot.

use std::{cmp::Ordering, fmt, fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{EntityClass, Metadata, QueryResult, StoreError, TextEmbedder, VectorStore};

/// One stored entity.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoredRecord {
    pub id: String,
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub metadata: Metadata,
}

/// On-disk index layout: one record list per collection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Snapshot {
    #[serde(default)]
    pub drugs: Vec<StoredRecord>,
    #[serde(default)]
    pub diseases: Vec<StoredRecord>,
}

impl Snapshot {
    pub fn records(&self, class: EntityClass) -> &[StoredRecord] {
        match class {
            EntityClass::Drug => &self.drugs,
            EntityClass::Disease => &self.diseases,
        }
    }
}

/// Brute-force cosine-distance store.
pub struct MemoryStore {
    snapshot: Snapshot,
    embedder: Option<Box<dyn TextEmbedder>>,
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("drugs", &self.snapshot.drugs.len())
            .field("diseases", &self.snapshot.diseases.len())
            .field("text_queries", &self.embedder.is_some())
            .finish()
    }
}

impl MemoryStore {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            embedder: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            drugs = snapshot.drugs.len(),
            diseases = snapshot.diseases.len(),
            "loaded vector index"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Enable [`VectorStore::query_text`].
    pub fn with_embedder(mut self, embedder: Box<dyn TextEmbedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn nearest(
        &self,
        class: EntityClass,
        embedding: &[f32],
        n_results: usize,
    ) -> Result<QueryResult, StoreError> {
        let records = self.snapshot.records(class);
        let mut scored = Vec::with_capacity(records.len());
        for record in records {
            if record.embedding.len() != embedding.len() {
                return Err(StoreError::DimensionMismatch {
                    expected: record.embedding.len(),
                    actual: embedding.len(),
                });
            }
            let distance = 1.0 - f64::from(cosine(embedding, &record.embedding));
            scored.push((distance, record));
        }
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        scored.truncate(n_results);

        debug!(collection = class.collection(), hits = scored.len(), "nearest neighbours");
        let mut result = QueryResult::default();
        for (distance, record) in scored {
            result.ids.push(record.id.clone());
            result.metadatas.push(record.metadata.clone());
            result.distances.push(distance);
        }
        Ok(result)
    }
}

impl VectorStore for MemoryStore {
    fn list(&self, class: EntityClass) -> Result<Vec<Metadata>, StoreError> {
        Ok(self
            .snapshot
            .records(class)
            .iter()
            .map(|record| record.metadata.clone())
            .collect())
    }

    fn embedding_for(
        &self,
        class: EntityClass,
        name: &str,
    ) -> Result<Option<Vec<f32>>, StoreError> {
        let field = class.name_field();
        Ok(self
            .snapshot
            .records(class)
            .iter()
            .find(|record| {
                matches!(record.metadata.get(field), Some(Value::String(stored)) if stored == name)
            })
            .map(|record| record.embedding.clone()))
    }

    fn query_embedding(
        &self,
        class: EntityClass,
        embedding: &[f32],
        n_results: usize,
    ) -> Result<QueryResult, StoreError> {
        self.nearest(class, embedding, n_results)
    }

    fn query_text(
        &self,
        class: EntityClass,
        text: &str,
        n_results: usize,
    ) -> Result<QueryResult, StoreError> {
        let embedder = self
            .embedder
            .as_ref()
            .ok_or(StoreError::TextQueryUnsupported)?;
        let embedding = embedder.embed(text)?;
        self.nearest(class, &embedding, n_results)
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot = a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
