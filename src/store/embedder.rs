//! Text embeddings for free-text queries, built on fastembed.

use std::sync::Mutex;

use fastembed::TextEmbedding;
use tracing::info;

use super::{StoreError, TextEmbedder};

/// Default fastembed model behind a lock; inference needs exclusive access.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
}

impl FastEmbedder {
    pub fn try_new() -> Result<Self, StoreError> {
        let model = TextEmbedding::try_new(Default::default())
            .map_err(|err| StoreError::Embedding(err.to_string()))?;
        info!("loaded text embedding model");
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl TextEmbedder for FastEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, StoreError> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| StoreError::Embedding("embedding model lock poisoned".to_string()))?;
        let mut batch = model
            .embed(vec![text], None)
            .map_err(|err| StoreError::Embedding(err.to_string()))?;
        batch
            .pop()
            .ok_or_else(|| StoreError::Embedding("empty embedding batch".to_string()))
    }
}
