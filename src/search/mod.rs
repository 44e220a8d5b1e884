//! Entity resolution and similarity ranking over a vector store.

pub mod matcher;
pub mod ranker;
pub mod resolver;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::store::{
    metadata::decode_all, DiseaseFields, DiseaseMetadata, DrugFields, DrugMetadata, EntityClass,
    QueryResult, StoreError, VectorStore,
};

pub use matcher::{CloseMatches, MatchError};
pub use ranker::{rank, Candidate, ConfidenceBand, FieldSpec, RankError};
pub use resolver::{MatchTier, NameCache, NameResolver, Resolution};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Rank(#[from] RankError),
}

/// Result of a name-driven similarity search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Lookup<F> {
    /// The query resolved to `entity`.
    Found {
        entity: String,
        candidates: Vec<Candidate<F>>,
    },
    /// No confident match; `suggestions` may be empty.
    NotFound {
        query: String,
        suggestions: Vec<String>,
    },
    /// The resolved entity has no stored embedding.
    MissingEmbedding { entity: String },
}

impl<F> Lookup<F> {
    pub fn candidates(&self) -> &[Candidate<F>] {
        match self {
            Self::Found { candidates, .. } => candidates,
            _ => &[],
        }
    }
}

/// Drug collection summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub drugs: usize,
    pub diseases: usize,
    pub passes_lipinski: usize,
    pub bbb_permeable: usize,
    pub with_molecular_weight: usize,
}

/// Name resolution and ranked similarity queries against one store.
#[derive(Debug)]
pub struct SmartSearch<S> {
    store: S,
    resolver: NameResolver,
}

impl<S: VectorStore> SmartSearch<S> {
    /// Caches every drug and disease name from `store`.
    pub fn new(store: S) -> Result<Self, SearchError> {
        let cache = NameCache::from_store(&store)?;
        Ok(Self {
            store,
            resolver: NameResolver::new(Arc::new(cache)),
        })
    }

    pub fn with_resolver(store: S, resolver: NameResolver) -> Self {
        Self { store, resolver }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    pub fn find_drug(&self, query: &str) -> Resolution {
        self.resolver.find_drug(query)
    }

    pub fn find_disease(&self, query: &str) -> Resolution {
        self.resolver.find_disease(query)
    }

    /// Drugs closest to a free-text description.
    #[instrument(skip(self))]
    pub fn search_drugs_fuzzy(
        &self,
        text: &str,
        top_k: usize,
    ) -> Result<Vec<Candidate<DrugFields>>, SearchError> {
        let hits = self.store.query_text(EntityClass::Drug, text, top_k)?;
        rank_drugs(&hits, 0)
    }

    /// Diseases closest to a named drug.
    #[instrument(skip(self))]
    pub fn diseases_for_drug(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Lookup<DiseaseFields>, SearchError> {
        self.lookup(query, EntityClass::Drug, EntityClass::Disease, top_k, 0)
    }

    /// Drugs closest to a named disease.
    #[instrument(skip(self))]
    pub fn drugs_for_disease(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Lookup<DrugFields>, SearchError> {
        self.lookup(query, EntityClass::Disease, EntityClass::Drug, top_k, 0)
    }

    /// Drugs closest to a named drug, excluding the first hit (the drug itself).
    #[instrument(skip(self))]
    pub fn similar_drugs(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Lookup<DrugFields>, SearchError> {
        self.lookup(query, EntityClass::Drug, EntityClass::Drug, top_k, 1)
    }

    pub fn catalog(&self, class: EntityClass, filter: &str) -> Vec<String> {
        self.resolver.filter(class, filter)
    }

    pub fn catalog_stats(&self) -> Result<CatalogStats, SearchError> {
        let drugs = decode_all(&self.store.list(EntityClass::Drug)?, DrugMetadata::from_map)?;
        let diseases = self.store.list(EntityClass::Disease)?.len();
        Ok(CatalogStats {
            drugs: drugs.len(),
            diseases,
            passes_lipinski: drugs.iter().filter(|d| d.passes_lipinski == Some(true)).count(),
            bbb_permeable: drugs.iter().filter(|d| d.bbb_permeable == Some(true)).count(),
            with_molecular_weight: drugs.iter().filter(|d| d.has_molecular_weight()).count(),
        })
    }

    fn lookup<F>(
        &self,
        query: &str,
        from: EntityClass,
        to: EntityClass,
        top_k: usize,
        skip: usize,
    ) -> Result<Lookup<F>, SearchError>
    where
        F: RankTarget,
    {
        let resolution = self.resolver.resolve(query, from);
        let Some(entity) = resolution.canonical else {
            return Ok(Lookup::NotFound {
                query: query.to_string(),
                suggestions: resolution.suggestions,
            });
        };
        let Some(embedding) = self.store.embedding_for(from, &entity)? else {
            debug!(%entity, "resolved entity has no embedding");
            return Ok(Lookup::MissingEmbedding { entity });
        };

        let hits = self.store.query_embedding(to, &embedding, top_k.saturating_add(skip))?;
        let candidates = F::rank_hits(&hits, skip)?;
        Ok(Lookup::Found { entity, candidates })
    }
}

/// Output field types that can be ranked straight from raw query hits.
pub trait RankTarget: Sized {
    fn rank_hits(hits: &QueryResult, skip: usize) -> Result<Vec<Candidate<Self>>, SearchError>;
}

impl RankTarget for DrugFields {
    fn rank_hits(hits: &QueryResult, skip: usize) -> Result<Vec<Candidate<Self>>, SearchError> {
        rank_drugs(hits, skip)
    }
}

impl RankTarget for DiseaseFields {
    fn rank_hits(hits: &QueryResult, skip: usize) -> Result<Vec<Candidate<Self>>, SearchError> {
        ranker::ensure_aligned(&hits.metadatas, &hits.distances)?;
        let metadatas = decode_all(tail(&hits.metadatas, skip), DiseaseMetadata::from_map)?;
        Ok(rank(&metadatas, tail(&hits.distances, skip))?)
    }
}

fn rank_drugs(hits: &QueryResult, skip: usize) -> Result<Vec<Candidate<DrugFields>>, SearchError> {
    ranker::ensure_aligned(&hits.metadatas, &hits.distances)?;
    let metadatas = decode_all(tail(&hits.metadatas, skip), DrugMetadata::from_map)?;
    Ok(rank(&metadatas, tail(&hits.distances, skip))?)
}

fn tail<T>(items: &[T], skip: usize) -> &[T] {
    items.get(skip..).unwrap_or(&[])
}
