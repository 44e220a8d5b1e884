//! Resolution of free-text queries to canonical drug and disease names.
//!
//! Queries are tried in three tiers: exact (case and surrounding whitespace
//! ignored), substring containment in enumeration order, then character
//! similarity suggestions.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::matcher::CloseMatches;
use crate::store::{EntityClass, StoreError, VectorStore};

/// Canonical names of one entity class with a lowercase lookup.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    names: Vec<String>,
    by_lower: IndexMap<String, String>,
}

impl NameIndex {
    /// Later names replace earlier ones sharing a lowercase form; the key
    /// keeps the position where it first appeared.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut by_lower = IndexMap::with_capacity(names.len());
        for name in &names {
            by_lower.insert(name.to_lowercase(), name.clone());
        }
        Self { names, by_lower }
    }

    /// Canonical names in enumeration order, duplicates included.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, lower: &str) -> Option<&str> {
        self.by_lower.get(lower).map(String::as_str)
    }

    /// `(lowercase, canonical)` pairs in lookup order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_lower.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Snapshot of every known drug and disease name.
#[derive(Debug, Clone, Default)]
pub struct NameCache {
    drugs: NameIndex,
    diseases: NameIndex,
}

impl NameCache {
    pub fn from_names<D, X, S, T>(drugs: D, diseases: X) -> Self
    where
        D: IntoIterator<Item = S>,
        S: Into<String>,
        X: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            drugs: NameIndex::new(drugs),
            diseases: NameIndex::new(diseases),
        }
    }

    /// List both collections once. Records without a string name are skipped.
    pub fn from_store<S: VectorStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let cache = Self {
            drugs: NameIndex::new(list_names(store, EntityClass::Drug)?),
            diseases: NameIndex::new(list_names(store, EntityClass::Disease)?),
        };
        debug!(
            drugs = cache.drugs.len(),
            diseases = cache.diseases.len(),
            "cached entity names"
        );
        Ok(cache)
    }

    pub fn index(&self, class: EntityClass) -> &NameIndex {
        match class {
            EntityClass::Drug => &self.drugs,
            EntityClass::Disease => &self.diseases,
        }
    }

    pub fn drug_names(&self) -> &[String] {
        self.drugs.names()
    }

    pub fn disease_names(&self) -> &[String] {
        self.diseases.names()
    }
}

fn list_names<S: VectorStore + ?Sized>(
    store: &S,
    class: EntityClass,
) -> Result<Vec<String>, StoreError> {
    let field = class.name_field();
    Ok(store
        .list(class)?
        .iter()
        .filter_map(|metadata| match metadata.get(field) {
            Some(Value::String(name)) => Some(name.clone()),
            _ => None,
        })
        .collect())
}

/// Which tier produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Substring,
    Fuzzy,
    NoMatch,
}

/// Outcome of [`NameResolver::resolve`].
///
/// Either `canonical` is set and `suggestions` is empty, or `canonical` is
/// `None` and `suggestions` holds the close matches, possibly none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub canonical: Option<String>,
    pub suggestions: Vec<String>,
    pub tier: MatchTier,
}

impl Resolution {
    fn matched(name: &str, tier: MatchTier) -> Self {
        Self {
            canonical: Some(name.to_string()),
            suggestions: Vec::new(),
            tier,
        }
    }

    fn unmatched(suggestions: Vec<String>) -> Self {
        let tier = if suggestions.is_empty() {
            MatchTier::NoMatch
        } else {
            MatchTier::Fuzzy
        };
        Self {
            canonical: None,
            suggestions,
            tier,
        }
    }

    pub fn is_match(&self) -> bool {
        self.canonical.is_some()
    }
}

/// Resolves queries against a shared [`NameCache`].
#[derive(Debug, Clone)]
pub struct NameResolver {
    cache: Arc<NameCache>,
    fuzzy: CloseMatches,
}

impl NameResolver {
    pub fn new(cache: Arc<NameCache>) -> Self {
        Self {
            cache,
            fuzzy: CloseMatches::DEFAULT,
        }
    }

    pub fn with_fuzzy(mut self, fuzzy: CloseMatches) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    pub fn cache(&self) -> &Arc<NameCache> {
        &self.cache
    }

    pub fn resolve(&self, query: &str, class: EntityClass) -> Resolution {
        let index = self.cache.index(class);
        let query = query.trim().to_lowercase();

        let resolution = if let Some(canonical) = index.get(&query) {
            Resolution::matched(canonical, MatchTier::Exact)
        } else if let Some((_, canonical)) = index
            .entries()
            .find(|(lower, _)| lower.contains(query.as_str()) || query.contains(lower))
        {
            Resolution::matched(canonical, MatchTier::Substring)
        } else {
            let suggestions = self
                .fuzzy
                .find(&query, index.entries().map(|(lower, _)| lower))
                .into_iter()
                .filter_map(|lower| index.get(lower))
                .map(str::to_string)
                .collect();
            Resolution::unmatched(suggestions)
        };

        debug!(
            %query,
            ?class,
            tier = ?resolution.tier,
            canonical = ?resolution.canonical,
            "resolved query"
        );
        resolution
    }

    pub fn find_drug(&self, query: &str) -> Resolution {
        self.resolve(query, EntityClass::Drug)
    }

    pub fn find_disease(&self, query: &str) -> Resolution {
        self.resolve(query, EntityClass::Disease)
    }

    /// Canonical names containing `needle` case-insensitively, sorted.
    pub fn filter(&self, class: EntityClass, needle: &str) -> Vec<String> {
        let needle = needle.to_lowercase();
        let mut names: Vec<String> = self
            .cache
            .index(class)
            .names()
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        names.sort();
        names
    }
}
