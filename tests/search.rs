mod common;

use repurpose::{
    search::{Lookup, MatchTier, SearchError, SmartSearch},
    store::{
        EntityClass, Metadata, QueryResult, StoreError, TextEmbedder, VectorStore,
    },
};

struct KeywordEmbedder;

impl TextEmbedder for KeywordEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, StoreError> {
        if text.contains("sugar") {
            Ok(vec![0.0, 1.0, 0.0])
        } else if text.contains("flat") {
            Ok(vec![1.0, 0.0])
        } else {
            Ok(vec![1.0, 0.0, 0.0])
        }
    }
}

fn smart_search() -> SmartSearch<repurpose::store::MemoryStore> {
    SmartSearch::new(common::store()).unwrap()
}

#[test]
fn names_are_cached_from_the_store() {
    let search = smart_search();
    let cache = search.resolver().cache();
    assert_eq!(cache.drug_names(), ["Aspirin", "Ibuprofen", "Metformin"]);
    assert_eq!(cache.disease_names().len(), 3);
    assert_eq!(search.find_disease("diabetes").canonical.as_deref(), Some("Type 2 Diabetes"));
}

#[test]
fn diseases_for_a_resolved_drug() {
    let search = smart_search();
    let lookup = search.diseases_for_drug("METFORMIN", 1).unwrap();
    let Lookup::Found { entity, candidates } = lookup else {
        panic!("expected a match");
    };
    assert_eq!(entity, "Metformin");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].entity_name, "Type 2 Diabetes");
    assert_eq!(candidates[0].confidence, 100.0);
    assert_eq!(candidates[0].fields.known_drugs_count, 85);
    assert_eq!(candidates[0].fields.targets_count, 0);
}

#[test]
fn unresolved_drug_returns_suggestions() {
    let search = smart_search();
    let lookup = search.diseases_for_drug("asprin", 5).unwrap();
    assert_eq!(
        lookup,
        Lookup::NotFound {
            query: "asprin".to_string(),
            suggestions: vec!["Aspirin".to_string()],
        }
    );
    assert!(lookup.candidates().is_empty());
}

#[test]
fn drugs_for_a_resolved_disease() {
    let search = smart_search();
    let lookup = search.drugs_for_disease("pain", 2).unwrap();
    let names: Vec<_> = lookup.candidates().iter().map(|c| c.entity_name.as_str()).collect();
    assert_eq!(names, ["Aspirin", "Ibuprofen"]);
    assert_eq!(lookup.candidates()[0].fields.pubchem_cid, Some(2244));
    assert_eq!(lookup.candidates()[0].fields.clinical_trials, 1200);
}

#[test]
fn similar_drugs_drop_the_query_drug() {
    let search = smart_search();
    let lookup = search.similar_drugs("aspirin", 2).unwrap();
    let candidates = lookup.candidates();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].rank, 1);
    assert_eq!(candidates[0].entity_name, "Ibuprofen");
    assert_eq!(candidates[1].rank, 2);
    assert_eq!(candidates[1].entity_name, "Metformin");
    assert!(candidates[0].confidence > candidates[1].confidence);
}

#[test]
fn similar_drugs_accept_an_unbounded_count() {
    let search = smart_search();
    let lookup = search.similar_drugs("aspirin", usize::MAX).unwrap();
    let names: Vec<_> = lookup.candidates().iter().map(|c| c.entity_name.as_str()).collect();
    assert_eq!(names, ["Ibuprofen", "Metformin"]);
}

#[test]
fn text_search_needs_an_embedder() {
    let search = smart_search();
    let err = search.search_drugs_fuzzy("high blood sugar", 3).unwrap_err();
    assert!(matches!(err, SearchError::Store(StoreError::TextQueryUnsupported)));
}

#[test]
fn text_search_ranks_drugs() {
    let store = common::store().with_embedder(Box::new(KeywordEmbedder));
    let search = SmartSearch::new(store).unwrap();
    let ranked = search.search_drugs_fuzzy("high blood sugar", 2).unwrap();
    assert_eq!(ranked[0].entity_name, "Metformin");
    assert_eq!(ranked[0].confidence, 100.0);
    assert_eq!(ranked[0].fields.molecular_weight, None);
    assert_eq!(ranked.len(), 2);
}

#[test]
fn mismatched_query_dimensions_are_reported() {
    let store = common::store().with_embedder(Box::new(KeywordEmbedder));
    let search = SmartSearch::new(store).unwrap();
    let err = search.search_drugs_fuzzy("flat", 2).unwrap_err();
    assert!(matches!(
        err,
        SearchError::Store(StoreError::DimensionMismatch { expected: 3, actual: 2 })
    ));
}

#[test]
fn catalog_filters_and_stats() {
    let search = smart_search();
    assert_eq!(search.catalog(EntityClass::Drug, "in"), ["Aspirin", "Metformin"]);
    let stats = search.catalog_stats().unwrap();
    assert_eq!(stats.drugs, 3);
    assert_eq!(stats.diseases, 3);
    assert_eq!(stats.passes_lipinski, 2);
    assert_eq!(stats.bbb_permeable, 1);
    assert_eq!(stats.with_molecular_weight, 2);
}

/// Store that knows names but holds no vectors and returns misaligned hits.
struct NamesOnly;

impl VectorStore for NamesOnly {
    fn list(&self, class: EntityClass) -> Result<Vec<Metadata>, StoreError> {
        let mut metadata = Metadata::new();
        metadata.insert(class.name_field().to_string(), "Aspirin".into());
        Ok(vec![metadata, Metadata::new()])
    }

    fn embedding_for(&self, _: EntityClass, _: &str) -> Result<Option<Vec<f32>>, StoreError> {
        Ok(None)
    }

    fn query_embedding(&self, _: EntityClass, _: &[f32], _: usize) -> Result<QueryResult, StoreError> {
        Ok(QueryResult::default())
    }

    fn query_text(&self, _: EntityClass, _: &str, _: usize) -> Result<QueryResult, StoreError> {
        Ok(QueryResult {
            ids: vec!["a".into()],
            metadatas: vec![Metadata::new()],
            distances: vec![0.1, 0.2],
        })
    }
}

#[test]
fn records_without_names_are_not_cached() {
    let search = SmartSearch::new(NamesOnly).unwrap();
    assert_eq!(search.resolver().cache().drug_names(), ["Aspirin"]);
    assert_eq!(search.find_drug("aspirin").tier, MatchTier::Exact);
}

#[test]
fn missing_embedding_is_reported() {
    let search = SmartSearch::new(NamesOnly).unwrap();
    let lookup = search.similar_drugs("aspirin", 3).unwrap();
    assert_eq!(
        lookup,
        Lookup::MissingEmbedding {
            entity: "Aspirin".to_string()
        }
    );
}

#[test]
fn misaligned_store_results_are_an_error() {
    let search = SmartSearch::new(NamesOnly).unwrap();
    let err = search.search_drugs_fuzzy("anything", 2).unwrap_err();
    assert!(matches!(err, SearchError::Rank(_)));
}
