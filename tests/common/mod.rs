#![allow(dead_code)]

use repurpose::store::{MemoryStore, Snapshot};
use serde_json::{json, Value};

/// Three drugs and three diseases on a tiny 3-d embedding space.
pub fn index_json() -> Value {
    json!({
        "drugs": [
            {"id": "d1", "embedding": [1.0, 0.0, 0.0], "metadata": {
                "drug_name": "Aspirin", "molecular_weight": 180.16, "bbb_permeable": false,
                "passes_lipinski": true, "clinical_trials_count": 1200, "pubchem_cid": 2244}},
            {"id": "d2", "embedding": [0.9, 0.1, 0.0], "metadata": {
                "drug_name": "Ibuprofen", "molecular_weight": 206.28, "bbb_permeable": true,
                "passes_lipinski": true}},
            {"id": "d3", "embedding": [0.0, 1.0, 0.0], "metadata": {
                "drug_name": "Metformin", "molecular_weight": "N/A"}}
        ],
        "diseases": [
            {"id": "x1", "embedding": [1.0, 0.0, 0.0], "metadata": {
                "disease_name": "Pain", "efo_id": "EFO_0003843", "known_drugs_count": 40, "targets_count": 12}},
            {"id": "x2", "embedding": [0.8, 0.2, 0.0], "metadata": {
                "disease_name": "Fever", "efo_id": "HP_0001945"}},
            {"id": "x3", "embedding": [0.0, 1.0, 0.0], "metadata": {
                "disease_name": "Type 2 Diabetes", "efo_id": "MONDO_0005148", "known_drugs_count": 85}}
        ]
    })
}

pub fn snapshot() -> Snapshot {
    serde_json::from_value(index_json()).unwrap()
}

pub fn store() -> MemoryStore {
    MemoryStore::from_snapshot(snapshot())
}
