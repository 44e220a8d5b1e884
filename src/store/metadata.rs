//! Typed views over store metadata with declared defaults.
//!
//! Values that are missing or cannot be read as the expected type decode to
//! `None`. Defaults are applied when projecting into ranked output fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{
    formats::Flexible, serde_as, BoolFromInt, DefaultOnError, DisplayFromStr, PickFirst,
};

use super::{Metadata, StoreError};
use crate::search::ranker::{FieldSpec, UNKNOWN_ENTITY};

/// Drug record metadata.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DrugMetadata {
    #[serde_as(as = "DefaultOnError")]
    pub drug_name: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    pub molecular_weight: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, BoolFromInt<Flexible>, DisplayFromStr)>>>")]
    pub bbb_permeable: Option<bool>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, BoolFromInt<Flexible>, DisplayFromStr)>>>")]
    pub passes_lipinski: Option<bool>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    pub clinical_trials_count: Option<u32>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    pub pubchem_cid: Option<i64>,
}

/// Disease record metadata.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiseaseMetadata {
    #[serde_as(as = "DefaultOnError")]
    pub disease_name: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub efo_id: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    pub known_drugs_count: Option<u32>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    pub targets_count: Option<u32>,
}

impl DrugMetadata {
    pub fn from_map(map: &Metadata) -> Result<Self, StoreError> {
        Ok(serde_json::from_value(Value::Object(map.clone()))?)
    }

    pub fn has_molecular_weight(&self) -> bool {
        self.molecular_weight.is_some_and(|w| w > 0.0)
    }
}

impl DiseaseMetadata {
    pub fn from_map(map: &Metadata) -> Result<Self, StoreError> {
        Ok(serde_json::from_value(Value::Object(map.clone()))?)
    }
}

/// Decode every map in `maps` into `T`.
pub fn decode_all<T, F>(maps: &[Metadata], decode: F) -> Result<Vec<T>, StoreError>
where
    F: Fn(&Metadata) -> Result<T, StoreError>,
{
    maps.iter().map(decode).collect()
}

/// Pass-through fields of a ranked drug.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrugFields {
    /// `None` is shown as "N/A".
    pub molecular_weight: Option<f64>,
    pub bbb_permeable: bool,
    pub passes_lipinski: bool,
    pub clinical_trials: u32,
    pub pubchem_cid: Option<i64>,
}

/// Pass-through fields of a ranked disease.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiseaseFields {
    pub efo_id: Option<String>,
    pub known_drugs_count: u32,
    pub targets_count: u32,
}

impl FieldSpec for DrugMetadata {
    type Fields = DrugFields;

    fn entity_name(&self) -> &str {
        self.drug_name.as_deref().unwrap_or(UNKNOWN_ENTITY)
    }

    fn fields(&self) -> DrugFields {
        DrugFields {
            molecular_weight: self.molecular_weight,
            bbb_permeable: self.bbb_permeable.unwrap_or(false),
            passes_lipinski: self.passes_lipinski.unwrap_or(false),
            clinical_trials: self.clinical_trials_count.unwrap_or(0),
            pubchem_cid: self.pubchem_cid,
        }
    }
}

impl FieldSpec for DiseaseMetadata {
    type Fields = DiseaseFields;

    fn entity_name(&self) -> &str {
        self.disease_name.as_deref().unwrap_or(UNKNOWN_ENTITY)
    }

    fn fields(&self) -> DiseaseFields {
        DiseaseFields {
            efo_id: self.efo_id.clone(),
            known_drugs_count: self.known_drugs_count.unwrap_or(0),
            targets_count: self.targets_count.unwrap_or(0),
        }
    }
}

impl DrugFields {
    /// Molecular weight for display.
    pub fn molecular_weight_label(&self) -> String {
        self.molecular_weight
            .map(|w| format!("{w:.2}"))
            .unwrap_or_else(|| "N/A".to_string())
    }
}
