//! Conversion of nearest-neighbour distances into ranked, scored candidates.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Entity name used when a record carries none.
pub const UNKNOWN_ENTITY: &str = "Unknown";

/// Typed field specification for a metadata record.
///
/// Implementors name the ranked entity and project the pass-through fields,
/// substituting the declared default for every absent value.
pub trait FieldSpec {
    type Fields;

    fn entity_name(&self) -> &str;

    fn fields(&self) -> Self::Fields;
}

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate<F> {
    /// 1-based position in result order.
    pub rank: usize,
    pub entity_name: String,
    /// `(1 - distance) * 100`, rounded to one decimal.
    pub confidence: f64,
    #[serde(flatten)]
    pub fields: F,
}

impl<F> Candidate<F> {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::of(self.confidence)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("{metadatas} metadata records but {distances} distances")]
    LengthMismatch { metadatas: usize, distances: usize },
}

/// Coarse strength label for a confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub const HIGH: f64 = 75.0;
    pub const MEDIUM: f64 = 60.0;

    pub fn of(confidence: f64) -> Self {
        if confidence >= Self::HIGH {
            Self::High
        } else if confidence >= Self::MEDIUM {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        f.write_str(label)
    }
}

/// Confidence percentage for a distance, rounded to one decimal place.
///
/// Not clamped: distances above 1 give negative values and distances below
/// 0 give values above 100. Rounding works on the exact decimal expansion
/// of the percentage, ties to even.
pub fn confidence(distance: f64) -> f64 {
    let percent = (1.0 - distance) * 100.0;
    // `{:.1}` formats the exact binary value, so no rescaling error creeps in.
    format!("{percent:.1}").parse().unwrap_or(percent)
}

pub fn ensure_aligned<M>(metadatas: &[M], distances: &[f64]) -> Result<(), RankError> {
    if metadatas.len() != distances.len() {
        return Err(RankError::LengthMismatch {
            metadatas: metadatas.len(),
            distances: distances.len(),
        });
    }
    Ok(())
}

/// Rank index-aligned metadata and distances in input order.
///
/// Distances are trusted to be ascending and are not re-sorted.
pub fn rank<M: FieldSpec>(
    metadatas: &[M],
    distances: &[f64],
) -> Result<Vec<Candidate<M::Fields>>, RankError> {
    ensure_aligned(metadatas, distances)?;
    Ok(metadatas
        .iter()
        .zip(distances)
        .enumerate()
        .map(|(idx, (metadata, &distance))| Candidate {
            rank: idx + 1,
            entity_name: metadata.entity_name().to_string(),
            confidence: confidence(distance),
            fields: metadata.fields(),
        })
        .collect())
}
