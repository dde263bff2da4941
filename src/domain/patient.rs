// SPDX-License-Identifier: MPL-2.0
//! Patient and recommendation types.
//!
//! A [`Patient`] is one analyzed CSV row as returned by the backend. It is
//! immutable once built; a new upload replaces the whole list.

use std::fmt;
use thiserror::Error;

// =============================================================================
// PatientId
// =============================================================================

/// Backend-assigned analysis identifier.
///
/// This is the id used in report URLs, not the external patient code from
/// the CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatientId(u64);

impl PatientId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PatientId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// =============================================================================
// Recommendation
// =============================================================================

/// Where the backend took a recommendation from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationSource {
    /// Curated food database.
    Database,
    /// Generated by the language model.
    Ai,
    /// Any label this client does not know.
    Other(String),
}

impl RecommendationSource {
    /// Parses the backend label, case-insensitively. Blank labels yield `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        Some(match label.to_ascii_lowercase().as_str() {
            "database" => Self::Database,
            "ai" => Self::Ai,
            _ => Self::Other(label.to_string()),
        })
    }
}

/// Reasons a recommendation entry is rejected on ingest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendationError {
    #[error("recommendation has an empty food name")]
    EmptyFood,
    #[error("malformed recommendation: {0}")]
    Malformed(String),
}

/// One food suggestion for a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    food: String,
    reason: String,
    mechanism: String,
    /// Unique tags, in first-seen order.
    nutrients: Vec<String>,
    source: Option<RecommendationSource>,
    reference: Option<String>,
}

impl Recommendation {
    /// Builds a validated recommendation.
    ///
    /// The food name must be non-blank. Nutrient tags are trimmed, blank tags
    /// dropped and duplicates collapsed.
    pub fn new(
        food: impl Into<String>,
        reason: impl Into<String>,
        mechanism: impl Into<String>,
        nutrients: impl IntoIterator<Item = String>,
    ) -> Result<Self, RecommendationError> {
        let food = food.into().trim().to_string();
        if food.is_empty() {
            return Err(RecommendationError::EmptyFood);
        }

        let mut unique: Vec<String> = Vec::new();
        for tag in nutrients {
            let tag = tag.trim();
            if !tag.is_empty() && !unique.iter().any(|seen| seen == tag) {
                unique.push(tag.to_string());
            }
        }

        Ok(Self {
            food,
            reason: reason.into(),
            mechanism: mechanism.into(),
            nutrients: unique,
            source: None,
            reference: None,
        })
    }

    #[must_use]
    pub fn with_source(mut self, source: Option<RecommendationSource>) -> Self {
        self.source = source;
        self
    }

    /// Attaches a literature reference. Blank references are ignored.
    #[must_use]
    pub fn with_reference(mut self, reference: Option<String>) -> Self {
        self.reference = reference
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }

    #[must_use]
    pub fn food(&self) -> &str {
        &self.food
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    #[must_use]
    pub fn mechanism(&self) -> &str {
        &self.mechanism
    }

    #[must_use]
    pub fn nutrients(&self) -> &[String] {
        &self.nutrients
    }

    #[must_use]
    pub fn source(&self) -> Option<&RecommendationSource> {
        self.source.as_ref()
    }

    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

// =============================================================================
// Patient
// =============================================================================

/// Placeholder used by the backend when the CSV has no patient code or name.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder used by the backend when the CSV has no age column.
pub const AGE_NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    id: PatientId,
    patient_code: String,
    name: String,
    age: String,
    supplements: Vec<String>,
    recommendations: Vec<Recommendation>,
}

impl Patient {
    #[must_use]
    pub fn new(
        id: PatientId,
        patient_code: impl Into<String>,
        name: impl Into<String>,
        age: impl Into<String>,
        supplements: Vec<String>,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        Self {
            id,
            patient_code: patient_code.into(),
            name: name.into(),
            age: age.into(),
            supplements,
            recommendations,
        }
    }

    #[must_use]
    pub fn id(&self) -> PatientId {
        self.id
    }

    /// External patient code from the CSV (`patient_id` column).
    #[must_use]
    pub fn patient_code(&self) -> &str {
        &self.patient_code
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn age(&self) -> &str {
        &self.age
    }

    #[must_use]
    pub fn supplements(&self) -> &[String] {
        &self.supplements
    }

    #[must_use]
    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Splits supplements into the first `limit` names and the hidden count.
    #[must_use]
    pub fn supplement_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.supplements.len().min(limit);
        (&self.supplements[..shown], self.supplements.len() - shown)
    }
}
