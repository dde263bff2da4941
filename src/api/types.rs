// SPDX-License-Identifier: MPL-2.0
//! Wire payloads of the analysis backend and their conversion into domain
//! types.
//!
//! Patient records are decoded strictly: a record without `id` fails the
//! whole response. Recommendation entries are decoded one by one so that a
//! single malformed entry is rejected and counted without losing the patient.

use crate::domain::patient::{AGE_NOT_AVAILABLE, UNKNOWN};
use crate::domain::{Patient, PatientId, Recommendation, RecommendationError, RecommendationSource};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Response of `POST /api/upload/`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub patients: Vec<RawPatient>,
    #[serde(default)]
    pub total_patients: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One analyzed patient as sent by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPatient {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub patient_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub patient_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,
    #[serde(default)]
    pub supplements: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<Value>,
}

/// Response of `GET /api/analysis/{id}/`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRecord {
    pub id: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    /// The raw CSV row the analysis was computed from.
    #[serde(default)]
    pub patient_data: Option<Map<String, Value>>,
    #[serde(default)]
    pub supplements: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<Value>,
    #[serde(default)]
    pub report_html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRecommendation {
    food: String,
    reason: String,
    mechanism: String,
    #[serde(default)]
    nutrients: Vec<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    reference: Option<String>,
}

/// Patients converted from a response, plus the number of recommendation
/// entries that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ingested {
    pub patients: Vec<Patient>,
    pub rejected_recommendations: usize,
}

impl UploadResponse {
    /// Converts every patient, validating their recommendations.
    #[must_use]
    pub fn ingest(self) -> Ingested {
        if let Some(total) = self.total_patients {
            if total != self.patients.len() as u64 {
                tracing::debug!(
                    total,
                    received = self.patients.len(),
                    "total_patients does not match the patient list"
                );
            }
        }

        let mut ingested = Ingested::default();
        for raw in self.patients {
            let (patient, rejected) = raw.into_patient();
            ingested.rejected_recommendations += rejected;
            ingested.patients.push(patient);
        }
        ingested
    }
}

impl RawPatient {
    /// Returns the patient and how many recommendation entries were rejected.
    #[must_use]
    pub fn into_patient(self) -> (Patient, usize) {
        let id = PatientId::new(self.id);
        let (recommendations, rejected) = parse_recommendations(id, self.recommendations);
        let patient = Patient::new(
            id,
            non_blank(self.patient_id).unwrap_or_else(|| UNKNOWN.to_string()),
            non_blank(self.patient_name).unwrap_or_else(|| UNKNOWN.to_string()),
            non_blank(self.age).unwrap_or_else(|| AGE_NOT_AVAILABLE.to_string()),
            self.supplements,
            recommendations,
        );
        (patient, rejected)
    }
}

impl AnalysisRecord {
    /// Rebuilds the patient from the stored CSV row.
    ///
    /// Uses the backend's own column mapping: `patient_id`, then
    /// `patient_name` or `name`, then `age`, with the same placeholders.
    #[must_use]
    pub fn into_patient(self) -> (Patient, usize) {
        let row = self.patient_data.unwrap_or_default();
        let field = |key: &str| row.get(key).and_then(value_to_string);

        let code = field("patient_id").unwrap_or_else(|| UNKNOWN.to_string());
        let name = field("patient_name")
            .or_else(|| field("name"))
            .unwrap_or_else(|| UNKNOWN.to_string());
        let age = field("age").unwrap_or_else(|| AGE_NOT_AVAILABLE.to_string());

        let id = PatientId::new(self.id);
        let (recommendations, rejected) = parse_recommendations(id, self.recommendations);
        (
            Patient::new(id, code, name, age, self.supplements, recommendations),
            rejected,
        )
    }
}

fn parse_recommendations(patient: PatientId, entries: Vec<Value>) -> (Vec<Recommendation>, usize) {
    let mut rejected = 0;
    let recommendations = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match parse_recommendation(entry) {
            Ok(rec) => Some(rec),
            Err(err) => {
                tracing::warn!(%patient, index, error = %err, "rejecting recommendation");
                rejected += 1;
                None
            }
        })
        .collect();
    (recommendations, rejected)
}

/// Validates one untyped recommendation entry.
pub fn parse_recommendation(entry: Value) -> Result<Recommendation, RecommendationError> {
    let raw: RawRecommendation = serde_json::from_value(entry)
        .map_err(|err| RecommendationError::Malformed(err.to_string()))?;

    Ok(Recommendation::new(raw.food, raw.reason, raw.mechanism, raw.nutrients)?
        .with_source(raw.source.as_deref().and_then(RecommendationSource::from_label))
        .with_reference(raw.reference))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Accepts strings, numbers and booleans; CSV columns reach the backend
/// untyped and may come back either way.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upload_body() -> Value {
        json!({
            "patients": [
                {
                    "id": 11,
                    "patient_id": "P001",
                    "patient_name": "Kim Minji",
                    "age": "54",
                    "supplements": ["Vitamin D", "Iron (65)"],
                    "recommendations": [
                        {
                            "food": "Salmon",
                            "reason": "Rich in Vitamin D",
                            "mechanism": "Natural source of cholecalciferol",
                            "nutrients": ["Vitamin D", "Omega-3", "Vitamin D"],
                            "source": "database"
                        },
                        {
                            "food": "Black Seed (Nigella Sativa)",
                            "reason": "Supports iron absorption",
                            "mechanism": "Thymoquinone",
                            "nutrients": ["Thymoquinone", "Iron"],
                            "source": "ai",
                            "reference": "J Ethnopharmacol 2019"
                        }
                    ]
                },
                {
                    "id": 12,
                    "patient_id": 2002,
                    "supplements": ["Zinc"],
                    "recommendations": [
                        { "food": "", "reason": "x", "mechanism": "y" },
                        { "food": "Oysters" },
                        "not an object"
                    ]
                }
            ],
            "total_patients": 2,
            "message": "Successfully analyzed 2 patients"
        })
    }

    #[test]
    fn upload_response_ingests_patients_in_order() {
        let response: UploadResponse = serde_json::from_value(upload_body()).unwrap();
        let ingested = response.ingest();

        assert_eq!(ingested.patients.len(), 2);
        let first = &ingested.patients[0];
        assert_eq!(first.id(), PatientId::new(11));
        assert_eq!(first.patient_code(), "P001");
        assert_eq!(first.name(), "Kim Minji");
        assert_eq!(first.supplements(), ["Vitamin D", "Iron (65)"]);
        assert_eq!(first.recommendations().len(), 2);
        assert_eq!(
            first.recommendations()[0].nutrients(),
            ["Vitamin D", "Omega-3"]
        );
        assert_eq!(
            first.recommendations()[1].source(),
            Some(&RecommendationSource::Ai)
        );
        assert_eq!(
            first.recommendations()[1].reference(),
            Some("J Ethnopharmacol 2019")
        );
    }

    #[test]
    fn malformed_recommendations_are_counted_not_kept() {
        let response: UploadResponse = serde_json::from_value(upload_body()).unwrap();
        let ingested = response.ingest();

        let second = &ingested.patients[1];
        assert!(second.recommendations().is_empty());
        assert_eq!(ingested.rejected_recommendations, 3);
    }

    #[test]
    fn missing_fields_use_backend_placeholders() {
        let response: UploadResponse = serde_json::from_value(upload_body()).unwrap();
        let second = &response.ingest().patients[1];

        assert_eq!(second.patient_code(), "2002");
        assert_eq!(second.name(), UNKNOWN);
        assert_eq!(second.age(), AGE_NOT_AVAILABLE);
    }

    #[test]
    fn patient_without_id_fails_decoding() {
        let body = json!({ "patients": [{ "patient_id": "P1" }], "total_patients": 1 });
        assert!(serde_json::from_value::<UploadResponse>(body).is_err());
    }

    #[test]
    fn empty_response_yields_no_patients() {
        let response: UploadResponse =
            serde_json::from_value(json!({ "patients": [], "total_patients": 0 })).unwrap();
        assert!(response.ingest().patients.is_empty());
    }

    #[test]
    fn analysis_record_maps_csv_row() {
        let record: AnalysisRecord = serde_json::from_value(json!({
            "id": 7,
            "created_at": "2024-05-02T10:15:30.123456Z",
            "patient_data": { "patient_id": "P9", "name": "Lee", "vitamin_d": "Yes" },
            "supplements": ["Vitamin D"],
            "recommendations": [
                { "food": "Egg yolk", "reason": "r", "mechanism": "m", "nutrients": ["Vitamin D"] }
            ],
            "report_html": "<html></html>"
        }))
        .unwrap();

        assert!(record.created_at.is_some());
        let (patient, rejected) = record.into_patient();
        assert_eq!(rejected, 0);
        assert_eq!(patient.id(), PatientId::new(7));
        assert_eq!(patient.patient_code(), "P9");
        assert_eq!(patient.name(), "Lee");
        assert_eq!(patient.age(), AGE_NOT_AVAILABLE);
        assert_eq!(patient.recommendations()[0].food(), "Egg yolk");
    }

    #[test]
    fn analysis_record_without_row_uses_placeholders() {
        let record: AnalysisRecord =
            serde_json::from_value(json!({ "id": 3, "patient_data": null })).unwrap();
        let (patient, _) = record.into_patient();
        assert_eq!(patient.patient_code(), UNKNOWN);
        assert_eq!(patient.name(), UNKNOWN);
    }
}
