//! The per-patient medical history feed.
//!
//! History items are append-only and kept most-recent-first. An item is
//! either derived from a prescription at the end of a consultation or
//! supplied by the patient themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a history item came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistorySource {
    /// Written by the store when a prescription is issued
    PrescriptionDerived { prescription_id: u64 },
    /// Entered by the patient (registration text or a manual note)
    SelfReported,
}

/// A timestamped record in a patient's medical history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MedicalHistoryItem {
    pub id: u64,
    pub patient_id: String,
    pub title: String,
    pub note: Option<String>,
    /// Path or reference to an uploaded document, if any
    pub attachment: Option<String>,
    pub source: HistorySource,
    pub recorded_at: DateTime<Utc>,
}

impl MedicalHistoryItem {
    pub fn is_prescription_derived(&self) -> bool {
        matches!(self.source, HistorySource::PrescriptionDerived { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_discrimination() {
        let item = MedicalHistoryItem {
            id: 1,
            patient_id: "9999Joh".to_string(),
            title: "Prescription #1: Mild fever".to_string(),
            note: None,
            attachment: None,
            source: HistorySource::PrescriptionDerived { prescription_id: 1 },
            recorded_at: Utc::now(),
        };
        assert!(item.is_prescription_derived());

        let item = MedicalHistoryItem {
            source: HistorySource::SelfReported,
            ..item
        };
        assert!(!item.is_prescription_derived());
    }
}
