//! Prescriptions: diagnosis, vitals snapshot, and medicine orders.
//!
//! A prescription is immutable once issued. The store keeps the list in
//! most-recent-first order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vitals recorded during a consultation. Every field is optional; only
/// what was measured gets printed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    /// Systolic/diastolic reading as written, e.g. "120/80"
    pub blood_pressure: Option<String>,
    pub temperature_c: Option<f64>,
}

impl Vitals {
    pub fn is_empty(&self) -> bool {
        self.height_cm.is_none()
            && self.weight_kg.is_none()
            && self.blood_pressure.is_none()
            && self.temperature_c.is_none()
    }

    /// Label/value pairs for the fields that were measured, in display
    /// order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(height) = self.height_cm {
            out.push(("Height", format!("{} cm", height)));
        }
        if let Some(weight) = self.weight_kg {
            out.push(("Weight", format!("{} kg", weight)));
        }
        if let Some(bp) = &self.blood_pressure {
            out.push(("BP", bp.clone()));
        }
        if let Some(temp) = self.temperature_c {
            out.push(("Temperature", format!("{} C", temp)));
        }
        out
    }
}

/// One line of the Rx table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MedicineEntry {
    pub name: String,
    /// Dose pattern code, e.g. "1-0-1"
    pub dosage: String,
    /// Timing instruction, e.g. "After food"
    pub frequency: String,
    /// e.g. "30 days"
    pub duration: String,
}

/// A prescription issued at the end of a consultation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: u64,
    pub patient_id: String,
    pub doctor_id: String,
    pub diagnosis: String,
    pub vitals: Vitals,
    /// Ordered as prescribed; order is preserved on the printed page
    pub medicines: Vec<MedicineEntry>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_vitals() {
        let vitals = Vitals::default();
        assert!(vitals.is_empty());
        assert!(vitals.entries().is_empty());
    }

    #[test]
    fn test_vitals_entries_order() {
        let vitals = Vitals {
            height_cm: Some(170.0),
            weight_kg: None,
            blood_pressure: Some("120/80".to_string()),
            temperature_c: Some(37.2),
        };

        let entries = vitals.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], ("Height", "170 cm".to_string()));
        assert_eq!(entries[1], ("BP", "120/80".to_string()));
        assert_eq!(entries[2], ("Temperature", "37.2 C".to_string()));
    }
}
