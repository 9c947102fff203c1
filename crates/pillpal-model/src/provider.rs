//! Doctors, desk staff, and the per-doctor hospital letterhead.
//!
//! Doctors and staff are seed data only in this system; the store never
//! creates or mutates them at runtime. The hospital profile is the one
//! mutable piece, updated field-wise through the store.

use serde::{Deserialize, Serialize};

use crate::Role;

/// A consulting doctor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub phone: String,
    /// Primary specialty, e.g. "Cardiologist"
    pub specialty: String,
    /// Degree string as printed on the letterhead, e.g. "MBBS, MD"
    pub qualifications: String,
    pub experience_years: u32,
}

/// A desk staff member (reception, pharmacy, radiology).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub role: Role,
}

/// Letterhead details for a doctor's printed prescriptions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HospitalProfile {
    pub doctor_id: String,
    pub hospital_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl HospitalProfile {
    /// Fresh profile with the default hospital name, used when a doctor
    /// updates their letterhead for the first time.
    pub fn new_for(doctor_id: &str) -> Self {
        HospitalProfile {
            doctor_id: doctor_id.to_string(),
            hospital_name: "My Hospital".to_string(),
            address: None,
            phone: None,
            website: None,
        }
    }

    /// Apply a field-wise update; `None` fields keep their current value.
    pub fn apply(&mut self, update: HospitalProfileUpdate) {
        if let Some(name) = update.hospital_name {
            self.hospital_name = name;
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(website) = update.website {
            self.website = Some(website);
        }
    }
}

/// Partial update for a hospital profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HospitalProfileUpdate {
    pub hospital_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_defaults() {
        let profile = HospitalProfile::new_for("0001Avd");
        assert_eq!(profile.hospital_name, "My Hospital");
        assert!(profile.address.is_none());
    }

    #[test]
    fn test_apply_merges_fields() {
        let mut profile = HospitalProfile::new_for("0001Avd");
        profile.apply(HospitalProfileUpdate {
            hospital_name: Some("KEM".to_string()),
            address: Some("Shivaji Nagar, Pune".to_string()),
            ..Default::default()
        });

        assert_eq!(profile.hospital_name, "KEM");
        assert_eq!(profile.address.as_deref(), Some("Shivaji Nagar, Pune"));

        // A later partial update leaves untouched fields alone.
        profile.apply(HospitalProfileUpdate {
            phone: Some("020 445 6897".to_string()),
            ..Default::default()
        });
        assert_eq!(profile.hospital_name, "KEM");
        assert_eq!(profile.phone.as_deref(), Some("020 445 6897"));
    }
}
