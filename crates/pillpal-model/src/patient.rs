//! Patient identity and demographics.
//!
//! Patient identifiers are derived from registration data: the last four
//! characters of the phone number followed by the first three characters
//! of the name, capitalized. The scheme is deterministic but not unique;
//! the store keeps every registration as an independent record even when
//! derived identifiers collide.

use serde::{Deserialize, Serialize};

use crate::error::ClinicError;

/// A registered patient. Immutable after registration except by
/// registering again, which creates a new record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Derived identifier, e.g. `9999Joh`
    pub id: String,
    pub name: String,
    pub phone: String,
    pub age: u32,
    pub gender: Gender,
    /// Free-text medical background supplied by the patient at
    /// registration, distinct from clinician-authored history
    pub self_reported_history: String,
    pub blood_group: Option<BloodGroup>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// One-letter code used on the printed prescription ("Age/Sex: 30/M").
    pub fn code(&self) -> char {
        match self {
            Gender::Male => 'M',
            Gender::Female => 'F',
            Gender::Other => 'O',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodGroup {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    ABPositive,
    ABNegative,
    OPositive,
    ONegative,
}

impl std::fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BloodGroup::APositive => write!(f, "A+"),
            BloodGroup::ANegative => write!(f, "A-"),
            BloodGroup::BPositive => write!(f, "B+"),
            BloodGroup::BNegative => write!(f, "B-"),
            BloodGroup::ABPositive => write!(f, "AB+"),
            BloodGroup::ABNegative => write!(f, "AB-"),
            BloodGroup::OPositive => write!(f, "O+"),
            BloodGroup::ONegative => write!(f, "O-"),
        }
    }
}

/// Registration form data. The store derives the patient id from `name`
/// and `phone`; everything else is carried over verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientRegistration {
    pub name: String,
    pub phone: String,
    pub age: u32,
    pub gender: Gender,
    pub self_reported_history: String,
    pub blood_group: Option<BloodGroup>,
}

impl PatientRegistration {
    /// Check that the form data can produce a full-length identifier.
    ///
    /// Registration itself never rejects input; short names or phones
    /// simply produce a truncated id. Callers that want to refuse such
    /// input run this first.
    pub fn validate(&self) -> Result<(), ClinicError> {
        if self.name.chars().count() < 3 {
            return Err(ClinicError::Validation(
                "name must be at least 3 characters".to_string(),
            ));
        }
        if self.phone.chars().count() < 4 {
            return Err(ClinicError::Validation(
                "phone must be at least 4 digits".to_string(),
            ));
        }
        if !self.phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(ClinicError::Validation(
                "phone must contain only digits".to_string(),
            ));
        }
        if self.age == 0 || self.age > 130 {
            return Err(ClinicError::Validation(format!(
                "implausible age: {}",
                self.age
            )));
        }
        Ok(())
    }
}

/// Derive a patient identifier from registration data.
///
/// Last four characters of the phone, then the first three characters of
/// the name with the first upcased and the rest lowercased. Inputs shorter
/// than that produce a truncated id.
pub fn derive_patient_id(name: &str, phone: &str) -> String {
    let tail_len = phone.chars().count().saturating_sub(4);
    let mut id: String = phone.chars().skip(tail_len).collect();

    for (i, c) in name.chars().take(3).enumerate() {
        if i == 0 {
            id.extend(c.to_uppercase());
        } else {
            id.extend(c.to_lowercase());
        }
    }

    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_derive_patient_id() {
        assert_eq!(derive_patient_id("John Doe", "9876549999"), "9999Joh");
        assert_eq!(derive_patient_id("Avdhoot Patil", "9999000001"), "0001Avd");
    }

    #[test]
    fn test_derive_patient_id_capitalizes() {
        assert_eq!(derive_patient_id("john doe", "9876549999"), "9999Joh");
        assert_eq!(derive_patient_id("JOHN DOE", "9876549999"), "9999Joh");
    }

    #[test]
    fn test_derive_patient_id_truncates_short_input() {
        assert_eq!(derive_patient_id("Jo", "99"), "99Jo");
        assert_eq!(derive_patient_id("", ""), "");
    }

    #[test]
    fn test_registration_validation() {
        let mut reg = PatientRegistration {
            name: "John Doe".to_string(),
            phone: "9876549999".to_string(),
            age: 32,
            gender: Gender::Male,
            self_reported_history: String::new(),
            blood_group: None,
        };
        assert!(reg.validate().is_ok());

        reg.name = "Jo".to_string();
        assert!(reg.validate().is_err());

        reg.name = "John Doe".to_string();
        reg.phone = "98a6549999".to_string();
        assert!(reg.validate().is_err());

        reg.phone = "9876549999".to_string();
        reg.age = 0;
        assert!(reg.validate().is_err());
    }

    #[test]
    fn test_blood_group_display() {
        assert_eq!(BloodGroup::OPositive.to_string(), "O+");
        assert_eq!(BloodGroup::ABNegative.to_string(), "AB-");
    }

    proptest! {
        #[test]
        fn prop_id_is_phone_tail_plus_name_head(
            name in "[A-Za-z]{3,20}",
            phone in "[0-9]{4,12}",
        ) {
            let id = derive_patient_id(&name, &phone);

            let tail: String = phone.chars().rev().take(4).collect::<Vec<_>>()
                .into_iter().rev().collect();
            prop_assert!(id.starts_with(&tail));
            prop_assert_eq!(id.chars().count(), 7);
        }

        #[test]
        fn prop_id_is_deterministic(
            name in "[A-Za-z ]{1,20}",
            phone in "[0-9]{1,12}",
        ) {
            prop_assert_eq!(
                derive_patient_id(&name, &phone),
                derive_patient_id(&name, &phone)
            );
        }
    }
}
