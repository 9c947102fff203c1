//! PillPal Domain Model
//!
//! Entity types and validation for the clinic workflow:
//!
//! - Patients, doctors, and staff as a closed set of user roles
//! - The consultation queue and its status machine
//! - Prescriptions with vitals and medicine orders
//! - The append-only medical history feed
//!
//! # Example
//!
//! ```rust
//! use pillpal_model::derive_patient_id;
//!
//! let id = derive_patient_id("John Doe", "9876549999");
//! assert_eq!(id, "9999Joh");
//! ```

pub mod error;
pub mod history;
pub mod patient;
pub mod prescription;
pub mod provider;
pub mod queue;

pub use error::ClinicError;
pub use history::{HistorySource, MedicalHistoryItem};
pub use patient::{derive_patient_id, BloodGroup, Gender, Patient, PatientRegistration};
pub use prescription::{MedicineEntry, Prescription, Vitals};
pub use provider::{Doctor, HospitalProfile, HospitalProfileUpdate, Staff};
pub use queue::{QueueEntry, QueueStatus};

use serde::{Deserialize, Serialize};

/// User roles known to the clinic. The set is closed; a role is fixed at
/// creation and never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Receptionist,
    Pharmacy,
    Radiology,
}

impl Role {
    /// True for the desk roles that exist only as seed data.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Receptionist | Role::Pharmacy | Role::Radiology)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Doctor => write!(f, "doctor"),
            Role::Receptionist => write!(f, "receptionist"),
            Role::Pharmacy => write!(f, "pharmacy"),
            Role::Radiology => write!(f, "radiology"),
        }
    }
}

/// A clinic user, discriminated by role. Roles carry different payloads,
/// so this is a sum type rather than a single struct with optional fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum User {
    Patient(Patient),
    Doctor(Doctor),
    Staff(Staff),
}

impl User {
    pub fn id(&self) -> &str {
        match self {
            User::Patient(p) => &p.id,
            User::Doctor(d) => &d.id,
            User::Staff(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            User::Patient(p) => &p.name,
            User::Doctor(d) => &d.name,
            User::Staff(s) => &s.name,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            User::Patient(_) => Role::Patient,
            User::Doctor(_) => Role::Doctor,
            User::Staff(s) => s.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Patient.to_string(), "patient");
        assert_eq!(Role::Receptionist.to_string(), "receptionist");
    }

    #[test]
    fn test_staff_roles() {
        assert!(Role::Receptionist.is_staff());
        assert!(Role::Pharmacy.is_staff());
        assert!(Role::Radiology.is_staff());
        assert!(!Role::Patient.is_staff());
        assert!(!Role::Doctor.is_staff());
    }

    #[test]
    fn test_user_accessors() {
        let user = User::Staff(Staff {
            id: "0003Mee".to_string(),
            name: "Meera Joshi".to_string(),
            phone: "9999000003".to_string(),
            role: Role::Receptionist,
        });

        assert_eq!(user.id(), "0003Mee");
        assert_eq!(user.name(), "Meera Joshi");
        assert_eq!(user.role(), Role::Receptionist);
    }
}
