//! Seed data: the fixtures a fresh store starts with.
//!
//! All of it is hardcoded and fictional. One doctor with a hospital
//! profile, one desk staff member per staff role, one sample patient, and
//! one sample prescription with its derived history item.

use chrono::Utc;

use pillpal_model::{
    Doctor, Gender, HistorySource, HospitalProfile, MedicalHistoryItem, MedicineEntry, Patient,
    Prescription, Role, Staff, Vitals,
};

use crate::ClinicStore;

impl ClinicStore {
    /// A store pre-populated with mock data, the usual starting point for
    /// anything other than tests.
    pub fn with_seed_data() -> Self {
        let mut store = ClinicStore::new();

        store.doctors.push(Doctor {
            id: "0001Avd".to_string(),
            name: "Dr. Avdhoot Patil".to_string(),
            phone: "9999000001".to_string(),
            specialty: "Cardiologist".to_string(),
            qualifications: "MBBS, MD".to_string(),
            experience_years: 15,
        });

        store.profiles.push(HospitalProfile {
            doctor_id: "0001Avd".to_string(),
            hospital_name: "KEM".to_string(),
            address: Some("Shivaji Nagar, Pune".to_string()),
            phone: Some("020 445 6897".to_string()),
            website: Some("www.dravdhoot.com".to_string()),
        });

        store.staff.push(Staff {
            id: "0003Mee".to_string(),
            name: "Meera Joshi".to_string(),
            phone: "9999000003".to_string(),
            role: Role::Receptionist,
        });
        store.staff.push(Staff {
            id: "0004Kir".to_string(),
            name: "Kiran Shah".to_string(),
            phone: "9999000004".to_string(),
            role: Role::Pharmacy,
        });
        store.staff.push(Staff {
            id: "0005Rav".to_string(),
            name: "Ravi Kulkarni".to_string(),
            phone: "9999000005".to_string(),
            role: Role::Radiology,
        });

        store.patients.push(Patient {
            id: "0002Pat".to_string(),
            name: "Test Patient".to_string(),
            phone: "9999000002".to_string(),
            age: 30,
            gender: Gender::Male,
            self_reported_history: String::new(),
            blood_group: None,
        });

        // Sample prescription, inserted directly so seeding leaves the
        // event feed empty for subscribers.
        let created_at = Utc::now();
        let rx = Prescription {
            id: 1,
            patient_id: "0002Pat".to_string(),
            doctor_id: "0001Avd".to_string(),
            diagnosis: "Chest pain with mild discomfort.".to_string(),
            vitals: Vitals {
                height_cm: Some(170.0),
                weight_kg: None,
                blood_pressure: Some("120/80".to_string()),
                temperature_c: None,
            },
            medicines: vec![
                MedicineEntry {
                    name: "Tab. Atorvastatin 10mg".to_string(),
                    dosage: "1-0-0".to_string(),
                    frequency: "After food".to_string(),
                    duration: "30 days".to_string(),
                },
                MedicineEntry {
                    name: "Tab. Aspirin 75mg".to_string(),
                    dosage: "0-1-0".to_string(),
                    frequency: "After dinner".to_string(),
                    duration: "15 days".to_string(),
                },
            ],
            created_at,
        };
        store.history.insert(
            0,
            MedicalHistoryItem {
                id: 1,
                patient_id: "0002Pat".to_string(),
                title: format!("Prescription #{}: {}", rx.id, rx.diagnosis),
                note: None,
                attachment: None,
                source: HistorySource::PrescriptionDerived {
                    prescription_id: rx.id,
                },
                recorded_at: created_at,
            },
        );
        store.prescriptions.insert(0, rx);
        store.next_prescription_id = 2;
        store.next_history_id = 2;

        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_contents() {
        let store = ClinicStore::with_seed_data();

        assert_eq!(store.doctors().len(), 1);
        assert_eq!(store.doctors()[0].id, "0001Avd");
        assert_eq!(store.patients().len(), 1);
        assert_eq!(store.staff_members().len(), 3);
        assert_eq!(store.prescriptions().len(), 1);
        assert_eq!(store.patient_history("0002Pat").len(), 1);
        assert_eq!(
            store.hospital_profile("0001Avd").map(|p| p.hospital_name.as_str()),
            Some("KEM")
        );
    }

    #[test]
    fn test_seed_leaves_event_feed_empty() {
        let store = ClinicStore::with_seed_data();
        assert!(store.events().is_empty());
    }

    #[test]
    fn test_seed_counters_continue_after_sample_data() {
        let mut store = ClinicStore::with_seed_data();
        let rx = store
            .add_prescription(
                "0002Pat",
                "0001Avd",
                "Follow-up",
                Vitals::default(),
                vec![],
            )
            .unwrap();
        assert_eq!(rx.id, 2);

        let entry = store.add_to_queue("0002Pat", "0001Avd").unwrap();
        assert_eq!(entry.id, 1);
    }
}
