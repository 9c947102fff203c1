//! End-to-end walk through the clinic pipeline: registration, check-in,
//! reception calling the patient in, and the doctor closing the
//! consultation with a prescription.

use pillpal_model::{Gender, MedicineEntry, PatientRegistration, QueueStatus, Role, Vitals};
use pillpal_store::{ClinicStore, StoreEvent};

#[test]
fn full_consultation_pipeline() {
    let mut store = ClinicStore::with_seed_data();
    let mut reception_view = store.subscribe();
    let mut doctor_view = store.subscribe();

    // A new patient registers and is logged in as themselves.
    let patient = store
        .register_patient(PatientRegistration {
            name: "John Doe".to_string(),
            phone: "9876549999".to_string(),
            age: 32,
            gender: Gender::Male,
            self_reported_history: String::new(),
            blood_group: None,
        })
        .expect("registration succeeds");
    assert_eq!(patient.id, "9999Joh");
    assert_eq!(store.session().unwrap().role, Role::Patient);

    // Check in with the seeded doctor: one waiting entry.
    let entry = store.add_to_queue("9999Joh", "0001Avd").expect("check-in");
    assert_eq!(entry.status, QueueStatus::Waiting);
    assert_eq!(store.waiting_queue().len(), 1);

    // The reception view learns about the check-in from the feed.
    assert!(reception_view
        .catch_up(&store)
        .iter()
        .any(|e| matches!(e, StoreEvent::QueueEntryAdded { patient_id, .. } if patient_id == "9999Joh")));

    // Reception calls the next patient.
    store.login(Role::Receptionist, None).expect("reception login");
    let called = store
        .call_next_patient()
        .expect("call next")
        .expect("someone is waiting");
    assert_eq!(called.patient_id, "9999Joh");
    assert_eq!(called.doctor_id, "0001Avd");
    assert!(store.waiting_queue().is_empty());

    // The doctor view sees the assignment without polling the queue.
    assert!(doctor_view.catch_up(&store).iter().any(|e| matches!(
        e,
        StoreEvent::QueueStatusChanged {
            to: QueueStatus::InConsultation,
            ..
        }
    )));
    let current = store
        .current_consultation("0001Avd")
        .expect("doctor exists")
        .expect("a patient is in consultation");
    assert_eq!(current.id, "9999Joh");

    // The doctor completes the consultation with a diagnosis and one
    // medicine; the queue entry closes and the prescription is issued in
    // the same action.
    store.login(Role::Doctor, None).expect("doctor login");
    let outcome = store
        .complete_consultation(
            entry.id,
            "Mild fever",
            Vitals {
                temperature_c: Some(38.1),
                ..Default::default()
            },
            vec![MedicineEntry {
                name: "Tab. Paracetamol 500mg".to_string(),
                dosage: "1-0-1".to_string(),
                frequency: "After food".to_string(),
                duration: "3 days".to_string(),
            }],
        )
        .expect("consultation completes");

    let closed = store
        .queue_entries()
        .iter()
        .find(|e| e.id == entry.id)
        .expect("entry still in the log");
    assert_eq!(closed.status, QueueStatus::Completed);

    // Exactly one prescription for the pair, first in iteration order.
    let for_patient = store.prescriptions_for("9999Joh");
    assert_eq!(for_patient.len(), 1);
    assert_eq!(for_patient[0].id, outcome.prescription.id);
    assert_eq!(for_patient[0].doctor_id, "0001Avd");
    assert_eq!(store.prescriptions()[0].id, outcome.prescription.id);

    // The history feed gained an item whose title references the
    // prescription.
    let history = store.patient_history("9999Joh");
    assert_eq!(history.len(), 1);
    assert!(history[0]
        .title
        .contains(&format!("Prescription #{}", outcome.prescription.id)));
    assert!(history[0].title.contains("Mild fever"));

    // Completing frees the patient for a future visit.
    assert!(store.add_to_queue("9999Joh", "0001Avd").is_ok());
}
