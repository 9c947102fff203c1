//! PillPal Clinic State Store
//!
//! Single source of truth for clinic state and the only path through
//! which it changes:
//!
//! - Patient registration with derived identifiers
//! - The reception queue and its forward-only status machine
//! - Prescriptions and the derived medical history feed
//! - Session identity (a placeholder for real authentication)
//! - An event feed that replaces timer-based cross-view polling
//!
//! All collections are private. Views read through the accessors and
//! mutate through the operations; there is no other way in.
//!
//! Everything is synchronous and single-threaded: each operation is one
//! discrete state update with no interleaving, so there is no lock or
//! transaction discipline anywhere.

pub mod events;
mod seed;

pub use events::{EventCursor, StoreEvent};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pillpal_model::{
    derive_patient_id, ClinicError, Doctor, HistorySource, HospitalProfile,
    HospitalProfileUpdate, MedicalHistoryItem, MedicineEntry, Patient, PatientRegistration,
    Prescription, QueueEntry, QueueStatus, Role, Staff, User, Vitals,
};

/// The identity currently "logged in". A placeholder for real
/// authentication, which is out of scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
}

/// Result of the reception desk calling the next patient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalledPatient {
    pub queue_id: u64,
    pub patient_id: String,
    pub doctor_id: String,
}

/// Result of a doctor completing a consultation: the queue entry that was
/// closed and the prescription issued in the same action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsultationOutcome {
    pub queue_id: u64,
    pub prescription: Prescription,
}

/// In-memory clinic state: patients, doctors, staff, the consultation
/// queue, prescriptions, and the medical history feed.
///
/// Queue entries are an append-only log; prescriptions and history are
/// kept most-recent-first.
#[derive(Clone, Debug, Default)]
pub struct ClinicStore {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    staff: Vec<Staff>,
    queue: Vec<QueueEntry>,
    prescriptions: Vec<Prescription>,
    history: Vec<MedicalHistoryItem>,
    profiles: Vec<HospitalProfile>,
    session: Option<Session>,
    events: Vec<StoreEvent>,
    next_queue_id: u64,
    next_prescription_id: u64,
    next_history_id: u64,
}

impl ClinicStore {
    /// An empty store with no users at all. Tests start here; the demo
    /// and anything resembling a deployment start from
    /// [`ClinicStore::with_seed_data`].
    pub fn new() -> Self {
        ClinicStore {
            next_queue_id: 1,
            next_prescription_id: 1,
            next_history_id: 1,
            ..Default::default()
        }
    }

    // ----- registration & session -----

    /// Register a new patient and make them the active session identity.
    ///
    /// The identifier is derived from the registration data and is not
    /// checked for uniqueness: registering twice always produces a new,
    /// independent record, even when the derived ids collide. Short
    /// inputs produce a truncated id; both cases log a warning.
    pub fn register_patient(
        &mut self,
        reg: PatientRegistration,
    ) -> Result<Patient, ClinicError> {
        if reg.phone.chars().count() < 4 || reg.name.chars().count() < 3 {
            warn!(
                "registration input too short (name {:?}, phone {:?}); derived id will be truncated",
                reg.name, reg.phone
            );
        }

        let id = derive_patient_id(&reg.name, &reg.phone);
        if self.patients.iter().any(|p| p.id == id) {
            warn!("derived patient id {} collides with an existing registration", id);
        }

        let patient = Patient {
            id: id.clone(),
            name: reg.name,
            phone: reg.phone,
            age: reg.age,
            gender: reg.gender,
            self_reported_history: reg.self_reported_history,
            blood_group: reg.blood_group,
        };
        self.patients.push(patient.clone());
        self.emit(StoreEvent::PatientRegistered {
            patient_id: id.clone(),
        });
        info!("registered patient {} ({})", patient.name, id);

        if !patient.self_reported_history.trim().is_empty() {
            self.push_history(MedicalHistoryItem {
                id: 0, // assigned by push_history
                patient_id: id.clone(),
                title: "Self-reported medical history".to_string(),
                note: Some(patient.self_reported_history.clone()),
                attachment: None,
                source: HistorySource::SelfReported,
                recorded_at: Utc::now(),
            });
        }

        let session = Session {
            user_id: id,
            role: Role::Patient,
        };
        self.session = Some(session.clone());
        self.emit(StoreEvent::SessionChanged {
            session: Some(session),
        });

        Ok(patient)
    }

    /// Set the session identity.
    ///
    /// Patients must pass their id. Doctors and staff may omit it, in
    /// which case the first seed record of that role is selected.
    pub fn login(&mut self, role: Role, id: Option<&str>) -> Result<Session, ClinicError> {
        let user_id = match role {
            Role::Patient => {
                let id = id.ok_or_else(|| {
                    ClinicError::Validation("patient login requires an id".to_string())
                })?;
                self.require_patient(id)?.id.clone()
            }
            Role::Doctor => match id {
                Some(id) => self.require_doctor(id)?.id.clone(),
                None => self
                    .doctors
                    .first()
                    .ok_or(ClinicError::RoleUnavailable(role))?
                    .id
                    .clone(),
            },
            _ => {
                let staff = match id {
                    Some(id) => self.staff.iter().find(|s| s.id == id && s.role == role),
                    None => self.staff.iter().find(|s| s.role == role),
                };
                staff
                    .ok_or(ClinicError::RoleUnavailable(role))?
                    .id
                    .clone()
            }
        };

        let session = Session { user_id, role };
        self.session = Some(session.clone());
        self.emit(StoreEvent::SessionChanged {
            session: Some(session.clone()),
        });
        info!("logged in as {} ({})", session.user_id, session.role);
        Ok(session)
    }

    /// Clear the session identity.
    pub fn logout(&mut self) {
        if self.session.take().is_some() {
            self.emit(StoreEvent::SessionChanged { session: None });
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    // ----- queue -----

    /// Check a patient in for a consultation with a doctor. The new entry
    /// starts in `waiting`.
    ///
    /// At most one active (non-completed) entry may exist per patient;
    /// a second check-in is rejected.
    pub fn add_to_queue(
        &mut self,
        patient_id: &str,
        doctor_id: &str,
    ) -> Result<QueueEntry, ClinicError> {
        self.require_patient(patient_id)?;
        self.require_doctor(doctor_id)?;

        if let Some(active) = self
            .queue
            .iter()
            .find(|e| e.patient_id == patient_id && e.status.is_active())
        {
            warn!(
                "patient {} attempted a second check-in while entry #{} is {}",
                patient_id, active.id, active.status
            );
            return Err(ClinicError::AlreadyQueued {
                patient_id: patient_id.to_string(),
                queue_id: active.id,
            });
        }

        let entry = QueueEntry {
            id: self.next_queue_id,
            patient_id: patient_id.to_string(),
            doctor_id: doctor_id.to_string(),
            status: QueueStatus::Waiting,
            created_at: Utc::now(),
        };
        self.next_queue_id += 1;
        self.queue.push(entry.clone());
        self.emit(StoreEvent::QueueEntryAdded {
            queue_id: entry.id,
            patient_id: entry.patient_id.clone(),
            doctor_id: entry.doctor_id.clone(),
        });
        info!(
            "patient {} checked in with doctor {} (queue #{})",
            patient_id, doctor_id, entry.id
        );
        Ok(entry)
    }

    /// Replace a queue entry's status in place. Only the forward
    /// transitions of the status machine are accepted.
    pub fn update_queue_status(
        &mut self,
        queue_id: u64,
        new_status: QueueStatus,
    ) -> Result<QueueEntry, ClinicError> {
        let entry = self
            .queue
            .iter_mut()
            .find(|e| e.id == queue_id)
            .ok_or(ClinicError::QueueEntryNotFound(queue_id))?;

        let from = entry.status;
        if !from.can_transition_to(new_status) {
            warn!(
                "rejected queue transition {} -> {} for entry #{}",
                from, new_status, queue_id
            );
            return Err(ClinicError::InvalidTransition {
                from,
                to: new_status,
            });
        }

        entry.status = new_status;
        let updated = entry.clone();
        self.emit(StoreEvent::QueueStatusChanged {
            queue_id,
            from,
            to: new_status,
        });
        debug!("queue #{} moved {} -> {}", queue_id, from, new_status);
        Ok(updated)
    }

    /// Reception action: move the oldest waiting entry to
    /// `in-consultation`. Returns `None` when nobody is waiting.
    pub fn call_next_patient(&mut self) -> Result<Option<CalledPatient>, ClinicError> {
        let next = self
            .queue
            .iter()
            .find(|e| e.status == QueueStatus::Waiting)
            .map(|e| (e.id, e.patient_id.clone(), e.doctor_id.clone()));

        let (queue_id, patient_id, doctor_id) = match next {
            Some(found) => found,
            None => {
                debug!("reception called next patient but the queue is empty");
                return Ok(None);
            }
        };

        self.update_queue_status(queue_id, QueueStatus::InConsultation)?;
        Ok(Some(CalledPatient {
            queue_id,
            patient_id,
            doctor_id,
        }))
    }

    /// Doctor view: the patient currently in consultation with this
    /// doctor, if any.
    pub fn current_consultation(
        &self,
        doctor_id: &str,
    ) -> Result<Option<&Patient>, ClinicError> {
        self.require_doctor(doctor_id)?;
        let entry = self.queue.iter().find(|e| {
            e.doctor_id == doctor_id && e.status == QueueStatus::InConsultation
        });
        Ok(entry.and_then(|e| self.patient(&e.patient_id)))
    }

    // ----- prescriptions & history -----

    /// Issue a prescription and append the derived history item in the
    /// same synchronous action. The prescription list and the history
    /// feed are both most-recent-first.
    pub fn add_prescription(
        &mut self,
        patient_id: &str,
        doctor_id: &str,
        diagnosis: &str,
        vitals: Vitals,
        medicines: Vec<MedicineEntry>,
    ) -> Result<Prescription, ClinicError> {
        self.require_patient(patient_id)?;
        self.require_doctor(doctor_id)?;

        let rx = Prescription {
            id: self.next_prescription_id,
            patient_id: patient_id.to_string(),
            doctor_id: doctor_id.to_string(),
            diagnosis: diagnosis.to_string(),
            vitals,
            medicines,
            created_at: Utc::now(),
        };
        self.next_prescription_id += 1;
        self.prescriptions.insert(0, rx.clone());
        self.emit(StoreEvent::PrescriptionIssued {
            prescription_id: rx.id,
            patient_id: rx.patient_id.clone(),
            doctor_id: rx.doctor_id.clone(),
        });
        info!(
            "prescription #{} issued for patient {} by doctor {}",
            rx.id, patient_id, doctor_id
        );

        self.push_history(MedicalHistoryItem {
            id: 0, // assigned by push_history
            patient_id: patient_id.to_string(),
            title: format!("Prescription #{}: {}", rx.id, rx.diagnosis),
            note: None,
            attachment: None,
            source: HistorySource::PrescriptionDerived {
                prescription_id: rx.id,
            },
            recorded_at: rx.created_at,
        });

        Ok(rx)
    }

    /// Doctor action closing a consultation: the queue entry moves to
    /// `completed` and the prescription is issued in the same action.
    pub fn complete_consultation(
        &mut self,
        queue_id: u64,
        diagnosis: &str,
        vitals: Vitals,
        medicines: Vec<MedicineEntry>,
    ) -> Result<ConsultationOutcome, ClinicError> {
        let (patient_id, doctor_id) = {
            let entry = self
                .queue
                .iter()
                .find(|e| e.id == queue_id)
                .ok_or(ClinicError::QueueEntryNotFound(queue_id))?;
            (entry.patient_id.clone(), entry.doctor_id.clone())
        };

        self.update_queue_status(queue_id, QueueStatus::Completed)?;
        let prescription =
            self.add_prescription(&patient_id, &doctor_id, diagnosis, vitals, medicines)?;
        Ok(ConsultationOutcome {
            queue_id,
            prescription,
        })
    }

    /// Manually add a history item for a patient.
    pub fn add_history_note(
        &mut self,
        patient_id: &str,
        title: &str,
        note: Option<&str>,
        attachment: Option<&str>,
    ) -> Result<MedicalHistoryItem, ClinicError> {
        self.require_patient(patient_id)?;
        Ok(self.push_history(MedicalHistoryItem {
            id: 0, // assigned by push_history
            patient_id: patient_id.to_string(),
            title: title.to_string(),
            note: note.map(str::to_string),
            attachment: attachment.map(str::to_string),
            source: HistorySource::SelfReported,
            recorded_at: Utc::now(),
        }))
    }

    /// A patient's history, most recent first.
    pub fn patient_history(&self, patient_id: &str) -> Vec<&MedicalHistoryItem> {
        self.history
            .iter()
            .filter(|h| h.patient_id == patient_id)
            .collect()
    }

    // ----- hospital profile -----

    /// Upsert a doctor's letterhead. Absent fields keep their current
    /// values.
    pub fn update_hospital_profile(
        &mut self,
        doctor_id: &str,
        update: HospitalProfileUpdate,
    ) -> Result<HospitalProfile, ClinicError> {
        self.require_doctor(doctor_id)?;

        let idx = match self.profiles.iter().position(|p| p.doctor_id == doctor_id) {
            Some(idx) => idx,
            None => {
                self.profiles.push(HospitalProfile::new_for(doctor_id));
                self.profiles.len() - 1
            }
        };
        self.profiles[idx].apply(update);
        let updated = self.profiles[idx].clone();

        self.emit(StoreEvent::HospitalProfileUpdated {
            doctor_id: doctor_id.to_string(),
        });
        Ok(updated)
    }

    pub fn hospital_profile(&self, doctor_id: &str) -> Option<&HospitalProfile> {
        self.profiles.iter().find(|p| p.doctor_id == doctor_id)
    }

    // ----- reads -----

    /// First registered patient with this id. Derived ids can collide;
    /// the earliest registration wins lookups.
    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Look up any user by id, whatever their role.
    pub fn user(&self, id: &str) -> Option<User> {
        if let Some(patient) = self.patient(id) {
            return Some(User::Patient(patient.clone()));
        }
        if let Some(doctor) = self.doctor(id) {
            return Some(User::Doctor(doctor.clone()));
        }
        self.staff
            .iter()
            .find(|s| s.id == id)
            .map(|s| User::Staff(s.clone()))
    }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn staff_members(&self) -> &[Staff] {
        &self.staff
    }

    /// The full queue log, in check-in order.
    pub fn queue_entries(&self) -> &[QueueEntry] {
        &self.queue
    }

    /// Waiting entries in check-in order.
    pub fn waiting_queue(&self) -> Vec<&QueueEntry> {
        self.queue
            .iter()
            .filter(|e| e.status == QueueStatus::Waiting)
            .collect()
    }

    /// All prescriptions, most recent first.
    pub fn prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    /// A patient's prescriptions, most recent first.
    pub fn prescriptions_for(&self, patient_id: &str) -> Vec<&Prescription> {
        self.prescriptions
            .iter()
            .filter(|p| p.patient_id == patient_id)
            .collect()
    }

    pub fn prescription(&self, id: u64) -> Option<&Prescription> {
        self.prescriptions.iter().find(|p| p.id == id)
    }

    /// The whole history feed, most recent first.
    pub fn history_items(&self) -> &[MedicalHistoryItem] {
        &self.history
    }

    /// The event feed since the store was created.
    pub fn events(&self) -> &[StoreEvent] {
        &self.events
    }

    /// Subscribe to state changes from this point onward.
    pub fn subscribe(&self) -> EventCursor {
        EventCursor::at(self.events.len())
    }

    // ----- internals -----

    fn require_patient(&self, id: &str) -> Result<&Patient, ClinicError> {
        self.patient(id)
            .ok_or_else(|| ClinicError::PatientNotFound(id.to_string()))
    }

    fn require_doctor(&self, id: &str) -> Result<&Doctor, ClinicError> {
        self.doctor(id)
            .ok_or_else(|| ClinicError::DoctorNotFound(id.to_string()))
    }

    /// Prepend a history item, assigning its id, and emit the event.
    fn push_history(&mut self, mut item: MedicalHistoryItem) -> MedicalHistoryItem {
        item.id = self.next_history_id;
        self.next_history_id += 1;
        self.history.insert(0, item.clone());
        self.emit(StoreEvent::HistoryAppended {
            history_id: item.id,
            patient_id: item.patient_id.clone(),
        });
        item
    }

    fn emit(&mut self, event: StoreEvent) {
        self.events.push(event);
    }
}
