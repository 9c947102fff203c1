//! The store's event feed.
//!
//! Every mutation appends one `StoreEvent` to an internal feed. Views
//! subscribe with an `EventCursor` and drain whatever was appended since
//! their last look, instead of re-reading shared state on a timer. The
//! guarantee is the same as polling gave ("eventually visible"), without
//! the busy-wait.

use serde::{Deserialize, Serialize};

use pillpal_model::QueueStatus;

use crate::{ClinicStore, Session};

/// A state change in the clinic store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    PatientRegistered {
        patient_id: String,
    },
    QueueEntryAdded {
        queue_id: u64,
        patient_id: String,
        doctor_id: String,
    },
    QueueStatusChanged {
        queue_id: u64,
        from: QueueStatus,
        to: QueueStatus,
    },
    PrescriptionIssued {
        prescription_id: u64,
        patient_id: String,
        doctor_id: String,
    },
    HistoryAppended {
        history_id: u64,
        patient_id: String,
    },
    HospitalProfileUpdated {
        doctor_id: String,
    },
    SessionChanged {
        session: Option<Session>,
    },
}

/// A subscription position in the store's event feed.
///
/// A cursor starts at the feed position where it was created, so it only
/// ever sees events appended after `ClinicStore::subscribe`. Cursors are
/// independent: two views draining the same feed each see every event
/// once.
#[derive(Clone, Debug)]
pub struct EventCursor {
    next: usize,
}

impl EventCursor {
    pub(crate) fn at(next: usize) -> Self {
        EventCursor { next }
    }

    /// Events appended since the last call (or since subscription).
    pub fn catch_up<'a>(&mut self, store: &'a ClinicStore) -> &'a [StoreEvent] {
        let events = store.events();
        let start = self.next.min(events.len());
        self.next = events.len();
        &events[start..]
    }

    /// True when `catch_up` would return something.
    pub fn has_pending(&self, store: &ClinicStore) -> bool {
        self.next < store.events().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pillpal_model::{Gender, PatientRegistration};

    fn register(store: &mut ClinicStore, name: &str, phone: &str) {
        store
            .register_patient(PatientRegistration {
                name: name.to_string(),
                phone: phone.to_string(),
                age: 30,
                gender: Gender::Female,
                self_reported_history: String::new(),
                blood_group: None,
            })
            .unwrap();
    }

    #[test]
    fn test_cursor_sees_only_events_after_subscription() {
        let mut store = ClinicStore::new();
        register(&mut store, "Asha Rao", "9876500001");

        let mut cursor = store.subscribe();
        assert!(!cursor.has_pending(&store));

        register(&mut store, "Vikram Patil", "9876500002");
        assert!(cursor.has_pending(&store));

        let events = cursor.catch_up(&store);
        assert!(events
            .iter()
            .any(|e| matches!(e, StoreEvent::PatientRegistered { patient_id } if patient_id == "0002Vik")));
        // Nothing about the pre-subscription registration.
        assert!(!events
            .iter()
            .any(|e| matches!(e, StoreEvent::PatientRegistered { patient_id } if patient_id == "0001Ash")));
    }

    #[test]
    fn test_cursor_drains_each_event_once() {
        let mut store = ClinicStore::new();
        let mut cursor = store.subscribe();

        register(&mut store, "Asha Rao", "9876500001");
        assert!(!cursor.catch_up(&store).is_empty());
        assert!(cursor.catch_up(&store).is_empty());
    }

    #[test]
    fn test_cursors_are_independent() {
        let mut store = ClinicStore::new();
        let mut reception = store.subscribe();
        let mut doctor_view = store.subscribe();

        register(&mut store, "Asha Rao", "9876500001");

        let seen_by_reception = reception.catch_up(&store).len();
        let seen_by_doctor = doctor_view.catch_up(&store).len();
        assert_eq!(seen_by_reception, seen_by_doctor);
        assert!(seen_by_reception > 0);
    }
}
