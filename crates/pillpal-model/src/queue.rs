//! The consultation queue and its status machine.
//!
//! Queue entries form an append-only log: they are never deleted, and
//! status only moves forward through `waiting -> in-consultation ->
//! completed`. There is no backward edge and no cancellation edge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position of a queue entry in the consultation pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueueStatus {
    Waiting,
    InConsultation,
    Completed,
}

impl QueueStatus {
    /// Legal next statuses from this one. `Completed` is terminal.
    pub fn valid_transitions(&self) -> &'static [QueueStatus] {
        match self {
            QueueStatus::Waiting => &[QueueStatus::InConsultation],
            QueueStatus::InConsultation => &[QueueStatus::Completed],
            QueueStatus::Completed => &[],
        }
    }

    pub fn can_transition_to(&self, next: QueueStatus) -> bool {
        self.valid_transitions().contains(&next)
    }

    /// Entries that still occupy the pipeline (not yet completed).
    pub fn is_active(&self) -> bool {
        !matches!(self, QueueStatus::Completed)
    }
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueStatus::Waiting => write!(f, "waiting"),
            QueueStatus::InConsultation => write!(f, "in-consultation"),
            QueueStatus::Completed => write!(f, "completed"),
        }
    }
}

/// One patient's position in the consultation pipeline: a patient/doctor
/// pair, a status, and the check-in timestamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: u64,
    pub patient_id: String,
    pub doctor_id: String,
    pub status: QueueStatus,
    pub created_at: DateTime<Utc>,
}
