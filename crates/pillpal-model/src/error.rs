//! Error types shared across the PillPal crates.

use serde::{Deserialize, Serialize};

use crate::queue::QueueStatus;
use crate::Role;

/// Errors returned by clinic store operations.
///
/// Missing identifiers fail loudly rather than degrading into silent
/// no-ops; callers that want lenient behavior can match and ignore the
/// `*NotFound` variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ClinicError {
    #[error("patient not found: {0}")]
    PatientNotFound(String),

    #[error("doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("queue entry not found: #{0}")]
    QueueEntryNotFound(u64),

    #[error("patient {patient_id} already has an active queue entry (#{queue_id})")]
    AlreadyQueued { patient_id: String, queue_id: u64 },

    #[error("invalid queue transition: {from} -> {to}")]
    InvalidTransition { from: QueueStatus, to: QueueStatus },

    #[error("no {0} account available to log in")]
    RoleUnavailable(Role),

    #[error("validation error: {0}")]
    Validation(String),
}
