use crate::domain::student::AccountId;
use serde::{Deserialize, Serialize};

/// Observer-facing notifications emitted on successful state transitions.
///
/// These are a side channel for off-system observers; the engine never
/// reads them back to reconstruct state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    StudentRegistered {
        student: AccountId,
        name: String,
        age: u8,
    },
    StudentAuthorized {
        student: AccountId,
    },
}
