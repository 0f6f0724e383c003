use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable caller or student identity, as resolved by the substrate that
/// delivers operations. Identities cannot be spoofed; the engine trusts
/// the value it is handed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for AccountId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A registry record, in either the pending map or the authorized roster.
///
/// `id` is 0 while pending and the assigned sequence-id once authorized.
/// The `Default` value doubles as the zero record returned by raw
/// by-identity reads of absent entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Student {
    pub identity: AccountId,
    pub name: String,
    pub id: u64,
    pub age: u8,
    pub registered: bool,
    pub deleted: bool,
}

impl Student {
    /// A freshly registered, not yet authorized record.
    pub fn pending(identity: AccountId, name: impl Into<String>, age: u8) -> Self {
        Self {
            identity,
            name: name.into(),
            id: 0,
            age,
            registered: true,
            deleted: false,
        }
    }

    /// The authorized form of a pending record, carrying its sequence-id.
    pub fn promote(self, id: u64) -> Self {
        Self { id, ..self }
    }
}
