use super::event::RegistryEvent;
use super::funds::Amount;
use super::student::{AccountId, Student};
use crate::error::Result;
use async_trait::async_trait;

/// Tracks which callers have paid the registration fee.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn mark_paid(&self, caller: AccountId) -> Result<()>;
    async fn has_paid(&self, caller: AccountId) -> Result<bool>;
}

/// Owns the pending map, the authorized roster, the sequence-id index,
/// and the sequence counter.
#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn put_pending(&self, student: Student) -> Result<()>;
    async fn pending(&self, identity: AccountId) -> Result<Option<Student>>;
    async fn remove_pending(&self, identity: AccountId) -> Result<()>;

    /// Stores an authorized record and indexes it under its sequence-id.
    async fn put_authorized(&self, student: Student) -> Result<()>;
    async fn authorized(&self, identity: AccountId) -> Result<Option<Student>>;
    async fn by_sequence(&self, id: u64) -> Result<Option<Student>>;
    /// Removes the record and retires its sequence-id index entry.
    async fn remove_authorized(&self, identity: AccountId) -> Result<()>;

    /// Allocates the next sequence-id. The first call returns 1; ids are
    /// never reissued, even after the record they were assigned to is
    /// removed.
    async fn next_sequence_id(&self) -> Result<u64>;

    /// The full authorized roster, ordered by sequence-id.
    async fn roster(&self) -> Result<Vec<Student>>;
}

/// The substrate's atomic value-transfer primitive.
#[async_trait]
pub trait ValueTransfer: Send + Sync {
    async fn transfer(&self, from: AccountId, to: AccountId, amount: Amount) -> Result<()>;
}

/// Append-only notification channel for off-system observers.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: RegistryEvent) -> Result<()>;
}

pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type RosterStoreBox = Box<dyn RosterStore>;
pub type ValueTransferBox = Box<dyn ValueTransfer>;
pub type EventSinkBox = Box<dyn EventSink>;
