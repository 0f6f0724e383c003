use crate::domain::event::RegistryEvent;
use crate::domain::funds::{Amount, Balance};
use crate::domain::ports::{EventSink, PaymentStore, RosterStore, ValueTransfer};
use crate::domain::student::{AccountId, Student};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory set of callers who have paid the fee.
///
/// `Clone` shares the underlying state, so tests can keep a handle while
/// the engine owns a boxed copy.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    paid: Arc<RwLock<HashSet<AccountId>>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn mark_paid(&self, caller: AccountId) -> Result<()> {
        let mut paid = self.paid.write().await;
        paid.insert(caller);
        Ok(())
    }

    async fn has_paid(&self, caller: AccountId) -> Result<bool> {
        let paid = self.paid.read().await;
        Ok(paid.contains(&caller))
    }
}

#[derive(Default)]
struct RosterState {
    pending: HashMap<AccountId, Student>,
    authorized: HashMap<AccountId, Student>,
    by_id: HashMap<u64, AccountId>,
    // Last assigned sequence-id; monotonic, survives deletions
    last_id: u64,
}

/// In-memory pending map, authorized roster, and sequence-id index.
#[derive(Default, Clone)]
pub struct InMemoryRosterStore {
    inner: Arc<RwLock<RosterState>>,
}

impl InMemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RosterStore for InMemoryRosterStore {
    async fn put_pending(&self, student: Student) -> Result<()> {
        let mut state = self.inner.write().await;
        state.pending.insert(student.identity, student);
        Ok(())
    }

    async fn pending(&self, identity: AccountId) -> Result<Option<Student>> {
        let state = self.inner.read().await;
        Ok(state.pending.get(&identity).cloned())
    }

    async fn remove_pending(&self, identity: AccountId) -> Result<()> {
        let mut state = self.inner.write().await;
        state.pending.remove(&identity);
        Ok(())
    }

    async fn put_authorized(&self, student: Student) -> Result<()> {
        let mut state = self.inner.write().await;
        state.by_id.insert(student.id, student.identity);
        state.authorized.insert(student.identity, student);
        Ok(())
    }

    async fn authorized(&self, identity: AccountId) -> Result<Option<Student>> {
        let state = self.inner.read().await;
        Ok(state.authorized.get(&identity).cloned())
    }

    async fn by_sequence(&self, id: u64) -> Result<Option<Student>> {
        let state = self.inner.read().await;
        let identity = match state.by_id.get(&id) {
            Some(identity) => *identity,
            None => return Ok(None),
        };
        Ok(state.authorized.get(&identity).cloned())
    }

    async fn remove_authorized(&self, identity: AccountId) -> Result<()> {
        let mut state = self.inner.write().await;
        if let Some(student) = state.authorized.remove(&identity) {
            state.by_id.remove(&student.id);
        }
        Ok(())
    }

    async fn next_sequence_id(&self) -> Result<u64> {
        let mut state = self.inner.write().await;
        state.last_id += 1;
        Ok(state.last_id)
    }

    async fn roster(&self) -> Result<Vec<Student>> {
        let state = self.inner.read().await;
        let mut all: Vec<Student> = state.authorized.values().cloned().collect();
        all.sort_by_key(|s| s.id);
        Ok(all)
    }
}

/// In-memory stand-in for the substrate's value-transfer primitive.
///
/// Tracks a signed balance per account so tests can observe that a fee
/// debits the payer and credits the administrator.
#[derive(Default, Clone)]
pub struct Treasury {
    balances: Arc<RwLock<HashMap<AccountId, Balance>>>,
}

impl Treasury {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn balance(&self, account: AccountId) -> Balance {
        let balances = self.balances.read().await;
        balances.get(&account).copied().unwrap_or(Balance::ZERO)
    }
}

#[async_trait]
impl ValueTransfer for Treasury {
    async fn transfer(&self, from: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        let mut balances = self.balances.write().await;
        *balances.entry(from).or_insert(Balance::ZERO) -= amount.into();
        *balances.entry(to).or_insert(Balance::ZERO) += amount.into();
        Ok(())
    }
}

/// Records emitted events for inspection in tests.
#[derive(Default, Clone)]
pub struct RecordingEventSink {
    events: Arc<RwLock<Vec<RegistryEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<RegistryEvent> {
        let events = self.events.read().await;
        events.clone()
    }
}

#[async_trait]
impl EventSink for RecordingEventSink {
    async fn emit(&self, event: RegistryEvent) -> Result<()> {
        let mut events = self.events.write().await;
        events.push(event);
        Ok(())
    }
}

/// Surfaces events as structured log lines; used by the CLI.
#[derive(Default, Clone)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventSink for LogEventSink {
    async fn emit(&self, event: RegistryEvent) -> Result<()> {
        match event {
            RegistryEvent::StudentRegistered { student, name, age } => {
                tracing::info!(%student, %name, age, "student registered");
            }
            RegistryEvent::StudentAuthorized { student } => {
                tracing::info!(%student, "student authorized");
            }
        }
        Ok(())
    }
}
