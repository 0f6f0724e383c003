use crate::domain::event::RegistryEvent;
use crate::domain::funds::Amount;
use crate::domain::operation::{Operation, OperationKind};
use crate::domain::ports::{EventSinkBox, PaymentStoreBox, RosterStoreBox, ValueTransferBox};
use crate::domain::student::{AccountId, Student};
use crate::error::{RegistryError, Result};
use rust_decimal::Decimal;

/// The registry's state-transition engine.
///
/// Owns the storage and substrate ports and enforces every guard. The
/// administrator identity is fixed at construction and is the only
/// identity allowed to authorize, read, update, or delete roster entries.
///
/// Operations are atomic: all guards are checked before the first write,
/// so a rejected operation leaves no trace. Sequential consistency comes
/// from awaiting each port call before issuing the next.
pub struct RegistryEngine {
    admin: AccountId,
    payments: PaymentStoreBox,
    roster: RosterStoreBox,
    treasury: ValueTransferBox,
    events: EventSinkBox,
}

impl RegistryEngine {
    pub fn new(
        admin: AccountId,
        payments: PaymentStoreBox,
        roster: RosterStoreBox,
        treasury: ValueTransferBox,
        events: EventSinkBox,
    ) -> Self {
        Self {
            admin,
            payments,
            roster,
            treasury,
            events,
        }
    }

    pub fn admin(&self) -> AccountId {
        self.admin
    }

    fn ensure_admin(&self, caller: AccountId) -> Result<()> {
        if caller == self.admin {
            Ok(())
        } else {
            Err(RegistryError::NotOwner)
        }
    }

    /// Marks the caller as having paid and forwards the full value to the
    /// administrator. Paying again is allowed and simply re-confirms the
    /// flag; the value still moves.
    pub async fn submit_fee(&self, caller: AccountId, value: Decimal) -> Result<()> {
        let amount = Amount::new(value)?;
        self.treasury.transfer(caller, self.admin, amount).await?;
        self.payments.mark_paid(caller).await
    }

    /// Creates a pending record for `student`. The payment check is on the
    /// caller: a paid sponsor may register any identity.
    pub async fn register(
        &self,
        caller: AccountId,
        student: AccountId,
        name: &str,
        age: u8,
    ) -> Result<()> {
        if !self.payments.has_paid(caller).await? {
            return Err(RegistryError::PaymentRequired);
        }
        if self.roster.pending(student).await?.is_some() {
            return Err(RegistryError::AlreadyRegistered);
        }
        if name.is_empty() {
            return Err(RegistryError::NameRequired);
        }
        if age < 18 {
            return Err(RegistryError::UnderAge);
        }

        self.roster
            .put_pending(Student::pending(student, name, age))
            .await?;
        self.events
            .emit(RegistryEvent::StudentRegistered {
                student,
                name: name.to_string(),
                age,
            })
            .await
    }

    /// Promotes a pending record onto the authorized roster under the next
    /// sequence-id and removes the pending record.
    pub async fn authorize(&self, caller: AccountId, student: AccountId) -> Result<()> {
        self.ensure_admin(caller)?;
        if self.roster.authorized(student).await?.is_some() {
            return Err(RegistryError::AlreadyAuthorized);
        }
        let pending = self
            .roster
            .pending(student)
            .await?
            .ok_or(RegistryError::InvalidAddress)?;

        let id = self.roster.next_sequence_id().await?;
        self.roster.put_authorized(pending.promote(id)).await?;
        self.roster.remove_pending(student).await?;
        self.events
            .emit(RegistryEvent::StudentAuthorized { student })
            .await
    }

    /// Looks up an authorized record by its sequence-id.
    pub async fn student_by_id(&self, caller: AccountId, id: u64) -> Result<Student> {
        self.ensure_admin(caller)?;
        self.roster
            .by_sequence(id)
            .await?
            .ok_or(RegistryError::NotFound)
    }

    /// Raw by-identity read: absent entries come back as the zero record
    /// rather than an error, mirroring direct key-value lookup semantics.
    pub async fn student_by_identity(
        &self,
        caller: AccountId,
        student: AccountId,
    ) -> Result<Student> {
        self.ensure_admin(caller)?;
        Ok(self.roster.authorized(student).await?.unwrap_or_default())
    }

    /// Overwrites name and age of an authorized record in place. The
    /// sequence-id and flags are untouched. New values pass the same
    /// validation as registration, so no roster entry can ever hold an
    /// empty name or an under-age student.
    pub async fn update_student(
        &self,
        caller: AccountId,
        student: AccountId,
        name: &str,
        age: u8,
    ) -> Result<()> {
        self.ensure_admin(caller)?;
        let mut record = self
            .roster
            .authorized(student)
            .await?
            .ok_or(RegistryError::StudentNotFound)?;
        if name.is_empty() {
            return Err(RegistryError::NameRequired);
        }
        if age < 18 {
            return Err(RegistryError::UnderAge);
        }

        record.name = name.to_string();
        record.age = age;
        self.roster.put_authorized(record).await
    }

    /// Removes an authorized record entirely. Its sequence-id is retired,
    /// never reassigned.
    pub async fn delete_student(&self, caller: AccountId, student: AccountId) -> Result<()> {
        self.ensure_admin(caller)?;
        if self.roster.authorized(student).await?.is_none() {
            return Err(RegistryError::StudentNotFound);
        }
        self.roster.remove_authorized(student).await
    }

    /// Applies one batch row, mapping it onto the corresponding operation.
    pub async fn apply(&self, op: Operation) -> Result<()> {
        match op.op {
            OperationKind::Pay => {
                self.submit_fee(op.caller, op.amount.unwrap_or(Decimal::ZERO))
                    .await
            }
            OperationKind::Register => {
                let student = required_student(&op)?;
                self.register(
                    op.caller,
                    student,
                    op.name.as_deref().unwrap_or(""),
                    op.age.unwrap_or(0),
                )
                .await
            }
            OperationKind::Authorize => {
                let student = required_student(&op)?;
                self.authorize(op.caller, student).await
            }
            OperationKind::Update => {
                let student = required_student(&op)?;
                self.update_student(
                    op.caller,
                    student,
                    op.name.as_deref().unwrap_or(""),
                    op.age.unwrap_or(0),
                )
                .await
            }
            OperationKind::Delete => {
                let student = required_student(&op)?;
                self.delete_student(op.caller, student).await
            }
        }
    }

    /// Consumes the engine and returns the final authorized roster,
    /// ordered by sequence-id.
    pub async fn into_roster(self) -> Result<Vec<Student>> {
        self.roster.roster().await
    }
}

fn required_student(op: &Operation) -> Result<AccountId> {
    op.student
        .ok_or_else(|| RegistryError::MalformedOperation("missing student identity".to_string()))
}
