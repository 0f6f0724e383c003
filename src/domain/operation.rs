use crate::domain::student::AccountId;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Pay,
    Register,
    Authorize,
    Update,
    Delete,
}

/// One row of the batch input: a single caller-issued operation.
///
/// Columns not used by a given kind are left empty; `caller` is always
/// required. Read operations are not part of the batch surface.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Operation {
    pub op: OperationKind,
    pub caller: AccountId,
    pub student: Option<AccountId>,
    pub name: Option<String>,
    pub age: Option<u8>,
    pub amount: Option<Decimal>,
}
