use thiserror::Error;

/// All rejections an operation can surface. Every variant means the
/// operation had no effect on registry state.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Fee submission with a zero or negative value.
    #[error("no value sent with fee payment")]
    NoValueSent,
    /// Registration attempted by a caller who has not paid the fee.
    #[error("caller must pay the fee before registering")]
    PaymentRequired,
    /// A pending record already exists for the student identity.
    #[error("student is already registered")]
    AlreadyRegistered,
    /// Registration or update with an empty name.
    #[error("a name is required")]
    NameRequired,
    /// Registration or update with an age below 18.
    #[error("age must be 18 or more")]
    UnderAge,
    /// Administrative operation invoked by a non-administrator.
    #[error("caller is not the administrator")]
    NotOwner,
    /// Authorization attempted for an identity with no pending record.
    #[error("no pending registration for that identity")]
    InvalidAddress,
    /// Authorization attempted for an already-authorized identity.
    #[error("student has already been authorized")]
    AlreadyAuthorized,
    /// Update or delete of a roster entry that does not exist.
    #[error("student does not exist")]
    StudentNotFound,
    /// Lookup by a sequence-id that was never assigned or was retired.
    #[error("no student with that id")]
    NotFound,

    /// A batch row that cannot be mapped onto an operation.
    #[error("malformed operation: {0}")]
    MalformedOperation(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("storage error: {0}")]
    Storage(#[from] rocksdb::Error),
    /// Storage backend failure (serialization, column family access, etc).
    #[error("internal error: {0}")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
