use crate::domain::ports::{PaymentStore, RosterStore};
use crate::domain::student::{AccountId, Student};
use crate::error::{RegistryError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for the has-paid flags.
pub const CF_PAYMENTS: &str = "payments";
/// Column Family for pending (registered, unauthorized) records.
pub const CF_PENDING: &str = "pending";
/// Column Family for the authorized roster.
pub const CF_ROSTER: &str = "roster";
/// Column Family mapping sequence-id to student identity.
pub const CF_ROSTER_INDEX: &str = "roster_index";
/// Column Family for registry metadata (the sequence counter).
pub const CF_META: &str = "meta";

const SEQUENCE_KEY: &[u8] = b"sequence";

/// A persistent store implementation using RocksDB.
///
/// Serves both the `PaymentStore` and `RosterStore` ports so that one
/// database file carries the whole registry state, sequence counter
/// included — ids keep increasing across process restarts.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksStore {
    db: Arc<DB>,
}

impl RocksStore {
    /// Opens or creates a RocksDB instance at the specified path, making
    /// sure all registry column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = [CF_PAYMENTS, CF_PENDING, CF_ROSTER, CF_ROSTER_INDEX, CF_META]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, cfs)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            RegistryError::Internal(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }

    fn put_student(&self, cf_name: &str, student: &Student) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let key = student.identity.0.to_be_bytes();
        let value = serde_json::to_vec(student)
            .map_err(|e| RegistryError::Internal(Box::new(e)))?;
        self.db.put_cf(&cf, key, value)?;
        Ok(())
    }

    fn get_student(&self, cf_name: &str, identity: AccountId) -> Result<Option<Student>> {
        let cf = self.cf(cf_name)?;
        let key = identity.0.to_be_bytes();
        match self.db.get_cf(&cf, key)? {
            Some(bytes) => {
                let student = serde_json::from_slice(&bytes)
                    .map_err(|e| RegistryError::Internal(Box::new(e)))?;
                Ok(Some(student))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PaymentStore for RocksStore {
    async fn mark_paid(&self, caller: AccountId) -> Result<()> {
        let cf = self.cf(CF_PAYMENTS)?;
        self.db.put_cf(&cf, caller.0.to_be_bytes(), [1u8])?;
        Ok(())
    }

    async fn has_paid(&self, caller: AccountId) -> Result<bool> {
        let cf = self.cf(CF_PAYMENTS)?;
        // Presence of the key is the flag; the value is ignored
        let result = self.db.get_pinned_cf(&cf, caller.0.to_be_bytes())?;
        Ok(result.is_some())
    }
}

#[async_trait]
impl RosterStore for RocksStore {
    async fn put_pending(&self, student: Student) -> Result<()> {
        self.put_student(CF_PENDING, &student)
    }

    async fn pending(&self, identity: AccountId) -> Result<Option<Student>> {
        self.get_student(CF_PENDING, identity)
    }

    async fn remove_pending(&self, identity: AccountId) -> Result<()> {
        let cf = self.cf(CF_PENDING)?;
        self.db.delete_cf(&cf, identity.0.to_be_bytes())?;
        Ok(())
    }

    async fn put_authorized(&self, student: Student) -> Result<()> {
        let index = self.cf(CF_ROSTER_INDEX)?;
        self.db.put_cf(
            &index,
            student.id.to_be_bytes(),
            student.identity.0.to_be_bytes(),
        )?;
        self.put_student(CF_ROSTER, &student)
    }

    async fn authorized(&self, identity: AccountId) -> Result<Option<Student>> {
        self.get_student(CF_ROSTER, identity)
    }

    async fn by_sequence(&self, id: u64) -> Result<Option<Student>> {
        let index = self.cf(CF_ROSTER_INDEX)?;
        let identity = match self.db.get_cf(&index, id.to_be_bytes())? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    RegistryError::Internal(Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "roster index value is not an 8-byte identity",
                    )))
                })?;
                AccountId(u64::from_be_bytes(raw))
            }
            None => return Ok(None),
        };
        self.get_student(CF_ROSTER, identity)
    }

    async fn remove_authorized(&self, identity: AccountId) -> Result<()> {
        if let Some(student) = self.get_student(CF_ROSTER, identity)? {
            let index = self.cf(CF_ROSTER_INDEX)?;
            self.db.delete_cf(&index, student.id.to_be_bytes())?;
            let roster = self.cf(CF_ROSTER)?;
            self.db.delete_cf(&roster, identity.0.to_be_bytes())?;
        }
        Ok(())
    }

    async fn next_sequence_id(&self) -> Result<u64> {
        let cf = self.cf(CF_META)?;
        let last = match self.db.get_cf(&cf, SEQUENCE_KEY)? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    RegistryError::Internal(Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "sequence counter is not an 8-byte integer",
                    )))
                })?;
                u64::from_be_bytes(raw)
            }
            None => 0,
        };
        let next = last + 1;
        self.db.put_cf(&cf, SEQUENCE_KEY, next.to_be_bytes())?;
        Ok(next)
    }

    async fn roster(&self) -> Result<Vec<Student>> {
        let cf = self.cf(CF_ROSTER)?;
        let mut all = Vec::new();
        for item in self.db.iterator_cf(&cf, rocksdb::IteratorMode::Start) {
            let (_key, value) =
                item.map_err(|e| RegistryError::Internal(Box::new(e)))?;
            let student: Student = serde_json::from_slice(&value)
                .map_err(|e| RegistryError::Internal(Box::new(e)))?;
            all.push(student);
        }
        all.sort_by_key(|s| s.id);
        Ok(all)
    }
}
