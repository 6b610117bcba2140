//! redb-based storage for the storefront
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `users` | `user_id` | `User` | User records |
//! | `users_by_uid` | `uid` | `user_id` | External identity index (unique) |
//! | `users_by_email` | `email` | `user_id` | Email index (unique, lowercased) |
//! | `courses` | `course_id` | `Course` | Catalog |
//! | `courses_by_slug` | `slug` | `course_id` | Slug index (unique) |
//! | `course_content` | `(course_id, order)` | `CourseContent` | Lessons, in order |
//! | `orders` | `order_ref` | `Order` | Purchase attempts |
//! | `orders_by_user` | `(user_id, order_ref)` | `()` | Payment history index |
//! | `entitlements` | `entitlement_id` | `Entitlement` | Granted access |
//! | `entitlements_by_pair` | `(user_id, course_id)` | `entitlement_id` | One grant per pair |
//! | `referrals` | `referral_id` | `Referral` | Referral codes |
//! | `referrals_by_code` | `code` | `referral_id` | Code index (unique) |
//! | `sequence_counter` | name | `u64` | Id allocation |
//!
//! Values are JSON. Every uniqueness check runs inside the same write
//! transaction as the insert it guards, and redb admits one writer at a time,
//! so check-then-act sequences here are atomic.

mod content;
mod courses;
mod entitlements;
mod error;
mod orders;
mod referrals;
pub mod seed;
mod users;

pub use content::NewCourseContent;
pub use error::{StorageError, StorageResult};
pub use users::NewUser;

use redb::{Database, ReadableTable, TableDefinition, WriteTransaction};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

const USERS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("users");
const USERS_BY_UID_TABLE: TableDefinition<&str, i64> = TableDefinition::new("users_by_uid");
const USERS_BY_EMAIL_TABLE: TableDefinition<&str, i64> = TableDefinition::new("users_by_email");

const COURSES_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("courses");
const COURSES_BY_SLUG_TABLE: TableDefinition<&str, i64> = TableDefinition::new("courses_by_slug");
const COURSE_CONTENT_TABLE: TableDefinition<(i64, u32), &[u8]> =
    TableDefinition::new("course_content");

const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");
const ORDERS_BY_USER_TABLE: TableDefinition<(i64, &str), ()> =
    TableDefinition::new("orders_by_user");

const ENTITLEMENTS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("entitlements");
/// (user_id, course_id) -> entitlement_id, the uniqueness guard for grants
const ENTITLEMENTS_BY_PAIR_TABLE: TableDefinition<(i64, i64), i64> =
    TableDefinition::new("entitlements_by_pair");

const REFERRALS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("referrals");
const REFERRALS_BY_CODE_TABLE: TableDefinition<&str, i64> =
    TableDefinition::new("referrals_by_code");

const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence_counter");

const USER_SEQ: &str = "user";
const COURSE_SEQ: &str = "course";
const ENTITLEMENT_SEQ: &str = "entitlement";
const REFERRAL_SEQ: &str = "referral";
const CONTENT_SEQ: &str = "course_content";

/// Entitlement store backed by redb
///
/// Cheap to clone; all clones share one database handle.
#[derive(Clone)]
pub struct EntitlementStore {
    db: Arc<Database>,
}

impl EntitlementStore {
    /// Open or create the database at the given path
    ///
    /// redb commits are durable once `commit()` returns (copy-on-write with an
    /// atomic root swap), so a crash never leaves a half-settled order.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests and throwaway runs)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(USERS_BY_UID_TABLE)?;
            let _ = write_txn.open_table(USERS_BY_EMAIL_TABLE)?;
            let _ = write_txn.open_table(COURSES_TABLE)?;
            let _ = write_txn.open_table(COURSES_BY_SLUG_TABLE)?;
            let _ = write_txn.open_table(COURSE_CONTENT_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDERS_BY_USER_TABLE)?;
            let _ = write_txn.open_table(ENTITLEMENTS_TABLE)?;
            let _ = write_txn.open_table(ENTITLEMENTS_BY_PAIR_TABLE)?;
            let _ = write_txn.open_table(REFERRALS_TABLE)?;
            let _ = write_txn.open_table(REFERRALS_BY_CODE_TABLE)?;
            let _ = write_txn.open_table(SEQUENCE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    ///
    /// Blocks while another write transaction is open.
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Sequence Operations ==========

    /// Allocate the next id for `seq` (within transaction)
    fn next_id(&self, txn: &WriteTransaction, seq: &str) -> StorageResult<i64> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        let current = table.get(seq)?.map(|g| g.value()).unwrap_or(0);
        let next = current + 1;
        table.insert(seq, next)?;
        Ok(next as i64)
    }

    /// Raise the sequence so that ids inserted explicitly are never reissued
    fn bump_sequence(&self, txn: &WriteTransaction, seq: &str, id: i64) -> StorageResult<()> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        let current = table.get(seq)?.map(|g| g.value()).unwrap_or(0);
        let id = u64::try_from(id).unwrap_or(0);
        if id > current {
            table.insert(seq, id)?;
        }
        Ok(())
    }
}

/// Decode a JSON row keyed by id
fn get_json<T: DeserializeOwned>(
    table: &impl ReadableTable<i64, &'static [u8]>,
    id: i64,
) -> StorageResult<Option<T>> {
    match table.get(id)? {
        Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
        None => Ok(None),
    }
}

/// Decode every row of an id-keyed JSON table, in id order
fn all_json<T: DeserializeOwned>(
    table: &impl ReadableTable<i64, &'static [u8]>,
) -> StorageResult<Vec<T>> {
    let mut rows = Vec::new();
    for result in table.iter()? {
        let (_key, value) = result?;
        rows.push(serde_json::from_slice(value.value())?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_allocates_increasing_ids() {
        let store = EntitlementStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        assert_eq!(store.next_id(&txn, USER_SEQ).unwrap(), 1);
        assert_eq!(store.next_id(&txn, USER_SEQ).unwrap(), 2);
        assert_eq!(store.next_id(&txn, COURSE_SEQ).unwrap(), 1);
        txn.commit().unwrap();
    }

    #[test]
    fn test_bump_sequence_skips_explicit_ids() {
        let store = EntitlementStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        store.bump_sequence(&txn, USER_SEQ, 41).unwrap();
        assert_eq!(store.next_id(&txn, USER_SEQ).unwrap(), 42);
        // lower ids never move the counter backwards
        store.bump_sequence(&txn, USER_SEQ, 3).unwrap();
        assert_eq!(store.next_id(&txn, USER_SEQ).unwrap(), 43);
        txn.commit().unwrap();
    }

    #[test]
    fn test_open_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.redb");
        {
            let store = EntitlementStore::open(&path).unwrap();
            let txn = store.begin_write().unwrap();
            store.next_id(&txn, REFERRAL_SEQ).unwrap();
            txn.commit().unwrap();
        }
        let store = EntitlementStore::open(&path).unwrap();
        let txn = store.begin_write().unwrap();
        assert_eq!(store.next_id(&txn, REFERRAL_SEQ).unwrap(), 2);
    }
}
