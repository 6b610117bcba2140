use super::{
    ENTITLEMENT_SEQ, ENTITLEMENTS_BY_PAIR_TABLE, ENTITLEMENTS_TABLE, EntitlementStore,
    StorageError, StorageResult, get_json,
};
use redb::{ReadableDatabase, ReadableTable, WriteTransaction};
use shared::models::{Entitlement, Referral};
use shared::util::now_millis;
use std::collections::BTreeSet;

impl EntitlementStore {
    pub fn find_entitlement(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> StorageResult<Option<Entitlement>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(ENTITLEMENTS_BY_PAIR_TABLE)?;
        let Some(id) = index.get((user_id, course_id))?.map(|g| g.value()) else {
            return Ok(None);
        };
        let table = read_txn.open_table(ENTITLEMENTS_TABLE)?;
        get_json(&table, id)
    }

    pub fn find_entitlement_txn(
        &self,
        txn: &WriteTransaction,
        user_id: i64,
        course_id: i64,
    ) -> StorageResult<Option<Entitlement>> {
        let id = {
            let index = txn.open_table(ENTITLEMENTS_BY_PAIR_TABLE)?;
            index.get((user_id, course_id))?.map(|g| g.value())
        };
        match id {
            Some(id) => self.get_entitlement_txn(txn, id),
            None => Ok(None),
        }
    }

    /// Grant access to (user, course) unless a grant already exists
    ///
    /// Returns the entitlement and whether it was created by this call. The
    /// pair index lookup and the insert share `txn`, so two racing grants for
    /// the same pair resolve to one winner; the loser sees `created == false`.
    pub fn create_entitlement(
        &self,
        txn: &WriteTransaction,
        user_id: i64,
        course_id: i64,
        referral: Option<&Referral>,
    ) -> StorageResult<(Entitlement, bool)> {
        if let Some(existing) = self.find_entitlement_txn(txn, user_id, course_id)? {
            return Ok((existing, false));
        }

        let entitlement = Entitlement {
            id: self.next_id(txn, ENTITLEMENT_SEQ)?,
            user_id,
            course_id,
            purchased_at: now_millis(),
            completed_lessons: BTreeSet::new(),
            progress: 0,
            referral_code: referral.map(|r| r.code.clone()),
            referred_by: referral.map(|r| r.user_id),
        };

        {
            let mut index = txn.open_table(ENTITLEMENTS_BY_PAIR_TABLE)?;
            index.insert((user_id, course_id), entitlement.id)?;
        }
        self.put_entitlement(txn, &entitlement)?;
        Ok((entitlement, true))
    }

    fn put_entitlement(&self, txn: &WriteTransaction, entitlement: &Entitlement) -> StorageResult<()> {
        let mut table = txn.open_table(ENTITLEMENTS_TABLE)?;
        let value = serde_json::to_vec(entitlement)?;
        table.insert(entitlement.id, value.as_slice())?;
        Ok(())
    }

    pub fn get_entitlement(&self, id: i64) -> StorageResult<Option<Entitlement>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ENTITLEMENTS_TABLE)?;
        get_json(&table, id)
    }

    pub fn get_entitlement_txn(
        &self,
        txn: &WriteTransaction,
        id: i64,
    ) -> StorageResult<Option<Entitlement>> {
        let table = txn.open_table(ENTITLEMENTS_TABLE)?;
        get_json(&table, id)
    }

    /// Overwrite lesson completion and progress (within transaction)
    pub fn update_progress(
        &self,
        txn: &WriteTransaction,
        id: i64,
        completed_lessons: BTreeSet<u32>,
        progress: u8,
    ) -> StorageResult<Entitlement> {
        let mut entitlement = self
            .get_entitlement_txn(txn, id)?
            .ok_or(StorageError::EntitlementNotFound(id))?;
        entitlement.completed_lessons = completed_lessons;
        entitlement.progress = progress.min(100);
        self.put_entitlement(txn, &entitlement)?;
        Ok(entitlement)
    }

    /// A user's entitlements, in course id order
    pub fn list_entitlements_for_user(&self, user_id: i64) -> StorageResult<Vec<Entitlement>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(ENTITLEMENTS_BY_PAIR_TABLE)?;
        let table = read_txn.open_table(ENTITLEMENTS_TABLE)?;

        let mut entitlements = Vec::new();
        for result in index.range((user_id, i64::MIN)..=(user_id, i64::MAX))? {
            let (_key, id) = result?;
            if let Some(entitlement) = get_json(&table, id.value())? {
                entitlements.push(entitlement);
            }
        }
        Ok(entitlements)
    }
}
