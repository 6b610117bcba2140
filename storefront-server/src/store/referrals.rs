use super::{
    EntitlementStore, REFERRAL_SEQ, REFERRALS_BY_CODE_TABLE, REFERRALS_TABLE, StorageError,
    StorageResult, all_json, get_json,
};
use redb::{ReadableDatabase, ReadableTable, WriteTransaction};
use shared::models::Referral;
use shared::util::now_millis;

impl EntitlementStore {
    /// Insert a referral for (user, course) under `code` (within transaction)
    ///
    /// Fails with `ReferralCodeTaken` if the code already exists.
    pub fn insert_referral(
        &self,
        txn: &WriteTransaction,
        user_id: i64,
        course_id: i64,
        code: &str,
    ) -> StorageResult<Referral> {
        {
            let by_code = txn.open_table(REFERRALS_BY_CODE_TABLE)?;
            if by_code.get(code)?.is_some() {
                return Err(StorageError::ReferralCodeTaken(code.to_string()));
            }
        }

        let referral = Referral {
            id: self.next_id(txn, REFERRAL_SEQ)?,
            user_id,
            course_id,
            code: code.to_string(),
            used_count: 0,
            created_at: now_millis(),
        };

        {
            let mut by_code = txn.open_table(REFERRALS_BY_CODE_TABLE)?;
            by_code.insert(code, referral.id)?;
        }
        self.put_referral(txn, &referral)?;
        Ok(referral)
    }

    fn put_referral(&self, txn: &WriteTransaction, referral: &Referral) -> StorageResult<()> {
        let mut table = txn.open_table(REFERRALS_TABLE)?;
        let value = serde_json::to_vec(referral)?;
        table.insert(referral.id, value.as_slice())?;
        Ok(())
    }

    pub fn get_referral_by_code(&self, code: &str) -> StorageResult<Option<Referral>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(REFERRALS_BY_CODE_TABLE)?;
        let Some(id) = index.get(code)?.map(|g| g.value()) else {
            return Ok(None);
        };
        let table = read_txn.open_table(REFERRALS_TABLE)?;
        get_json(&table, id)
    }

    pub fn get_referral_by_code_txn(
        &self,
        txn: &WriteTransaction,
        code: &str,
    ) -> StorageResult<Option<Referral>> {
        let id = {
            let index = txn.open_table(REFERRALS_BY_CODE_TABLE)?;
            index.get(code)?.map(|g| g.value())
        };
        let Some(id) = id else {
            return Ok(None);
        };
        let table = txn.open_table(REFERRALS_TABLE)?;
        get_json(&table, id)
    }

    /// Increment a referral's usage counter (within transaction)
    ///
    /// Returns `None` for an unknown code.
    pub fn increment_referral_use(
        &self,
        txn: &WriteTransaction,
        code: &str,
    ) -> StorageResult<Option<Referral>> {
        let Some(mut referral) = self.get_referral_by_code_txn(txn, code)? else {
            return Ok(None);
        };
        referral.used_count = referral.used_count.saturating_add(1);
        self.put_referral(txn, &referral)?;
        Ok(Some(referral))
    }

    /// Referral codes issued by a user, oldest first
    pub fn list_referrals_for_user(&self, user_id: i64) -> StorageResult<Vec<Referral>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REFERRALS_TABLE)?;
        let all: Vec<Referral> = all_json(&table)?;
        Ok(all.into_iter().filter(|r| r.user_id == user_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_increment() {
        let store = EntitlementStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        let referral = store.insert_referral(&txn, 9, 7, "9-7-aa").unwrap();
        assert_eq!(referral.used_count, 0);
        txn.commit().unwrap();

        let txn = store.begin_write().unwrap();
        let bumped = store.increment_referral_use(&txn, "9-7-aa").unwrap().unwrap();
        assert_eq!(bumped.used_count, 1);
        assert!(store.increment_referral_use(&txn, "nope").unwrap().is_none());
        txn.commit().unwrap();

        assert_eq!(
            store.get_referral_by_code("9-7-aa").unwrap().unwrap().used_count,
            1
        );
    }

    #[test]
    fn test_duplicate_code_is_rejected() {
        let store = EntitlementStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        store.insert_referral(&txn, 9, 7, "dup").unwrap();
        let err = store.insert_referral(&txn, 10, 7, "dup").unwrap_err();
        assert!(matches!(err, StorageError::ReferralCodeTaken(_)));
    }

    #[test]
    fn test_list_referrals_for_user() {
        let store = EntitlementStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        store.insert_referral(&txn, 9, 7, "a").unwrap();
        store.insert_referral(&txn, 9, 8, "b").unwrap();
        store.insert_referral(&txn, 10, 7, "c").unwrap();
        txn.commit().unwrap();

        let codes: Vec<String> = store
            .list_referrals_for_user(9)
            .unwrap()
            .into_iter()
            .map(|r| r.code)
            .collect();
        assert_eq!(codes, vec!["a", "b"]);
    }
}
