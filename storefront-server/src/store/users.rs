use super::{
    EntitlementStore, StorageError, StorageResult, USERS_BY_EMAIL_TABLE, USERS_BY_UID_TABLE,
    USERS_TABLE, USER_SEQ, get_json,
};
use redb::{ReadableDatabase, ReadableTable, WriteTransaction};
use shared::models::{User, UserUpdate};
use shared::util::now_millis;

/// Validated user registration
#[derive(Debug, Clone)]
pub struct NewUser {
    pub uid: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub photo_url: Option<String>,
    pub is_admin: bool,
}

/// Emails are unique case-insensitively
fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

impl EntitlementStore {
    /// Register a user, allocating its id
    pub fn create_user(&self, new: NewUser) -> StorageResult<User> {
        let txn = self.begin_write()?;
        let id = self.next_id(&txn, USER_SEQ)?;
        let now = now_millis();
        let user = User {
            id,
            uid: new.uid,
            username: new.username,
            email: new.email,
            full_name: new.full_name,
            photo_url: new.photo_url,
            is_admin: new.is_admin,
            created_at: now,
            updated_at: now,
        };
        self.insert_user(&txn, &user)?;
        txn.commit()?;
        Ok(user)
    }

    /// Insert a fully formed user (within transaction)
    ///
    /// Fails if the uid or email belongs to another user.
    pub fn insert_user(&self, txn: &WriteTransaction, user: &User) -> StorageResult<()> {
        let email = email_key(&user.email);
        {
            let mut by_uid = txn.open_table(USERS_BY_UID_TABLE)?;
            if let Some(existing) = by_uid.get(user.uid.as_str())?.map(|g| g.value())
                && existing != user.id
            {
                return Err(StorageError::UidTaken(user.uid.clone()));
            }
            let mut by_email = txn.open_table(USERS_BY_EMAIL_TABLE)?;
            if let Some(existing) = by_email.get(email.as_str())?.map(|g| g.value())
                && existing != user.id
            {
                return Err(StorageError::EmailTaken(user.email.clone()));
            }
            by_uid.insert(user.uid.as_str(), user.id)?;
            by_email.insert(email.as_str(), user.id)?;
        }
        self.put_user(txn, user)?;
        self.bump_sequence(txn, USER_SEQ, user.id)
    }

    fn put_user(&self, txn: &WriteTransaction, user: &User) -> StorageResult<()> {
        let mut table = txn.open_table(USERS_TABLE)?;
        let value = serde_json::to_vec(user)?;
        table.insert(user.id, value.as_slice())?;
        Ok(())
    }

    /// Apply a profile update. Identity (uid, email) never changes.
    pub fn update_user(&self, id: i64, update: UserUpdate) -> StorageResult<User> {
        let txn = self.begin_write()?;
        let mut user = self
            .get_user_txn(&txn, id)?
            .ok_or(StorageError::UserNotFound(id))?;

        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if update.photo_url.is_some() {
            user.photo_url = update.photo_url;
        }
        user.updated_at = now_millis();

        self.put_user(&txn, &user)?;
        txn.commit()?;
        Ok(user)
    }

    pub fn get_user(&self, id: i64) -> StorageResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS_TABLE)?;
        get_json(&table, id)
    }

    pub fn get_user_txn(&self, txn: &WriteTransaction, id: i64) -> StorageResult<Option<User>> {
        let table = txn.open_table(USERS_TABLE)?;
        get_json(&table, id)
    }

    pub fn find_user_by_uid(&self, uid: &str) -> StorageResult<Option<User>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(USERS_BY_UID_TABLE)?;
        let Some(id) = index.get(uid)?.map(|g| g.value()) else {
            return Ok(None);
        };
        let table = read_txn.open_table(USERS_TABLE)?;
        get_json(&table, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(uid: &str, email: &str) -> NewUser {
        NewUser {
            uid: uid.to_string(),
            username: uid.to_string(),
            email: email.to_string(),
            full_name: "Test User".to_string(),
            photo_url: None,
            is_admin: false,
        }
    }

    #[test]
    fn test_create_and_lookup_user() {
        let store = EntitlementStore::open_in_memory().unwrap();
        let user = store.create_user(new_user("fb-1", "a@example.com")).unwrap();
        assert_eq!(user.id, 1);

        assert_eq!(store.get_user(user.id).unwrap(), Some(user.clone()));
        assert_eq!(store.find_user_by_uid("fb-1").unwrap(), Some(user));
        assert!(store.find_user_by_uid("fb-2").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_is_rejected_case_insensitively() {
        let store = EntitlementStore::open_in_memory().unwrap();
        store.create_user(new_user("fb-1", "a@example.com")).unwrap();
        let err = store
            .create_user(new_user("fb-2", "A@Example.com"))
            .unwrap_err();
        assert!(matches!(err, StorageError::EmailTaken(_)));
        // the failed registration left nothing behind
        assert!(store.find_user_by_uid("fb-2").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_uid_is_rejected() {
        let store = EntitlementStore::open_in_memory().unwrap();
        store.create_user(new_user("fb-1", "a@example.com")).unwrap();
        let err = store
            .create_user(new_user("fb-1", "b@example.com"))
            .unwrap_err();
        assert!(matches!(err, StorageError::UidTaken(_)));
    }

    #[test]
    fn test_update_profile_keeps_identity() {
        let store = EntitlementStore::open_in_memory().unwrap();
        let user = store.create_user(new_user("fb-1", "a@example.com")).unwrap();
        let updated = store
            .update_user(
                user.id,
                UserUpdate {
                    full_name: Some("Renamed".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.full_name, "Renamed");
        assert_eq!(updated.uid, "fb-1");
        assert_eq!(updated.email, "a@example.com");

        let err = store.update_user(999, UserUpdate::default()).unwrap_err();
        assert!(matches!(err, StorageError::UserNotFound(999)));
    }
}
