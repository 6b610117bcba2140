use super::{EntitlementStore, ORDERS_BY_USER_TABLE, ORDERS_TABLE, StorageResult};
use redb::{ReadableDatabase, ReadableTable, WriteTransaction};
use shared::models::Order;

impl EntitlementStore {
    /// Insert or overwrite an order (within transaction)
    pub fn store_order(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let value = serde_json::to_vec(order)?;
        table.insert(order.order_ref.as_str(), value.as_slice())?;

        let mut by_user = txn.open_table(ORDERS_BY_USER_TABLE)?;
        by_user.insert((order.user_id, order.order_ref.as_str()), ())?;
        Ok(())
    }

    pub fn get_order(&self, order_ref: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(order_ref)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_order_txn(
        &self,
        txn: &WriteTransaction,
        order_ref: &str,
    ) -> StorageResult<Option<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;
        match table.get(order_ref)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// A user's orders, newest first
    pub fn list_orders_for_user(&self, user_id: i64) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(ORDERS_BY_USER_TABLE)?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders: Vec<Order> = Vec::new();
        for result in index.range((user_id, "")..(user_id + 1, ""))? {
            let (key, _value) = result?;
            let (_, order_ref) = key.value();
            if let Some(guard) = table.get(order_ref)? {
                orders.push(serde_json::from_slice(guard.value())?);
            }
        }

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderStatus;

    fn order(order_ref: &str, user_id: i64, created_at: i64) -> Order {
        Order {
            order_ref: order_ref.to_string(),
            user_id,
            course_id: 7,
            amount: 79900,
            currency: "INR".to_string(),
            status: OrderStatus::Pending,
            gateway_order_id: format!("order_{order_ref}"),
            gateway_payment_id: None,
            referral_code: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_store_and_get_order() {
        let store = EntitlementStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        store.store_order(&txn, &order("ord_a", 42, 1)).unwrap();
        txn.commit().unwrap();

        let loaded = store.get_order("ord_a").unwrap().unwrap();
        assert_eq!(loaded.user_id, 42);
        assert_eq!(loaded.status, OrderStatus::Pending);
        assert!(store.get_order("ord_missing").unwrap().is_none());
    }

    #[test]
    fn test_list_orders_is_scoped_to_user() {
        let store = EntitlementStore::open_in_memory().unwrap();
        let txn = store.begin_write().unwrap();
        store.store_order(&txn, &order("ord_a", 42, 1)).unwrap();
        store.store_order(&txn, &order("ord_b", 42, 2)).unwrap();
        store.store_order(&txn, &order("ord_c", 43, 3)).unwrap();
        txn.commit().unwrap();

        let orders = store.list_orders_for_user(42).unwrap();
        let refs: Vec<_> = orders.iter().map(|o| o.order_ref.as_str()).collect();
        assert_eq!(refs, vec!["ord_b", "ord_a"]);
        assert!(store.list_orders_for_user(44).unwrap().is_empty());
    }

    #[test]
    fn test_uncommitted_order_is_not_visible() {
        let store = EntitlementStore::open_in_memory().unwrap();
        {
            let txn = store.begin_write().unwrap();
            store.store_order(&txn, &order("ord_a", 42, 1)).unwrap();
            // dropped without commit
        }
        assert!(store.get_order("ord_a").unwrap().is_none());
    }
}
