use super::error::{CheckoutError, CheckoutResult};
use super::gateway::{GatewayOrderRequest, PaymentGateway};
use crate::store::EntitlementStore;
use shared::models::{Order, OrderStatus};
use shared::util::now_millis;
use std::sync::Arc;
use std::time::Duration;

/// Validated `POST /orders` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: i64,
    pub course_id: i64,
    pub referral_code: Option<String>,
}

/// Creates pending orders
#[derive(Clone)]
pub struct OrderManager {
    store: EntitlementStore,
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
    gateway_timeout: Duration,
}

impl OrderManager {
    pub fn new(
        store: EntitlementStore,
        gateway: Arc<dyn PaymentGateway>,
        currency: impl Into<String>,
        gateway_timeout: Duration,
    ) -> Self {
        Self {
            store,
            gateway,
            currency: currency.into(),
            gateway_timeout,
        }
    }

    /// Public gateway key id for the checkout widget
    pub fn key_id(&self) -> &str {
        self.gateway.key_id()
    }

    /// Open a pending order for (user, course)
    ///
    /// The course price is snapshotted into the order. Nothing is persisted
    /// unless the gateway opened its side of the order within the timeout.
    /// Repeated calls open independent pending orders.
    pub async fn create_order(&self, new: NewOrder) -> CheckoutResult<Order> {
        if self.store.get_user(new.user_id)?.is_none() {
            return Err(CheckoutError::UserNotFound(new.user_id));
        }
        let course = self
            .store
            .get_course(new.course_id)?
            .filter(|c| c.is_published)
            .ok_or(CheckoutError::CourseNotFound(new.course_id))?;

        let order_ref = format!("ord_{}", uuid::Uuid::new_v4().simple());
        let request = GatewayOrderRequest {
            amount: course.price,
            currency: &self.currency,
            receipt: &order_ref,
        };

        let gateway_order =
            match tokio::time::timeout(self.gateway_timeout, self.gateway.create_order(request))
                .await
            {
                Ok(result) => result?,
                Err(_) => {
                    tracing::warn!(
                        order_ref = %order_ref,
                        timeout_ms = self.gateway_timeout.as_millis() as u64,
                        "Payment gateway timed out, no order created"
                    );
                    return Err(CheckoutError::GatewayTimeout(self.gateway_timeout));
                }
            };

        let now = now_millis();
        let order = Order {
            order_ref,
            user_id: new.user_id,
            course_id: course.id,
            amount: course.price,
            currency: self.currency.clone(),
            status: OrderStatus::Pending,
            gateway_order_id: gateway_order.id,
            gateway_payment_id: None,
            referral_code: new.referral_code,
            created_at: now,
            updated_at: now,
        };

        let txn = self.store.begin_write()?;
        self.store.store_order(&txn, &order)?;
        txn.commit().map_err(crate::store::StorageError::from)?;

        tracing::info!(
            order_ref = %order.order_ref,
            user_id = order.user_id,
            course_id = order.course_id,
            amount = order.amount,
            "Order created"
        );
        Ok(order)
    }

    pub fn get_order(&self, order_ref: &str) -> CheckoutResult<Order> {
        self.store
            .get_order(order_ref)?
            .ok_or_else(|| CheckoutError::OrderNotFound(order_ref.to_string()))
    }

    /// A user's payment history, newest first
    pub fn list_for_user(&self, user_id: i64) -> CheckoutResult<Vec<Order>> {
        if self.store.get_user(user_id)?.is_none() {
            return Err(CheckoutError::UserNotFound(user_id));
        }
        Ok(self.store.list_orders_for_user(user_id)?)
    }
}
