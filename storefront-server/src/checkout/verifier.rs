use super::error::{CheckoutError, CheckoutResult};
use super::signature::{PaymentConfirmation, validate_confirmation};
use crate::referrals::{self, ReferralError};
use crate::store::{EntitlementStore, StorageError};
use shared::models::OrderStatus;
use shared::util::now_millis;

/// Result of a verification that the caller sees as `{granted: true}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// This call settled the order
    Granted {
        entitlement_id: i64,
        /// False when the pair already had access (re-purchase or race)
        newly_granted: bool,
    },
    /// The order was settled by an earlier call; nothing changed
    AlreadyProcessed,
}

/// Settles pending orders against gateway confirmations
#[derive(Clone)]
pub struct PaymentVerifier {
    store: EntitlementStore,
    key_secret: String,
}

impl PaymentVerifier {
    pub fn new(store: EntitlementStore, key_secret: impl Into<String>) -> Self {
        Self {
            store,
            key_secret: key_secret.into(),
        }
    }

    /// Verify `confirmation` for `order_ref` and grant access
    ///
    /// Runs in one write transaction. redb serializes writers, so a second
    /// verifier for the same order only starts after this one committed and
    /// then finds the order non-pending.
    ///
    /// - success order: `AlreadyProcessed`, no writes
    /// - failed order: `OrderFailed`, no writes
    /// - bad confirmation: order committed as failed, `ConfirmationInvalid`
    /// - good confirmation: order success, entitlement created if absent,
    ///   referral counted once if this call created the entitlement and the
    ///   code belongs to another user for the same course
    pub fn verify(
        &self,
        order_ref: &str,
        confirmation: &PaymentConfirmation,
    ) -> CheckoutResult<VerifyOutcome> {
        let txn = self.store.begin_write()?;
        let mut order = self
            .store
            .get_order_txn(&txn, order_ref)?
            .ok_or_else(|| CheckoutError::OrderNotFound(order_ref.to_string()))?;

        match order.status {
            OrderStatus::Pending => {}
            OrderStatus::Success => {
                tracing::debug!(order_ref, "Order already settled, replay ignored");
                return Ok(VerifyOutcome::AlreadyProcessed);
            }
            OrderStatus::Failed => {
                return Err(CheckoutError::OrderFailed(order_ref.to_string()));
            }
        }

        if !validate_confirmation(&order, confirmation, &self.key_secret) {
            order.status = OrderStatus::Failed;
            order.updated_at = now_millis();
            self.store.store_order(&txn, &order)?;
            txn.commit().map_err(StorageError::from)?;

            tracing::warn!(
                target: "security",
                order_ref,
                gateway_order_id = %confirmation.gateway_order_id,
                "Payment confirmation rejected, order failed"
            );
            return Err(CheckoutError::ConfirmationInvalid(order_ref.to_string()));
        }

        order.status = OrderStatus::Success;
        order.gateway_payment_id = Some(confirmation.gateway_payment_id.clone());
        order.updated_at = now_millis();
        self.store.store_order(&txn, &order)?;

        let referral = match order.referral_code.as_deref() {
            Some(code) => {
                match self.store.get_referral_by_code_txn(&txn, code)? {
                    None => {
                        tracing::warn!(order_ref, code, "Unknown referral code on order, not attributed");
                        None
                    }
                    Some(r) if r.course_id != order.course_id => {
                        tracing::warn!(
                            order_ref,
                            code,
                            referral_course_id = r.course_id,
                            order_course_id = order.course_id,
                            "Referral code issued for another course, not attributed"
                        );
                        None
                    }
                    Some(r) if r.user_id == order.user_id => {
                        tracing::warn!(order_ref, code, user_id = order.user_id, "Self-referral, not attributed");
                        None
                    }
                    found => found,
                }
            }
            None => None,
        };

        let (entitlement, created) = self.store.create_entitlement(
            &txn,
            order.user_id,
            order.course_id,
            referral.as_ref(),
        )?;

        if created && let Some(referral) = &referral {
            match referrals::record_use_in(&self.store, &txn, &referral.code) {
                Ok(updated) => {
                    tracing::info!(code = %updated.code, used_count = updated.used_count, "Referral use recorded");
                }
                Err(ReferralError::Storage(e)) => return Err(e.into()),
                Err(e) => tracing::warn!(error = %e, "Referral use not recorded"),
            }
        }

        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            order_ref,
            user_id = order.user_id,
            course_id = order.course_id,
            entitlement_id = entitlement.id,
            newly_granted = created,
            "Payment verified"
        );
        Ok(VerifyOutcome::Granted {
            entitlement_id: entitlement.id,
            newly_granted: created,
        })
    }
}
