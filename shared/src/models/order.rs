//! Order Model (one purchase attempt of one course by one user)

use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// `Pending` is the only non-terminal state. An order moves to exactly one of
/// `Success` or `Failed` and never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Success,
    Failed,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }

    /// Whether `self -> next` is a legal transition
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Success) | (OrderStatus::Pending, OrderStatus::Failed)
        )
    }
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Opaque order reference handed to the client
    pub order_ref: String,
    pub user_id: i64,
    pub course_id: i64,
    /// Course price snapshot at creation time (minor units)
    pub amount: i64,
    pub currency: String,
    pub status: OrderStatus,
    pub gateway_order_id: String,
    /// Set only on successful verification
    pub gateway_payment_id: Option<String>,
    pub referral_code: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// `POST /orders` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub course_id: Option<i64>,
    pub user_id: Option<i64>,
    pub referral_code: Option<String>,
}

/// `POST /orders` response: everything the checkout widget needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_ref: String,
    pub amount: i64,
    pub currency: String,
    pub gateway_order_id: String,
    /// Public gateway key id
    pub key_id: String,
}

/// `POST /orders/verify` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub order_ref: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub gateway_order_id: Option<String>,
    pub gateway_signature: Option<String>,
}

/// `POST /orders/verify` response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPaymentResponse {
    pub granted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Success));
        assert!(Pending.can_transition_to(Failed));
        assert!(!Success.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Success));
        assert!(!Success.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
        assert!(Success.is_terminal());
        assert!(!Pending.is_terminal());
    }

    #[test]
    fn test_status_serialize() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Success).unwrap(),
            "\"success\""
        );
    }

    #[test]
    fn test_verify_request_tolerates_missing_fields() {
        let req: VerifyPaymentRequest =
            serde_json::from_str(r#"{"orderRef":"ord_1","gatewayOrderId":"order_x"}"#).unwrap();
        assert_eq!(req.order_ref.as_deref(), Some("ord_1"));
        assert!(req.gateway_signature.is_none());
    }
}
