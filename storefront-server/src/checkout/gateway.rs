//! Payment gateway adapters
//!
//! The core only needs the gateway to open an order for an amount and hand
//! back its order id. The client completes payment in the gateway widget and
//! returns a signed confirmation, which [`super::signature`] checks offline.

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

/// Order as requested from the gateway
#[derive(Debug, Clone, Copy)]
pub struct GatewayOrderRequest<'a> {
    /// Minor currency units
    pub amount: i64,
    pub currency: &'a str,
    /// Our order reference, echoed back by the gateway as `receipt`
    pub receipt: &'a str,
}

/// Order as opened by the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOrder {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Gateway request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Gateway rejected order ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Gateway response missing order id: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Public key id handed to the checkout widget
    fn key_id(&self) -> &str;

    async fn create_order(
        &self,
        request: GatewayOrderRequest<'_>,
    ) -> Result<GatewayOrder, GatewayError>;
}

// ========== Razorpay ==========

pub const RAZORPAY_API_BASE: &str = "https://api.razorpay.com";

/// Razorpay Orders API via REST (no SDK dependency)
pub struct RazorpayGateway {
    client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayGateway {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self::with_base_url(RAZORPAY_API_BASE, key_id, key_secret)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    fn key_id(&self) -> &str {
        &self.key_id
    }

    async fn create_order(
        &self,
        request: GatewayOrderRequest<'_>,
    ) -> Result<GatewayOrder, GatewayError> {
        let resp = self
            .client
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": request.amount,
                "currency": request.currency,
                "receipt": request.receipt,
            }))
            .send()
            .await?;

        let status = resp.status();
        let body: serde_json::Value = resp.json().await?;

        if !status.is_success() {
            let message = body["error"]["description"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        body["id"]
            .as_str()
            .map(|id| GatewayOrder { id: id.to_string() })
            .ok_or_else(|| GatewayError::InvalidResponse(body.to_string()))
    }
}

// ========== Local ==========

/// Gateway that opens orders locally, for development and tests
///
/// Confirmations for its orders are signed with the same key secret the
/// verifier uses, see [`super::signature::sign`].
pub struct LocalGateway {
    key_id: String,
}

impl LocalGateway {
    pub fn new(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for LocalGateway {
    fn key_id(&self) -> &str {
        &self.key_id
    }

    async fn create_order(
        &self,
        request: GatewayOrderRequest<'_>,
    ) -> Result<GatewayOrder, GatewayError> {
        let id = format!("order_{}", uuid::Uuid::new_v4().simple());
        tracing::debug!(gateway_order_id = %id, receipt = request.receipt, "Local gateway order opened");
        Ok(GatewayOrder { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_gateway_issues_unique_ids() {
        let gateway = LocalGateway::new("rzp_test_local");
        let request = GatewayOrderRequest {
            amount: 79900,
            currency: "INR",
            receipt: "ord_1",
        };
        let a = gateway.create_order(request).await.unwrap();
        let b = gateway.create_order(request).await.unwrap();
        assert!(a.id.starts_with("order_"));
        assert_ne!(a.id, b.id);
        assert_eq!(gateway.key_id(), "rzp_test_local");
    }

    #[tokio::test]
    async fn test_razorpay_unreachable_is_network_error() {
        // port 9 (discard) on localhost is closed in test environments
        let gateway = RazorpayGateway::with_base_url("http://127.0.0.1:9", "key", "secret");
        let err = gateway
            .create_order(GatewayOrderRequest {
                amount: 100,
                currency: "INR",
                receipt: "ord_1",
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Network(_)));
    }
}
