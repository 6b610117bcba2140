//! Gateway confirmation check
//!
//! The gateway signs `"{gateway_order_id}|{gateway_payment_id}"` with
//! HMAC-SHA256 under the shared key secret and hex-encodes the result.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use shared::models::Order;

type HmacSha256 = Hmac<Sha256>;

/// Signed payload returned by the gateway after the user pays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub gateway_signature: String,
}

fn mac_for(secret: &str, gateway_order_id: &str, gateway_payment_id: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(gateway_order_id.as_bytes());
    mac.update(b"|");
    mac.update(gateway_payment_id.as_bytes());
    Some(mac)
}

/// Compute the gateway signature for a payment
pub fn sign(secret: &str, gateway_order_id: &str, gateway_payment_id: &str) -> String {
    mac_for(secret, gateway_order_id, gateway_payment_id)
        .map(|mac| hex::encode(mac.finalize().into_bytes()))
        .unwrap_or_default()
}

/// Whether `confirmation` authentically settles `order`
///
/// Pure: no I/O, no clock. The order id echo must match the order and the
/// signature must verify in constant time.
pub fn validate_confirmation(order: &Order, confirmation: &PaymentConfirmation, secret: &str) -> bool {
    if confirmation.gateway_order_id != order.gateway_order_id {
        return false;
    }
    let Ok(signature) = hex::decode(confirmation.gateway_signature.trim()) else {
        return false;
    };
    let Some(mac) = mac_for(
        secret,
        &confirmation.gateway_order_id,
        &confirmation.gateway_payment_id,
    ) else {
        return false;
    };
    mac.verify_slice(&signature).is_ok()
}
