//! Checkout: order creation and payment verification
//!
//! # Flow
//!
//! ```text
//! POST /orders
//!     │
//!     ▼
//! OrderManager::create_order
//!     ├─ user exists? course published?
//!     ├─ gateway.create_order (bounded by timeout)
//!     └─ persist Order { status: pending, amount: price snapshot }
//!
//! client pays in the gateway widget, gets a signed confirmation
//!
//! POST /orders/verify
//!     │
//!     ▼
//! PaymentVerifier::verify            ── one write transaction ──
//!     ├─ 1. order not pending?  → return, no effects
//!     ├─ 2. validate_confirmation → false: order failed, commit, 409
//!     ├─ 3. order success + gateway payment id
//!     ├─ 4. entitlement create-if-absent on (user, course)
//!     └─ 5. referral used_count += 1 if step 4 created it
//! ```
//!
//! Order status only moves `pending → success` or `pending → failed`.

mod error;
pub mod gateway;
mod order_manager;
pub mod signature;
mod verifier;


pub use error::{CheckoutError, CheckoutResult};
pub use gateway::{GatewayError, GatewayOrder, GatewayOrderRequest, LocalGateway, PaymentGateway, RazorpayGateway};
pub use order_manager::{NewOrder, OrderManager};
pub use signature::{PaymentConfirmation, sign, validate_confirmation};
pub use verifier::{PaymentVerifier, VerifyOutcome};
