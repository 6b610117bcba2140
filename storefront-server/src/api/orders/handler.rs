//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{
    CreateOrderRequest, CreateOrderResponse, Order, VerifyPaymentRequest, VerifyPaymentResponse,
};

use crate::checkout::{NewOrder, PaymentConfirmation, VerifyOutcome};
use crate::core::ServerState;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, optional_text, require, require_text};
use crate::utils::{AppResult, JsonBody};

/// POST /orders - 创建待支付订单
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<CreateOrderResponse>)> {
    let new = NewOrder {
        course_id: require(payload.course_id, "courseId")?,
        user_id: require(payload.user_id, "userId")?,
        referral_code: optional_text(payload.referral_code, "referralCode", MAX_SHORT_TEXT_LEN)?,
    };

    let order = state.orders.create_order(new).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            order_ref: order.order_ref,
            amount: order.amount,
            currency: order.currency,
            gateway_order_id: order.gateway_order_id,
            key_id: state.orders.key_id().to_string(),
        }),
    ))
}

/// POST /orders/verify - 校验支付确认
///
/// 已处理过的订单同样返回 `{granted: true}`，不产生任何写入。
pub async fn verify(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<VerifyPaymentRequest>,
) -> AppResult<Json<VerifyPaymentResponse>> {
    let order_ref = require_text(payload.order_ref, "orderRef", MAX_SHORT_TEXT_LEN)?;
    let confirmation = PaymentConfirmation {
        gateway_payment_id: require_text(
            payload.gateway_payment_id,
            "gatewayPaymentId",
            MAX_SHORT_TEXT_LEN,
        )?,
        gateway_order_id: require_text(
            payload.gateway_order_id,
            "gatewayOrderId",
            MAX_SHORT_TEXT_LEN,
        )?,
        gateway_signature: require_text(
            payload.gateway_signature,
            "gatewaySignature",
            MAX_SHORT_TEXT_LEN,
        )?,
    };

    let outcome = state.verifier.verify(&order_ref, &confirmation)?;
    if outcome == VerifyOutcome::AlreadyProcessed {
        tracing::debug!(order_ref = %order_ref, "Verify replay answered from settled order");
    }

    Ok(Json(VerifyPaymentResponse { granted: true }))
}

/// GET /orders/{order_ref} - 查询订单
pub async fn get_by_ref(
    State(state): State<ServerState>,
    Path(order_ref): Path<String>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders.get_order(&order_ref)?))
}

/// GET /users/{user_id}/orders - 用户支付记录 (新到旧)
pub async fn list_for_user(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_for_user(user_id)?))
}
