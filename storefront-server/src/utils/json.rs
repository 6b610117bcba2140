//! JSON body extractor
//!
//! `axum::Json` rejects bad bodies with plain-text 400/415/422 responses.
//! [`JsonBody`] reports them through `AppError` so every failure carries the
//! same `ApiResponse` shape.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use shared::error::{AppError, ErrorCode};

pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let code = match rejection {
                    JsonRejection::MissingJsonContentType(_) => ErrorCode::InvalidRequest,
                    _ => ErrorCode::ValidationFailed,
                };
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::with_message(code, rejection.body_text()))
            }
        }
    }
}
