use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::auth::TokenPair;
use crate::errors::ServiceError;
use crate::services::auth::{
    RefreshTokenRequest, SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse,
};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/auth/send-otp",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "OTP issued", body = SendOtpResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate mobile number", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpRequest>,
) -> Result<Json<SendOtpResponse>, ServiceError> {
    let response = state.services.login.send_otp(payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/auth/verify-otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Tokens issued", body = VerifyOtpResponse),
        (status = 400, description = "Unknown number, expired or wrong code", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, ServiceError> {
    let response = state.services.login.verify_otp(payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/auth/refresh-token",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Fresh token pair", body = TokenPair),
        (status = 401, description = "Invalid refresh token", body = crate::errors::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<Json<TokenPair>, ServiceError> {
    let tokens = state.services.login.refresh(payload).await?;
    Ok(Json(tokens))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
