use crate::{
    auth::{
        otp::{generate_otp, OtpSender},
        AuthService, Role, TokenPair,
    },
    db::DbPool,
    entities::user::{self, ActiveModel as UserActiveModel, Entity as UserEntity},
    errors::ServiceError,
};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct SendOtpRequest {
    #[validate(length(min = 10, message = "Mobile number is required"))]
    pub mobile_number: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SendOtpResponse {
    pub message: String,
    /// Echoed for development parity; production senders deliver out of band.
    pub otp: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 10, message = "Mobile number is required"))]
    pub mobile_number: String,
    #[validate(length(equal = 6, message = "OTP must be 6 digits"))]
    pub otp: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VerifyOtpResponse {
    #[schema(value_type = Object)]
    pub user: user::Model,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// OTP login flow: code issuance, verification and token refresh, plus
/// the admin-only user listing.
#[derive(Clone)]
pub struct LoginService {
    db_pool: Arc<DbPool>,
    auth: Arc<AuthService>,
    otp_sender: Arc<dyn OtpSender>,
    otp_ttl_minutes: i64,
}

impl LoginService {
    pub fn new(
        db_pool: Arc<DbPool>,
        auth: Arc<AuthService>,
        otp_sender: Arc<dyn OtpSender>,
        otp_ttl_minutes: i64,
    ) -> Self {
        Self {
            db_pool,
            auth,
            otp_sender,
            otp_ttl_minutes,
        }
    }

    /// Issues a fresh code for the number, creating the account on first
    /// contact. New accounts default to `SHOP_OWNER` with language `HI`.
    #[instrument(skip(self, request), fields(mobile_number = %request.mobile_number))]
    pub async fn send_otp(&self, request: SendOtpRequest) -> Result<SendOtpResponse, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let now = Utc::now();
        let code = generate_otp();
        let expires_at = now + Duration::minutes(self.otp_ttl_minutes);

        let existing = UserEntity::find()
            .filter(user::Column::MobileNumber.eq(request.mobile_number.clone()))
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to look up user for OTP issuance");
                ServiceError::DatabaseError(e)
            })?;

        match existing {
            Some(found) => {
                let mut active: UserActiveModel = found.into();
                active.otp = Set(Some(code.clone()));
                active.otp_expires_at = Set(Some(expires_at));
                active.updated_at = Set(Some(now));
                active.update(db).await.map_err(|e| {
                    error!(error = %e, "Failed to store OTP for existing user");
                    ServiceError::DatabaseError(e)
                })?;
            }
            None => {
                let active = UserActiveModel {
                    id: Set(Uuid::new_v4()),
                    mobile_number: Set(request.mobile_number.clone()),
                    name: Set(None),
                    role: Set(Role::ShopOwner.to_string()),
                    language: Set(Some("HI".to_string())),
                    otp: Set(Some(code.clone())),
                    otp_expires_at: Set(Some(expires_at)),
                    created_at: Set(now),
                    updated_at: Set(None),
                };
                active.insert(db).await.map_err(|e| {
                    ServiceError::conflict_on_duplicate(e, "Mobile number already registered")
                })?;
            }
        }

        self.otp_sender.send(&request.mobile_number, &code);
        info!("OTP issued");

        Ok(SendOtpResponse {
            message: "OTP sent successfully".to_string(),
            otp: code,
        })
    }

    /// Ordered checks: account exists, code unexpired, code matches. An
    /// expired code never yields a token. The stored code is cleared on
    /// success so it cannot be replayed.
    #[instrument(skip(self, request), fields(mobile_number = %request.mobile_number))]
    pub async fn verify_otp(
        &self,
        request: VerifyOtpRequest,
    ) -> Result<VerifyOtpResponse, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;

        let found = UserEntity::find()
            .filter(user::Column::MobileNumber.eq(request.mobile_number.clone()))
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to look up user for OTP verification");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!("OTP verification for unknown mobile number");
                ServiceError::ValidationError("No OTP request found for this number".to_string())
            })?;

        let now = Utc::now();
        match found.otp_expires_at {
            Some(expiry) if expiry > now => {}
            _ => {
                warn!(user_id = %found.id, "Expired or absent OTP");
                return Err(ServiceError::ValidationError("OTP expired".to_string()));
            }
        }

        if found.otp.as_deref() != Some(request.otp.as_str()) {
            warn!(user_id = %found.id, "OTP mismatch");
            return Err(ServiceError::ValidationError("Invalid OTP".to_string()));
        }

        let role = Role::from_str(&found.role)
            .map_err(|_| ServiceError::InternalError(format!("Unknown role: {}", found.role)))?;

        let user_id = found.id;
        let mobile_number = found.mobile_number.clone();

        let mut active: UserActiveModel = found.clone().into();
        active.otp = Set(None);
        active.otp_expires_at = Set(None);
        active.updated_at = Set(Some(now));
        let updated = active.update(db).await.map_err(|e| {
            error!(error = %e, user_id = %user_id, "Failed to clear OTP after verification");
            ServiceError::DatabaseError(e)
        })?;

        let tokens = self
            .auth
            .generate_token(user_id, &mobile_number, role)
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;

        info!(user_id = %user_id, "OTP verified, tokens issued");

        Ok(VerifyOtpResponse {
            user: updated,
            tokens,
        })
    }

    /// Validates the refresh token against the user table before minting
    /// a fresh pair; a deleted account cannot refresh.
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> Result<TokenPair, ServiceError> {
        request.validate()?;

        let claims = self
            .auth
            .validate_token(&request.refresh_token)
            .map_err(|_| ServiceError::Unauthorized("Invalid refresh token".to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ServiceError::Unauthorized("Invalid refresh token".to_string()))?;

        let db = &*self.db_pool;
        let found = UserEntity::find_by_id(user_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, user_id = %user_id, "Failed to load user for token refresh");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::Unauthorized("Unknown user".to_string()))?;

        let role = Role::from_str(&found.role)
            .map_err(|_| ServiceError::InternalError(format!("Unknown role: {}", found.role)))?;

        self.auth
            .generate_token(found.id, &found.mobile_number, role)
            .map_err(|e| ServiceError::InternalError(e.to_string()))
    }

    /// Full account listing, gated to `SUPER_ADMIN` at the router.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<user::Model>, ServiceError> {
        let db = &*self.db_pool;

        UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list users");
                ServiceError::DatabaseError(e)
            })
    }
}
