/*!
 * # Authentication and Authorization Module
 *
 * OTP-based login backed by JWT bearer tokens. Tokens are stateless:
 * validation checks only the signature and expiry, and refresh mints a
 * new pair from a still-valid refresh token without any server-side
 * token store.
 *
 * Role-based access control is a single role per user carried in the
 * token; `SUPER_ADMIN` passes every role gate.
 */

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use strum::{Display, EnumString};
use thiserror::Error;
use uuid::Uuid;

pub mod otp;

/// Single role carried by each account.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, utoipa::ToSchema,
)]
pub enum Role {
    #[strum(serialize = "SUPER_ADMIN")]
    #[serde(rename = "SUPER_ADMIN")]
    SuperAdmin,
    #[strum(serialize = "SHOP_OWNER")]
    #[serde(rename = "SHOP_OWNER")]
    ShopOwner,
    #[strum(serialize = "CUSTOMER")]
    #[serde(rename = "CUSTOMER")]
    Customer,
}

/// Claim structure for JWT tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub phone: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated user data extracted from the JWT token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub phone: String,
    pub role: Role,
}

impl AuthUser {
    /// Role gate check. The super administrator passes every gate.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == Role::SuperAdmin || self.role == role
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

/// Authentication configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_expiration: Duration,
    pub refresh_token_expiration: Duration,
}

impl AuthConfig {
    pub fn new(
        jwt_secret: String,
        access_token_expiration: Duration,
        refresh_token_expiration: Duration,
    ) -> Self {
        Self {
            jwt_secret,
            access_token_expiration,
            refresh_token_expiration,
        }
    }
}

/// Authentication service that handles token issuance and validation
#[derive(Debug, Clone)]
pub struct AuthService {
    pub config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Generate an access/refresh token pair for a verified user.
    pub fn generate_token(
        &self,
        user_id: Uuid,
        phone: &str,
        role: Role,
    ) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        let access_exp = now
            + ChronoDuration::from_std(self.config.access_token_expiration)
                .map_err(|_| AuthError::InternalError("Invalid token duration".to_string()))?;
        let refresh_exp = now
            + ChronoDuration::from_std(self.config.refresh_token_expiration)
                .map_err(|_| AuthError::InternalError("Invalid token duration".to_string()))?;

        let access_claims = Claims {
            sub: user_id.to_string(),
            phone: phone.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: access_exp.timestamp(),
        };

        let refresh_claims = Claims {
            exp: refresh_exp.timestamp(),
            ..access_claims.clone()
        };

        let key = EncodingKey::from_secret(self.config.jwt_secret.as_bytes());
        let access_token = encode(&Header::new(Algorithm::HS256), &access_claims, &key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))?;
        let refresh_token = encode(&Header::new(Algorithm::HS256), &refresh_claims, &key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.access_token_expiration.as_secs() as i64,
            refresh_expires_in: self.config.refresh_token_expiration.as_secs() as i64,
        })
    }

    /// Validate a JWT token and extract the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?
        .claims;

        Ok(claims)
    }

    /// Mint a fresh pair from a still-valid refresh token.
    pub fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.validate_token(refresh_token)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let role = Role::from_str(&claims.role).map_err(|_| AuthError::InvalidToken)?;

        self.generate_token(user_id, &claims.phone, role)
    }

    /// Turn validated claims into the request-scoped identity.
    pub fn auth_user_from_claims(&self, claims: &Claims) -> Result<AuthUser, AuthError> {
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let role = Role::from_str(&claims.role).map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthUser {
            user_id,
            phone: claims.phone.clone(),
            role,
        })
    }
}

/// Token pair response
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
}

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authentication")]
    MissingAuth,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token creation failed: {0}")]
    TokenCreation(String),

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_code, error_message): (StatusCode, &str, String) = match &self {
            Self::MissingAuth => (
                StatusCode::UNAUTHORIZED,
                "AUTH_MISSING",
                "Authentication required".to_string(),
            ),
            Self::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "AUTH_INVALID_TOKEN",
                "Invalid authentication token".to_string(),
            ),
            Self::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "AUTH_TOKEN_EXPIRED",
                "Token has expired".to_string(),
            ),
            Self::TokenCreation(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_TOKEN_CREATION_FAILED",
                msg.clone(),
            ),
            Self::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                "AUTH_INSUFFICIENT_PERMISSIONS",
                "Insufficient permissions".to_string(),
            ),
            Self::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = Json(serde_json::json!({
            "error": {
                "code": error_code,
                "message": error_message,
            }
        }));

        (status, body).into_response()
    }
}

/// Authentication middleware that extracts and validates bearer tokens
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let headers = request.headers().clone();

    let auth_service = match request.extensions().get::<Arc<AuthService>>() {
        Some(service) => service.clone(),
        None => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication service not available",
            )
                .into_response();
        }
    };

    match extract_auth_from_headers(&headers, &auth_service) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Extract authentication info from request headers
fn extract_auth_from_headers(
    headers: &HeaderMap,
    auth_service: &AuthService,
) -> Result<AuthUser, AuthError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_value) = auth_header.to_str() {
            if auth_value.starts_with("Bearer ") {
                let token = auth_value.trim_start_matches("Bearer ").trim();
                let claims = auth_service.validate_token(token)?;
                return auth_service.auth_user_from_claims(&claims);
            }
        }
    }

    Err(AuthError::MissingAuth)
}

/// Role middleware to check if a user carries one of the allowed roles.
/// `SUPER_ADMIN` always passes.
pub async fn role_middleware(
    State(allowed_roles): State<Arc<Vec<Role>>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = match request.extensions().get::<AuthUser>() {
        Some(user) => user.clone(),
        None => return Err(AuthError::MissingAuth),
    };

    if user.is_super_admin() || allowed_roles.iter().any(|r| *r == user.role) {
        return Ok(next.run(request).await);
    }

    Err(AuthError::InsufficientPermissions)
}

/// Extension methods for Router to add auth middleware
pub trait AuthRouterExt {
    fn with_auth(self) -> Self;
    fn with_roles(self, roles: &[Role]) -> Self;
}

impl<S> AuthRouterExt for axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_auth(self) -> Self {
        self.layer(axum::middleware::from_fn(auth_middleware))
    }

    fn with_roles(self, roles: &[Role]) -> Self {
        self.layer(axum::middleware::from_fn_with_state(
            Arc::new(roles.to_vec()),
            role_middleware,
        ))
        .with_auth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(AuthConfig::new(
            "unit-test-secret-key-that-is-long-enough".to_string(),
            Duration::from_secs(900),
            Duration::from_secs(7 * 24 * 3600),
        ))
    }

    #[test]
    fn token_round_trip_preserves_identity() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let pair = svc
            .generate_token(user_id, "+15550001111", Role::ShopOwner)
            .unwrap();

        let claims = svc.validate_token(&pair.access_token).unwrap();
        let user = svc.auth_user_from_claims(&claims).unwrap();

        assert_eq!(user.user_id, user_id);
        assert_eq!(user.phone, "+15550001111");
        assert_eq!(user.role, Role::ShopOwner);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let svc = service();
        let pair = svc
            .generate_token(Uuid::new_v4(), "+15550001111", Role::ShopOwner)
            .unwrap();

        let mut token = pair.access_token;
        token.pop();
        assert!(matches!(
            svc.validate_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn refresh_mints_a_new_pair() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let pair = svc
            .generate_token(user_id, "+15550002222", Role::SuperAdmin)
            .unwrap();

        let refreshed = svc.refresh_token(&pair.refresh_token).unwrap();
        let claims = svc.validate_token(&refreshed.access_token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "SUPER_ADMIN");
    }

    #[test]
    fn super_admin_passes_every_role_gate() {
        let admin = AuthUser {
            user_id: Uuid::new_v4(),
            phone: "+1".to_string(),
            role: Role::SuperAdmin,
        };
        assert!(admin.has_role(Role::ShopOwner));
        assert!(admin.has_role(Role::Customer));

        let owner = AuthUser {
            user_id: Uuid::new_v4(),
            phone: "+2".to_string(),
            role: Role::ShopOwner,
        };
        assert!(owner.has_role(Role::ShopOwner));
        assert!(!owner.has_role(Role::SuperAdmin));
    }

    #[test]
    fn role_strings_round_trip() {
        assert_eq!(Role::from_str("SHOP_OWNER").unwrap(), Role::ShopOwner);
        assert_eq!(Role::SuperAdmin.to_string(), "SUPER_ADMIN");
        assert!(Role::from_str("NOBODY").is_err());
    }
}
