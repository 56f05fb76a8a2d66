use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use darzi_api::{
    auth::{otp::LogOtpSender, AuthConfig, AuthService, Role},
    config::AppConfig,
    db,
    handlers::AppServices,
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// Spins up the full application over an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    auth_service: Arc<AuthService>,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "test_secret_key_for_testing_purposes_only_32chars".to_string(),
            3600,
            86_400,
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // A single connection keeps every statement on the same in-memory
        // database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);

        let auth_service = Arc::new(AuthService::new(AuthConfig::new(
            cfg.jwt_secret.clone(),
            Duration::from_secs(cfg.jwt_expiration as u64),
            Duration::from_secs(cfg.refresh_token_expiration as u64),
        )));

        let services = AppServices::new(
            db_arc.clone(),
            auth_service.clone(),
            Arc::new(LogOtpSender),
            cfg.otp_ttl_minutes,
        );

        let state = AppState {
            db: db_arc,
            config: cfg,
            services,
        };

        let router = darzi_api::app(state.clone(), auth_service.clone());

        Self {
            router,
            state,
            auth_service,
        }
    }

    /// Bearer token for a shop owner identity.
    pub fn owner_token(&self) -> String {
        self.token_for(Uuid::new_v4(), Role::ShopOwner)
    }

    /// Bearer token for the super administrator.
    pub fn admin_token(&self) -> String {
        self.token_for(Uuid::new_v4(), Role::SuperAdmin)
    }

    pub fn token_for(&self, user_id: Uuid, role: Role) -> String {
        self.auth_service
            .generate_token(user_id, "+919900112233", role)
            .expect("token for tests")
            .access_token
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {tok}"));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("serialize request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Seeds a shop with one customer, returning (shop_id, customer_id).
    pub async fn seed_shop_and_customer(&self) -> (Uuid, Uuid) {
        let shop = self
            .state
            .services
            .shops
            .create_shop(
                Uuid::new_v4(),
                darzi_api::services::shops::CreateShopRequest {
                    name: "Test Tailors".to_string(),
                    mobile_number: format!("+9198{}", &Uuid::new_v4().simple().to_string()[..8]),
                    address: None,
                },
            )
            .await
            .expect("seed shop");

        let customer = self
            .state
            .services
            .customers
            .create_customer(darzi_api::services::customers::CreateCustomerRequest {
                shop_id: shop.id,
                name: "Asha".to_string(),
                mobile_number: "+919812345678".to_string(),
                address: None,
            })
            .await
            .expect("seed customer");

        (shop.id, customer.id)
    }
}

pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

#[allow(dead_code)]
pub fn assert_status(response: &axum::response::Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}
