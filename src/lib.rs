/*!
 * Multi-tenant tailoring shop backend: OTP login, shops with customers
 * and tailors, order aggregates (clothes, measurements, costs), a derived
 * payment ledger and read-only analytics.
 */

use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, patch, post, put},
    Extension, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use crate::auth::{AuthRouterExt, AuthService, Role};
use crate::db::DbPool;
pub use handlers::AppServices;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: config::AppConfig,
    pub services: AppServices,
}

/// Routes for the API surface, role-gated per resource. Auth endpoints
/// and the health probe stay public; `/users` is reserved for the super
/// administrator; everything else requires a shop-owner token.
pub fn routes() -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(handlers::auth::health))
        .route("/auth/send-otp", post(handlers::auth::send_otp))
        .route("/auth/verify-otp", post(handlers::auth::verify_otp))
        .route("/auth/refresh-token", post(handlers::auth::refresh_token));

    let admin = Router::new()
        .route("/users", get(handlers::users::list_users))
        .with_roles(&[Role::SuperAdmin]);

    let shops = Router::new()
        .route(
            "/shops",
            post(handlers::shops::create_shop).get(handlers::shops::list_shops),
        )
        .route("/shops/:id", get(handlers::shops::get_shop))
        .route("/shops/:id", patch(handlers::shops::update_shop))
        .route("/shops/:id", delete(handlers::shops::delete_shop));

    let customers = Router::new()
        .route(
            "/customers",
            post(handlers::customers::create_customer).get(handlers::customers::list_customers),
        )
        .route("/customers/:id", get(handlers::customers::get_customer))
        .route("/customers/:id", patch(handlers::customers::update_customer))
        .route("/customers/:id", delete(handlers::customers::delete_customer));

    let tailors = Router::new()
        .route(
            "/tailors",
            post(handlers::tailors::create_tailor).get(handlers::tailors::list_tailors),
        )
        .route("/tailors/:id", get(handlers::tailors::get_tailor))
        .route("/tailors/:id", patch(handlers::tailors::update_tailor))
        .route("/tailors/:id", delete(handlers::tailors::delete_tailor));

    let orders = Router::new()
        .route(
            "/orders",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        // Static segments before the :id matcher.
        .route("/orders/outfits/all", get(handlers::orders::list_outfits))
        .route(
            "/orders/outfits/gender/:gender",
            get(handlers::orders::list_outfits_by_gender),
        )
        .route(
            "/orders/outfits/name/:name",
            get(handlers::orders::get_outfit_by_name),
        )
        .route(
            "/orders/assigned/:tailor_id",
            get(handlers::orders::list_assigned_orders),
        )
        .route("/orders/:id", get(handlers::orders::get_order))
        .route("/orders/:id", patch(handlers::orders::update_order))
        .route("/orders/:id", delete(handlers::orders::delete_order))
        .route("/orders/:id/assign", post(handlers::orders::assign_order))
        .route(
            "/orders/:id/unassign",
            post(handlers::orders::unassign_order),
        )
        .route(
            "/orders/:id/status",
            put(handlers::orders::update_order_status),
        );

    let records = Router::new()
        .route(
            "/measurements",
            post(handlers::measurements::create_measurement)
                .get(handlers::measurements::list_measurements),
        )
        .route("/costs", get(handlers::costs::list_costs))
        .route("/payments", get(handlers::payments::list_payments))
        .route(
            "/analytics/order-types",
            get(handlers::analytics::order_type_counts),
        )
        .route(
            "/analytics/order-status",
            get(handlers::analytics::order_status_counts),
        )
        .route(
            "/analytics/monthly-revenue",
            get(handlers::analytics::monthly_revenue),
        );

    let owner_scoped = Router::new()
        .merge(shops)
        .merge(customers)
        .merge(tailors)
        .merge(orders)
        .merge(records)
        .with_roles(&[Role::ShopOwner]);

    public.merge(admin).merge(owner_scoped)
}

/// Assembles the full application: routes, swagger UI, auth service
/// injection and the tower-http layer stack.
pub fn app(state: AppState, auth_service: Arc<AuthService>) -> Router {
    let cors = match state
        .config
        .cors_allowed_origins
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers(tower_http::cors::Any)
        }
        None => CorsLayer::permissive(),
    };

    Router::new()
        .merge(routes().with_state(state))
        .merge(openapi::swagger_ui())
        .layer(Extension(auth_service))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CompressionLayer::new())
}
