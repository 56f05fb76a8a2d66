pub mod analytics;
pub mod auth;
pub mod costs;
pub mod customers;
pub mod measurements;
pub mod orders;
pub mod payments;
pub mod shops;
pub mod tailors;
pub mod users;

use crate::auth::{otp::OtpSender, AuthService};
use crate::db::DbPool;
use std::sync::Arc;

pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub login: Arc<crate::services::auth::LoginService>,
    pub shops: Arc<crate::services::shops::ShopService>,
    pub customers: Arc<crate::services::customers::CustomerService>,
    pub tailors: Arc<crate::services::tailors::TailorService>,
    pub measurements: Arc<crate::services::measurements::MeasurementService>,
    pub costs: Arc<crate::services::costs::CostService>,
    pub orders: Arc<crate::services::orders::OrderService>,
    pub outfits: Arc<crate::services::outfits::OutfitService>,
    pub payments: Arc<crate::services::payments::PaymentService>,
    pub analytics: Arc<crate::services::analytics::AnalyticsService>,
}

impl AppServices {
    pub fn new(
        db_pool: Arc<DbPool>,
        auth_service: Arc<AuthService>,
        otp_sender: Arc<dyn OtpSender>,
        otp_ttl_minutes: i64,
    ) -> Self {
        let payments = crate::services::payments::PaymentService::new(db_pool.clone());

        Self {
            login: Arc::new(crate::services::auth::LoginService::new(
                db_pool.clone(),
                auth_service,
                otp_sender,
                otp_ttl_minutes,
            )),
            shops: Arc::new(crate::services::shops::ShopService::new(db_pool.clone())),
            customers: Arc::new(crate::services::customers::CustomerService::new(
                db_pool.clone(),
            )),
            tailors: Arc::new(crate::services::tailors::TailorService::new(db_pool.clone())),
            measurements: Arc::new(crate::services::measurements::MeasurementService::new(
                db_pool.clone(),
            )),
            costs: Arc::new(crate::services::costs::CostService::new(db_pool.clone())),
            orders: Arc::new(crate::services::orders::OrderService::new(db_pool.clone())),
            outfits: Arc::new(crate::services::outfits::OutfitService::new()),
            analytics: Arc::new(crate::services::analytics::AnalyticsService::new(
                db_pool,
                payments.clone(),
            )),
            payments: Arc::new(payments),
        }
    }
}
