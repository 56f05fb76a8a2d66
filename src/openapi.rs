use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Darzi API",
        version = "0.3.0",
        description = r#"
Backend for multi-tenant tailoring shops.

Shop owners sign in with a one-time code sent to their mobile number and
manage their shops, customers, tailors and orders. Each order carries its
garments, the measurements taken for them and its cost breakdown. Payments
are derived from delivered orders and back-filled on read, and the
analytics endpoints report on top of that ledger.

All endpoints except `/auth/*` and `/health` require a bearer token:

```
Authorization: Bearer <access-token>
```
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        crate::handlers::auth::send_otp,
        crate::handlers::auth::verify_otp,
        crate::handlers::auth::refresh_token,
        crate::handlers::users::list_users,
        crate::handlers::shops::create_shop,
        crate::handlers::shops::list_shops,
        crate::handlers::shops::get_shop,
        crate::handlers::shops::update_shop,
        crate::handlers::shops::delete_shop,
        crate::handlers::customers::create_customer,
        crate::handlers::customers::list_customers,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::update_customer,
        crate::handlers::customers::delete_customer,
        crate::handlers::tailors::create_tailor,
        crate::handlers::tailors::list_tailors,
        crate::handlers::tailors::get_tailor,
        crate::handlers::tailors::update_tailor,
        crate::handlers::tailors::delete_tailor,
        crate::handlers::measurements::create_measurement,
        crate::handlers::measurements::list_measurements,
        crate::handlers::costs::list_costs,
        crate::handlers::orders::create_order,
        crate::handlers::orders::list_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::update_order,
        crate::handlers::orders::list_assigned_orders,
        crate::handlers::orders::assign_order,
        crate::handlers::orders::unassign_order,
        crate::handlers::orders::update_order_status,
        crate::handlers::orders::delete_order,
        crate::handlers::orders::list_outfits,
        crate::handlers::orders::list_outfits_by_gender,
        crate::handlers::orders::get_outfit_by_name,
        crate::handlers::payments::list_payments,
        crate::handlers::analytics::order_type_counts,
        crate::handlers::analytics::order_status_counts,
        crate::handlers::analytics::monthly_revenue,
    ),
    tags(
        (name = "auth", description = "OTP login and token refresh"),
        (name = "users", description = "Account administration"),
        (name = "shops", description = "Shop management"),
        (name = "customers", description = "Customer records"),
        (name = "tailors", description = "Tailor roster"),
        (name = "measurements", description = "Body measurements"),
        (name = "costs", description = "Order cost breakdowns"),
        (name = "orders", description = "Order lifecycle"),
        (name = "outfits", description = "Garment catalog"),
        (name = "payments", description = "Derived payment ledger"),
        (name = "analytics", description = "Shop reporting")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, serving the generated document at
/// `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
