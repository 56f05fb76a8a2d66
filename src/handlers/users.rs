use axum::{extract::State, response::Json};

use crate::entities::user;
use crate::errors::ServiceError;
use crate::AppState;

/// Full account listing. The router mounts this behind the SUPER_ADMIN
/// role gate.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<user::Model>>, ServiceError> {
    let users = state.services.login.list_users().await?;
    Ok(Json(users))
}
