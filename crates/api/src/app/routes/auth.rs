use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::{get, post},
    Json, Router,
};
use axum::response::Response;

use rosterdesk_infra::Session;

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/permissions/:profile_name", get(permissions))
}

/// Email-only sign-in: `{user, profile, permissions}`.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> Result<Json<Session>, Response> {
    services
        .sessions
        .login(&body.email)
        .map(Json)
        .map_err(errors::domain_error_to_response)
}

pub async fn permissions(
    Extension(services): Extension<Arc<AppServices>>,
    Path(profile_name): Path<String>,
) -> Json<dto::PermissionsResponse> {
    let permissions = services.sessions.permissions_for(&profile_name);
    Json(dto::PermissionsResponse {
        profile: profile_name,
        permissions,
    })
}
