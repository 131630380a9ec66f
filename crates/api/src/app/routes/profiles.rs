use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use rosterdesk_auth::{NewProfile, Permission, Profile, ProfilePatch};
use rosterdesk_core::ProfileId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::authz;
use crate::context::ActorContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_profiles).post(create_profile))
        .route("/:id", get(get_profile).put(update_profile).delete(delete_profile))
}

// Reads are ungated; writes need MANAGE_PROFILES.

pub async fn list_profiles(Extension(services): Extension<Arc<AppServices>>) -> Json<Vec<Profile>> {
    Json(services.profiles.list())
}

pub async fn get_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, Response> {
    let id = parse_id(&id)?;
    services
        .profiles
        .get(&id)
        .map(Json)
        .map_err(errors::domain_error_to_response)
}

pub async fn create_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Json(body): Json<dto::CreateProfileRequest>,
) -> Result<Response, Response> {
    authz::require_permission(&ctx, Permission::ManageProfiles)?;

    let input = NewProfile::try_from(body).map_err(errors::domain_error_to_response)?;
    let profile = services
        .profiles
        .create(input)
        .map_err(errors::domain_error_to_response)?;
    Ok((StatusCode::CREATED, Json(profile)).into_response())
}

pub async fn update_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateProfileRequest>,
) -> Result<Json<Profile>, Response> {
    authz::require_permission(&ctx, Permission::ManageProfiles)?;

    let id = parse_id(&id)?;
    let patch = ProfilePatch::try_from(body).map_err(errors::domain_error_to_response)?;
    services
        .profiles
        .update(&id, patch)
        .map(Json)
        .map_err(errors::domain_error_to_response)
}

pub async fn delete_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, Response> {
    authz::require_permission(&ctx, Permission::ManageProfiles)?;

    let id = parse_id(&id)?;
    services
        .profiles
        .remove(&id)
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(errors::domain_error_to_response)
}

fn parse_id(raw: &str) -> Result<ProfileId, Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}
