use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};

use rosterdesk_auth::{user_actions, NewUser, Permission, User, UserActions, UserPatch};
use rosterdesk_core::UserId;
use rosterdesk_infra::query::UserList;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::authz;
use crate::context::ActorContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/actions", get(get_user_actions))
        .route("/:id/activate", put(activate_user))
        .route("/:id/deactivate", put(deactivate_user))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Query(query): Query<dto::ListUsersQuery>,
) -> Result<Json<UserList>, Response> {
    authz::require_permission(&ctx, Permission::ViewUsers)?;

    let pagination = query.pagination().map_err(errors::domain_error_to_response)?;
    let sort = query.sort().map_err(errors::domain_error_to_response)?;
    Ok(Json(services.users.list(&query.filters(), pagination, sort)))
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<String>,
) -> Result<Json<User>, Response> {
    authz::require_permission(&ctx, Permission::ViewUsers)?;
    load_user(&services, &id).map(Json)
}

/// Row actions the acting user may take on a target.
pub async fn get_user_actions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<String>,
) -> Result<Json<UserActions>, Response> {
    let Some(actor) = ctx.actor() else {
        return Err(errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "x-actor-id header is required",
        ));
    };
    let target = load_user(&services, &id)?;
    let target_profile = services.users.profile_of(&target);
    Ok(Json(user_actions(actor, &target, target_profile.as_ref())))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Json(body): Json<dto::CreateUserRequest>,
) -> Result<Response, Response> {
    authz::require_permission(&ctx, Permission::CreateUsers)?;

    let input = NewUser::try_from(body).map_err(errors::domain_error_to_response)?;
    let user = services
        .users
        .create(input)
        .map_err(errors::domain_error_to_response)?;
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> Result<Json<User>, Response> {
    authz::require_permission(&ctx, Permission::EditUsers)?;

    let patch = UserPatch::try_from(body).map_err(errors::domain_error_to_response)?;
    let id = parse_id(&id)?;
    services
        .users
        .update(ctx.actor(), &id, patch)
        .map(Json)
        .map_err(errors::service_error_to_response)
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, Response> {
    authz::require_permission(&ctx, Permission::DeleteUsers)?;

    let id = parse_id(&id)?;
    services
        .users
        .remove(ctx.actor(), &id)
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(errors::service_error_to_response)
}

pub async fn activate_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<String>,
) -> Result<Json<User>, Response> {
    set_status(&services, &ctx, &id, true)
}

pub async fn deactivate_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(id): Path<String>,
) -> Result<Json<User>, Response> {
    set_status(&services, &ctx, &id, false)
}

fn set_status(
    services: &AppServices,
    ctx: &ActorContext,
    id: &str,
    active: bool,
) -> Result<Json<User>, Response> {
    authz::require_permission(ctx, Permission::ActivateUsers)?;

    let id = parse_id(id)?;
    let result = if active {
        services.users.activate(ctx.actor(), &id)
    } else {
        services.users.deactivate(ctx.actor(), &id)
    };
    result.map(Json).map_err(errors::service_error_to_response)
}

fn parse_id(raw_id: &str) -> Result<UserId, Response> {
    raw_id.parse().map_err(errors::domain_error_to_response)
}

fn load_user(services: &AppServices, raw_id: &str) -> Result<User, Response> {
    let id = parse_id(raw_id)?;
    services
        .users
        .get(&id)
        .map_err(errors::domain_error_to_response)
}
