use axum::Router;

pub mod auth;
pub mod profiles;
pub mod system;
pub mod users;

/// Router for every endpoint behind actor resolution.
pub fn router() -> Router {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/profiles", profiles::router())
}
