//! API-side authorization gates.
//!
//! Catalog checks run before a handler touches the services. Row gates need
//! the target as stored, so the services run them under the write lock.
//! Anonymous requests pass both.

use axum::response::Response;
use rosterdesk_auth::{authorize, Permission};

use crate::app::errors;
use crate::context::ActorContext;

/// Require a catalog permission from the acting user, if there is one.
pub fn require_permission(ctx: &ActorContext, permission: Permission) -> Result<(), Response> {
    match ctx.actor() {
        Some(actor) => authorize(actor, permission).map_err(|e| {
            tracing::warn!(actor_id = %actor.user_id, %permission, "permission denied");
            errors::authz_error_to_response(e)
        }),
        None => Ok(()),
    }
}
