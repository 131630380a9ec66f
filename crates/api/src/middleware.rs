use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use rosterdesk_core::{DomainError, UserId};
use rosterdesk_observability::{request_span, REQUEST_ID_HEADER};
use tracing::Instrument;
use uuid::Uuid;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::ActorContext;

/// Header naming the acting user.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Tag each request with a correlation id (caller-supplied or UUIDv7) and run
/// it inside a span carrying that id. The id is echoed on the response.
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    let span = request_span(req.method().as_str(), req.uri().path(), &request_id);
    let mut res = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

/// Resolve `x-actor-id` into an [`ActorContext`].
///
/// Unknown or inactive actors are rejected with 401; no header means anonymous.
pub async fn actor_middleware(
    State(services): State<Arc<AppServices>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let ctx = match extract_actor_id(req.headers()).map_err(errors::domain_error_to_response)? {
        Some(id) => {
            let actor = services
                .sessions
                .resolve_actor(&id)
                .map_err(errors::domain_error_to_response)?;
            tracing::debug!(
                actor_id = %actor.user_id,
                profile = %actor.profile.name,
                "actor resolved"
            );
            ActorContext::new(actor)
        }
        None => ActorContext::anonymous(),
    };

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

fn extract_actor_id(headers: &HeaderMap) -> Result<Option<UserId>, DomainError> {
    let Some(header) = headers.get(ACTOR_HEADER) else {
        return Ok(None);
    };
    let raw = header
        .to_str()
        .map_err(|_| DomainError::unauthorized("x-actor-id is not valid text"))?;
    raw.parse::<UserId>()
        .map(Some)
        .map_err(|_| DomainError::unauthorized("x-actor-id must not be empty"))
}
