use rosterdesk_auth::Actor;

/// Acting user for a request, resolved from the `x-actor-id` header.
///
/// Absent when the caller did not identify itself; gate checks are skipped then.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorContext {
    actor: Option<Actor>,
}

impl ActorContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(actor: Actor) -> Self {
        Self { actor: Some(actor) }
    }

    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }
}
