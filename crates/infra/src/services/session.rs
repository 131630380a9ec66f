use rosterdesk_auth::{permissions_for, Actor, PermissionSet, Profile, Role, User};
use rosterdesk_core::{DomainError, DomainResult, UserId};
use serde::Serialize;

use crate::store::{EntityStore, SharedStore};

/// Resolved identity of a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user: User,
    pub profile: Profile,
    #[serde(skip)]
    pub role: Option<Role>,
    pub permissions: PermissionSet,
}

impl Session {
    pub fn actor(&self) -> Actor {
        Actor::new(self.user.id.clone(), self.profile.clone())
    }
}

/// Email-only sign-in and actor resolution.
///
/// There is no credential check: knowing an active user's address is enough.
pub struct SessionService<S> {
    store: SharedStore<S>,
}

impl<S> Clone for SessionService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: EntityStore> SessionService<S> {
    pub fn new(store: SharedStore<S>) -> Self {
        Self { store }
    }

    pub fn login(&self, email: &str) -> DomainResult<Session> {
        let email = email.trim();
        let user = self
            .store
            .read(|s| s.find_user_by_email(email))
            .ok_or_else(|| {
                tracing::warn!("login with unknown email");
                DomainError::unauthorized("invalid credentials")
            })?;

        let session = self.session_for(user)?;
        tracing::info!(
            user_id = %session.user.id,
            profile = %session.profile.name,
            "user logged in"
        );
        Ok(session)
    }

    /// Resolve the acting user for a request.
    pub fn resolve_actor(&self, id: &UserId) -> DomainResult<Actor> {
        let user = self
            .store
            .read(|s| s.find_user_by_id(id))
            .ok_or_else(|| DomainError::unauthorized(format!("unknown actor {id}")))?;
        self.session_for(user).map(|s| s.actor())
    }

    /// Catalog lookup by profile name; unknown names yield an empty set.
    pub fn permissions_for(&self, profile_name: &str) -> PermissionSet {
        permissions_for(profile_name)
    }

    fn session_for(&self, user: User) -> DomainResult<Session> {
        if !user.is_active {
            tracing::warn!(user_id = %user.id, "inactive user rejected");
            return Err(DomainError::unauthorized("user is inactive"));
        }
        let profile = self
            .store
            .read(|s| s.find_profile_by_id(&user.profile_id))
            .ok_or_else(|| {
                DomainError::unauthorized(format!(
                    "profile {} of user {} not found",
                    user.profile_id, user.id
                ))
            })?;

        Ok(Session {
            role: profile.role(),
            permissions: permissions_for(&profile.name),
            user,
            profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{insert, seeded};
    use rosterdesk_auth::Permission;

    #[test]
    fn login_resolves_profile_and_permissions() {
        let fx = seeded();
        let sessions = SessionService::new(fx.store.clone());
        insert(&fx, "Maria", "Santos", "maria.santos@example.com", &fx.editor);

        let session = sessions.login("  MARIA.SANTOS@example.com ").unwrap();
        assert_eq!(session.profile, fx.editor);
        assert_eq!(session.role, Some(Role::Editor));
        assert!(session.permissions.contains(&Permission::EditUsers));
        assert!(!session.permissions.contains(&Permission::DeleteUsers));

        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("role").is_none());
        assert_eq!(json["user"]["firstName"], "Maria");
    }

    #[test]
    fn unknown_or_inactive_users_are_unauthorized() {
        let fx = seeded();
        let sessions = SessionService::new(fx.store.clone());
        let pedro = insert(&fx, "Pedro", "Oliveira", "pedro@example.com", &fx.guest);

        assert!(matches!(sessions.login("nobody@example.com"), Err(DomainError::Unauthorized(_))));

        let off = rosterdesk_auth::UserPatch::activation(false);
        fx.store.write(|s| s.update_user(&pedro.id, &off));
        assert!(matches!(sessions.login("pedro@example.com"), Err(DomainError::Unauthorized(_))));
        assert!(matches!(sessions.resolve_actor(&pedro.id), Err(DomainError::Unauthorized(_))));
    }

    #[test]
    fn dangling_profile_blocks_login() {
        let fx = seeded();
        let sessions = SessionService::new(fx.store.clone());
        insert(&fx, "Pedro", "Oliveira", "pedro@example.com", &fx.guest);
        fx.store.write(|s| s.delete_profile(&fx.guest.id));

        assert!(matches!(sessions.login("pedro@example.com"), Err(DomainError::Unauthorized(_))));
    }

    #[test]
    fn resolve_actor_carries_catalog_permissions() {
        let fx = seeded();
        let sessions = SessionService::new(fx.store.clone());
        let joao = insert(&fx, "João", "Silva", "joao@example.com", &fx.admin);

        let actor = sessions.resolve_actor(&joao.id).unwrap();
        assert_eq!(actor.role(), Some(Role::Administrador));
        assert_eq!(actor.permissions.len(), Permission::ALL.len());
        assert!(sessions.permissions_for("Desconhecido").is_empty());
    }
}
