use rosterdesk_auth::{
    authorize_row, guard_admin_invariant, guard_delete_policy, Actor, AuthzError, DeletePolicy,
    NewUser, Profile, RowAction, User, UserMutation, UserPatch,
};
use rosterdesk_core::{DomainError, DomainResult, UserId};

use crate::query::{self, Pagination, SortDirection, SortField, UserFilters, UserList};
use crate::services::{ServiceError, ServiceResult};
use crate::store::{EntityStore, SharedStore};

/// User management: CRUD plus activation, guarded by the administrator invariant.
pub struct UserService<S> {
    store: SharedStore<S>,
    delete_policy: DeletePolicy,
}

impl<S> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            delete_policy: self.delete_policy,
        }
    }
}

impl<S: EntityStore> UserService<S> {
    pub fn new(store: SharedStore<S>, delete_policy: DeletePolicy) -> Self {
        Self {
            store,
            delete_policy,
        }
    }

    /// Filter, paginate, then sort the returned rows.
    pub fn list(
        &self,
        filters: &UserFilters,
        pagination: Option<Pagination>,
        sort: Option<(SortField, SortDirection)>,
    ) -> UserList {
        tracing::debug!(?filters, ?pagination, ?sort, "listing users");
        self.store.read(|s| {
            let mut list = query::list_users(s, filters, pagination);
            if let Some((field, direction)) = sort {
                query::sort_users(list.rows_mut(), &s.all_profiles(), field, direction);
            }
            list
        })
    }

    pub fn get(&self, id: &UserId) -> DomainResult<User> {
        self.store
            .read(|s| s.find_user_by_id(id))
            .ok_or_else(|| user_not_found(id))
    }

    /// Profile referenced by a user, if it still exists.
    pub fn profile_of(&self, user: &User) -> Option<Profile> {
        self.store.read(|s| s.find_profile_by_id(&user.profile_id))
    }

    pub fn create(&self, input: NewUser) -> DomainResult<User> {
        let user = self.store.write(|s| {
            if !s.profile_exists(&input.profile_id) {
                return Err(DomainError::invalid_reference(format!(
                    "profile {} not found",
                    input.profile_id
                )));
            }
            if s.email_exists(input.email.as_str(), None) {
                return Err(DomainError::conflict(format!(
                    "email {} is already in use",
                    input.email
                )));
            }
            Ok(s.create_user(input))
        })?;

        tracing::info!(user_id = %user.id, profile_id = %user.profile_id, "user created");
        Ok(user)
    }

    /// Row gates for `actor` (if any) run inside the same write section as the
    /// guards and the mutation.
    pub fn update(
        &self,
        actor: Option<&Actor>,
        id: &UserId,
        patch: UserPatch,
    ) -> ServiceResult<User> {
        self.apply(actor, RowAction::Edit, id, &patch, UserMutation::Update(&patch))
    }

    pub fn activate(&self, actor: Option<&Actor>, id: &UserId) -> ServiceResult<User> {
        let patch = UserPatch::activation(true);
        self.apply(actor, RowAction::ToggleStatus, id, &patch, UserMutation::Update(&patch))
    }

    pub fn deactivate(&self, actor: Option<&Actor>, id: &UserId) -> ServiceResult<User> {
        let patch = UserPatch::activation(false);
        self.apply(actor, RowAction::ToggleStatus, id, &patch, UserMutation::Deactivate)
    }

    pub fn remove(&self, actor: Option<&Actor>, id: &UserId) -> ServiceResult<()> {
        let policy = self.delete_policy;
        self.store
            .write(|s| -> ServiceResult<()> {
                let current = s.find_user_by_id(id).ok_or_else(|| user_not_found(id))?;
                row_gate(s, actor, &current, &[RowAction::Delete])?;
                guard_delete_policy(&current, policy)?;
                let users = s.all_users();
                guard_admin_invariant(&current, UserMutation::Delete, &users, |p| s.role_of(p))?;

                if !s.delete_user(id) {
                    return Err(user_not_found(id).into());
                }
                Ok(())
            })
            .inspect(|_| tracing::info!(user_id = %id, "user deleted"))
            .inspect_err(|e| tracing::warn!(user_id = %id, error = %e, "user delete rejected"))
    }

    fn apply(
        &self,
        actor: Option<&Actor>,
        action: RowAction,
        id: &UserId,
        patch: &UserPatch,
        mutation: UserMutation<'_>,
    ) -> ServiceResult<User> {
        self.store
            .write(|s| -> ServiceResult<User> {
                let current = s.find_user_by_id(id).ok_or_else(|| user_not_found(id))?;

                // Flipping the flag through a general update is still a status toggle.
                let flips = patch.is_active.is_some_and(|active| active != current.is_active);
                if action != RowAction::ToggleStatus && flips {
                    row_gate(s, actor, &current, &[action, RowAction::ToggleStatus])?;
                } else {
                    row_gate(s, actor, &current, &[action])?;
                }

                if let Some(profile_id) = &patch.profile_id {
                    if !s.profile_exists(profile_id) {
                        return Err(DomainError::invalid_reference(format!(
                            "profile {profile_id} not found"
                        ))
                        .into());
                    }
                }
                if let Some(email) = &patch.email {
                    if s.email_exists(email.as_str(), Some(id)) {
                        return Err(
                            DomainError::conflict(format!("email {email} is already in use")).into()
                        );
                    }
                }

                let users = s.all_users();
                guard_admin_invariant(&current, mutation, &users, |p| s.role_of(p))?;

                s.update_user(id, patch)
                    .ok_or_else(|| ServiceError::from(user_not_found(id)))
            })
            .inspect(|u| tracing::info!(user_id = %u.id, is_active = u.is_active, "user updated"))
            .inspect_err(|e| tracing::warn!(user_id = %id, error = %e, "user update rejected"))
    }
}

/// Enforce row gates for an acting user; anonymous callers pass.
fn row_gate<S: EntityStore>(
    s: &S,
    actor: Option<&Actor>,
    target: &User,
    actions: &[RowAction],
) -> Result<(), AuthzError> {
    let Some(actor) = actor else {
        return Ok(());
    };
    let target_profile = s.find_profile_by_id(&target.profile_id);
    actions
        .iter()
        .try_for_each(|&action| authorize_row(actor, action, target, target_profile.as_ref()))
}

fn user_not_found(id: &UserId) -> DomainError {
    DomainError::not_found(format!("user {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{insert, new_user, seeded, Seeded};
    use crate::InMemoryEntityStore;
    use rosterdesk_core::ProfileId;

    fn service(fx: &Seeded) -> UserService<InMemoryEntityStore> {
        UserService::new(fx.store.clone(), DeletePolicy::RejectInactive)
    }

    fn actor(user: &User, profile: &Profile) -> Actor {
        Actor::new(user.id.clone(), profile.clone())
    }

    fn domain_err<T: std::fmt::Debug>(result: ServiceResult<T>) -> DomainError {
        match result.unwrap_err() {
            ServiceError::Domain(e) => e,
            other => panic!("expected a domain error, got {other:?}"),
        }
    }

    #[test]
    fn create_validates_profile_and_email() {
        let fx = seeded();
        let users = service(&fx);

        let created = users
            .create(new_user("João", "Silva", "joao@example.com", &fx.admin))
            .unwrap();
        assert!(created.is_active);

        let dangling =
            NewUser::new("X", "Y", "x@example.com", ProfileId::new("profile-99")).unwrap();
        assert!(matches!(users.create(dangling), Err(DomainError::InvalidReference(_))));

        let dup = new_user("Outro", "João", "JOAO@EXAMPLE.COM", &fx.guest);
        assert!(matches!(users.create(dup), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn update_checks_reference_and_uniqueness() {
        let fx = seeded();
        let users = service(&fx);
        let a = insert(&fx, "Ana", "A", "ana@example.com", &fx.guest);
        insert(&fx, "Bia", "B", "bia@example.com", &fx.guest);

        let bad_ref = UserPatch {
            profile_id: Some(ProfileId::new("profile-99")),
            ..UserPatch::default()
        };
        assert!(matches!(
            domain_err(users.update(None, &a.id, bad_ref)),
            DomainError::InvalidReference(_)
        ));

        let taken = UserPatch::new(None, None, Some("BIA@example.com"), None, None).unwrap();
        assert!(matches!(domain_err(users.update(None, &a.id, taken)), DomainError::Conflict(_)));

        // Re-submitting your own address is not a conflict.
        let own =
            UserPatch::new(Some("Ana Maria"), None, Some("ANA@example.com"), None, None).unwrap();
        let updated = users.update(None, &a.id, own).unwrap();
        assert_eq!(updated.first_name, "Ana Maria");
        assert_eq!(updated.email.as_str(), "ANA@example.com");

        assert!(matches!(
            domain_err(users.update(None, &UserId::new("user-404"), UserPatch::activation(true))),
            DomainError::NotFound(_)
        ));
    }

    #[test]
    fn last_admin_walkthrough() {
        let fx = seeded();
        let users = service(&fx);
        let joao = users
            .create(new_user("João", "Silva", "joao.silva@example.com", &fx.admin))
            .unwrap();

        assert!(matches!(
            domain_err(users.deactivate(None, &joao.id)),
            DomainError::InvariantViolation(_)
        ));
        assert!(users.get(&joao.id).unwrap().is_active);

        let maria = users
            .create(new_user("Maria", "Santos", "maria.santos@example.com", &fx.admin))
            .unwrap();
        let joao = users.deactivate(None, &joao.id).unwrap();
        assert!(!joao.is_active);

        assert!(matches!(
            domain_err(users.deactivate(None, &maria.id)),
            DomainError::InvariantViolation(_)
        ));
        assert!(users.get(&maria.id).unwrap().is_active);
    }

    #[test]
    fn reassigning_or_deleting_sole_admin_is_rejected() {
        let fx = seeded();
        let users = service(&fx);
        let admin = insert(&fx, "João", "Silva", "joao@example.com", &fx.admin);

        let demote = UserPatch {
            profile_id: Some(fx.editor.id.clone()),
            ..UserPatch::default()
        };
        assert!(matches!(
            domain_err(users.update(None, &admin.id, demote.clone())),
            DomainError::InvariantViolation(_)
        ));
        assert!(matches!(
            domain_err(users.remove(None, &admin.id)),
            DomainError::InvariantViolation(_)
        ));

        insert(&fx, "Maria", "Santos", "maria@example.com", &fx.admin);
        let moved = users.update(None, &admin.id, demote).unwrap();
        assert_eq!(moved.profile_id, fx.editor.id);
    }

    #[test]
    fn delete_policy_governs_inactive_users() {
        let fx = seeded();
        let strict = service(&fx);
        let lenient = UserService::new(fx.store.clone(), DeletePolicy::AllowInactive);

        let guest = insert(&fx, "Pedro", "Oliveira", "pedro@example.com", &fx.guest);
        strict.deactivate(None, &guest.id).unwrap();
        assert!(matches!(
            domain_err(strict.remove(None, &guest.id)),
            DomainError::InvariantViolation(_)
        ));

        lenient.remove(None, &guest.id).unwrap();
        assert!(matches!(strict.get(&guest.id), Err(DomainError::NotFound(_))));
        assert!(matches!(domain_err(strict.remove(None, &guest.id)), DomainError::NotFound(_)));
    }

    #[test]
    fn activate_restores_access() {
        let fx = seeded();
        let users = service(&fx);
        let guest = insert(&fx, "Pedro", "Oliveira", "pedro@example.com", &fx.guest);
        users.deactivate(None, &guest.id).unwrap();
        assert!(users.activate(None, &guest.id).unwrap().is_active);
    }

    #[test]
    fn row_gates_follow_the_acting_profile() {
        let fx = seeded();
        let users = service(&fx);
        let joao = insert(&fx, "João", "Silva", "joao@example.com", &fx.admin);
        let maria = insert(&fx, "Maria", "Santos", "maria@example.com", &fx.editor);
        let pedro = insert(&fx, "Pedro", "Oliveira", "pedro@example.com", &fx.guest);
        let editor = actor(&maria, &fx.editor);

        let rename = UserPatch::new(Some("Jo"), None, None, None, None).unwrap();
        assert!(matches!(
            users.update(Some(&editor), &joao.id, rename),
            Err(ServiceError::Denied(AuthzError::RowDenied { action: RowAction::Edit, .. }))
        ));
        assert_eq!(users.get(&joao.id).unwrap().first_name, "João");

        assert!(matches!(
            users.deactivate(Some(&editor), &joao.id),
            Err(ServiceError::Denied(_))
        ));
        assert!(!users.deactivate(Some(&editor), &pedro.id).unwrap().is_active);
        assert!(matches!(users.remove(Some(&editor), &pedro.id), Err(ServiceError::Denied(_))));
    }

    #[test]
    fn flipping_status_through_update_needs_the_toggle_gate() {
        let fx = seeded();
        let users = service(&fx);
        let maria = insert(&fx, "Maria", "Santos", "maria@example.com", &fx.editor);
        let bruno = insert(&fx, "Bruno", "Lima", "bruno@example.com", &fx.editor);
        let editor = actor(&maria, &fx.editor);

        // Editors may edit other editors, but only toggle guests.
        let off = UserPatch::activation(false);
        assert!(matches!(
            users.update(Some(&editor), &bruno.id, off),
            Err(ServiceError::Denied(AuthzError::RowDenied {
                action: RowAction::ToggleStatus,
                ..
            }))
        ));
        assert!(users.get(&bruno.id).unwrap().is_active);

        // Restating the current flag is not a toggle.
        let same = UserPatch::new(Some("Bruno José"), None, None, None, Some(true)).unwrap();
        assert_eq!(users.update(Some(&editor), &bruno.id, same).unwrap().first_name, "Bruno José");
    }

    #[test]
    fn row_gate_sees_the_profile_current_at_write_time() {
        let fx = seeded();
        let users = service(&fx);
        insert(&fx, "João", "Silva", "joao@example.com", &fx.admin);
        let maria = insert(&fx, "Maria", "Santos", "maria@example.com", &fx.editor);
        let pedro = insert(&fx, "Pedro", "Oliveira", "pedro@example.com", &fx.guest);
        let editor = actor(&maria, &fx.editor);

        let promote = UserPatch {
            profile_id: Some(fx.admin.id.clone()),
            ..UserPatch::default()
        };
        users.update(None, &pedro.id, promote).unwrap();

        assert!(matches!(
            users.deactivate(Some(&editor), &pedro.id),
            Err(ServiceError::Denied(_))
        ));
        assert!(users.get(&pedro.id).unwrap().is_active);
    }

    #[test]
    fn concurrent_deactivations_keep_one_admin() {
        use std::sync::{Arc, Barrier};

        let fx = seeded();
        let users = service(&fx);
        let a = insert(&fx, "A", "Admin", "a@example.com", &fx.admin);
        let b = insert(&fx, "B", "Admin", "b@example.com", &fx.admin);

        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = [a.id.clone(), b.id.clone()]
            .into_iter()
            .map(|id| {
                let users = users.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    users.deactivate(None, &id).is_ok()
                })
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        let active_admins = users
            .list(&UserFilters::new(Some(fx.admin.id.as_str()), None), None, None)
            .rows()
            .iter()
            .filter(|u| u.is_active)
            .count();
        assert_eq!(active_admins, 1);
    }

    #[test]
    fn list_sorts_the_returned_page_only() {
        let fx = seeded();
        let users = service(&fx);
        let rows = [
            ("Carla", "c@example.com"),
            ("Bruno", "b@example.com"),
            ("Ana", "a@example.com"),
        ];
        for (first, email) in rows {
            insert(&fx, first, "Lima", email, &fx.guest);
        }

        let page = users.list(
            &UserFilters::default(),
            Some(Pagination::new(1, 2)),
            Some((SortField::Name, SortDirection::Asc)),
        );
        let names: Vec<_> = page.rows().iter().map(|u| u.first_name.as_str()).collect();
        assert_eq!(names, ["Bruno", "Carla"]);

        let all = users.list(
            &UserFilters::default(),
            None,
            Some((SortField::Email, SortDirection::Desc)),
        );
        let emails: Vec<_> = all.rows().iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, ["c@example.com", "b@example.com", "a@example.com"]);
    }

    #[test]
    fn profile_of_resolves_reference() {
        let fx = seeded();
        let users = service(&fx);
        let guest = insert(&fx, "Pedro", "Oliveira", "pedro@example.com", &fx.guest);
        assert_eq!(users.profile_of(&guest), Some(fx.guest.clone()));
    }
}
