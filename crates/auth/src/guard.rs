//! Server-side mutation guards.
//!
//! These hold regardless of the UI-facing gates in `authorize`: callers run
//! them inside the same critical section as the write they protect.

use rosterdesk_core::{DomainError, DomainResult, ProfileId};

use crate::{Profile, Role, User, UserPatch};

/// A mutation about to be applied to an existing user.
#[derive(Debug, Clone, Copy)]
pub enum UserMutation<'a> {
    Update(&'a UserPatch),
    Deactivate,
    Delete,
}

/// Whether deleting an already-inactive user is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Only active users may be deleted.
    #[default]
    RejectInactive,
    AllowInactive,
}

/// Reject a mutation that would leave zero active administrators.
///
/// Only applies when `target` is currently an active administrator and the
/// mutation deactivates it, deletes it, or moves it to a non-administrator
/// profile. `users` is the full user collection (the target may be included;
/// it is excluded from the count).
pub fn guard_admin_invariant<'a, I, F>(
    target: &User,
    mutation: UserMutation<'_>,
    users: I,
    role_of: F,
) -> DomainResult<()>
where
    I: IntoIterator<Item = &'a User>,
    F: Fn(&ProfileId) -> Option<Role>,
{
    let is_admin = |profile_id: &ProfileId| role_of(profile_id) == Some(Role::Administrador);

    if !target.is_active || !is_admin(&target.profile_id) {
        return Ok(());
    }

    let drops_admin = match mutation {
        UserMutation::Deactivate | UserMutation::Delete => true,
        UserMutation::Update(patch) => {
            patch.is_active == Some(false)
                || patch.profile_id.as_ref().is_some_and(|p| !is_admin(p))
        }
    };
    if !drops_admin {
        return Ok(());
    }

    let other_active_admins = users
        .into_iter()
        .filter(|u| u.id != target.id && u.is_active && is_admin(&u.profile_id))
        .count();

    if other_active_admins == 0 {
        return Err(DomainError::invariant(
            "at least one active administrator must remain",
        ));
    }
    Ok(())
}

pub fn guard_delete_policy(target: &User, policy: DeletePolicy) -> DomainResult<()> {
    if policy == DeletePolicy::RejectInactive && !target.is_active {
        return Err(DomainError::invariant(format!(
            "user {} is inactive and cannot be deleted",
            target.id
        )));
    }
    Ok(())
}

/// Renaming the administrator profile away from its role name would strip the
/// role from every user holding it; reject that while any of them is active.
pub fn guard_profile_rename<'a, I>(profile: &Profile, new_name: &str, users: I) -> DomainResult<()>
where
    I: IntoIterator<Item = &'a User>,
{
    if !profile.is_admin() || Role::from_profile_name(new_name) == Some(Role::Administrador) {
        return Ok(());
    }

    let holders = users
        .into_iter()
        .filter(|u| u.is_active && u.profile_id == profile.id)
        .count();
    if holders > 0 {
        return Err(DomainError::invariant(format!(
            "profile {} still has {holders} active administrator(s)",
            profile.id
        )));
    }
    Ok(())
}
