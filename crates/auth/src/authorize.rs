use serde::Serialize;
use thiserror::Error;

use rosterdesk_core::UserId;

use crate::{catalog, Permission, PermissionSet, Profile, Role, User};

/// A fully resolved acting user for authorization decisions.
///
/// Construction is decoupled from storage and transport: the API derives it
/// from the session resolver, and permissions always come from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub profile: Profile,
    pub permissions: PermissionSet,
}

impl Actor {
    pub fn new(user_id: UserId, profile: Profile) -> Self {
        let permissions = catalog::permissions_for(&profile.name);
        Self {
            user_id,
            profile,
            permissions,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.role()
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(Permission),

    #[error("forbidden: {action} not allowed on user '{target}'")]
    RowDenied { action: RowAction, target: UserId },
}

/// Row-level actions gated per target user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    Edit,
    ToggleStatus,
    Delete,
}

impl core::fmt::Display for RowAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            RowAction::Edit => "edit",
            RowAction::ToggleStatus => "toggle status",
            RowAction::Delete => "delete",
        })
    }
}

/// Which row actions the acting user may take on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActions {
    pub can_edit: bool,
    pub can_toggle_status: bool,
    pub can_delete: bool,
}

/// Authorize a capability for an actor.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(actor: &Actor, required: Permission) -> Result<(), AuthzError> {
    if actor.has(required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required))
    }
}

/// Editors cannot touch administrators; everyone else with the capability may edit.
pub fn can_edit_user(
    acting_profile: Option<&Profile>,
    _target_user: &User,
    target_profile: Option<&Profile>,
    has_edit_capability: bool,
) -> bool {
    if !has_edit_capability {
        return false;
    }
    let (Some(acting), Some(target)) = (acting_profile, target_profile) else {
        return false;
    };

    !(acting.role() == Some(Role::Editor) && target.role() == Some(Role::Administrador))
}

/// Editors may only activate/deactivate guests. Administrators are not
/// restricted here; the administrator invariant is enforced on mutation.
pub fn can_toggle_status(
    acting_profile: Option<&Profile>,
    target_profile: Option<&Profile>,
    has_activate_capability: bool,
) -> bool {
    if !has_activate_capability {
        return false;
    }
    let (Some(acting), Some(target)) = (acting_profile, target_profile) else {
        return false;
    };

    match acting.role() {
        Some(Role::Editor) => target.role() == Some(Role::Visitante),
        _ => true,
    }
}

/// Deletion is gated on the capability alone.
pub fn can_delete_user(acting_profile: Option<&Profile>, has_delete_capability: bool) -> bool {
    has_delete_capability && acting_profile.is_some()
}

pub fn user_actions(actor: &Actor, target: &User, target_profile: Option<&Profile>) -> UserActions {
    let acting = Some(&actor.profile);
    UserActions {
        can_edit: can_edit_user(acting, target, target_profile, actor.has(Permission::EditUsers)),
        can_toggle_status: can_toggle_status(
            acting,
            target_profile,
            actor.has(Permission::ActivateUsers),
        ),
        can_delete: can_delete_user(acting, actor.has(Permission::DeleteUsers)),
    }
}

/// Enforce a row gate, logging denials.
pub fn authorize_row(
    actor: &Actor,
    action: RowAction,
    target: &User,
    target_profile: Option<&Profile>,
) -> Result<(), AuthzError> {
    let actions = user_actions(actor, target, target_profile);
    let allowed = match action {
        RowAction::Edit => actions.can_edit,
        RowAction::ToggleStatus => actions.can_toggle_status,
        RowAction::Delete => actions.can_delete,
    };

    if allowed {
        return Ok(());
    }

    tracing::warn!(
        actor_id = %actor.user_id,
        target_id = %target.id,
        %action,
        "row action denied"
    );
    Err(AuthzError::RowDenied {
        action,
        target: target.id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewUser;
    use rosterdesk_core::ProfileId;

    fn profile(n: u64, name: &str) -> Profile {
        Profile::new(ProfileId::from_sequence(n), name)
    }

    fn user_with(profile: &Profile) -> User {
        NewUser::new("Ana", "Costa", "ana@example.com", profile.id.clone())
            .unwrap()
            .into_user(UserId::from_sequence(1))
    }

    #[test]
    fn edit_requires_capability_regardless_of_roles() {
        let admin = profile(1, "Administrador");
        let guest = profile(3, "Visitante");
        let target = user_with(&guest);
        assert!(!can_edit_user(Some(&admin), &target, Some(&guest), false));
        assert!(can_edit_user(Some(&admin), &target, Some(&guest), true));
    }

    #[test]
    fn missing_profiles_deny_everything() {
        let admin = profile(1, "Administrador");
        let target = user_with(&admin);
        assert!(!can_edit_user(None, &target, Some(&admin), true));
        assert!(!can_edit_user(Some(&admin), &target, None, true));
        assert!(!can_toggle_status(None, Some(&admin), true));
        assert!(!can_toggle_status(Some(&admin), None, true));
        assert!(!can_delete_user(None, true));
    }

    #[test]
    fn editor_cannot_edit_or_toggle_administrators() {
        let admin = profile(1, "Administrador");
        let editor = profile(2, "Editor");
        let target = user_with(&admin);
        assert!(!can_edit_user(Some(&editor), &target, Some(&admin), true));
        assert!(!can_toggle_status(Some(&editor), Some(&admin), true));
    }

    #[test]
    fn editor_toggles_only_guests() {
        let editor = profile(2, "Editor");
        let guest = profile(3, "Visitante");
        let custom = profile(4, "Auditor");
        assert!(can_toggle_status(Some(&editor), Some(&guest), true));
        assert!(!can_toggle_status(Some(&editor), Some(&editor), true));
        assert!(!can_toggle_status(Some(&editor), Some(&custom), true));
        // Editing other editors is allowed.
        let target = user_with(&editor);
        assert!(can_edit_user(Some(&editor), &target, Some(&editor), true));
    }

    #[test]
    fn administrators_toggle_anyone() {
        let admin = profile(1, "Administrador");
        for target in ["Administrador", "Editor", "Visitante", "Auditor"] {
            assert!(can_toggle_status(Some(&admin), Some(&profile(9, target)), true));
        }
    }

    #[test]
    fn actor_permissions_come_from_catalog() {
        let editor = Actor::new(UserId::from_sequence(2), profile(2, "Editor"));
        let guest = profile(3, "Visitante");
        let target = user_with(&guest);

        assert_eq!(authorize(&editor, Permission::EditUsers), Ok(()));
        assert_eq!(
            authorize(&editor, Permission::DeleteUsers),
            Err(AuthzError::Forbidden(Permission::DeleteUsers))
        );

        let actions = user_actions(&editor, &target, Some(&guest));
        assert_eq!(
            actions,
            UserActions {
                can_edit: true,
                can_toggle_status: true,
                can_delete: false,
            }
        );
        assert!(matches!(
            authorize_row(&editor, RowAction::Delete, &target, Some(&guest)),
            Err(AuthzError::RowDenied { action: RowAction::Delete, .. })
        ));
    }

    #[test]
    fn visitor_has_no_row_actions() {
        let visitor = Actor::new(UserId::from_sequence(3), profile(3, "Visitante"));
        let guest = profile(3, "Visitante");
        let target = user_with(&guest);
        let actions = user_actions(&visitor, &target, Some(&guest));
        assert!(!actions.can_edit && !actions.can_toggle_status && !actions.can_delete);
    }
}
