//! Static profile → permission table.
//!
//! Process-wide configuration with no runtime mutation. Both the login response
//! and row-level authorization read from here, so they cannot drift apart.

use crate::permissions::{Permission, PermissionSet};
use crate::roles::Role;

const ADMINISTRADOR: &[Permission] = &[
    Permission::ViewUsers,
    Permission::CreateUsers,
    Permission::EditUsers,
    Permission::DeleteUsers,
    Permission::ActivateUsers,
    Permission::ViewProfiles,
    Permission::ManageProfiles,
];

// Editors may edit (but not administrators) and toggle status (guests only);
// the row gates in `authorize` narrow these further.
const EDITOR: &[Permission] = &[
    Permission::ViewUsers,
    Permission::CreateUsers,
    Permission::EditUsers,
    Permission::ActivateUsers,
];

const VISITANTE: &[Permission] = &[Permission::ViewUsers];

/// Permissions granted to a role.
pub fn role_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Administrador => ADMINISTRADOR,
        Role::Editor => EDITOR,
        Role::Visitante => VISITANTE,
    }
}

/// Permissions granted to a profile name. Unknown names yield the empty set.
pub fn permissions_for(profile_name: &str) -> PermissionSet {
    Role::from_profile_name(profile_name)
        .map(|role| role_permissions(role).iter().copied().collect())
        .unwrap_or_default()
}

pub fn has_permission(profile_name: &str, permission: Permission) -> bool {
    Role::from_profile_name(profile_name)
        .is_some_and(|role| role_permissions(role).contains(&permission))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn administrador_has_every_permission() {
        let perms = permissions_for("Administrador");
        assert_eq!(perms.len(), Permission::ALL.len());
        for p in Permission::ALL {
            assert!(perms.contains(&p));
        }
    }

    #[test]
    fn editor_table_is_exact() {
        let perms: Vec<_> = permissions_for("Editor").into_iter().collect();
        assert_eq!(
            perms,
            vec![
                Permission::ViewUsers,
                Permission::CreateUsers,
                Permission::EditUsers,
                Permission::ActivateUsers,
            ]
        );
        assert!(!has_permission("Editor", Permission::DeleteUsers));
        assert!(!has_permission("Editor", Permission::ManageProfiles));
    }

    #[test]
    fn visitante_can_only_view() {
        let perms: Vec<_> = permissions_for("Visitante").into_iter().collect();
        assert_eq!(perms, vec![Permission::ViewUsers]);
    }

    #[test]
    fn unknown_profiles_have_no_permissions() {
        for name in ["", "Usuário", "admin", "ADMINISTRADOR", "Editor "] {
            assert!(permissions_for(name).is_empty(), "{name:?}");
            for p in Permission::ALL {
                assert!(!has_permission(name, p));
            }
        }
    }
}
