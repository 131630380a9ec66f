use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A single granted capability.
///
/// Serialized in SCREAMING_SNAKE_CASE (`"VIEW_USERS"`), which is the wire form
/// clients key their UI gating on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ViewUsers,
    CreateUsers,
    EditUsers,
    DeleteUsers,
    ActivateUsers,
    ViewProfiles,
    ManageProfiles,
}

/// Ordered permission set (deterministic iteration for responses and logs).
pub type PermissionSet = BTreeSet<Permission>;

impl Permission {
    pub const ALL: [Permission; 7] = [
        Permission::ViewUsers,
        Permission::CreateUsers,
        Permission::EditUsers,
        Permission::DeleteUsers,
        Permission::ActivateUsers,
        Permission::ViewProfiles,
        Permission::ManageProfiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewUsers => "VIEW_USERS",
            Permission::CreateUsers => "CREATE_USERS",
            Permission::EditUsers => "EDIT_USERS",
            Permission::DeleteUsers => "DELETE_USERS",
            Permission::ActivateUsers => "ACTIVATE_USERS",
            Permission::ViewProfiles => "VIEW_PROFILES",
            Permission::ManageProfiles => "MANAGE_PROFILES",
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_matches_display() {
        for p in Permission::ALL {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.as_str()));
            assert_eq!(p.to_string(), p.as_str());
        }
    }
}
