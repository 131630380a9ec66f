use serde::{Deserialize, Serialize};

/// Role carried by a profile.
///
/// Profiles are free-text records; the role is derived from the profile name
/// once, at load time, so authorization logic matches on this enum instead of
/// comparing strings. Names outside this set carry no role (and no permissions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Administrador,
    Editor,
    Visitante,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Administrador, Role::Editor, Role::Visitante];

    /// Canonical profile name for this role.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Administrador => "Administrador",
            Role::Editor => "Editor",
            Role::Visitante => "Visitante",
        }
    }

    /// Exact (case-sensitive) match against the canonical names.
    pub fn from_profile_name(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
