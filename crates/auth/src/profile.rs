//! Profile entity (named role record).

use serde::{Deserialize, Serialize};

use rosterdesk_core::{DomainError, DomainResult, Entity, ProfileId};

use crate::Role;

/// A named role record. The name is the sole driver of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
}

impl Profile {
    pub fn new(id: ProfileId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// Role derived from the profile name, if it is one of the known roles.
    pub fn role(&self) -> Option<Role> {
        Role::from_profile_name(&self.name)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Administrador)
    }
}

impl Entity for Profile {
    type Id = ProfileId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Validated input for creating a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub name: String,
}

impl NewProfile {
    pub fn new(name: impl AsRef<str>) -> DomainResult<Self> {
        Ok(Self {
            name: profile_name(name.as_ref())?,
        })
    }
}

/// Validated partial update for a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
}

impl ProfilePatch {
    pub fn new(name: Option<&str>) -> DomainResult<Self> {
        Ok(Self {
            name: name.map(profile_name).transpose()?,
        })
    }

    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
    }
}

fn profile_name(raw: &str) -> DomainResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation("profile name must not be empty"));
    }
    Ok(name.to_string())
}
