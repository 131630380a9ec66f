//! User entity and its validated inputs.

use serde::{Deserialize, Serialize};

use rosterdesk_core::{DomainError, DomainResult, Email, Entity, ProfileId, UserId};

/// A managed user account.
///
/// # Invariants
/// - `email` is unique across all users (case-insensitive), enforced by the service layer.
/// - `profile_id` references an existing profile at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub is_active: bool,
    pub profile_id: ProfileId,
}

impl User {
    /// `"first last"`, the form used for display, search and sorting.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring test over first name, last name, email and
    /// the `"first last"` concatenation.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.first_name.to_lowercase().contains(&term)
            || self.last_name.to_lowercase().contains(&term)
            || self.email.normalized().contains(&term)
            || self.full_name().to_lowercase().contains(&term)
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Validated input for creating a user. New users are always active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub profile_id: ProfileId,
}

impl NewUser {
    pub fn new(
        first_name: impl AsRef<str>,
        last_name: impl AsRef<str>,
        email: impl AsRef<str>,
        profile_id: ProfileId,
    ) -> DomainResult<Self> {
        Ok(Self {
            first_name: person_name("firstName", first_name.as_ref())?,
            last_name: person_name("lastName", last_name.as_ref())?,
            email: Email::parse(email)?,
            profile_id,
        })
    }

    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            is_active: true,
            profile_id: self.profile_id,
        }
    }
}

/// Validated partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub profile_id: Option<ProfileId>,
    pub is_active: Option<bool>,
}

impl UserPatch {
    pub fn new(
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&str>,
        profile_id: Option<ProfileId>,
        is_active: Option<bool>,
    ) -> DomainResult<Self> {
        Ok(Self {
            first_name: first_name.map(|v| person_name("firstName", v)).transpose()?,
            last_name: last_name.map(|v| person_name("lastName", v)).transpose()?,
            email: email.map(Email::parse).transpose()?,
            profile_id,
            is_active,
        })
    }

    /// Patch that only flips the active flag.
    pub fn activation(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, user: &mut User) {
        if let Some(v) = &self.first_name {
            user.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            user.last_name = v.clone();
        }
        if let Some(v) = &self.email {
            user.email = v.clone();
        }
        if let Some(v) = &self.profile_id {
            user.profile_id = v.clone();
        }
        if let Some(v) = self.is_active {
            user.is_active = v;
        }
    }
}

fn person_name(field: &str, raw: &str) -> DomainResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(value.to_string())
}
