use rosterdesk_auth::{guard_profile_rename, NewProfile, Profile, ProfilePatch};
use rosterdesk_core::{DomainError, DomainResult, ProfileId};

use crate::store::{EntityStore, SharedStore};

/// Profile CRUD. Names are unique (case-insensitive).
pub struct ProfileService<S> {
    store: SharedStore<S>,
}

impl<S> Clone for ProfileService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: EntityStore> ProfileService<S> {
    pub fn new(store: SharedStore<S>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Profile> {
        tracing::debug!("listing profiles");
        self.store.read(|s| s.all_profiles())
    }

    pub fn get(&self, id: &ProfileId) -> DomainResult<Profile> {
        self.store
            .read(|s| s.find_profile_by_id(id))
            .ok_or_else(|| profile_not_found(id))
    }

    pub fn create(&self, input: NewProfile) -> DomainResult<Profile> {
        let profile = self.store.write(|s| {
            if s.name_exists(&input.name, None) {
                return Err(duplicate_name(&input.name));
            }
            Ok(s.create_profile(input))
        })?;

        tracing::info!(profile_id = %profile.id, name = %profile.name, "profile created");
        Ok(profile)
    }

    pub fn update(&self, id: &ProfileId, patch: ProfilePatch) -> DomainResult<Profile> {
        self.store
            .write(|s| {
                let current = s.find_profile_by_id(id).ok_or_else(|| profile_not_found(id))?;
                if let Some(name) = &patch.name {
                    if s.name_exists(name, Some(id)) {
                        return Err(duplicate_name(name));
                    }
                    guard_profile_rename(&current, name, &s.all_users())?;
                }
                s.update_profile(id, &patch).ok_or_else(|| profile_not_found(id))
            })
            .inspect(|p| tracing::info!(profile_id = %p.id, name = %p.name, "profile updated"))
            .inspect_err(|e| {
                tracing::warn!(profile_id = %id, error = %e, "profile update rejected")
            })
    }

    /// Profiles still referenced by a user cannot be removed.
    pub fn remove(&self, id: &ProfileId) -> DomainResult<()> {
        self.store
            .write(|s| {
                if !s.profile_exists(id) {
                    return Err(profile_not_found(id));
                }
                let holders = s.find_users_by_profile(id).len();
                if holders > 0 {
                    return Err(DomainError::conflict(format!(
                        "profile {id} is still assigned to {holders} user(s)"
                    )));
                }
                s.delete_profile(id);
                Ok(())
            })
            .inspect(|_| tracing::info!(profile_id = %id, "profile deleted"))
            .inspect_err(|e| {
                tracing::warn!(profile_id = %id, error = %e, "profile delete rejected")
            })
    }
}

fn profile_not_found(id: &ProfileId) -> DomainError {
    DomainError::not_found(format!("profile {id} not found"))
}

fn duplicate_name(name: &str) -> DomainError {
    DomainError::conflict(format!("a profile named '{name}' already exists"))
}
