use rosterdesk_auth::{NewProfile, NewUser, Profile, ProfilePatch, User, UserPatch};
use rosterdesk_core::{Entity, IdSequence, ProfileId, UserId};

use super::r#trait::EntityStore;

/// In-memory entity store.
///
/// Records live in insertion-ordered vectors; ids come from per-collection
/// monotonic sequences. Intended for tests/dev and the default deployment.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    users: Vec<User>,
    profiles: Vec<Profile>,
    user_ids: IdSequence,
    profile_ids: IdSequence,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn user_index(&self, id: &UserId) -> Option<usize> {
        position(&self.users, id)
    }

    fn profile_index(&self, id: &ProfileId) -> Option<usize> {
        position(&self.profiles, id)
    }
}

fn position<E: Entity>(items: &[E], id: &E::Id) -> Option<usize> {
    items.iter().position(|e| e.id() == id)
}

impl EntityStore for InMemoryEntityStore {
    fn all_users(&self) -> Vec<User> {
        self.users.clone()
    }

    fn find_user_by_id(&self, id: &UserId) -> Option<User> {
        self.users.iter().find(|u| &u.id == id).cloned()
    }

    fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users.iter().find(|u| u.email.matches(email)).cloned()
    }

    fn find_users_by_profile(&self, profile_id: &ProfileId) -> Vec<User> {
        self.users
            .iter()
            .filter(|u| &u.profile_id == profile_id)
            .cloned()
            .collect()
    }

    fn search_users(&self, term: &str) -> Vec<User> {
        self.users
            .iter()
            .filter(|u| u.matches_search(term))
            .cloned()
            .collect()
    }

    fn create_user(&mut self, input: NewUser) -> User {
        let id = UserId::from_sequence(self.user_ids.next_value());
        let user = input.into_user(id);
        self.users.push(user.clone());
        user
    }

    fn update_user(&mut self, id: &UserId, patch: &UserPatch) -> Option<User> {
        let idx = self.user_index(id)?;
        let user = &mut self.users[idx];
        patch.apply_to(user);
        Some(user.clone())
    }

    fn delete_user(&mut self, id: &UserId) -> bool {
        match self.user_index(id) {
            Some(idx) => {
                self.users.remove(idx);
                true
            }
            None => false,
        }
    }

    fn user_exists(&self, id: &UserId) -> bool {
        self.user_index(id).is_some()
    }

    fn email_exists(&self, email: &str, exclude: Option<&UserId>) -> bool {
        self.users
            .iter()
            .any(|u| u.email.matches(email) && Some(&u.id) != exclude)
    }

    fn all_profiles(&self) -> Vec<Profile> {
        self.profiles.clone()
    }

    fn find_profile_by_id(&self, id: &ProfileId) -> Option<Profile> {
        self.profiles.iter().find(|p| &p.id == id).cloned()
    }

    fn find_profile_by_name(&self, name: &str) -> Option<Profile> {
        let needle = name.to_lowercase();
        self.profiles
            .iter()
            .find(|p| p.name.to_lowercase() == needle)
            .cloned()
    }

    fn create_profile(&mut self, input: NewProfile) -> Profile {
        let id = ProfileId::from_sequence(self.profile_ids.next_value());
        let profile = Profile::new(id, input.name);
        self.profiles.push(profile.clone());
        profile
    }

    fn update_profile(&mut self, id: &ProfileId, patch: &ProfilePatch) -> Option<Profile> {
        let idx = self.profile_index(id)?;
        let profile = &mut self.profiles[idx];
        patch.apply_to(profile);
        Some(profile.clone())
    }

    fn delete_profile(&mut self, id: &ProfileId) -> bool {
        match self.profile_index(id) {
            Some(idx) => {
                self.profiles.remove(idx);
                true
            }
            None => false,
        }
    }

    fn profile_exists(&self, id: &ProfileId) -> bool {
        self.profile_index(id).is_some()
    }

    fn name_exists(&self, name: &str, exclude: Option<&ProfileId>) -> bool {
        let needle = name.to_lowercase();
        self.profiles
            .iter()
            .any(|p| p.name.to_lowercase() == needle && Some(&p.id) != exclude)
    }
}
