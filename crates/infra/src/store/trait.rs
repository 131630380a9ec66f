use rosterdesk_auth::{NewProfile, NewUser, Profile, ProfilePatch, Role, User, UserPatch};
use rosterdesk_core::{ProfileId, UserId};

/// Keyed collection of users and profiles.
///
/// Pure storage: no business validation happens here (uniqueness, reference
/// checks and the administrator invariant live in the services). Reads return
/// owned snapshots; collection reads preserve insertion order.
pub trait EntityStore: Send + Sync {
    // ── users ───────────────────────────────────────────────────────────────

    fn all_users(&self) -> Vec<User>;
    fn find_user_by_id(&self, id: &UserId) -> Option<User>;
    /// Case-insensitive lookup.
    fn find_user_by_email(&self, email: &str) -> Option<User>;
    fn find_users_by_profile(&self, profile_id: &ProfileId) -> Vec<User>;
    /// Case-insensitive substring match over names and email.
    fn search_users(&self, term: &str) -> Vec<User>;
    /// Allocate an id and insert. New users are active.
    fn create_user(&mut self, input: NewUser) -> User;
    /// Returns `None` if the user does not exist.
    fn update_user(&mut self, id: &UserId, patch: &UserPatch) -> Option<User>;
    /// Returns `false` if the user did not exist.
    fn delete_user(&mut self, id: &UserId) -> bool;
    fn user_exists(&self, id: &UserId) -> bool;
    /// Case-insensitive; `exclude` skips one user (the one being updated).
    fn email_exists(&self, email: &str, exclude: Option<&UserId>) -> bool;

    // ── profiles ────────────────────────────────────────────────────────────

    fn all_profiles(&self) -> Vec<Profile>;
    fn find_profile_by_id(&self, id: &ProfileId) -> Option<Profile>;
    /// Case-insensitive lookup.
    fn find_profile_by_name(&self, name: &str) -> Option<Profile>;
    fn create_profile(&mut self, input: NewProfile) -> Profile;
    fn update_profile(&mut self, id: &ProfileId, patch: &ProfilePatch) -> Option<Profile>;
    fn delete_profile(&mut self, id: &ProfileId) -> bool;
    fn profile_exists(&self, id: &ProfileId) -> bool;
    /// Case-insensitive; `exclude` skips one profile (the one being renamed).
    fn name_exists(&self, name: &str, exclude: Option<&ProfileId>) -> bool;

    /// Role of the profile a user points at (`None` for unknown names or dangling ids).
    fn role_of(&self, profile_id: &ProfileId) -> Option<Role> {
        self.find_profile_by_id(profile_id).and_then(|p| p.role())
    }
}
