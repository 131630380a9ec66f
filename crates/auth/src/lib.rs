//! `rosterdesk-auth`: pure authorization boundary.
//!
//! Holds the user/profile entities, the static permission catalog, the
//! row-level action gates and the administrator invariant guard.
//! This crate is intentionally decoupled from HTTP and storage.

pub mod authorize;
pub mod catalog;
pub mod guard;
pub mod permissions;
pub mod profile;
pub mod roles;
pub mod user;

pub use authorize::{
    authorize, authorize_row, can_delete_user, can_edit_user, can_toggle_status, user_actions,
    Actor, AuthzError, RowAction, UserActions,
};
pub use catalog::{has_permission, permissions_for, role_permissions};
pub use guard::{
    guard_admin_invariant, guard_delete_policy, guard_profile_rename, DeletePolicy, UserMutation,
};
pub use permissions::{Permission, PermissionSet};
pub use profile::{NewProfile, Profile, ProfilePatch};
pub use roles::Role;
pub use user::{NewUser, User, UserPatch};
