//! User query engine: filter → paginate → (optional) sort.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use rosterdesk_auth::{Profile, User};
use rosterdesk_core::{DomainError, ProfileId};

use crate::store::EntityStore;

// ─────────────────────────────────────────────────────────────────────────────
// Filtering
// ─────────────────────────────────────────────────────────────────────────────

/// Composable list filters. Blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilters {
    pub profile_id: Option<ProfileId>,
    pub search: Option<String>,
}

impl UserFilters {
    /// The profile id is trimmed; the search term is kept verbatim, so padding
    /// is part of the substring being matched.
    pub fn new(profile_id: Option<&str>, search: Option<&str>) -> Self {
        let is_blank = |s: &&str| s.trim().is_empty();
        Self {
            profile_id: profile_id
                .filter(|s| !is_blank(s))
                .map(|s| ProfileId::new(s.trim())),
            search: search.filter(|s| !is_blank(s)).map(str::to_owned),
        }
    }
}

/// Apply filters against the store, preserving insertion order.
pub fn filter_users<S: EntityStore + ?Sized>(store: &S, filters: &UserFilters) -> Vec<User> {
    match (&filters.profile_id, &filters.search) {
        (Some(profile_id), Some(term)) => store
            .find_users_by_profile(profile_id)
            .into_iter()
            .filter(|u| u.matches_search(term))
            .collect(),
        (Some(profile_id), None) => store.find_users_by_profile(profile_id),
        (None, Some(term)) => store.search_users(term),
        (None, None) => store.all_users(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pagination
// ─────────────────────────────────────────────────────────────────────────────

/// Raw pagination request. Values are normalized when applied, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub const MAX_LIMIT: u64 = 100;

    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// `page` floored to 1, `limit` clamped to `[1, MAX_LIMIT]`.
    pub fn normalized(self) -> (u64, u64) {
        let page = self.page.max(1) as u64;
        let limit = self.limit.clamp(1, Self::MAX_LIMIT as i64) as u64;
        (page, limit)
    }
}

/// Paginated envelope. Field names are part of the public wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

pub fn paginate<T>(items: Vec<T>, pagination: Pagination) -> Page<T> {
    let (page, limit) = pagination.normalized();
    let total = items.len();
    let start = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let data: Vec<T> = items.into_iter().skip(start).take(limit as usize).collect();

    Page {
        data,
        total,
        page,
        limit,
        total_pages: (total as u64).div_ceil(limit),
    }
}

/// Listing result: a plain sequence unless pagination was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserList {
    Unpaged(Vec<User>),
    Paged(Page<User>),
}

impl UserList {
    pub fn rows(&self) -> &[User] {
        match self {
            UserList::Unpaged(rows) => rows,
            UserList::Paged(page) => &page.data,
        }
    }

    pub fn rows_mut(&mut self) -> &mut Vec<User> {
        match self {
            UserList::Unpaged(rows) => rows,
            UserList::Paged(page) => &mut page.data,
        }
    }
}

/// Filter, then paginate when both page and limit are supplied.
pub fn list_users<S: EntityStore + ?Sized>(
    store: &S,
    filters: &UserFilters,
    pagination: Option<Pagination>,
) -> UserList {
    let users = filter_users(store, filters);
    match pagination {
        Some(p) => UserList::Paged(paginate(users, p)),
        None => UserList::Unpaged(users),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sorting
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Email,
    Profile,
    Status,
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "email" => Ok(SortField::Email),
            "profile" => Ok(SortField::Profile),
            "status" => Ok(SortField::Status),
            other => Err(DomainError::validation(format!(
                "sort field must be one of: name, email, profile, status (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(DomainError::validation(format!(
                "sort order must be 'asc' or 'desc' (got '{other}')"
            ))),
        }
    }
}

/// Column-header sort state: re-selecting the active field flips direction,
/// selecting a new field starts ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn select(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = self.direction.toggled();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }
}

/// Stable in-place sort. Users whose profile is unknown sort with an empty
/// profile name; `status` orders inactive (0) before active (1) when ascending.
pub fn sort_users(
    users: &mut [User],
    profiles: &[Profile],
    field: SortField,
    direction: SortDirection,
) {
    let names: HashMap<&ProfileId, String> = profiles
        .iter()
        .map(|p| (&p.id, p.name.to_lowercase()))
        .collect();
    let profile_name = |u: &User| names.get(&u.profile_id).cloned().unwrap_or_default();

    let compare = |a: &User, b: &User| -> Ordering {
        match field {
            SortField::Name => a.full_name().to_lowercase().cmp(&b.full_name().to_lowercase()),
            SortField::Email => a.email.normalized().cmp(&b.email.normalized()),
            SortField::Profile => profile_name(a).cmp(&profile_name(b)),
            SortField::Status => u8::from(a.is_active).cmp(&u8::from(b.is_active)),
        }
    };

    users.sort_by(|a, b| match direction {
        SortDirection::Asc => compare(a, b),
        SortDirection::Desc => compare(b, a),
    });
}
