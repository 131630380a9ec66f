use serde::{Deserialize, Serialize};

use rosterdesk_auth::{NewProfile, NewUser, PermissionSet, ProfilePatch, UserPatch};
use rosterdesk_core::{DomainError, DomainResult, ProfileId};
use rosterdesk_infra::query::{Pagination, SortDirection, SortField, UserFilters};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_id: String,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = DomainError;

    fn try_from(body: CreateUserRequest) -> DomainResult<Self> {
        let profile_id: ProfileId = body.profile_id.parse()?;
        NewUser::new(body.first_name, body.last_name, body.email, profile_id)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_id: Option<String>,
    pub is_active: Option<bool>,
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = DomainError;

    fn try_from(body: UpdateUserRequest) -> DomainResult<Self> {
        let profile_id = body
            .profile_id
            .as_deref()
            .map(str::parse::<ProfileId>)
            .transpose()?;
        UserPatch::new(
            body.first_name.as_deref(),
            body.last_name.as_deref(),
            body.email.as_deref(),
            profile_id,
            body.is_active,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub name: String,
}

impl TryFrom<CreateProfileRequest> for NewProfile {
    type Error = DomainError;

    fn try_from(body: CreateProfileRequest) -> DomainResult<Self> {
        NewProfile::new(body.name)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
}

impl TryFrom<UpdateProfileRequest> for ProfilePatch {
    type Error = DomainError;

    fn try_from(body: UpdateProfileRequest) -> DomainResult<Self> {
        ProfilePatch::new(body.name.as_deref())
    }
}

/// `GET /users` query string. Numbers arrive as text so malformed values map
/// to our own validation error instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub profile_id: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl ListUsersQuery {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 10;

    pub fn filters(&self) -> UserFilters {
        UserFilters::new(self.profile_id.as_deref(), self.search.as_deref())
    }

    /// Paged when either `page` or `limit` is given; the other one defaults.
    pub fn pagination(&self) -> DomainResult<Option<Pagination>> {
        let page = parse_number("page", self.page.as_deref())?;
        let limit = parse_number("limit", self.limit.as_deref())?;
        Ok(match (page, limit) {
            (None, None) => None,
            (page, limit) => Some(Pagination::new(
                page.unwrap_or(Self::DEFAULT_PAGE),
                limit.unwrap_or(Self::DEFAULT_LIMIT),
            )),
        })
    }

    /// `order` without `sortBy` is ignored.
    pub fn sort(&self) -> DomainResult<Option<(SortField, SortDirection)>> {
        let Some(field) = non_blank(self.sort_by.as_deref()) else {
            return Ok(None);
        };
        let direction = match non_blank(self.order.as_deref()) {
            Some(order) => order.parse()?,
            None => SortDirection::default(),
        };
        Ok(Some((field.parse()?, direction)))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(name: &str, raw: Option<&str>) -> DomainResult<Option<i64>> {
    non_blank(raw)
        .map(|v| {
            v.parse::<i64>().map_err(|_| {
                DomainError::validation(format!("{name} must be an integer (got '{v}')"))
            })
        })
        .transpose()
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct PermissionsResponse {
    pub profile: String,
    pub permissions: PermissionSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> ListUsersQuery {
        ListUsersQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
            ..ListUsersQuery::default()
        }
    }

    #[test]
    fn pagination_defaults_the_missing_half() {
        assert_eq!(query(None, None).pagination().unwrap(), None);
        assert_eq!(
            query(Some("3"), None).pagination().unwrap(),
            Some(Pagination::new(3, 10))
        );
        assert_eq!(
            query(None, Some("5")).pagination().unwrap(),
            Some(Pagination::new(1, 5))
        );
        assert!(matches!(
            query(Some("two"), None).pagination(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn sort_needs_a_field() {
        let mut q = ListUsersQuery {
            order: Some("desc".into()),
            ..ListUsersQuery::default()
        };
        assert_eq!(q.sort().unwrap(), None);

        q.sort_by = Some("email".into());
        assert_eq!(q.sort().unwrap(), Some((SortField::Email, SortDirection::Desc)));

        q.order = Some("sideways".into());
        assert!(q.sort().is_err());
    }

    #[test]
    fn update_request_maps_to_patch() {
        let raw = serde_json::json!({ "isActive": false, "profileId": "profile-2" });
        let body: UpdateUserRequest = serde_json::from_value(raw).unwrap();
        let patch = UserPatch::try_from(body).unwrap();
        assert_eq!(patch.is_active, Some(false));
        assert_eq!(patch.profile_id, Some(ProfileId::new("profile-2")));
        assert!(patch.first_name.is_none());
    }
}
