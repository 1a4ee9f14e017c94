//! # User Directory
//!
//! Types behind the admin user table: the user record, the add form, the
//! partial edit and the page that comes back from a listing.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path                         Used by                          │
//! │  ──────  ───────────────────────────  ───────────────────────────────  │
//! │  GET     /users?limit&skip&select     User table page, column sort     │
//! │  GET     /users/search?q=...          User table search box            │
//! │  POST    /users/add                   "Add User" form                  │
//! │  PUT     /users/{id}                  Edit dialog                      │
//! │  DELETE  /users/{id}                  Row delete button                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mock API does not persist writes; it echoes the resulting record.

use easyshop_core::validation::{validate_email, validate_required};
use easyshop_core::ValidationError;
use serde::{Deserialize, Serialize};

use crate::error::CatalogResult;
use crate::query::page_count;

/// Accepted age range on the user form.
pub const MIN_USER_AGE: u32 = 1;
pub const MAX_USER_AGE: u32 = 150;

// =============================================================================
// Records
// =============================================================================

/// One row of the user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    #[serde(default)]
    pub gender: String,
    /// As sent by the API, e.g. `1996-5-30`.
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub role: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The "Add User" form. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    pub gender: String,
    pub birth_date: String,
    pub role: String,
}

impl UserDraft {
    /// Checks the form the way the table's submit button does.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("firstName", &self.first_name)?;
        validate_required("lastName", &self.last_name)?;
        validate_email(&self.email)?;
        validate_age(self.age)?;
        validate_required("gender", &self.gender)?;
        validate_required("birthDate", &self.birth_date)?;
        validate_required("role", &self.role)?;
        Ok(())
    }

    /// The record this draft becomes once the directory assigns `id`.
    pub fn into_user(self, id: u64) -> User {
        User {
            id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            age: self.age,
            gender: self.gender.trim().to_string(),
            birth_date: self.birth_date.trim().to_string(),
            role: self.role.trim().to_string(),
        }
    }
}

/// A partial edit. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        *self == UserPatch::default()
    }

    /// Present fields follow the same rules as [`UserDraft::validate`];
    /// a patch that changes nothing is rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: "user".to_string(),
                reason: "no fields to update".to_string(),
            });
        }

        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("gender", &self.gender),
            ("birthDate", &self.birth_date),
            ("role", &self.role),
        ];
        for (field, value) in required {
            if let Some(value) = value {
                validate_required(field, value)?;
            }
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(age) = self.age {
            validate_age(age)?;
        }
        Ok(())
    }

    /// Writes the present fields onto `user`.
    pub fn apply(&self, user: &mut User) {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(value) = value {
                *target = value.trim().to_string();
            }
        }

        set(&mut user.first_name, &self.first_name);
        set(&mut user.last_name, &self.last_name);
        set(&mut user.email, &self.email);
        set(&mut user.gender, &self.gender);
        set(&mut user.birth_date, &self.birth_date);
        set(&mut user.role, &self.role);
        if let Some(age) = self.age {
            user.age = age;
        }
    }
}

fn validate_age(age: u32) -> Result<(), ValidationError> {
    if !(MIN_USER_AGE..=MAX_USER_AGE).contains(&age) {
        return Err(ValidationError::OutOfRange {
            field: "age".to_string(),
            min: i64::from(MIN_USER_AGE),
            max: i64::from(MAX_USER_AGE),
        });
    }
    Ok(())
}

// =============================================================================
// Pages
// =============================================================================

/// A page of the user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<User>,
    /// Matching users across all pages.
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl UserPage {
    pub fn total_pages(&self) -> u64 {
        page_count(self.total, self.limit)
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Listing/search response envelope for users.
#[derive(Debug, Clone, Deserialize)]
pub struct WireUserPage {
    pub users: Vec<User>,
    pub total: u64,
}

impl WireUserPage {
    pub fn into_page(self, page: u32, limit: u32) -> CatalogResult<UserPage> {
        Ok(UserPage {
            users: self.users,
            total: self.total,
            page: page.max(1),
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> UserDraft {
        UserDraft {
            first_name: "Emily".to_string(),
            last_name: "Johnson".to_string(),
            email: "emily.johnson@x.dummyjson.com".to_string(),
            age: 28,
            gender: "female".to_string(),
            birth_date: "1996-5-30".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn test_draft_requires_every_field() {
        assert!(draft().validate().is_ok());

        let err = UserDraft {
            role: "  ".to_string(),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "role".to_string() });

        let err = UserDraft { age: 0, ..draft() }.validate().unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));

        let err = UserDraft {
            email: "not-an-email".to_string(),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_patch_validation_and_apply() {
        assert!(UserPatch::default().validate().is_err());

        let patch = UserPatch {
            last_name: Some(" Smith ".to_string()),
            age: Some(29),
            ..UserPatch::default()
        };
        assert!(patch.validate().is_ok());

        let mut user = draft().into_user(7);
        patch.apply(&mut user);
        assert_eq!(user.full_name(), "Emily Smith");
        assert_eq!(user.age, 29);
        assert_eq!(user.email, "emily.johnson@x.dummyjson.com");

        let blank = UserPatch {
            first_name: Some(String::new()),
            ..UserPatch::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = UserPatch {
            role: Some("moderator".to_string()),
            ..UserPatch::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), serde_json::json!({"role": "moderator"}));
    }

    #[test]
    fn test_decode_user_page() {
        let json = r#"{
            "users": [
                {"id": 1, "firstName": "Emily", "lastName": "Johnson", "maidenName": "Smith",
                 "age": 28, "gender": "female", "email": "emily.johnson@x.dummyjson.com",
                 "birthDate": "1996-5-30", "role": "admin"},
                {"id": 2, "firstName": "Michael", "lastName": "Williams",
                 "age": 35, "email": "michael.williams@x.dummyjson.com"}
            ],
            "total": 208, "skip": 0, "limit": 2
        }"#;

        let wire: WireUserPage = serde_json::from_str(json).unwrap();
        let page = wire.into_page(1, 2).unwrap();

        assert_eq!(page.total, 208);
        assert_eq!(page.total_pages(), 104);
        assert!(page.has_next());
        assert_eq!(page.users[0].role, "admin");
        assert_eq!(page.users[1].role, "");
    }
}
