//! User record and the request shapes that produce or change it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored user. Serialized as-is in every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/users`. Fields are optional here so a missing field is
/// reported as a validation failure rather than a deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated, normalized create payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `PUT /api/users/:id`. Only `name` and `email` can change; other
/// keys are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl NewUser {
    /// Builds the record to insert, assigning id and timestamps.
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email,
            password: self.password,
            created_at: now,
            updated_at: now,
        }
    }
}

impl User {
    /// Merges a validated patch; omitted fields keep their stored value.
    pub fn apply(&mut self, patch: UserPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn stored() -> User {
        NewUser {
            name: "Ada".into(),
            email: "a@b.com".into(),
            password: "secret1".into(),
        }
        .into_user(Utc::now())
    }

    #[test]
    fn name_only_patch_keeps_email() {
        let mut user = stored();
        let later = user.created_at + Duration::seconds(5);
        user.apply(
            UserPatch {
                name: Some("Jane".into()),
                email: None,
            },
            later,
        );
        assert_eq!(user.name, "Jane");
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.updated_at, later);
        assert!(user.created_at < user.updated_at);
    }

    #[test]
    fn email_only_patch_keeps_name() {
        let mut user = stored();
        let id = user.id;
        user.apply(
            UserPatch {
                name: None,
                email: Some("new@b.com".into()),
            },
            Utc::now(),
        );
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "new@b.com");
        assert_eq!(user.id, id);
    }

    #[test]
    fn serializes_camel_case_timestamps() {
        let json = serde_json::to_value(stored()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["email"], "a@b.com");
    }

    #[test]
    fn patch_ignores_unknown_fields() {
        let patch: UserPatch =
            serde_json::from_value(serde_json::json!({"name": "Jane", "password": "x", "id": "y"})).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Jane"));
        assert!(patch.email.is_none());
    }
}
