//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_created: Option<DateTime<Utc>>,
    pub organization_id: Uuid,
}

/// Validated input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Defaults to the creation time when absent
    pub date_created: Option<DateTime<Utc>>,
    pub organization_id: Uuid,
}

/// Validated partial update. `Some(None)` clears `date_created`.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub date_created: Option<Option<DateTime<Utc>>>,
    pub organization_id: Option<Uuid>,
}

impl User {
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(date_created) = changes.date_created {
            self.date_created = date_created;
        }
        if let Some(organization_id) = changes.organization_id {
            self.organization_id = organization_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let user = User {
            id: Uuid::nil(),
            first_name: "Alex".to_string(),
            last_name: "Smith".to_string(),
            email: "alex@example.com".to_string(),
            date_created: None,
            organization_id: Uuid::nil(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstName"], "Alex");
        assert_eq!(json["lastName"], "Smith");
        assert_eq!(json["organizationId"], Uuid::nil().to_string());
        assert!(json["dateCreated"].is_null());
    }
}
