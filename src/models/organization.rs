//! Organization entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant. Users and orders belong to exactly one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub industry: Option<String>,
    pub date_founded: Option<DateTime<Utc>>,
}

/// Validated input for creating an organization.
#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub name: String,
    pub industry: Option<String>,
    pub date_founded: Option<DateTime<Utc>>,
}

/// Validated partial update. `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default)]
pub struct OrganizationChanges {
    pub name: Option<String>,
    pub industry: Option<Option<String>>,
    pub date_founded: Option<Option<DateTime<Utc>>>,
}

impl Organization {
    pub fn apply(&mut self, changes: OrganizationChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(industry) = changes.industry {
            self.industry = industry;
        }
        if let Some(date_founded) = changes.date_founded {
            self.date_founded = date_founded;
        }
    }
}
