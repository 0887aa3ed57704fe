//! User service

use uuid::Uuid;

use super::validation::Validator;
use crate::error::{ApiError, Result};
use crate::models::user::{NewUser, UserChanges};
use crate::models::{Page, PaginationParams, User, UserPayload};
use crate::repository::Database;

pub(crate) fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("User {id} not found"))
}

pub async fn list(db: &Database, params: PaginationParams) -> Page<User> {
    db.list_users(params).await
}

pub async fn get(db: &Database, id: &str) -> Result<User> {
    let uuid = Uuid::parse_str(id).map_err(|_| not_found(id))?;
    db.get_user(uuid).await.ok_or_else(|| not_found(id))
}

/// Checks that a referenced organization exists and that the email is free.
/// The repository repeats the email check when it writes.
async fn check_references(
    db: &Database,
    v: &mut Validator,
    organization_id: Option<Uuid>,
    email: Option<&str>,
    current: Option<Uuid>,
) {
    if let Some(org_id) = organization_id {
        if db.get_organization(org_id).await.is_none() {
            v.push("organizationId", format!("organization {org_id} does not exist"));
        }
    }
    if let Some(email) = email {
        if let Some(existing) = db.find_user_by_email(email).await {
            if Some(existing.id) != current {
                v.push("email", "already in use");
            }
        }
    }
}

pub async fn create(db: &Database, payload: UserPayload) -> Result<User> {
    let mut v = Validator::new();
    let first_name = v.required_text("firstName", payload.first_name.as_deref());
    let last_name = v.required_text("lastName", payload.last_name.as_deref());
    let email = v.non_empty("email", payload.email.as_deref());
    let date_created = payload
        .date_created
        .flatten()
        .and_then(|raw| v.past_date("dateCreated", &raw));
    let organization_id = v.required_id("organizationId", payload.organization_id.as_deref());
    check_references(db, &mut v, organization_id, email.as_deref(), None).await;
    v.finish()?;

    let (Some(first_name), Some(last_name), Some(email), Some(organization_id)) =
        (first_name, last_name, email, organization_id)
    else {
        return Err(ApiError::Internal("validated user fields missing".into()));
    };
    let user = db
        .create_user(NewUser {
            first_name,
            last_name,
            email,
            date_created,
            organization_id,
        })
        .await?;
    Ok(user)
}

pub async fn update(db: &Database, id: &str, payload: UserPayload) -> Result<User> {
    let uuid = Uuid::parse_str(id).ok();

    let mut v = Validator::new();
    let first_name = v.optional_text("firstName", payload.first_name.as_deref());
    let last_name = v.optional_text("lastName", payload.last_name.as_deref());
    let email = match payload.email.as_deref() {
        Some(raw) => v.non_empty("email", Some(raw)),
        None => None,
    };
    let date_created = payload
        .date_created
        .map(|value| value.and_then(|raw| v.past_date("dateCreated", &raw)));
    let organization_id = v.optional_id("organizationId", payload.organization_id.as_deref());
    check_references(db, &mut v, organization_id, email.as_deref(), uuid).await;
    v.finish()?;

    let uuid = uuid.ok_or_else(|| not_found(id))?;
    db.update_user(
        uuid,
        UserChanges {
            first_name,
            last_name,
            email,
            date_created,
            organization_id,
        },
    )
    .await?
    .ok_or_else(|| not_found(id))
}

pub async fn remove(db: &Database, id: &str) {
    if let Ok(uuid) = Uuid::parse_str(id) {
        db.delete_user(uuid).await;
    }
}
