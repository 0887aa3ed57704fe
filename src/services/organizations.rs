//! Organization service

use uuid::Uuid;

use super::validation::Validator;
use crate::error::{ApiError, Result};
use crate::models::organization::{NewOrganization, OrganizationChanges};
use crate::models::{Organization, OrganizationPayload, Page, PaginationParams};
use crate::repository::Database;

pub(crate) fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Organization {id} not found"))
}

pub async fn list(db: &Database, params: PaginationParams) -> Page<Organization> {
    db.list_organizations(params).await
}

pub async fn get(db: &Database, id: &str) -> Result<Organization> {
    let uuid = Uuid::parse_str(id).map_err(|_| not_found(id))?;
    db.get_organization(uuid).await.ok_or_else(|| not_found(id))
}

pub async fn create(db: &Database, payload: OrganizationPayload) -> Result<Organization> {
    let mut v = Validator::new();
    let name = v.required_text("name", payload.name.as_deref());
    let industry = v.industry("industry", payload.industry.flatten().as_deref());
    let date_founded = payload
        .date_founded
        .flatten()
        .and_then(|raw| v.past_date("dateFounded", &raw));
    v.finish()?;

    let Some(name) = name else {
        return Err(ApiError::Internal("validated name missing".into()));
    };
    Ok(db
        .create_organization(NewOrganization {
            name,
            industry,
            date_founded,
        })
        .await)
}

pub async fn update(db: &Database, id: &str, payload: OrganizationPayload) -> Result<Organization> {
    let mut v = Validator::new();
    let name = v.optional_text("name", payload.name.as_deref());
    let industry = payload
        .industry
        .map(|value| v.industry("industry", value.as_deref()));
    let date_founded = payload
        .date_founded
        .map(|value| value.and_then(|raw| v.past_date("dateFounded", &raw)));
    v.finish()?;

    let uuid = Uuid::parse_str(id).map_err(|_| not_found(id))?;
    db.update_organization(
        uuid,
        OrganizationChanges {
            name,
            industry,
            date_founded,
        },
    )
    .await
    .ok_or_else(|| not_found(id))
}

/// Deleting a missing organization is not an error.
pub async fn remove(db: &Database, id: &str) {
    if let Ok(uuid) = Uuid::parse_str(id) {
        db.delete_organization(uuid).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>) -> OrganizationPayload {
        OrganizationPayload {
            name: name.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let db = Database::new();
        let org = create(&db, payload(Some("  Acme  "))).await.unwrap();
        assert_eq!(org.name, "Acme");
        assert_eq!(get(&db, &org.id.to_string()).await.unwrap(), org);
    }

    #[tokio::test]
    async fn test_create_reports_all_issues() {
        let db = Database::new();
        let err = create(
            &db,
            OrganizationPayload {
                name: None,
                industry: None,
                date_founded: Some(Some("2999-01-01".into())),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "name: value is required; dateFounded: date must be in the past"
        );
    }

    #[tokio::test]
    async fn test_get_unknown_and_malformed_ids() {
        let db = Database::new();
        let missing = Uuid::new_v4().to_string();
        assert_eq!(
            get(&db, &missing).await.unwrap_err().to_string(),
            format!("Organization {missing} not found")
        );
        assert!(matches!(get(&db, "abc").await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_clears_industry() {
        let db = Database::new();
        let org = create(
            &db,
            OrganizationPayload {
                name: Some("Acme".into()),
                industry: Some(Some("IT".into())),
                date_founded: None,
            },
        )
        .await
        .unwrap();

        let updated = update(
            &db,
            &org.id.to_string(),
            OrganizationPayload {
                industry: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.industry, None);
        assert_eq!(updated.name, "Acme");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = Database::new();
        let err = update(&db, &Uuid::new_v4().to_string(), payload(Some("X")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
