use tracing::info;
use uuid::Uuid;

use super::Database;
use crate::models::organization::{NewOrganization, OrganizationChanges};
use crate::models::{Organization, Page, PaginationParams};

impl Database {
    pub async fn get_organization(&self, id: Uuid) -> Option<Organization> {
        self.tables.read().await.organizations.get(&id).cloned()
    }

    /// Organizations ordered by name.
    pub async fn list_organizations(&self, params: PaginationParams) -> Page<Organization> {
        let mut rows: Vec<Organization> = self
            .tables
            .read()
            .await
            .organizations
            .values()
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Page::paginate(rows, params)
    }

    pub async fn create_organization(&self, input: NewOrganization) -> Organization {
        let organization = Organization {
            id: Uuid::new_v4(),
            name: input.name,
            industry: input.industry,
            date_founded: input.date_founded,
        };

        self.tables
            .write()
            .await
            .organizations
            .insert(organization.id, organization.clone());

        info!(id = %organization.id, name = %organization.name, "Organization created");
        organization
    }

    pub async fn update_organization(
        &self,
        id: Uuid,
        changes: OrganizationChanges,
    ) -> Option<Organization> {
        let mut tables = self.tables.write().await;
        let organization = tables.organizations.get_mut(&id)?;
        organization.apply(changes);

        info!(id = %id, "Organization updated");
        Some(organization.clone())
    }

    /// Returns whether a row was removed.
    pub async fn delete_organization(&self, id: Uuid) -> bool {
        let removed = self.tables.write().await.organizations.remove(&id).is_some();
        info!(id = %id, removed, "Organization deleted");
        removed
    }
}
