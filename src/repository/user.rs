use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::{Database, Tables};
use crate::error::StoreError;
use crate::models::user::{NewUser, UserChanges};
use crate::models::{Page, PaginationParams, User};

impl Database {
    pub async fn get_user(&self, id: Uuid) -> Option<User> {
        self.tables.read().await.users.get(&id).cloned()
    }

    /// Case-sensitive exact match, like the unique index it stands in for.
    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.tables
            .read()
            .await
            .users
            .values()
            .find(|user| user.email == email)
            .cloned()
    }

    /// Users ordered by last name, then first name.
    pub async fn list_users(&self, params: PaginationParams) -> Page<User> {
        let mut rows: Vec<User> = self.tables.read().await.users.values().cloned().collect();
        rows.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
                .then(a.id.cmp(&b.id))
        });
        Page::paginate(rows, params)
    }

    /// Fails when another user already owns the email. The check and the
    /// insert happen under one write lock.
    pub async fn create_user(&self, input: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        tables.ensure_email_free(&input.email, None)?;

        let user = User {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            date_created: Some(input.date_created.unwrap_or_else(Utc::now)),
            organization_id: input.organization_id,
        };

        tables.users.insert(user.id, user.clone());

        info!(id = %user.id, email = %user.email, "User created");
        Ok(user)
    }

    /// `Ok(None)` when the user does not exist.
    pub async fn update_user(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        if let Some(email) = changes.email.as_deref() {
            tables.ensure_email_free(email, Some(id))?;
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        user.apply(changes);

        info!(id = %id, "User updated");
        Ok(Some(user.clone()))
    }

    pub async fn delete_user(&self, id: Uuid) -> bool {
        let removed = self.tables.write().await.users.remove(&id).is_some();
        info!(id = %id, removed, "User deleted");
        removed
    }
}

impl Tables {
    fn ensure_email_free(&self, email: &str, owner: Option<Uuid>) -> Result<(), StoreError> {
        let taken = self
            .users
            .values()
            .any(|user| user.email == email && Some(user.id) != owner);
        if taken {
            return Err(StoreError::EmailTaken(email.to_string()));
        }
        Ok(())
    }
}
