/// Category service - shared reference data, reads scoped through owned posts
use crate::db::category_repo;
use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::models::Category;
use crate::services::deny_error;
use access_control::{authorize, list_scope, Action, Decision, Ownership, Resource};
use sqlx::PgPool;
use uuid::Uuid;

pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn gate(&self, caller: &AuthenticatedUser, action: Action) -> Result<()> {
        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            action,
            Resource::Category,
            Ownership::Shared,
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Category, "category"));
        }
        Ok(())
    }

    pub async fn create_category(
        &self,
        caller: &AuthenticatedUser,
        name: &str,
    ) -> Result<Category> {
        self.gate(caller, Action::Create)?;
        Ok(category_repo::insert_category(&self.pool, name).await?)
    }

    /// Get a category; non-elevated callers only see categories holding
    /// at least one of their own posts
    pub async fn get_category(
        &self,
        caller: &AuthenticatedUser,
        category_id: Uuid,
    ) -> Result<Category> {
        self.gate(caller, Action::Read)?;

        let scope = list_scope(&caller.roles, Resource::Category, caller.id);
        category_repo::find_category(&self.pool, category_id, scope)
            .await?
            .ok_or_else(|| AppError::NotFound("category not found".to_string()))
    }

    pub async fn list_categories(&self, caller: &AuthenticatedUser) -> Result<Vec<Category>> {
        self.gate(caller, Action::List)?;

        let scope = list_scope(&caller.roles, Resource::Category, caller.id);
        Ok(category_repo::list_categories(&self.pool, scope).await?)
    }

    /// Delete a category the caller can see
    pub async fn delete_category(&self, caller: &AuthenticatedUser, category_id: Uuid) -> Result<()> {
        self.gate(caller, Action::Delete)?;

        // The scoped lookup hides rows outside the caller's reach; a
        // category invisible to the caller deletes as "not found".
        let scope = list_scope(&caller.roles, Resource::Category, caller.id);
        category_repo::find_category(&self.pool, category_id, scope)
            .await?
            .ok_or_else(|| AppError::NotFound("category not found".to_string()))?;

        category_repo::delete_category(&self.pool, category_id).await?;
        Ok(())
    }
}
