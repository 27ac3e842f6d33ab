/// Tag service - shared reference data, reads scoped through owned posts
use crate::db::tag_repo;
use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::models::Tag;
use crate::services::deny_error;
use access_control::{authorize, list_scope, Action, Decision, Ownership, Resource};
use sqlx::PgPool;
use uuid::Uuid;

pub struct TagService {
    pool: PgPool,
}

impl TagService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn gate(&self, caller: &AuthenticatedUser, action: Action) -> Result<()> {
        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            action,
            Resource::Tag,
            Ownership::Shared,
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Tag, "tag"));
        }
        Ok(())
    }

    pub async fn create_tag(&self, caller: &AuthenticatedUser, name: &str) -> Result<Tag> {
        self.gate(caller, Action::Create)?;
        Ok(tag_repo::insert_tag(&self.pool, name).await?)
    }

    pub async fn list_tags(&self, caller: &AuthenticatedUser) -> Result<Vec<Tag>> {
        self.gate(caller, Action::List)?;

        let scope = list_scope(&caller.roles, Resource::Tag, caller.id);
        Ok(tag_repo::list_tags(&self.pool, scope).await?)
    }

    /// Delete a tag the caller can see
    pub async fn delete_tag(&self, caller: &AuthenticatedUser, tag_id: Uuid) -> Result<()> {
        self.gate(caller, Action::Delete)?;

        let scope = list_scope(&caller.roles, Resource::Tag, caller.id);
        tag_repo::find_tag(&self.pool, tag_id, scope)
            .await?
            .ok_or_else(|| AppError::NotFound("tag not found".to_string()))?;

        tag_repo::delete_tag(&self.pool, tag_id).await?;
        Ok(())
    }
}
