/// Comment service - visible to every role, editable by author or elevated roles
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::models::Comment;
use crate::services::deny_error;
use access_control::{authorize, Action, Decision, Ownership, Resource};
use sqlx::PgPool;
use uuid::Uuid;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn gate(&self, caller: &AuthenticatedUser, action: Action) -> Result<()> {
        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            action,
            Resource::Comment,
            Ownership::Shared,
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Comment, "comment"));
        }
        Ok(())
    }

    /// Comments on a post, newest first
    pub async fn list_by_post(
        &self,
        caller: &AuthenticatedUser,
        post_id: Uuid,
    ) -> Result<Vec<Comment>> {
        self.gate(caller, Action::List)?;

        post_repo::find_post(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        Ok(comment_repo::list_by_post(&self.pool, post_id).await?)
    }

    pub async fn get_comment(&self, caller: &AuthenticatedUser, comment_id: Uuid) -> Result<Comment> {
        self.gate(caller, Action::Read)?;

        comment_repo::find_comment(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))
    }

    pub async fn create_comment(
        &self,
        caller: &AuthenticatedUser,
        post_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        self.gate(caller, Action::Create)?;

        post_repo::find_post(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        Ok(comment_repo::insert_comment(&self.pool, post_id, caller.id, content).await?)
    }

    /// Edit a comment: its author, or an admin/moderator
    pub async fn update_comment(
        &self,
        caller: &AuthenticatedUser,
        comment_id: Uuid,
        content: &str,
    ) -> Result<()> {
        let comment = comment_repo::find_comment(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            Action::Update,
            Resource::Comment,
            Ownership::Owned(comment.author_id),
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Comment, "comment"));
        }

        comment_repo::update_content(&self.pool, comment_id, content).await?;
        Ok(())
    }

    /// Delete a comment: its author, or an admin/moderator
    pub async fn delete_comment(&self, caller: &AuthenticatedUser, comment_id: Uuid) -> Result<()> {
        let comment = comment_repo::find_comment(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            Action::Delete,
            Resource::Comment,
            Ownership::Owned(comment.author_id),
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Comment, "comment"));
        }

        comment_repo::delete_comment(&self.pool, comment_id).await?;
        Ok(())
    }
}
