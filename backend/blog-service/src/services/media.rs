/// Media service - attachment references for posts the caller owns
use crate::db::{media_repo, post_repo};
use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::models::{MediaAttachment, MediaKind};
use crate::services::deny_error;
use crate::storage::FileStore;
use access_control::{authorize, Action, Decision, Ownership, Resource};
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

pub struct MediaService {
    pool: PgPool,
    store: Arc<dyn FileStore>,
}

impl MediaService {
    pub fn new(pool: PgPool, store: Arc<dyn FileStore>) -> Self {
        Self { pool, store }
    }

    /// Attach an uploaded file to a post
    ///
    /// Size and type limits are enforced at the HTTP boundary before this
    /// is called; byte storage goes to the file-store collaborator and
    /// only the returned reference URL is persisted.
    pub async fn attach_media(
        &self,
        caller: &AuthenticatedUser,
        post_id: Uuid,
        original_name: &str,
        kind: MediaKind,
        bytes: Vec<u8>,
    ) -> Result<MediaAttachment> {
        let post = post_repo::find_post(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            Action::Create,
            Resource::Media,
            Ownership::Owned(post.author_id),
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Media, "post"));
        }

        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let file_name = format!("{}{}", Uuid::new_v4(), extension);

        let file_url = self
            .store
            .store(&file_name, &bytes)
            .await
            .map_err(|e| AppError::Internal(format!("file store failed: {e}")))?;

        Ok(media_repo::insert_media(&self.pool, post_id, &file_url, kind).await?)
    }
}
