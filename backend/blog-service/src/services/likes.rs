/// Like service - one like per user per post, removable only by its owner
use crate::db::{like_repo, notification_repo, post_repo};
use crate::error::{is_unique_violation, AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::models::Like;
use crate::services::deny_error;
use access_control::{authorize, Action, Decision, Ownership, Resource};
use sqlx::PgPool;
use uuid::Uuid;

use crate::websocket::{BroadcastHub, BroadcastMessage};

pub struct LikeService {
    pool: PgPool,
    hub: BroadcastHub,
}

impl LikeService {
    pub fn new(pool: PgPool, hub: BroadcastHub) -> Self {
        Self { pool, hub }
    }

    /// Like a post
    ///
    /// The storage constraint arbitrates concurrent duplicates: of two
    /// racing likes from the same user exactly one row lands, the other
    /// request gets a conflict.
    pub async fn like_post(&self, caller: &AuthenticatedUser, post_id: Uuid) -> Result<Like> {
        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            Action::Create,
            Resource::Like,
            Ownership::Shared,
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Like, "like"));
        }

        let post = post_repo::find_post(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        // The like and the author's durable notification commit together
        let mut tx = self.pool.begin().await?;

        let like = match like_repo::insert_like(&mut tx, post_id, caller.id).await {
            Ok(like) => like,
            Err(err) if is_unique_violation(&err) => {
                return Err(AppError::Conflict(
                    "You have already liked this post".to_string(),
                ));
            }
            Err(err) => return Err(err.into()),
        };

        if post.author_id != caller.id {
            notification_repo::insert_notification(
                &mut tx,
                post.author_id,
                &format!("{} liked your post: {}", caller.username, post.title),
            )
            .await?;
        }

        tx.commit().await?;

        let hub = self.hub.clone();
        let message = format!("{} liked the post: {}", caller.username, post.title);
        tokio::spawn(async move {
            hub.broadcast(BroadcastMessage::event(message)).await;
        });

        Ok(like)
    }

    /// Remove the caller's own like
    pub async fn unlike_post(&self, caller: &AuthenticatedUser, post_id: Uuid) -> Result<()> {
        // No role bypasses like ownership; the delete below is keyed on
        // the caller's own identity.
        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            Action::Delete,
            Resource::Like,
            Ownership::Owned(caller.id),
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Like, "like"));
        }

        let removed = like_repo::delete_like(&self.pool, post_id, caller.id).await?;
        if !removed {
            return Err(AppError::NotFound(
                "You have not liked this post".to_string(),
            ));
        }

        Ok(())
    }
}
