/// Post service - ownership-aware post CRUD
use crate::db::{category_repo, comment_repo, like_repo, media_repo, post_repo, tag_repo};
use crate::db::post_repo::PostFilter;
use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::models::{Post, PostDetail, PostStatus};
use crate::services::deny_error;
use crate::websocket::{BroadcastHub, BroadcastMessage};
use access_control::{authorize, list_scope, Action, Decision, Ownership, Resource};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Input for creating or updating a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub category_id: Uuid,
    pub tag_ids: Vec<Uuid>,
}

pub struct PostService {
    pool: PgPool,
    hub: BroadcastHub,
}

impl PostService {
    pub fn new(pool: PgPool, hub: BroadcastHub) -> Self {
        Self { pool, hub }
    }

    /// Create a new post with its tag associations
    pub async fn create_post(&self, caller: &AuthenticatedUser, input: NewPost) -> Result<Post> {
        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            Action::Create,
            Resource::Post,
            Ownership::Shared,
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Post, "post"));
        }

        let tag_ids = self.validate_references(&input).await?;

        let published_at = match input.status {
            PostStatus::Published => Some(Utc::now()),
            PostStatus::Draft => None,
        };

        // Post row and tag associations commit together
        let mut tx = self.pool.begin().await?;
        let post = post_repo::insert_post(
            &mut tx,
            &input.title,
            &input.content,
            input.status,
            caller.id,
            input.category_id,
            published_at,
        )
        .await?;
        post_repo::replace_tags(&mut tx, post.id, &tag_ids).await?;
        tx.commit().await?;

        self.announce(format!(
            "{} added a new post: {}",
            caller.username, post.title
        ));

        Ok(post)
    }

    /// Get a post with its sub-resources
    pub async fn get_post(&self, caller: &AuthenticatedUser, post_id: Uuid) -> Result<PostDetail> {
        let post = post_repo::find_post(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            Action::Read,
            Resource::Post,
            Ownership::Owned(post.author_id),
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Post, "post"));
        }

        let tags = post_repo::tags_for_post(&self.pool, post_id).await?;
        let comments = comment_repo::list_by_post(&self.pool, post_id).await?;
        let media = media_repo::list_by_post(&self.pool, post_id).await?;
        let like_count = like_repo::count_by_post(&self.pool, post_id).await?;

        Ok(PostDetail {
            post,
            tags,
            comments,
            media,
            like_count,
        })
    }

    /// List posts the caller may see, with optional filters
    ///
    /// Filters apply after ownership scoping, never before.
    pub async fn list_posts(
        &self,
        caller: &AuthenticatedUser,
        filter: &PostFilter,
    ) -> Result<Vec<Post>> {
        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            Action::List,
            Resource::Post,
            Ownership::Shared,
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Post, "posts"));
        }

        let scope = list_scope(&caller.roles, Resource::Post, caller.id);
        Ok(post_repo::list_posts(&self.pool, scope, filter).await?)
    }

    /// Update a post, replacing its tag set atomically
    pub async fn update_post(
        &self,
        caller: &AuthenticatedUser,
        post_id: Uuid,
        input: NewPost,
    ) -> Result<()> {
        let post = post_repo::find_post(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            Action::Update,
            Resource::Post,
            Ownership::Owned(post.author_id),
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Post, "post"));
        }

        let tag_ids = self.validate_references(&input).await?;

        let published_at = match (post.published_at, input.status) {
            (Some(at), _) => Some(at),
            (None, PostStatus::Published) => Some(Utc::now()),
            (None, PostStatus::Draft) => None,
        };

        // Row update and tag replacement are all-or-nothing; a partial
        // tag-set write must never be observable.
        let mut tx = self.pool.begin().await?;
        post_repo::update_post(
            &mut tx,
            post_id,
            &input.title,
            &input.content,
            input.status,
            input.category_id,
            published_at,
        )
        .await?;
        post_repo::replace_tags(&mut tx, post_id, &tag_ids).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Delete a post; comments, likes, tags, and media cascade
    pub async fn delete_post(&self, caller: &AuthenticatedUser, post_id: Uuid) -> Result<()> {
        let post = post_repo::find_post(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            Action::Delete,
            Resource::Post,
            Ownership::Owned(post.author_id),
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Post, "post"));
        }

        post_repo::delete_post(&self.pool, post_id).await?;
        Ok(())
    }

    /// Referenced category and tags must exist; returns the deduplicated
    /// tag ids to attach
    async fn validate_references(&self, input: &NewPost) -> Result<Vec<Uuid>> {
        if !category_repo::category_exists(&self.pool, input.category_id).await? {
            return Err(AppError::Unprocessable(
                "referenced category does not exist".to_string(),
            ));
        }

        let mut tag_ids = input.tag_ids.clone();
        tag_ids.sort();
        tag_ids.dedup();

        let existing = tag_repo::find_existing_ids(&self.pool, &tag_ids).await?;
        if existing.len() != tag_ids.len() {
            return Err(AppError::Unprocessable(
                "one or more referenced tags do not exist".to_string(),
            ));
        }

        Ok(tag_ids)
    }

    /// Fire-and-forget broadcast; never blocks or fails the mutation
    fn announce(&self, message: String) {
        let hub = self.hub.clone();
        tokio::spawn(async move {
            hub.broadcast(BroadcastMessage::event(message)).await;
        });
    }
}
