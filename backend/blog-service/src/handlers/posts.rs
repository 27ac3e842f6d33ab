/// Post handlers - HTTP endpoints for post operations
use crate::db::post_repo::PostFilter;
use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::models::PostStatus;
use crate::services::{NewPost, PostService};
use crate::websocket::BroadcastHub;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct PostRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    /// `draft` or `published`
    pub status: String,
    pub category_id: Uuid,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

impl PostRequest {
    fn into_new_post(self) -> Result<NewPost> {
        let status = PostStatus::parse(&self.status).ok_or_else(|| {
            AppError::ValidationError(format!(
                "invalid status '{}'; expected 'draft' or 'published'",
                self.status
            ))
        })?;

        Ok(NewPost {
            title: self.title,
            content: self.content,
            status,
            category_id: self.category_id,
            tag_ids: self.tag_ids,
        })
    }
}

/// List query parameters; applied after ownership scoping
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub status: Option<String>,
    pub category_id: Option<Uuid>,
    pub tag_id: Option<Uuid>,
    pub search: Option<String>,
}

/// Create a new post
pub async fn create_post(
    pool: web::Data<PgPool>,
    hub: web::Data<BroadcastHub>,
    user: AuthenticatedUser,
    req: web::Json<PostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone(), hub.get_ref().clone());
    let post = service
        .create_post(&user, req.into_inner().into_new_post()?)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a post by ID, with its tags, comments, media, and like count
pub async fn get_post(
    pool: web::Data<PgPool>,
    hub: web::Data<BroadcastHub>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone(), hub.get_ref().clone());
    let detail = service.get_post(&user, *post_id).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// List posts within the caller's scope
pub async fn list_posts(
    pool: web::Data<PgPool>,
    hub: web::Data<BroadcastHub>,
    user: AuthenticatedUser,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let status = match &query.status {
        Some(raw) => Some(PostStatus::parse(raw).ok_or_else(|| {
            AppError::ValidationError(format!("invalid status filter '{raw}'"))
        })?),
        None => None,
    };

    let filter = PostFilter {
        status,
        category_id: query.category_id,
        tag_id: query.tag_id,
        search: query.search.clone(),
    };

    let service = PostService::new((**pool).clone(), hub.get_ref().clone());
    let posts = service.list_posts(&user, &filter).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Update a post, replacing its tag set
pub async fn update_post(
    pool: web::Data<PgPool>,
    hub: web::Data<BroadcastHub>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
    req: web::Json<PostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone(), hub.get_ref().clone());
    service
        .update_post(&user, *post_id, req.into_inner().into_new_post()?)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Delete a post
pub async fn delete_post(
    pool: web::Data<PgPool>,
    hub: web::Data<BroadcastHub>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone(), hub.get_ref().clone());
    service.delete_post(&user, *post_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: &str) -> PostRequest {
        PostRequest {
            title: "Hello".into(),
            content: "World".into(),
            status: status.into(),
            category_id: Uuid::new_v4(),
            tag_ids: vec![],
        }
    }

    #[test]
    fn status_parses_case_insensitively() {
        let post = request("Published").into_new_post().unwrap();
        assert_eq!(post.status, PostStatus::Published);
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = request("archived").into_new_post().unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn blank_title_fails_validation() {
        let mut req = request("draft");
        req.title = String::new();
        assert!(req.validate().is_err());
    }
}
