/// Comment handlers
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

/// Comments on a post, newest first
pub async fn list_comments_by_post(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comments = service.list_by_post(&user, *post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Get a comment by ID
pub async fn get_comment(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comment = service.get_comment(&user, *comment_id).await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Create a comment on a post
pub async fn create_comment(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new((**pool).clone());
    let comment = service.create_comment(&user, *post_id, &req.content).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Edit a comment
pub async fn update_comment(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    comment_id: web::Path<Uuid>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new((**pool).clone());
    service
        .update_comment(&user, *comment_id, &req.content)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Delete a comment
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    service.delete_comment(&user, *comment_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
