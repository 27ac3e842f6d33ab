/// Tag handlers
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::TagService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct TagRequest {
    #[validate(length(min = 1, max = 64, message = "name must be 1-64 characters"))]
    pub name: String,
}

/// Create a new tag
pub async fn create_tag(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    req: web::Json<TagRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = TagService::new((**pool).clone());
    let tag = service.create_tag(&user, &req.name).await?;

    Ok(HttpResponse::Created().json(tag))
}

/// List tags within the caller's scope
pub async fn list_tags(pool: web::Data<PgPool>, user: AuthenticatedUser) -> Result<HttpResponse> {
    let service = TagService::new((**pool).clone());
    let tags = service.list_tags(&user).await?;

    Ok(HttpResponse::Ok().json(tags))
}

/// Delete a tag
pub async fn delete_tag(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    tag_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = TagService::new((**pool).clone());
    service.delete_tag(&user, *tag_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
