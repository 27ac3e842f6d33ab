/// Category handlers
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::CategoryService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 128, message = "name must be 1-128 characters"))]
    pub name: String,
}

/// Create a new category
pub async fn create_category(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    req: web::Json<CategoryRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CategoryService::new((**pool).clone());
    let category = service.create_category(&user, &req.name).await?;

    Ok(HttpResponse::Created().json(category))
}

/// Get a category by ID
pub async fn get_category(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    category_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CategoryService::new((**pool).clone());
    let category = service.get_category(&user, *category_id).await?;

    Ok(HttpResponse::Ok().json(category))
}

/// List categories within the caller's scope
pub async fn list_categories(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let service = CategoryService::new((**pool).clone());
    let categories = service.list_categories(&user).await?;

    Ok(HttpResponse::Ok().json(categories))
}

/// Delete a category
pub async fn delete_category(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    category_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CategoryService::new((**pool).clone());
    service.delete_category(&user, *category_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
