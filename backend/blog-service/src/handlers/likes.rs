/// Like handlers
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::LikeService;
use crate::websocket::BroadcastHub;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

/// Like a post
pub async fn like_post(
    pool: web::Data<PgPool>,
    hub: web::Data<BroadcastHub>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone(), hub.get_ref().clone());
    let like = service.like_post(&user, *post_id).await?;

    Ok(HttpResponse::Created().json(like))
}

/// Remove the caller's like from a post
pub async fn unlike_post(
    pool: web::Data<PgPool>,
    hub: web::Data<BroadcastHub>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone(), hub.get_ref().clone());
    service.unlike_post(&user, *post_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
