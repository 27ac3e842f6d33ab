/// Notification handlers
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::NotificationService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

/// The caller's notifications, newest first
pub async fn list_notifications(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let service = NotificationService::new((**pool).clone());
    let notifications = service.list_notifications(&user).await?;

    Ok(HttpResponse::Ok().json(notifications))
}

/// Mark a notification as read; idempotent
pub async fn mark_notification_read(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    notification_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = NotificationService::new((**pool).clone());
    service.mark_read(&user, *notification_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
