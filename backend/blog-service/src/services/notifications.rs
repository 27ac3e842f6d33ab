/// Notification service - durable per-recipient records
use crate::db::notification_repo;
use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::models::Notification;
use crate::services::deny_error;
use access_control::{authorize, Action, Decision, Ownership, Resource};
use sqlx::PgPool;
use uuid::Uuid;

pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The caller's notifications, newest first
    pub async fn list_notifications(&self, caller: &AuthenticatedUser) -> Result<Vec<Notification>> {
        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            Action::List,
            Resource::Notification,
            Ownership::Owned(caller.id),
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Notification, "notifications"));
        }

        Ok(notification_repo::list_by_recipient(&self.pool, caller.id).await?)
    }

    /// Mark a notification read
    ///
    /// Only the recipient's own rows are reachable; a second mark is a
    /// no-op success, and the flag never flips back.
    pub async fn mark_read(&self, caller: &AuthenticatedUser, notification_id: Uuid) -> Result<()> {
        if let Decision::Deny(reason) = authorize(
            &caller.roles,
            Action::Update,
            Resource::Notification,
            Ownership::Owned(caller.id),
            caller.id,
        ) {
            return Err(deny_error(reason, Resource::Notification, "notification"));
        }

        let updated = notification_repo::mark_read(&self.pool, notification_id, caller.id).await?;
        if !updated {
            return Err(AppError::NotFound(
                "notification not found".to_string(),
            ));
        }

        Ok(())
    }
}
