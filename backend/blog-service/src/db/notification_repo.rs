use crate::models::Notification;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Persist a notification for a recipient, inside the caller's transaction
pub async fn insert_notification(
    tx: &mut Transaction<'_, Postgres>,
    recipient_id: Uuid,
    message: &str,
) -> Result<Notification, sqlx::Error> {
    let notification = sqlx::query_as::<_, Notification>(
        r#"
        INSERT INTO notifications (recipient_id, message)
        VALUES ($1, $2)
        RETURNING id, recipient_id, message, is_read, created_at
        "#,
    )
    .bind(recipient_id)
    .bind(message)
    .fetch_one(&mut **tx)
    .await?;

    Ok(notification)
}

/// A recipient's notifications, newest first
pub async fn list_by_recipient(
    pool: &PgPool,
    recipient_id: Uuid,
) -> Result<Vec<Notification>, sqlx::Error> {
    let notifications = sqlx::query_as::<_, Notification>(
        r#"
        SELECT id, recipient_id, message, is_read, created_at
        FROM notifications
        WHERE recipient_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(recipient_id)
    .fetch_all(pool)
    .await?;

    Ok(notifications)
}

/// Mark a notification read, only for its recipient
///
/// Idempotent: the flag is set unconditionally, so marking an
/// already-read notification affects the row again without error and
/// never flips it back.
pub async fn mark_read(
    pool: &PgPool,
    notification_id: Uuid,
    recipient_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE notifications
        SET is_read = TRUE
        WHERE id = $1 AND recipient_id = $2
        "#,
    )
    .bind(notification_id)
    .bind(recipient_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
