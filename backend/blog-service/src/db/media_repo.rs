use crate::models::{MediaAttachment, MediaKind};
use sqlx::PgPool;
use uuid::Uuid;

/// Persist a media attachment reference
pub async fn insert_media(
    pool: &PgPool,
    post_id: Uuid,
    file_url: &str,
    kind: MediaKind,
) -> Result<MediaAttachment, sqlx::Error> {
    let media = sqlx::query_as::<_, MediaAttachment>(
        r#"
        INSERT INTO media_attachments (post_id, file_url, kind)
        VALUES ($1, $2, $3)
        RETURNING id, post_id, file_url, kind, created_at
        "#,
    )
    .bind(post_id)
    .bind(file_url)
    .bind(kind)
    .fetch_one(pool)
    .await?;

    Ok(media)
}

/// Attachments on a post
pub async fn list_by_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<MediaAttachment>, sqlx::Error> {
    let media = sqlx::query_as::<_, MediaAttachment>(
        r#"
        SELECT id, post_id, file_url, kind, created_at
        FROM media_attachments
        WHERE post_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(media)
}
