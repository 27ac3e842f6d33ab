use crate::models::Like;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

/// Create a new like on a post
///
/// The `UNIQUE (post_id, user_id)` constraint is the arbiter for
/// concurrent duplicates; the second of two racing inserts fails here
/// with a unique violation the caller surfaces as a conflict.
pub async fn insert_like(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<Like, sqlx::Error> {
    let like = sqlx::query_as::<_, Like>(
        r#"
        INSERT INTO likes (post_id, user_id)
        VALUES ($1, $2)
        RETURNING id, post_id, user_id, created_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(like)
}

/// Delete a user's like from a post
pub async fn delete_like(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM likes
        WHERE post_id = $1 AND user_id = $2
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Count total likes for a post
pub async fn count_by_post(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}
