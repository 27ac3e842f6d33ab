use crate::models::Comment;
use sqlx::PgPool;
use uuid::Uuid;

/// Find a comment by ID
pub async fn find_comment(pool: &PgPool, comment_id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, author_id, content, created_at, updated_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Comments on a post, newest first
pub async fn list_by_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, author_id, content, created_at, updated_at
        FROM comments
        WHERE post_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Create a new comment
pub async fn insert_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, author_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, post_id, author_id, content, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Update comment content
pub async fn update_content(
    pool: &PgPool,
    comment_id: Uuid,
    content: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET content = $1, updated_at = NOW()
        WHERE id = $2
        "#,
    )
    .bind(content)
    .bind(comment_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a comment
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
