use crate::models::Tag;
use access_control::Scope;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a new tag
pub async fn insert_tag(pool: &PgPool, name: &str) -> Result<Tag, sqlx::Error> {
    let tag = sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO tags (name)
        VALUES ($1)
        RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(tag)
}

/// Find a tag visible within the caller's scope
pub async fn find_tag(pool: &PgPool, tag_id: Uuid, scope: Scope) -> Result<Option<Tag>, sqlx::Error> {
    let tag = match scope {
        Scope::All => {
            sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE id = $1")
                .bind(tag_id)
                .fetch_optional(pool)
                .await?
        }
        Scope::Owner(owner) => {
            sqlx::query_as::<_, Tag>(
                r#"
                SELECT t.id, t.name
                FROM tags t
                WHERE t.id = $1
                  AND EXISTS (
                      SELECT 1 FROM post_tags pt
                      JOIN posts p ON p.id = pt.post_id
                      WHERE pt.tag_id = t.id AND p.author_id = $2
                  )
                "#,
            )
            .bind(tag_id)
            .bind(owner)
            .fetch_optional(pool)
            .await?
        }
    };

    Ok(tag)
}

/// List tags visible within the caller's scope
pub async fn list_tags(pool: &PgPool, scope: Scope) -> Result<Vec<Tag>, sqlx::Error> {
    let tags = match scope {
        Scope::All => {
            sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name")
                .fetch_all(pool)
                .await?
        }
        Scope::Owner(owner) => {
            sqlx::query_as::<_, Tag>(
                r#"
                SELECT t.id, t.name
                FROM tags t
                WHERE EXISTS (
                    SELECT 1 FROM post_tags pt
                    JOIN posts p ON p.id = pt.post_id
                    WHERE pt.tag_id = t.id AND p.author_id = $1
                )
                ORDER BY t.name
                "#,
            )
            .bind(owner)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(tags)
}

/// Which of the given tag IDs actually exist
pub async fn find_existing_ids(pool: &PgPool, tag_ids: &[Uuid]) -> Result<Vec<Uuid>, sqlx::Error> {
    if tag_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM tags WHERE id = ANY($1)")
        .bind(tag_ids)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Delete a tag
pub async fn delete_tag(pool: &PgPool, tag_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tags WHERE id = $1")
        .bind(tag_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
