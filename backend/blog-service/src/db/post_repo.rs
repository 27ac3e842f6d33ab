use crate::models::{Post, PostStatus, Tag};
use access_control::Scope;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

/// Optional list filters, applied after ownership scoping
#[derive(Debug, Default, Clone)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub category_id: Option<Uuid>,
    pub tag_id: Option<Uuid>,
    pub search: Option<String>,
}

const POST_COLUMNS: &str =
    "id, title, content, status, author_id, category_id, created_at, published_at";

/// Find a post by ID
pub async fn find_post(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, content, status, author_id, category_id, created_at, published_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List posts within the caller's scope, with optional filters
///
/// The ownership scope is pushed into the WHERE clause ahead of every
/// user-supplied filter; rows outside the scope never leave the database.
pub async fn list_posts(
    pool: &PgPool,
    scope: Scope,
    filter: &PostFilter,
) -> Result<Vec<Post>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE 1=1"
    ));

    if let Scope::Owner(owner) = scope {
        qb.push(" AND author_id = ");
        qb.push_bind(owner);
    }

    if let Some(status) = filter.status {
        qb.push(" AND status = ");
        qb.push_bind(status);
    }

    if let Some(category_id) = filter.category_id {
        qb.push(" AND category_id = ");
        qb.push_bind(category_id);
    }

    if let Some(tag_id) = filter.tag_id {
        qb.push(" AND EXISTS (SELECT 1 FROM post_tags pt WHERE pt.post_id = posts.id AND pt.tag_id = ");
        qb.push_bind(tag_id);
        qb.push(")");
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR content ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }

    qb.push(" ORDER BY created_at DESC");

    qb.build_query_as::<Post>().fetch_all(pool).await
}

/// Insert a new post row
#[allow(clippy::too_many_arguments)]
pub async fn insert_post(
    tx: &mut Transaction<'_, Postgres>,
    title: &str,
    content: &str,
    status: PostStatus,
    author_id: Uuid,
    category_id: Uuid,
    published_at: Option<DateTime<Utc>>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, content, status, author_id, category_id, published_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, content, status, author_id, category_id, created_at, published_at
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(status)
    .bind(author_id)
    .bind(category_id)
    .bind(published_at)
    .fetch_one(&mut **tx)
    .await?;

    Ok(post)
}

/// Update a post row
#[allow(clippy::too_many_arguments)]
pub async fn update_post(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Uuid,
    title: &str,
    content: &str,
    status: PostStatus,
    category_id: Uuid,
    published_at: Option<DateTime<Utc>>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET title = $1, content = $2, status = $3, category_id = $4, published_at = $5
        WHERE id = $6
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(status)
    .bind(category_id)
    .bind(published_at)
    .bind(post_id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Replace a post's tag associations inside the caller's transaction
///
/// Delete-then-reinsert; committing or rolling back with the rest of the
/// update keeps the tag set all-or-nothing.
pub async fn replace_tags(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Uuid,
    tag_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut **tx)
        .await?;

    for tag_id in tag_ids {
        sqlx::query(
            r#"
            INSERT INTO post_tags (post_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(tag_id)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Delete a post; associations cascade in the schema
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Tags attached to a post
pub async fn tags_for_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<Tag>, sqlx::Error> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name
        FROM tags t
        JOIN post_tags pt ON pt.tag_id = t.id
        WHERE pt.post_id = $1
        ORDER BY t.name
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}
