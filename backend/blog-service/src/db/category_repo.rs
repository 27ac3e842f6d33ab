use crate::models::Category;
use access_control::Scope;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a new category
pub async fn insert_category(pool: &PgPool, name: &str) -> Result<Category, sqlx::Error> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (name)
        VALUES ($1)
        RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(category)
}

/// Find a category visible within the caller's scope
///
/// A non-elevated caller sees a category only when at least one of their
/// own posts lives under it; anything else reads as absent.
pub async fn find_category(
    pool: &PgPool,
    category_id: Uuid,
    scope: Scope,
) -> Result<Option<Category>, sqlx::Error> {
    let category = match scope {
        Scope::All => {
            sqlx::query_as::<_, Category>(
                "SELECT id, name FROM categories WHERE id = $1",
            )
            .bind(category_id)
            .fetch_optional(pool)
            .await?
        }
        Scope::Owner(owner) => {
            sqlx::query_as::<_, Category>(
                r#"
                SELECT c.id, c.name
                FROM categories c
                WHERE c.id = $1
                  AND EXISTS (
                      SELECT 1 FROM posts p
                      WHERE p.category_id = c.id AND p.author_id = $2
                  )
                "#,
            )
            .bind(category_id)
            .bind(owner)
            .fetch_optional(pool)
            .await?
        }
    };

    Ok(category)
}

/// List categories visible within the caller's scope
pub async fn list_categories(pool: &PgPool, scope: Scope) -> Result<Vec<Category>, sqlx::Error> {
    let categories = match scope {
        Scope::All => {
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(pool)
                .await?
        }
        Scope::Owner(owner) => {
            sqlx::query_as::<_, Category>(
                r#"
                SELECT c.id, c.name
                FROM categories c
                WHERE EXISTS (
                    SELECT 1 FROM posts p
                    WHERE p.category_id = c.id AND p.author_id = $1
                )
                ORDER BY c.name
                "#,
            )
            .bind(owner)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(categories)
}

/// Whether a category exists at all, regardless of scope
pub async fn category_exists(pool: &PgPool, category_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM categories WHERE id = $1")
        .bind(category_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Delete a category
pub async fn delete_category(pool: &PgPool, category_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(category_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
