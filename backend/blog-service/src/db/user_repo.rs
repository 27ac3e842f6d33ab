use crate::models::{User, UserCredentials};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Create a new user row
pub async fn create_user(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash)
        VALUES ($1, $2)
        RETURNING id, username, created_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(&mut **tx)
    .await?;

    Ok(user)
}

/// Look up the credential row for a username
pub async fn find_credentials(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserCredentials>, sqlx::Error> {
    let credentials = sqlx::query_as::<_, UserCredentials>(
        r#"
        SELECT id, username, password_hash
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(credentials)
}

/// Resolve a role name to its id
pub async fn find_role_id(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
) -> Result<Option<Uuid>, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM roles WHERE name = $1")
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(row.map(|(id,)| id))
}

/// Attach a role to a user
pub async fn attach_role(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    role_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_roles (user_id, role_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(role_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// All role names held by a user
pub async fn role_names(pool: &PgPool, user_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT r.name
        FROM roles r
        JOIN user_roles ur ON ur.role_id = r.id
        WHERE ur.user_id = $1
        ORDER BY r.name
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(name,)| name).collect())
}

/// Look up a user's public row
pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
