/// Authentication service - registration and login against the credential store
use crate::db::user_repo;
use crate::error::{is_unique_violation, AppError, Result};
use crate::models::User;
use access_control::Role;
use crypto_core::{jwt, password};
use sqlx::PgPool;

pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new identity
    ///
    /// The requested role is honored when it names a seeded role;
    /// anything else falls back to `user`, so every identity holds at
    /// least one role afterwards.
    pub async fn register(
        &self,
        username: &str,
        raw_password: &str,
        requested_role: Option<&str>,
    ) -> Result<User> {
        let password_hash = password::hash_password(raw_password)
            .map_err(|_| AppError::Internal("Failed to hash password".to_string()))?;

        let role = requested_role
            .and_then(Role::parse)
            .unwrap_or(Role::User);

        let mut tx = self.pool.begin().await?;

        let user = match user_repo::create_user(&mut tx, username, &password_hash).await {
            Ok(user) => user,
            Err(err) if is_unique_violation(&err) => {
                return Err(AppError::Conflict("Username is already taken".to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let role_id = user_repo::find_role_id(&mut tx, role.as_str())
            .await?
            .ok_or_else(|| AppError::Internal(format!("role '{role}' is not seeded")))?;
        user_repo::attach_role(&mut tx, user.id, role_id).await?;

        tx.commit().await?;

        tracing::info!(username = %user.username, role = %role, "user registered");
        Ok(user)
    }

    /// Verify credentials and issue a session token
    ///
    /// The token embeds the identity and its full role set at this
    /// moment; later role or password changes do not touch tokens
    /// already in the wild.
    pub async fn login(&self, username: &str, raw_password: &str) -> Result<String> {
        let credentials = user_repo::find_credentials(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

        let valid = password::verify_password(raw_password, &credentials.password_hash)
            .map_err(|_| AppError::Internal("Stored credential hash is malformed".to_string()))?;

        if !valid {
            return Err(AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        let roles = user_repo::role_names(&self.pool, credentials.id).await?;

        let token = jwt::issue_token(credentials.id, &credentials.username, &roles)
            .map_err(|_| AppError::Internal("Failed to issue token".to_string()))?;

        tracing::info!(username = %credentials.username, "user logged in");
        Ok(token)
    }
}
