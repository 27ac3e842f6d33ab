//! Session token issuance and validation
//!
//! Tokens are HS256-signed JWTs carrying the caller's identity and full
//! role set. Signing configuration is loaded once at startup and immutable
//! thereafter. Validation checks signature, issuer, audience, and expiry
//! and fails closed: any verification failure yields an opaque error and
//! the token is treated as invalid in its entirety.
//!
//! Tokens are stateless and self-contained. There is no revocation list:
//! once issued, a token remains valid until its embedded expiry elapses,
//! even if the identity's password or roles change in the meantime.

use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime applied when no lifetime is configured
pub const DEFAULT_LIFETIME_MINUTES: i64 = 180;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Session claims embedded in every issued token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Username at issuance time
    pub username: String,
    /// Full role set at issuance time
    pub roles: Vec<String>,
    /// Unique token identifier (replay-distinguishing, not revocation)
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

struct JwtSettings {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    lifetime_minutes: i64,
}

/// Process-wide signing configuration; set once at startup
static JWT_SETTINGS: OnceCell<JwtSettings> = OnceCell::new();

/// Initialize token signing configuration
///
/// Must be called during application startup before any token operation.
/// Can only be called once; subsequent calls return an error.
pub fn initialize_jwt(
    secret: &str,
    issuer: &str,
    audience: &str,
    lifetime_minutes: Option<i64>,
) -> Result<()> {
    if secret.is_empty() {
        return Err(anyhow!("JWT secret must not be empty"));
    }

    let settings = JwtSettings {
        encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        issuer: issuer.to_string(),
        audience: audience.to_string(),
        lifetime_minutes: lifetime_minutes.unwrap_or(DEFAULT_LIFETIME_MINUTES),
    };

    JWT_SETTINGS
        .set(settings)
        .map_err(|_| anyhow!("JWT settings already initialized"))
}

fn settings() -> Result<&'static JwtSettings> {
    JWT_SETTINGS
        .get()
        .ok_or_else(|| anyhow!("JWT settings not initialized. Call initialize_jwt() during startup."))
}

/// Issue a signed session token for the given identity and role set
pub fn issue_token(user_id: Uuid, username: &str, roles: &[String]) -> Result<String> {
    let settings = settings()?;
    let now = Utc::now();
    let expiry = now + Duration::minutes(settings.lifetime_minutes);

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        roles: roles.to_vec(),
        jti: Uuid::new_v4().to_string(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
        iss: settings.issuer.clone(),
        aud: settings.audience.clone(),
    };

    encode(&Header::new(JWT_ALGORITHM), &claims, &settings.encoding_key)
        .map_err(|e| anyhow!("Failed to issue token: {e}"))
}

/// Validate and decode a session token
///
/// Verifies the HS256 signature, issuer, audience, and expiry. Any
/// failure (bad signature, wrong issuer or audience, expired token,
/// malformed input, uninitialized settings) is returned as an error and
/// the token must be treated as invalid; no claim is partially trusted.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let settings = settings()?;

    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.validate_exp = true;
    validation.set_issuer(&[&settings.issuer]);
    validation.set_audience(&[&settings.audience]);

    decode::<Claims>(token, &settings.decoding_key, &validation)
        .map_err(|e| anyhow!("Token validation failed: {e}"))
}

/// Extract the user ID from a validated token
pub fn user_id_from_token(token: &str) -> Result<Uuid> {
    let token_data = validate_token(token)?;
    Uuid::parse_str(&token_data.claims.sub)
        .map_err(|e| anyhow!("Invalid user ID format in token: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-signing-secret-do-not-use-in-production";
    const TEST_ISSUER: &str = "blog-platform";
    const TEST_AUDIENCE: &str = "blog-platform-clients";

    fn init_test_settings() {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            initialize_jwt(TEST_SECRET, TEST_ISSUER, TEST_AUDIENCE, Some(180))
                .expect("Failed to initialize test settings");
        });
    }

    fn encode_raw(claims: &Claims) -> String {
        encode(
            &Header::new(JWT_ALGORITHM),
            claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn base_claims(user_id: Uuid) -> Claims {
        let now = Utc::now();
        Claims {
            sub: user_id.to_string(),
            username: "testuser".into(),
            roles: vec!["author".into()],
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(5)).timestamp(),
            iss: TEST_ISSUER.into(),
            aud: TEST_AUDIENCE.into(),
        }
    }

    #[test]
    fn issue_and_validate_round_trip() {
        init_test_settings();

        let user_id = Uuid::new_v4();
        let roles = vec!["admin".to_string(), "author".to_string()];
        let token = issue_token(user_id, "alice", &roles).unwrap();

        let claims = validate_token(&token).unwrap().claims;
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.roles, roles);
        assert_eq!(claims.iss, TEST_ISSUER);
        assert_eq!(claims.aud, TEST_AUDIENCE);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn fresh_tokens_get_distinct_jti() {
        init_test_settings();

        let user_id = Uuid::new_v4();
        let roles = vec!["user".to_string()];
        let a = validate_token(&issue_token(user_id, "bob", &roles).unwrap())
            .unwrap()
            .claims;
        let b = validate_token(&issue_token(user_id, "bob", &roles).unwrap())
            .unwrap()
            .claims;
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn rejects_malformed_token() {
        init_test_settings();
        assert!(validate_token("not.a.token").is_err());
        assert!(validate_token("").is_err());
    }

    #[test]
    fn rejects_tampered_token() {
        init_test_settings();

        let token = issue_token(Uuid::new_v4(), "alice", &["user".to_string()]).unwrap();
        let tampered = token.replace('a', "b");
        assert!(validate_token(&tampered).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        init_test_settings();

        let mut claims = base_claims(Uuid::new_v4());
        claims.iat = (Utc::now() - Duration::minutes(10)).timestamp();
        claims.exp = (Utc::now() - Duration::minutes(5)).timestamp();

        assert!(validate_token(&encode_raw(&claims)).is_err());
    }

    #[test]
    fn rejects_wrong_audience() {
        init_test_settings();

        let mut claims = base_claims(Uuid::new_v4());
        claims.aud = "another-service".into();
        assert!(validate_token(&encode_raw(&claims)).is_err());
    }

    #[test]
    fn rejects_wrong_issuer() {
        init_test_settings();

        let mut claims = base_claims(Uuid::new_v4());
        claims.iss = "someone-else".into();
        assert!(validate_token(&encode_raw(&claims)).is_err());
    }

    #[test]
    fn extracts_user_id() {
        init_test_settings();

        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, "alice", &["user".to_string()]).unwrap();
        assert_eq!(user_id_from_token(&token).unwrap(), user_id);
    }
}
