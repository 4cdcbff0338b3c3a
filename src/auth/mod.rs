pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::SecurityConfig;

pub use crate::database::models::user::Role;

/// Claim names owned by the token service or checked by the JWT validator;
/// callers cannot set them
const RESERVED_CLAIMS: &[&str] = &["email", "iat", "exp", "nbf", "aud", "iss", "sub", "jti"];

const MAX_EXPIRY_HOURS: i64 = 24 * 365;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("Invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("JWT generation error: {0}")]
    TokenGeneration(#[source] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    HashTask(#[from] tokio::task::JoinError),
}

/// Decoded bearer token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    /// Any further fields the token was issued with
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(email: impl Into<String>, mut extra: Map<String, Value>, ttl: Duration) -> Self {
        for reserved in RESERVED_CLAIMS {
            extra.remove(*reserved);
        }
        let now = Utc::now();
        Self {
            email: email.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            extra,
        }
    }
}

/// Issues and verifies HS256 bearer tokens with a server-held secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }
        let expiry_hours = i64::try_from(expiry_hours)
            .unwrap_or(MAX_EXPIRY_HOURS)
            .min(MAX_EXPIRY_HOURS);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(expiry_hours),
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, AuthError> {
        Self::new(&config.jwt_secret, config.jwt_expiry_hours)
    }

    /// Sign a fresh token for `email` carrying the extra claims
    pub fn issue(&self, email: impl Into<String>, extra: Map<String, Value>) -> Result<String, AuthError> {
        self.sign(&Claims::new(email, extra, self.ttl))
    }

    /// Sign claims exactly as given, including their timestamps
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(AuthError::TokenGeneration)
    }

    /// Check signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> TokenService {
        TokenService::new("test-secret", 24).unwrap()
    }

    #[test]
    fn rejects_empty_secret() {
        assert!(matches!(TokenService::new("", 24), Err(AuthError::MissingSecret)));
    }

    #[test]
    fn issued_tokens_round_trip_their_claims() {
        let tokens = service();
        let extra = json!({ "name": "Ada", "email": "spoof@b.com" })
            .as_object()
            .cloned()
            .unwrap();
        let token = tokens.issue("ada@b.com", extra).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.email, "ada@b.com");
        assert_eq!(claims.extra.get("name"), Some(&json!("Ada")));
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn registered_claim_names_are_not_carried_over() {
        let tokens = service();
        let extra = json!({ "aud": "web", "nbf": 4102444800i64, "iss": "me", "role": "admin" })
            .as_object()
            .cloned()
            .unwrap();
        let token = tokens.issue("ada@b.com", extra).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.extra.keys().collect::<Vec<_>>(), vec!["role"]);
    }

    #[test]
    fn expired_tokens_fail_verification() {
        let tokens = service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            email: "ada@b.com".to_string(),
            iat: now - 3600,
            exp: now - 10,
            extra: Map::new(),
        };
        let token = tokens.sign(&claims).unwrap();
        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn tokens_from_another_secret_fail_verification() {
        let other = TokenService::new("other-secret", 24).unwrap();
        let token = other.issue("ada@b.com", Map::new()).unwrap();
        assert!(service().verify(&token).is_err());
        assert!(service().verify("not.a.token").is_err());
    }
}
