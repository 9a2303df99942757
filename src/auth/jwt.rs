//! JWT token handling
//!
//! Verifies the bearer tokens issued by the external credential service.
//! Minting lives here too: it documents the contract the issuer fulfils and
//! backs the test suite.

use crate::config::AuthConfig;
use crate::utils::error::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// JWT handler for token operations
#[derive(Clone)]
pub struct JwtHandler {
    /// Encoding key for signing tokens
    encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    decoding_key: DecodingKey,
    /// JWT algorithm
    algorithm: Algorithm,
    /// Token expiration time in seconds
    expiration: u64,
    /// Token issuer
    issuer: String,
}

impl std::fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .field("expiration", &self.expiration)
            .field("issuer", &self.issuer)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// JWT claims carried by a dashboard session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    pub iss: String,
}

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
            issuer: "commune-rs".to_string(),
        }
    }

    /// Mint an access token for a user id.
    pub fn create_access_token(&self, user_id: Uuid) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs())
            .unwrap_or(0);

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
        };

        Ok(encode(&Header::new(self.algorithm), &claims, &self.encoding_key)?)
    }

    /// Verify a bearer token and return its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "a-test-secret-that-is-at-least-32-characters".to_string(),
            jwt_expiration: 3600,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let handler = JwtHandler::new(&test_config());
        let user_id = Uuid::new_v4();

        let token = handler.create_access_token(user_id).unwrap();
        let claims = handler.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "commune-rs");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let handler = JwtHandler::new(&test_config());
        assert!(handler.verify_token("not-a-token").is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let handler = JwtHandler::new(&test_config());
        let other = JwtHandler::new(&AuthConfig {
            jwt_secret: "another-secret-that-is-also-32-characters-long".to_string(),
            jwt_expiration: 3600,
        });

        let token = other.create_access_token(Uuid::new_v4()).unwrap();
        assert!(handler.verify_token(&token).is_err());
    }
}
