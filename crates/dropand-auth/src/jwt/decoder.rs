//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use dropand_core::config::AuthConfig;
use dropand_core::error::AppError;

use super::claims::Claims;

/// Validates session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Check signature and expiry, returning the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Session has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::authentication("Invalid session token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid session token signature")
                }
                _ => AppError::authentication(format!("Session token validation failed: {e}")),
            }
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use dropand_entity::user::UserRole;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str, ttl: u64) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            session_ttl_minutes: ttl,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issued_token_decodes() {
        let cfg = config("test-secret", 30);
        let (token, _) = JwtEncoder::new(&cfg).issue("alice", UserRole::User).unwrap();

        let claims = JwtDecoder::new(&cfg).decode(&token).unwrap();
        assert_eq!(claims.username(), "alice");
        assert_eq!(claims.role, UserRole::User);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let (token, _) = JwtEncoder::new(&config("one", 30))
            .issue("alice", UserRole::User)
            .unwrap();

        let err = JwtDecoder::new(&config("two", 30)).decode(&token).unwrap_err();
        assert_eq!(err.kind, dropand_core::error::ErrorKind::Authentication);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let decoder = JwtDecoder::new(&config("secret", 30));
        assert!(decoder.decode("not-a-token").is_err());
    }
}
