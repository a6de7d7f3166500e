use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Durée de vie d'un token de session, et max-age du cookie qui le porte
pub const SESSION_TTL_MINUTES: i64 = 15;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // id utilisateur
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("Invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),

    #[error("Token expired")]
    Expired,
}

/// Signe et vérifie les tokens de session avec le secret fourni au démarrage
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        SessionKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn ttl() -> Duration {
        Duration::minutes(SESSION_TTL_MINUTES)
    }

    pub fn issue(&self, user_id: i32) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: i32, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Self::ttl()).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Renvoie l'id utilisateur d'un token valide et non expiré
    pub fn verify(&self, token: &str) -> Result<i32, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<i32, TokenError> {
        // L'expiration est vérifiée plus bas contre `now`, sans marge
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(TokenError::Invalid)?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new("test-secret")
    }

    #[test]
    fn test_issue_and_verify_token() {
        let token = keys().issue(123).unwrap();
        assert_eq!(keys().verify(&token).unwrap(), 123);
    }

    #[test]
    fn test_token_lifetime() {
        let issued = Utc::now();
        let token = keys().issue_at(5, issued).unwrap();

        assert_eq!(keys().verify_at(&token, issued + Duration::minutes(14)).unwrap(), 5);
        assert!(matches!(
            keys().verify_at(&token, issued + Duration::minutes(16)),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_invalid_token() {
        assert!(matches!(keys().verify("invalid.token.here"), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_token_signed_with_other_secret() {
        let token = SessionKeys::new("another-secret").issue(1).unwrap();
        assert!(matches!(keys().verify(&token), Err(TokenError::Invalid(_))));
    }
}
