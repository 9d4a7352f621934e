//! Authentication service.
//!
//! Password hashing plus bearer-token issuance and verification. Tokens are
//! HS256-signed and carry the identity fields downstream authorization needs
//! (user id, email, name, city) with a fixed one-hour expiry.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use brocante_core::UserId;

use crate::models::User;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Token lifetime in seconds.
const TOKEN_TTL_SECS: i64 = 3600;

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account id.
    pub sub: UserId,
    pub email: String,
    pub name: String,
    pub city: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Verified caller identity, extracted from a bearer token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub city: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
            city: claims.city,
        }
    }
}

/// Issues and verifies bearer tokens.
///
/// Verification is pure key work: no store access happens after issuance.
pub struct Authenticator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl Authenticator {
    /// Create an authenticator with the standard one-hour token lifetime.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        Self::with_ttl(secret, Duration::seconds(TOKEN_TTL_SECS))
    }

    /// Create an authenticator with an explicit token lifetime.
    #[must_use]
    pub fn with_ttl(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl,
        }
    }

    /// Sign a token for an authenticated user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenSigning` if encoding fails.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.to_string(),
            name: user.name.clone(),
            city: user.city.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|_| AuthError::TokenSigning)
    }

    /// Verify a raw `Authorization` header value and extract the caller
    /// identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` when the header or its bearer
    /// value is absent, and `AuthError::InvalidToken` when the token is
    /// malformed, fails signature verification, or is expired.
    pub fn verify(&self, raw_header: Option<&str>) -> Result<Identity, AuthError> {
        let header = raw_header.ok_or(AuthError::MissingCredentials)?;
        let token = header
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingCredentials)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(data.claims.into())
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// The comparison inside the verifier is constant-time-equivalent.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use brocante_core::Email;

    fn secret() -> SecretString {
        SecretString::from("test-signing-secret-0123456789abcdef")
    }

    fn user() -> User {
        User::new(
            Email::parse("ada@example.com").unwrap(),
            "Ada".to_string(),
            hash_password("hunter2!").unwrap(),
            "Quebec".to_string(),
        )
    }

    #[test]
    fn test_hash_is_not_plaintext_and_verifies() {
        let hash = hash_password("hunter2!").unwrap();
        assert_ne!(hash, "hunter2!");
        assert!(verify_password("hunter2!", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("hunter2!").unwrap();
        let b = hash_password("hunter2!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let auth = Authenticator::new(&secret());
        let user = user();

        let token = auth.issue(&user).unwrap();
        let identity = auth.verify(Some(&format!("Bearer {token}"))).unwrap();

        assert_eq!(identity.user_id, user.id);
        assert_eq!(identity.email, "ada@example.com");
        assert_eq!(identity.name, "Ada");
        assert_eq!(identity.city, "Quebec");
    }

    #[test]
    fn test_verify_rejects_missing_header() {
        let auth = Authenticator::new(&secret());
        assert!(matches!(
            auth.verify(None),
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            auth.verify(Some("Bearer ")),
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            auth.verify(Some("Basic abc")),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let auth = Authenticator::new(&secret());
        let other = Authenticator::new(&SecretString::from("another-signing-secret-0123456789"));

        let token = other.issue(&user()).unwrap();
        assert!(matches!(
            auth.verify(Some(&format!("Bearer {token}"))),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            auth.verify(Some("Bearer not.a.token")),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let auth = Authenticator::with_ttl(&secret(), Duration::seconds(-120));
        let token = auth.issue(&user()).unwrap();
        assert!(matches!(
            auth.verify(Some(&format!("Bearer {token}"))),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_is_valid_within_window() {
        let auth = Authenticator::new(&secret());
        let token = auth.issue(&user()).unwrap();
        assert!(auth.verify(Some(&format!("Bearer {token}"))).is_ok());
    }
}
