use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, error, warn};

use crate::auth::repo_types::{Role, User};
use crate::config::{AppConfig, JwtConfig};
use crate::error::ApiError;
use crate::state::AppState;

pub const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Boundary validation for login identifiers. Email-shape enforcement is a
/// deployment choice, not hard-coded.
pub fn validate_identifier(config: &AppConfig, identifier: &str) -> Result<(), ApiError> {
    if identifier.trim().is_empty() {
        return Err(ApiError::Validation("identifier must not be empty".into()));
    }
    if config.email_identifier && !is_valid_email(identifier) {
        return Err(ApiError::Validation("identifier must be an email".into()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Ownership gate for history routes: a user may read their own records,
/// admins may read anyone's.
pub fn ensure_self_or_admin(actor: &User, identifier: &str) -> Result<(), ApiError> {
    if actor.identifier == identifier || actor.role == Role::Admin {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored hash. A malformed or unsupported hash
/// string fails closed: it can only ever read as "no match".
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "stored password hash is malformed, rejecting");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// JWT claims; `sub` carries the login identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub iss: String,
    pub aud: String,
}

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: TimeDuration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            ttl: TimeDuration::minutes(ttl_minutes),
        }
    }
}

impl JwtKeys {
    /// Issue a signed token for `subject`, expiring ttl from now.
    pub fn sign(&self, subject: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + self.ttl;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(subject = %subject, "jwt signed");
        Ok(token)
    }

    /// Verify signature, issuer, audience and expiry. Expiry is exact: no
    /// leeway, a token is dead at its `exp` instant.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            warn!(error = %e, "jwt verification failed");
            ApiError::InvalidToken
        })?;
        if data.claims.exp as i64 <= OffsetDateTime::now_utc().unix_timestamp() {
            warn!(subject = %data.claims.sub, "jwt expired");
            return Err(ApiError::InvalidToken);
        }
        debug!(subject = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod password_tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn hashes_are_salted_per_call() {
        let h1 = hash_password("secret1").expect("hash");
        let h2 = hash_password("secret1").expect("hash");
        assert_ne!(h1, h2);
        assert!(verify_password("secret1", &h1));
        assert!(verify_password("secret1", &h2));
    }

    #[test]
    fn malformed_hash_fails_closed() {
        assert!(!verify_password("anything", "not-a-valid-hash"));
        assert!(!verify_password("anything", ""));
    }
}


#[cfg(test)]
mod jwt_tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_roundtrip() {
        let keys = make_keys();
        let token = keys.sign("a@x.com").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let mut keys = make_keys();
        keys.ttl = TimeDuration::minutes(-1);
        let token = keys.sign("a@x.com").expect("sign");
        let err = keys.verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let keys = make_keys();
        let mut token = keys.sign("a@x.com").expect("sign");
        // flip a character in the payload segment
        let mid = token.len() / 2;
        let replacement = if token.as_bytes()[mid] == b'a' { 'b' } else { 'a' };
        token.replace_range(mid..mid + 1, &replacement.to_string());
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn token_signed_with_other_key_is_rejected() {
        let keys = make_keys();
        let mut other = make_keys();
        other.encoding = EncodingKey::from_secret(b"other-secret");
        let token = other.sign("a@x.com").expect("sign");
        assert!(matches!(keys.verify(&token), Err(ApiError::InvalidToken)));
    }
}
