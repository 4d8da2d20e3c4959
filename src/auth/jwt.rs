use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
};

const INVALID_TOKEN: &str = "Invalid or expired token.";

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_hours: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            ttl: Duration::hours(expiration_hours),
        }
    }

    pub fn issue(&self, subject_id: &str, is_admin: bool) -> AppResult<String> {
        self.issue_with_ttl(subject_id, is_admin, self.ttl)
    }

    pub fn issue_with_ttl(&self, subject_id: &str, is_admin: bool, ttl: Duration) -> AppResult<String> {
        let claims = Claims::new(subject_id, is_admin, ttl);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }

    /// Bad signatures, expiry and malformed input all fail the same way.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                AppError::Unauthorized(INVALID_TOKEN.to_string())
            })
    }
}
