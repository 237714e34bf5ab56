use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedAdmin, Claims};
use crate::shared::constants::ROLE_ADMIN;

/// Issues and validates HS256 admin tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn expires_in_secs(&self) -> i64 {
        self.ttl.as_secs() as i64
    }

    pub fn issue(&self, email: &str) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: email.to_string(),
            role: ROLE_ADMIN.to_string(),
            iat: now,
            exp: now + self.expires_in_secs(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn validate(&self, token: &str) -> Result<AuthenticatedAdmin> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Auth("Token has expired".to_string())
                }
                _ => AppError::Auth("Invalid token".to_string()),
            }
        })?;

        Ok(AuthenticatedAdmin {
            email: data.claims.sub,
            role: data.claims.role,
        })
    }
}
