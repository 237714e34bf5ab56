use std::sync::Arc;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto};
use crate::features::auth::services::password::verify_password;
use crate::features::auth::services::TokenService;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Verifies admin credentials and issues tokens
pub struct AuthService {
    admin_email: String,
    admin_password_hash: String,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(config: &AuthConfig, token_service: Arc<TokenService>) -> Self {
        Self {
            admin_email: config.admin_email.trim().to_lowercase(),
            admin_password_hash: config.admin_password_hash.clone(),
            token_service,
        }
    }

    pub fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let email = dto.email.trim().to_lowercase();

        if email != self.admin_email {
            tracing::warn!("Login attempt for unknown account: {}", email);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let valid = verify_password(&dto.password, &self.admin_password_hash).map_err(|e| {
            tracing::error!("Admin password hash is unusable: {}", e);
            AppError::Internal("Admin credentials are misconfigured".to_string())
        })?;

        if !valid {
            tracing::warn!("Failed admin login for {}", email);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.token_service.issue(&self.admin_email)?;
        tracing::info!("Admin {} logged in", self.admin_email);

        Ok(LoginResponseDto {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.expires_in_secs(),
        })
    }
}
