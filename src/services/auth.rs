//! Caller identity resolution

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::UserClaims,
};

/// Resolves the calling user from a bearer token
pub trait Authenticator: Send + Sync {
    /// Returns the caller's user ID
    fn authenticate(&self, token: &str) -> AppResult<i32>;
}

/// HS256 JWT authenticator
#[derive(Clone)]
pub struct JwtAuthenticator {
    secret: String,
}

impl JwtAuthenticator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
        }
    }
}

impl Authenticator for JwtAuthenticator {
    fn authenticate(&self, token: &str) -> AppResult<i32> {
        let claims = UserClaims::from_token(token, &self.secret).map_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
            AppError::Authentication(e.to_string())
        })?;
        Ok(claims.user_id)
    }
}
