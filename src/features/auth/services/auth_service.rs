use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AuthResponseDto, LoginRequestDto, RegisterRequestDto};
use crate::features::auth::password;
use crate::features::auth::token::JwtKeys;
use crate::features::users::models::NewUser;
use crate::features::users::UserService;

/// Service for authentication operations (register, login)
pub struct AuthService {
    users: Arc<UserService>,
    keys: Arc<JwtKeys>,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, keys: Arc<JwtKeys>) -> Self {
        Self { users, keys }
    }

    /// Creates an account and signs a first token for it
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        let password_hash = password::hash_password(&dto.password)?;

        let user = self
            .users
            .create(NewUser {
                email: dto.email,
                password_hash,
                first_name: dto.first_name,
                last_name: dto.last_name,
            })
            .await?;

        tracing::info!("Registered account {}", user.email);

        let token = self.keys.sign(&user)?;
        Ok(AuthResponseDto::new(token, &user))
    }

    /// Verifies credentials and signs a token. Unknown email, wrong
    /// password, and disabled accounts all produce the same 401.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = self
            .users
            .find_by_email(&dto.email)
            .await?
            .ok_or(AppError::BadCredentials)?;

        if !password::verify_password(&dto.password, &user.password_hash)? {
            return Err(AppError::BadCredentials);
        }
        if !user.enabled {
            return Err(AppError::BadCredentials);
        }

        let token = self.keys.sign(&user)?;
        Ok(AuthResponseDto::new(token, &user))
    }
}
