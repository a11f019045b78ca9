use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::Claims;
use crate::features::users::models::User;

/// HMAC key pair plus the parameters tokens are issued and validated with
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    token_ttl: Duration,
    leeway: Duration,
}

impl JwtKeys {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            token_ttl: config.token_ttl,
            leeway: config.jwt_leeway,
        }
    }

    /// Issues an HS256 access token for the given account
    pub fn sign(&self, user: &User) -> Result<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            iat,
            exp: iat + self.token_ttl.as_secs() as i64,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AppError::Internal("Token signing failed".to_string())
        })
    }

    /// Decodes a token and validates signature, expiry, issuer, and audience
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway.as_secs();

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!("Token rejected: {}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })
    }
}
