use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::models::{NewUser, Role, User};

/// Translates constraint violations raised by the users table
fn handle_db_error(e: sqlx::Error, email: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation (PostgreSQL error code 23505)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::duplicate("User", "email", email);
        }
    }
    tracing::error!("Database error: {:?}", e);
    AppError::Database(e)
}

/// Service for account creation and lookup
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates an account with the default role. Email uniqueness is
    /// pre-checked so the common case reports a clean conflict; the
    /// constraint still backs it up under concurrent registration.
    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        if self.find_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::duplicate("User", "email", &new_user.email));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, first_name, last_name, role, enabled)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, email, password_hash, first_name, last_name, role, enabled, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(Role::User)
        .bind(true)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, &new_user.email))?;

        Ok(user)
    }

    /// Optional email lookup used by login and the registration pre-check
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role, enabled, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find user by email: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(user)
    }

    /// Email lookup that treats a missing account as an error. Expense
    /// operations resolve the authenticated principal through this.
    pub async fn get_by_email(&self, email: &str) -> Result<User> {
        self.find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User", email))
    }
}
