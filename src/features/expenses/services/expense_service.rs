use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::models::Category;
use crate::features::expenses::dtos::{ExpenseRequestDto, ExpenseResponseDto};
use crate::features::expenses::models::{Expense, ExpenseWithCategory};
use crate::features::users::UserService;

/// Translates constraint violations raised by expense writes. A foreign key
/// failure on the category means it was deleted between resolution and the
/// write, which callers see as the category going missing.
fn handle_db_error(e: sqlx::Error, category_id: Uuid) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Foreign key violation (PostgreSQL error code 23503)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503"))
            && db_err.constraint().is_some_and(|c| c.contains("category"))
        {
            return AppError::not_found("Category", category_id);
        }
    }
    tracing::error!("Database error: {:?}", e);
    AppError::Database(e)
}

/// Service for expense operations, always scoped to the calling user
pub struct ExpenseService {
    pool: PgPool,
    users: Arc<UserService>,
}

impl ExpenseService {
    pub fn new(pool: PgPool, users: Arc<UserService>) -> Self {
        Self { pool, users }
    }

    /// Lists the caller's expenses, most recent first
    pub async fn list(&self, principal: &AuthenticatedUser) -> Result<Vec<ExpenseResponseDto>> {
        let user = self.users.get_by_email(&principal.email).await?;

        let rows = sqlx::query_as::<_, ExpenseWithCategory>(
            r#"
            SELECT e.id, e.user_id, e.expense_date, e.amount, e.description, e.created_at,
                   c.id AS category_id, c.name AS category_name,
                   c.description AS category_description
            FROM expenses e
            JOIN categories c ON c.id = e.category_id
            WHERE e.user_id = $1
            ORDER BY e.expense_date DESC
            "#,
        )
        .bind(user.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list expenses: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(ExpenseResponseDto::from).collect())
    }

    /// Gets one of the caller's expenses. Expenses owned by other users are
    /// indistinguishable from missing ones.
    pub async fn get_by_id(
        &self,
        principal: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ExpenseResponseDto> {
        let user = self.users.get_by_email(&principal.email).await?;

        let row = sqlx::query_as::<_, ExpenseWithCategory>(
            r#"
            SELECT e.id, e.user_id, e.expense_date, e.amount, e.description, e.created_at,
                   c.id AS category_id, c.name AS category_name,
                   c.description AS category_description
            FROM expenses e
            JOIN categories c ON c.id = e.category_id
            WHERE e.id = $1 AND e.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch expense: {:?}", e);
            AppError::Database(e)
        })?;

        row.map(ExpenseResponseDto::from)
            .ok_or_else(|| AppError::not_found("Expense", id))
    }

    /// Records an expense for the caller. The category reference is
    /// resolved before anything else so an unusable one fails fast.
    pub async fn create(
        &self,
        principal: &AuthenticatedUser,
        dto: ExpenseRequestDto,
    ) -> Result<ExpenseResponseDto> {
        let category = self.resolve_category(&dto).await?;
        let user = self.users.get_by_email(&principal.email).await?;

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (id, user_id, expense_date, category_id, amount, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, expense_date, category_id, amount, description, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.id)
        .bind(dto.expense_date)
        .bind(category.id)
        .bind(dto.amount)
        .bind(&dto.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, category.id))?;

        tracing::info!("Expense {} recorded for user {}", expense.id, user.id);

        Ok(ExpenseResponseDto::from_parts(expense, category))
    }

    /// Rewrites one of the caller's expenses. Unlike create, the category
    /// may only be named by id here.
    pub async fn update(
        &self,
        principal: &AuthenticatedUser,
        id: Uuid,
        dto: ExpenseRequestDto,
    ) -> Result<ExpenseResponseDto> {
        let category_id = dto.category_id.ok_or_else(|| {
            AppError::InvalidArgument("categoryId is required when updating an expense".to_string())
        })?;
        let category = self
            .find_category_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::not_found("Category", category_id))?;

        let user = self.users.get_by_email(&principal.email).await?;

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET expense_date = $1, category_id = $2, amount = $3, description = $4
            WHERE id = $5 AND user_id = $6
            RETURNING id, user_id, expense_date, category_id, amount, description, created_at
            "#,
        )
        .bind(dto.expense_date)
        .bind(category.id)
        .bind(dto.amount)
        .bind(&dto.description)
        .bind(id)
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, category.id))?;

        expense
            .map(|e| ExpenseResponseDto::from_parts(e, category))
            .ok_or_else(|| AppError::not_found("Expense", id))
    }

    /// Deletes one of the caller's expenses with a single owner-scoped
    /// statement
    pub async fn delete_by_id(&self, principal: &AuthenticatedUser, id: Uuid) -> Result<()> {
        let user = self.users.get_by_email(&principal.email).await?;

        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete expense: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Expense", id));
        }

        Ok(())
    }

    /// Resolves the category the request points at. An explicit id wins
    /// over a name; a missing or blank reference is a client error rather
    /// than a lookup miss.
    async fn resolve_category(&self, dto: &ExpenseRequestDto) -> Result<Category> {
        if let Some(id) = dto.category_id {
            return self
                .find_category_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found("Category", id));
        }

        let name = dto.category_name.as_deref().unwrap_or("");
        if name.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "Either categoryId or categoryName must be provided".to_string(),
            ));
        }

        self.find_category_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found("Category", name))
    }

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch category: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch category: {:?}", e);
            AppError::Database(e)
        })
    }
}
