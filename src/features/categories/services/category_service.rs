use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryListQuery, CategoryRequestDto, CategoryResponseDto,
};
use crate::features::categories::models::Category;
use crate::shared::types::Page;

/// Translates constraint violations raised by category writes
fn handle_db_error(e: sqlx::Error, name: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation (PostgreSQL error code 23505)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::duplicate("Category", "name", name);
        }
    }
    tracing::error!("Database error: {:?}", e);
    AppError::Database(e)
}

/// Translates constraint violations raised by category deletion
fn handle_delete_error(e: sqlx::Error, id: Uuid) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Foreign key violation (PostgreSQL error code 23503)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::ResourceInUse(format!(
                "Category {} is referenced by existing expenses and cannot be deleted",
                id
            ));
        }
    }
    tracing::error!("Database error: {:?}", e);
    AppError::Database(e)
}

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Pages through categories with optional case-insensitive name search.
    /// The sort column and direction are whitelisted by the query DTO, so
    /// interpolating them is safe.
    pub async fn list(&self, query: &CategoryListQuery) -> Result<Page<CategoryResponseDto>> {
        let order = format!("ORDER BY {} {}", query.sort_column(), query.sort_direction());

        let (total, categories) = if let Some(term) = query.search_term() {
            let pattern = format!("%{}%", term);

            let total = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM categories WHERE name ILIKE $1",
            )
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count categories: {:?}", e);
                AppError::Database(e)
            })?;

            let sql = format!(
                "SELECT id, name, description FROM categories WHERE name ILIKE $1 {} LIMIT $2 OFFSET $3",
                order
            );
            let categories = sqlx::query_as::<_, Category>(&sql)
                .bind(&pattern)
                .bind(i64::from(query.size))
                .bind(query.offset())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to list categories: {:?}", e);
                    AppError::Database(e)
                })?;

            (total, categories)
        } else {
            let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count categories: {:?}", e);
                    AppError::Database(e)
                })?;

            let sql = format!(
                "SELECT id, name, description FROM categories {} LIMIT $1 OFFSET $2",
                order
            );
            let categories = sqlx::query_as::<_, Category>(&sql)
                .bind(i64::from(query.size))
                .bind(query.offset())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to list categories: {:?}", e);
                    AppError::Database(e)
                })?;

            (total, categories)
        };

        Ok(Page::new(
            categories
                .into_iter()
                .map(CategoryResponseDto::from)
                .collect(),
            i64::from(query.page),
            i64::from(query.size),
            total,
        ))
    }

    /// Get category by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        self.find_by_id(id)
            .await?
            .map(CategoryResponseDto::from)
            .ok_or_else(|| AppError::not_found("Category", id))
    }

    /// Creates a category with an app-generated id. The name must be
    /// unique; the pre-check reports the common case and the constraint
    /// covers concurrent creates.
    pub async fn create(&self, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        if self.find_by_name(&dto.name).await?.is_some() {
            return Err(AppError::duplicate("Category", "name", &dto.name));
        }

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, description
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, &dto.name))?;

        Ok(category.into())
    }

    /// Replaces name and description. A rename that collides with a
    /// different category is rejected.
    pub async fn update(&self, id: Uuid, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        if !self.exists(id).await? {
            return Err(AppError::not_found("Category", id));
        }

        if let Some(existing) = self.find_by_name(&dto.name).await? {
            if existing.id != id {
                return Err(AppError::duplicate("Category", "name", &dto.name));
            }
        }

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1, description = $2
            WHERE id = $3
            RETURNING id, name, description
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, &dto.name))?;

        category
            .map(CategoryResponseDto::from)
            .ok_or_else(|| AppError::not_found("Category", id))
    }

    /// Deletes a category no expense references. Referenced categories are
    /// reported as in use instead of cascading.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.exists(id).await? {
            return Err(AppError::not_found("Category", id));
        }

        let in_use = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM expenses WHERE category_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check category references: {:?}", e);
            AppError::Database(e)
        })?;

        if in_use {
            return Err(AppError::ResourceInUse(format!(
                "Category {} is referenced by existing expenses and cannot be deleted",
                id
            )));
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| handle_delete_error(e, id))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Category", id));
        }

        Ok(())
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check category existence: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find category by id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find category by name: {:?}", e);
            AppError::Database(e)
        })
    }
}
