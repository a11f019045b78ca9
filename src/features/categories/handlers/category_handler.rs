use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery, UuidParam};
use crate::features::categories::dtos::{
    CategoryListQuery, CategoryRequestDto, CategoryResponseDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::Page;

/// List categories with paging, sorting, and optional name search
#[utoipa::path(
    get,
    path = "/api/categories",
    params(CategoryListQuery),
    responses(
        (status = 200, description = "Page of categories", body = Page<CategoryResponseDto>),
        (status = 400, description = "Invalid paging or sorting parameters"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<CategoryListQuery>,
) -> Result<Json<Page<CategoryResponseDto>>> {
    query.validate()?;

    let page = service.list(&query).await?;
    Ok(Json(page))
}

/// Get category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponseDto),
        (status = 400, description = "Malformed category id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    UuidParam(id): UuidParam,
) -> Result<Json<CategoryResponseDto>> {
    let category = service.get_by_id(id).await?;
    Ok(Json(category))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequestDto,
    responses(
        (status = 201, description = "Category created", body = CategoryResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 409, description = "Category name already exists")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CategoryRequestDto>,
) -> Result<(StatusCode, Json<CategoryResponseDto>)> {
    dto.validate()?;

    let category = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update an existing category
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    request_body = CategoryRequestDto,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category name already exists")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    UuidParam(id): UuidParam,
    AppJson(dto): AppJson<CategoryRequestDto>,
) -> Result<Json<CategoryResponseDto>> {
    dto.validate()?;

    let category = service.update(id, dto).await?;
    Ok(Json(category))
}

/// Delete a category that no expense references
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, description = "Malformed category id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is referenced by expenses")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    UuidParam(id): UuidParam,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
