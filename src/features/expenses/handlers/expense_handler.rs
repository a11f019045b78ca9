use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, UuidParam};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::expenses::dtos::{ExpenseRequestDto, ExpenseResponseDto};
use crate::features::expenses::services::ExpenseService;

/// List the authenticated user's expenses, most recent first
#[utoipa::path(
    get,
    path = "/api/expenses",
    responses(
        (status = 200, description = "The caller's expenses", body = Vec<ExpenseResponseDto>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "expenses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_expenses(
    user: AuthenticatedUser,
    State(service): State<Arc<ExpenseService>>,
) -> Result<Json<Vec<ExpenseResponseDto>>> {
    let expenses = service.list(&user).await?;
    Ok(Json(expenses))
}

/// Get one of the authenticated user's expenses by id
#[utoipa::path(
    get,
    path = "/api/expenses/{id}",
    params(
        ("id" = Uuid, Path, description = "Expense id")
    ),
    responses(
        (status = 200, description = "Expense found", body = ExpenseResponseDto),
        (status = 400, description = "Malformed expense id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Expense not found or owned by another user")
    ),
    tag = "expenses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_expense(
    user: AuthenticatedUser,
    State(service): State<Arc<ExpenseService>>,
    UuidParam(id): UuidParam,
) -> Result<Json<ExpenseResponseDto>> {
    let expense = service.get_by_id(&user, id).await?;
    Ok(Json(expense))
}

/// Record a new expense for the authenticated user
#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = ExpenseRequestDto,
    responses(
        (status = 201, description = "Expense recorded", body = ExpenseResponseDto),
        (status = 400, description = "Validation error or missing category reference"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Referenced category not found")
    ),
    tag = "expenses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_expense(
    user: AuthenticatedUser,
    State(service): State<Arc<ExpenseService>>,
    AppJson(dto): AppJson<ExpenseRequestDto>,
) -> Result<(StatusCode, Json<ExpenseResponseDto>)> {
    dto.validate()?;

    let expense = service.create(&user, dto).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// Update one of the authenticated user's expenses
#[utoipa::path(
    put,
    path = "/api/expenses/{id}",
    params(
        ("id" = Uuid, Path, description = "Expense id")
    ),
    request_body = ExpenseRequestDto,
    responses(
        (status = 200, description = "Expense updated", body = ExpenseResponseDto),
        (status = 400, description = "Validation error or missing categoryId"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Expense or category not found")
    ),
    tag = "expenses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_expense(
    user: AuthenticatedUser,
    State(service): State<Arc<ExpenseService>>,
    UuidParam(id): UuidParam,
    AppJson(dto): AppJson<ExpenseRequestDto>,
) -> Result<Json<ExpenseResponseDto>> {
    dto.validate()?;

    let expense = service.update(&user, id, dto).await?;
    Ok(Json(expense))
}

/// Delete one of the authenticated user's expenses
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    params(
        ("id" = Uuid, Path, description = "Expense id")
    ),
    responses(
        (status = 204, description = "Expense deleted"),
        (status = 400, description = "Malformed expense id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Expense not found or owned by another user")
    ),
    tag = "expenses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_expense(
    user: AuthenticatedUser,
    State(service): State<Arc<ExpenseService>>,
    UuidParam(id): UuidParam,
) -> Result<StatusCode> {
    service.delete_by_id(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
