use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for an expense
#[derive(Debug, Clone, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expense_date: DateTime<Utc>,
    pub category_id: Uuid,
    pub amount: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Expense row joined with its category, as read by list and get
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseWithCategory {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expense_date: DateTime<Utc>,
    pub amount: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub category_id: Uuid,
    pub category_name: String,
    pub category_description: Option<String>,
}
