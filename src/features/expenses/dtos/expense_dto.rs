use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::models::Category;
use crate::features::expenses::models::{Expense, ExpenseWithCategory};

const MAX_INTEGER_DIGITS: u32 = 8;
const MAX_FRACTION_DIGITS: u32 = 2;

/// Request DTO for creating or updating an expense
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequestDto {
    /// When the expense occurred
    #[schema(example = "2025-03-10T12:00:00Z")]
    pub expense_date: DateTime<Utc>,

    /// Category reference by id. Takes precedence over `categoryName` on
    /// create and is the only accepted reference on update.
    pub category_id: Option<Uuid>,

    /// Category reference by exact name, honored on create when
    /// `categoryId` is absent
    #[schema(example = "Groceries")]
    pub category_name: Option<String>,

    #[validate(custom(function = validate_amount))]
    #[schema(example = 42.50)]
    pub amount: Decimal,

    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    #[schema(example = "Weekly shopping")]
    pub description: Option<String>,
}

/// Rejects non-positive amounts and amounts that would not fit the
/// NUMERIC(10, 2) column
fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() || amount.is_zero() {
        let mut error = ValidationError::new("amount_positive");
        error.message = Some("Amount must be greater than 0".into());
        return Err(error);
    }

    let integer_limit = Decimal::from(10_i64.pow(MAX_INTEGER_DIGITS));
    if amount.scale() > MAX_FRACTION_DIGITS || amount.trunc() >= integer_limit {
        let mut error = ValidationError::new("amount_digits");
        error.message =
            Some("Amount must have at most 8 integer digits and 2 decimal places".into());
        return Err(error);
    }

    Ok(())
}

/// Response DTO for an expense, with its category embedded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expense_date: DateTime<Utc>,
    pub category: CategoryResponseDto,
    pub amount: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ExpenseResponseDto {
    /// Builds the response from a freshly written row and the category that
    /// was resolved for it
    pub fn from_parts(expense: Expense, category: Category) -> Self {
        Self {
            id: expense.id,
            user_id: expense.user_id,
            expense_date: expense.expense_date,
            category: category.into(),
            amount: expense.amount,
            description: expense.description,
            created_at: expense.created_at,
        }
    }
}

impl From<ExpenseWithCategory> for ExpenseResponseDto {
    fn from(row: ExpenseWithCategory) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            expense_date: row.expense_date,
            category: CategoryResponseDto {
                id: row.category_id,
                name: row.category_name,
                description: row.category_description,
            },
            amount: row.amount,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_amount(amount: Decimal) -> ExpenseRequestDto {
        ExpenseRequestDto {
            expense_date: Utc::now(),
            category_id: Some(Uuid::new_v4()),
            category_name: None,
            amount,
            description: Some("Lunch".to_string()),
        }
    }

    #[test]
    fn accepts_a_typical_amount() {
        let dto = request_with_amount(Decimal::new(4250, 2));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn accepts_the_smallest_representable_amount() {
        let dto = request_with_amount(Decimal::new(1, 2));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn accepts_the_largest_amount_the_column_holds() {
        let dto = request_with_amount(Decimal::new(9_999_999_999, 2));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn rejects_a_negative_amount() {
        let dto = request_with_amount(Decimal::new(-500, 2));
        let errors = dto.validate().unwrap_err();

        let field = errors.field_errors();
        let messages: Vec<_> = field["amount"]
            .iter()
            .filter_map(|e| e.message.as_deref())
            .collect();
        assert_eq!(messages, vec!["Amount must be greater than 0"]);
    }

    #[test]
    fn rejects_a_zero_amount() {
        let dto = request_with_amount(Decimal::ZERO);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_more_than_two_decimal_places() {
        let dto = request_with_amount(Decimal::new(10_999, 3));
        let errors = dto.validate().unwrap_err();

        let field = errors.field_errors();
        let messages: Vec<_> = field["amount"]
            .iter()
            .filter_map(|e| e.message.as_deref())
            .collect();
        assert_eq!(
            messages,
            vec!["Amount must have at most 8 integer digits and 2 decimal places"]
        );
    }

    #[test]
    fn rejects_more_than_eight_integer_digits() {
        let dto = request_with_amount(Decimal::from(100_000_000_i64));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn rejects_an_overlong_description() {
        let mut dto = request_with_amount(Decimal::new(4250, 2));
        dto.description = Some("x".repeat(1001));

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn response_embeds_the_category_and_uses_wire_casing() {
        let row = ExpenseWithCategory {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            expense_date: Utc::now(),
            amount: Decimal::new(1999, 2),
            description: None,
            created_at: Utc::now(),
            category_id: Uuid::new_v4(),
            category_name: "Transport".to_string(),
            category_description: Some("Commuting".to_string()),
        };

        let dto = ExpenseResponseDto::from(row);
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["category"]["name"], "Transport");
        assert!(json.get("expenseDate").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
        // rust_decimal's float serde keeps amounts as JSON numbers
        assert_eq!(json["amount"], serde_json::json!(19.99));
    }

    #[test]
    fn request_parses_camel_case_payloads() {
        let dto: ExpenseRequestDto = serde_json::from_value(serde_json::json!({
            "expenseDate": "2025-03-10T12:00:00Z",
            "categoryName": "Groceries",
            "amount": 42.5,
            "description": "Weekly shopping"
        }))
        .unwrap();

        assert!(dto.category_id.is_none());
        assert_eq!(dto.category_name.as_deref(), Some("Groceries"));
        assert!(dto.validate().is_ok());
    }
}
