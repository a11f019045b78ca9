use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::categories::models::Category;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::validation::SORT_DIR_REGEX;

/// Request DTO for creating or replacing a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequestDto {
    #[validate(
        custom(function = validate_not_blank),
        length(max = 100, message = "Category name must be at most 100 characters")
    )]
    #[schema(example = "Groceries")]
    pub name: String,

    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,
}

fn validate_not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("Category name cannot be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Response DTO for a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
        }
    }
}

/// Query params for listing categories
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListQuery {
    /// Page number (0-indexed). Values that do not fit a 32-bit integer
    /// fail query binding with 400 INVALID_PARAMETER_FORMAT.
    #[serde(default)]
    #[param(minimum = 0)]
    #[validate(range(min = 0, message = "Page index must not be less than zero"))]
    pub page: i32,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    #[validate(range(
        min = 1,
        max = MAX_PAGE_SIZE,
        message = "Page size must be between 1 and 100"
    ))]
    pub size: i32,

    /// Field to sort by; unknown fields fall back to `name`
    #[serde(default = "default_sort_by")]
    #[param(example = "name")]
    pub sort_by: String,

    /// Sort direction, `asc` or `desc`
    #[serde(default = "default_sort_dir")]
    #[param(example = "asc")]
    #[validate(regex(
        path = *SORT_DIR_REGEX,
        message = "Sort direction must be 'asc' or 'desc'"
    ))]
    pub sort_dir: String,

    /// Case-insensitive name filter
    pub search: Option<String>,
}

fn default_page_size() -> i32 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    "name".to_string()
}

fn default_sort_dir() -> String {
    "asc".to_string()
}

impl CategoryListQuery {
    /// SQL column for the requested sort field. Unknown fields sort by
    /// name instead of failing.
    pub fn sort_column(&self) -> &'static str {
        match self.sort_by.as_str() {
            "id" => "id",
            "description" => "description",
            _ => "name",
        }
    }

    pub fn sort_direction(&self) -> &'static str {
        if self.sort_dir == "desc" {
            "DESC"
        } else {
            "ASC"
        }
    }

    /// SQL OFFSET for the requested page. Widening before the multiply
    /// keeps the product in range for any pair of 32-bit inputs.
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Trimmed search term; blank input means no filter
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(sort_by: &str, sort_dir: &str) -> CategoryListQuery {
        CategoryListQuery {
            page: 0,
            size: 10,
            sort_by: sort_by.to_string(),
            sort_dir: sort_dir.to_string(),
            search: None,
        }
    }

    #[test]
    fn known_sort_fields_map_to_their_columns() {
        assert_eq!(query("name", "asc").sort_column(), "name");
        assert_eq!(query("id", "asc").sort_column(), "id");
        assert_eq!(query("description", "asc").sort_column(), "description");
    }

    #[test]
    fn unknown_sort_field_falls_back_to_name() {
        assert_eq!(query("amount", "asc").sort_column(), "name");
        assert_eq!(query("", "asc").sort_column(), "name");
        assert_eq!(
            query("name; DROP TABLE categories", "asc").sort_column(),
            "name"
        );
    }

    #[test]
    fn sort_direction_maps_to_sql() {
        assert_eq!(query("name", "asc").sort_direction(), "ASC");
        assert_eq!(query("name", "desc").sort_direction(), "DESC");
    }

    #[test]
    fn invalid_sort_direction_is_rejected() {
        let errors = query("name", "sideways").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("sort_dir"));
    }

    #[test]
    fn page_and_size_bounds_are_validated() {
        let mut q = query("name", "asc");
        q.page = -1;
        assert!(q.validate().is_err());

        let mut q = query("name", "asc");
        q.size = 0;
        assert!(q.validate().is_err());

        let mut q = query("name", "asc");
        q.size = 101;
        assert!(q.validate().is_err());

        let mut q = query("name", "asc");
        q.size = 100;
        assert!(q.validate().is_ok());
    }

    #[test]
    fn offset_multiplies_page_by_size() {
        let mut q = query("name", "asc");
        q.page = 3;
        q.size = 20;
        assert_eq!(q.offset(), 60);
    }

    #[test]
    fn offset_stays_exact_at_the_largest_page() {
        let mut q = query("name", "asc");
        q.page = i32::MAX;
        q.size = 100;

        assert!(q.validate().is_ok());
        assert_eq!(q.offset(), i64::from(i32::MAX) * 100);
    }

    #[test]
    fn blank_search_is_ignored() {
        let mut q = query("name", "asc");
        q.search = Some("   ".to_string());
        assert_eq!(q.search_term(), None);

        q.search = Some("  food ".to_string());
        assert_eq!(q.search_term(), Some("food"));
    }

    #[test]
    fn request_rejects_blank_name_and_long_description() {
        let dto = CategoryRequestDto {
            name: "   ".to_string(),
            description: Some("x".repeat(1001)),
        };

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("description"));
    }

    #[test]
    fn name_length_limit_is_exactly_100() {
        let at_limit = CategoryRequestDto {
            name: "x".repeat(100),
            description: None,
        };
        assert!(at_limit.validate().is_ok());

        let over_limit = CategoryRequestDto {
            name: "x".repeat(101),
            description: None,
        };
        assert!(over_limit.validate().is_err());
    }

    #[test]
    fn request_accepts_minimal_payload() {
        let dto = CategoryRequestDto {
            name: "Groceries".to_string(),
            description: None,
        };
        assert!(dto.validate().is_ok());
    }
}
