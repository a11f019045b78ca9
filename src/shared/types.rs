use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Offset-based page of results returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on the requested page
    pub content: Vec<T>,
    /// Zero-based page index
    pub page: i64,
    /// Requested page size
    pub size: i64,
    /// Total number of matching items across all pages
    pub total_elements: i64,
    /// Total number of pages at the requested size
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: i64, size: i64, total_elements: i64) -> Self {
        let total_pages = if size > 0 {
            (total_elements + size - 1) / size
        } else {
            0
        };
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up_partial_pages() {
        let page = Page::new(vec![1, 2, 3], 0, 10, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 25);
    }

    #[test]
    fn total_pages_is_exact_on_full_pages() {
        let page = Page::new(vec![(); 10], 1, 10, 20);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<i32> = Page::new(vec![], 0, 10, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.content.is_empty());
    }
}
