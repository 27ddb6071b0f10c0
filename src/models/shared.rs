use serde::{Deserialize, Deserializer, Serialize};

/// Pagination metadata included in list responses.
#[derive(Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 2)]
    pub current_page: u64,
    /// Total number of pages.
    #[schema(example = 3)]
    pub total_pages: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 25)]
    pub total_items: u64,
    /// Number of items per page.
    #[schema(example = 10)]
    pub items_per_page: u64,
    /// Whether a later page exists.
    #[schema(example = true)]
    pub has_next: bool,
    /// Whether an earlier page exists.
    #[schema(example = true)]
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(current_page: u64, items_per_page: u64, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(items_per_page.max(1));
        Pagination {
            current_page,
            total_pages,
            total_items,
            items_per_page,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}
