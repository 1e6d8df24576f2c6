//! Search criteria and query-string parsing
//!
//! Parsing is deliberately permissive: malformed numbers, unknown sort
//! fields, and unrecognized stock states are treated as absent instead of
//! rejected. Query-string keys follow the public HTTP contract:
//! `search`, `minPrice`, `maxPrice`, `category`, `stock`, `sortBy`,
//! `sortOrder`, `page`, `limit`, `facets`.

use crate::sort::{SortDirection, SortField};

/// Stock availability filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockState {
    /// `stock > 0`
    InStock,
    /// `stock <= 0`
    OutOfStock,
}

impl StockState {
    /// Only the exact values `in` and `out` are recognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in" => Some(Self::InStock),
            "out" => Some(Self::OutOfStock),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in",
            Self::OutOfStock => "out",
        }
    }
}

/// Caller-supplied search criteria. Every field is optional; the default
/// value matches every product.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    /// Case-insensitive substring matched against name or description.
    pub text: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Exact category match.
    pub category: Option<String>,
    pub stock: Option<StockState>,
    pub sort_by: Option<SortField>,
    pub sort_direction: SortDirection,
    /// 1-based page number. Non-positive values fall back to the default.
    pub page: Option<i64>,
    /// Page size. Non-positive values fall back to the default.
    pub page_size: Option<i64>,
    /// Compute category and price-bucket facets alongside the page.
    pub include_facets: bool,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            text: None,
            min_price: None,
            max_price: None,
            category: None,
            stock: None,
            sort_by: None,
            sort_direction: SortDirection::Ascending,
            page: None,
            page_size: None,
            include_facets: true,
        }
    }
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build criteria from ordered query-string items (already percent-decoded).
    ///
    /// When a key repeats, the last occurrence wins. Unknown keys are ignored.
    pub fn from_query_items(items: &[(String, String)]) -> Self {
        let mut criteria = Self::default();

        for (key, value) in items {
            match key.as_str() {
                "search" => criteria.text = non_empty(value),
                "minPrice" => criteria.min_price = parse_price(value),
                "maxPrice" => criteria.max_price = parse_price(value),
                "category" => criteria.category = non_empty(value),
                "stock" => criteria.stock = StockState::parse(value),
                "sortBy" => criteria.sort_by = SortField::parse(value),
                "sortOrder" => criteria.sort_direction = SortDirection::parse(value),
                "page" => criteria.page = parse_integer(value),
                "limit" => criteria.page_size = parse_integer(value),
                "facets" => criteria.include_facets = !matches!(value.trim(), "false" | "0"),
                _ => {}
            }
        }

        criteria
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = non_empty(&text.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(&category.into());
        self
    }

    pub fn with_stock(mut self, stock: StockState) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn with_sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_by = Some(field);
        self.sort_direction = direction;
        self
    }

    pub fn with_page(mut self, page: i64, page_size: i64) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn without_facets(mut self) -> Self {
        self.include_facets = false;
        self
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Numeric price filter. Anything that is not a finite number is absent.
pub(crate) fn parse_price(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}
