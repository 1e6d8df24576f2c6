//! Page-number pagination math

/// Default page number when absent or non-positive.
pub const DEFAULT_PAGE: u64 = 1;
/// Default page size when absent or non-positive.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Page size bounds applied during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_page_size: u64,
    /// Optional cap on requested sizes. `None` honors any size as given.
    pub max_page_size: Option<u64>,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: None,
        }
    }
}

/// A normalized page request. `page` and `page_size` are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

/// Offset/limit slice handed to the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Normalize raw page inputs.
    ///
    /// Absent or non-positive values take the defaults. When a maximum is
    /// configured, larger sizes are clamped to it.
    pub fn normalize(page: Option<i64>, page_size: Option<i64>, limits: PageLimits) -> Self {
        let default_size = limits.default_page_size.max(1);

        let page = positive(page).unwrap_or(DEFAULT_PAGE);
        let mut page_size = positive(page_size).unwrap_or(default_size);
        if let Some(max_size) = limits.max_page_size {
            page_size = page_size.min(max_size.max(1));
        }

        Self { page, page_size }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: self.offset(),
            limit: self.page_size,
        }
    }

    /// `ceil(total / page_size)`; zero when nothing matched.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size)
    }
}

fn positive(value: Option<i64>) -> Option<u64> {
    value.filter(|v| *v > 0).map(|v| v as u64)
}
