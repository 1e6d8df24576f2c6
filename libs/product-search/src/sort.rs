//! Sort keys and ordering

use crate::model::Product;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Descending only for the exact value `desc`.
    pub fn parse(value: &str) -> Self {
        if value == "desc" {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Self::Ascending
    }
}

/// Product fields that can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    Stock,
    Category,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            "stock" => Some(Self::Stock),
            "category" => Some(Self::Category),
            "createdAt" | "created_at" => Some(Self::CreatedAt),
            "updatedAt" | "updated_at" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::Category => "category",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }
}

/// Resolved ordering: a field plus direction, with product id as tiebreaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Newest first.
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Without an explicit field the listing is newest first; the requested
    /// direction only applies to an explicit field.
    pub fn resolve(field: Option<SortField>, direction: SortDirection) -> Self {
        match field {
            Some(field) => Self::new(field, direction),
            None => Self::default(),
        }
    }

    /// Total order over products for this field and direction.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let by_field = match self.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Stock => a.stock.cmp(&b.stock),
            SortField::Category => a.category.cmp(&b.category),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        let ordering = by_field.then_with(|| a.id.cmp(&b.id));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}
