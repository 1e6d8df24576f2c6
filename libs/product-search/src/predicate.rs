//! Store-agnostic filter predicates
//!
//! A [`Predicate`] is a conjunction of [`Condition`]s. Stores either evaluate
//! it in process ([`Predicate::matches`]) or translate each condition into
//! their own query language.

use crate::criteria::{SearchCriteria, StockState};
use crate::model::Product;

/// A single filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Term appears in name OR description, ignoring case.
    Text(String),
    /// `price >= value`
    PriceAtLeast(f64),
    /// `price <= value`
    PriceAtMost(f64),
    /// Exact category match.
    Category(String),
    /// `stock > 0`
    InStock,
    /// `stock <= 0`
    OutOfStock,
}

impl Condition {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Condition::Text(term) => {
                let needle = term.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            }
            Condition::PriceAtLeast(min) => product.price >= *min,
            Condition::PriceAtMost(max) => product.price <= *max,
            Condition::Category(category) => product.category == *category,
            Condition::InStock => product.stock > 0,
            Condition::OutOfStock => product.stock <= 0,
        }
    }
}

/// Conditions combined with AND. The empty predicate matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    /// Matches every product.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build the predicate for `criteria`. Each present criterion contributes
    /// one condition, independent of the others.
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        let mut predicate = Self::all();

        if let Some(term) = criteria.text.as_deref().filter(|t| !t.is_empty()) {
            predicate = predicate.and(Condition::Text(term.to_string()));
        }
        if let Some(min) = criteria.min_price.filter(|v| v.is_finite()) {
            predicate = predicate.and(Condition::PriceAtLeast(min));
        }
        if let Some(max) = criteria.max_price.filter(|v| v.is_finite()) {
            predicate = predicate.and(Condition::PriceAtMost(max));
        }
        if let Some(category) = criteria.category.as_deref().filter(|c| !c.is_empty()) {
            predicate = predicate.and(Condition::Category(category.to_string()));
        }
        match criteria.stock {
            Some(StockState::InStock) => predicate = predicate.and(Condition::InStock),
            Some(StockState::OutOfStock) => predicate = predicate.and(Condition::OutOfStock),
            None => {}
        }

        predicate
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.conditions.iter().all(|c| c.matches(product))
    }
}
