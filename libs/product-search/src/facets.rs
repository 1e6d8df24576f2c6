//! Facet aggregation
//!
//! Facets are grouped counts over every product matching a predicate:
//! one count per distinct category, and one count per price bucket.
//! Price buckets are the half-open intervals between consecutive
//! [`PRICE_BOUNDARIES`]; prices outside `[0, 5000)` land in
//! [`PriceBucket::Other`].

use crate::model::Product;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

pub const PRICE_BOUNDARIES: [u32; 5] = [0, 100, 500, 1000, 5000];

/// Price bucket, identified by its lower boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriceBucket {
    /// `[PRICE_BOUNDARIES[i], PRICE_BOUNDARIES[i + 1])`
    Range(usize),
    Other,
}

impl PriceBucket {
    /// Number of bounded buckets.
    pub const RANGES: usize = PRICE_BOUNDARIES.len() - 1;

    pub fn for_price(price: f64) -> Self {
        for i in 0..Self::RANGES {
            let lower = f64::from(PRICE_BOUNDARIES[i]);
            let upper = f64::from(PRICE_BOUNDARIES[i + 1]);
            if price >= lower && price < upper {
                return Self::Range(i);
            }
        }
        Self::Other
    }

    /// Bucket from a store-side index; anything out of range is `Other`.
    pub fn from_index(index: i32) -> Self {
        match usize::try_from(index) {
            Ok(i) if i < Self::RANGES => Self::Range(i),
            _ => Self::Other,
        }
    }

    pub fn lower_bound(&self) -> Option<u32> {
        match self {
            Self::Range(i) => Some(PRICE_BOUNDARIES[*i]),
            Self::Other => None,
        }
    }

    pub fn upper_bound(&self) -> Option<u32> {
        match self {
            Self::Range(i) => Some(PRICE_BOUNDARIES[*i + 1]),
            Self::Other => None,
        }
    }
}

impl Serialize for PriceBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.lower_bound() {
            Some(lower) => serializer.serialize_u32(lower),
            None => serializer.serialize_str("Other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRangeCount {
    pub bucket: PriceBucket,
    pub count: u64,
}

/// Category and price-bucket counts over a full match set.
///
/// Categories are sorted by name, buckets by boundary with `Other` last.
/// Zero counts are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSummary {
    pub categories: Vec<CategoryCount>,
    pub price_ranges: Vec<PriceRangeCount>,
}

impl FacetSummary {
    /// Normalize raw grouped counts from a store. Duplicate keys are merged.
    pub fn from_counts<C, P>(categories: C, price_ranges: P) -> Self
    where
        C: IntoIterator<Item = (String, u64)>,
        P: IntoIterator<Item = (PriceBucket, u64)>,
    {
        let mut acc = FacetAccumulator::default();
        for (category, count) in categories {
            *acc.categories.entry(category).or_default() += count;
        }
        for (bucket, count) in price_ranges {
            *acc.price_ranges.entry(bucket).or_default() += count;
        }
        acc.finish()
    }

    pub fn category_total(&self) -> u64 {
        self.categories.iter().map(|c| c.count).sum()
    }

    pub fn price_range_total(&self) -> u64 {
        self.price_ranges.iter().map(|p| p.count).sum()
    }

    pub fn category_count(&self, category: &str) -> u64 {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }

    pub fn bucket_count(&self, bucket: PriceBucket) -> u64 {
        self.price_ranges
            .iter()
            .find(|p| p.bucket == bucket)
            .map_or(0, |p| p.count)
    }
}

/// Single-pass facet builder for stores that evaluate in process.
#[derive(Debug, Default)]
pub struct FacetAccumulator {
    categories: BTreeMap<String, u64>,
    price_ranges: BTreeMap<PriceBucket, u64>,
}

impl FacetAccumulator {
    pub fn observe(&mut self, product: &Product) {
        *self.categories.entry(product.category.clone()).or_default() += 1;
        *self
            .price_ranges
            .entry(PriceBucket::for_price(product.price))
            .or_default() += 1;
    }

    pub fn finish(self) -> FacetSummary {
        FacetSummary {
            categories: self
                .categories
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
            price_ranges: self
                .price_ranges
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(bucket, count)| PriceRangeCount { bucket, count })
                .collect(),
        }
    }
}
