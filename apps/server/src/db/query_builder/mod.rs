//! SQL query builder for product searches.
//!
//! Translates a store-agnostic [`Predicate`] into a parameterized `WHERE`
//! clause over the `products` table, plus sorting, pagination and the two
//! facet aggregations. User values only ever travel as bind parameters.

use marketplace_search::{
    Condition, PageWindow, Predicate, SortDirection, SortField, SortSpec, PRICE_BOUNDARIES,
};
use uuid::Uuid;

mod bind;

use bind::{escape_like_pattern, push_count, push_float, push_text};

/// Columns read into a product row, in table order.
pub const PRODUCT_COLUMNS: &str = "id, name, description, price, stock, category, seller_id, product_image, created_at, updated_at";

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Float(f64),
    Int(i64),
    Uuid(Uuid),
}

/// Query builder for one predicate.
#[derive(Debug)]
pub struct QueryBuilder<'a> {
    predicate: &'a Predicate,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(predicate: &'a Predicate) -> Self {
        Self { predicate }
    }

    /// Page of matching rows.
    pub fn build_sql(&self, sort: &SortSpec, window: PageWindow) -> (String, Vec<BindValue>) {
        let mut sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE true");
        let mut bind_params = Vec::new();

        self.push_filters(&mut sql, &mut bind_params);
        push_order_by(&mut sql, sort);

        let limit_idx = push_count(&mut bind_params, window.limit);
        let offset_idx = push_count(&mut bind_params, window.offset);
        sql.push_str(&format!(" LIMIT ${limit_idx} OFFSET ${offset_idx}"));

        (sql, bind_params)
    }

    pub fn build_count_sql(&self) -> (String, Vec<BindValue>) {
        let mut sql = String::from("SELECT COUNT(*) FROM products WHERE true");
        let mut bind_params = Vec::new();
        self.push_filters(&mut sql, &mut bind_params);
        (sql, bind_params)
    }

    /// `(category, count)` rows over all matches.
    pub fn build_category_facet_sql(&self) -> (String, Vec<BindValue>) {
        let mut sql = String::from("SELECT category, COUNT(*) FROM products WHERE true");
        let mut bind_params = Vec::new();
        self.push_filters(&mut sql, &mut bind_params);
        sql.push_str(" GROUP BY category");
        (sql, bind_params)
    }

    /// `(bucket index, count)` rows over all matches; index -1 is "Other".
    pub fn build_price_facet_sql(&self) -> (String, Vec<BindValue>) {
        let mut sql = format!(
            "SELECT {} AS bucket, COUNT(*) FROM products WHERE true",
            price_bucket_expr()
        );
        let mut bind_params = Vec::new();
        self.push_filters(&mut sql, &mut bind_params);
        sql.push_str(" GROUP BY bucket");
        (sql, bind_params)
    }

    fn push_filters(&self, sql: &mut String, bind_params: &mut Vec<BindValue>) {
        for condition in self.predicate.conditions() {
            sql.push_str(" AND ");
            sql.push_str(&condition_clause(condition, bind_params));
        }
    }
}

fn condition_clause(condition: &Condition, bind_params: &mut Vec<BindValue>) -> String {
    match condition {
        Condition::Text(term) => {
            let idx = push_text(bind_params, format!("%{}%", escape_like_pattern(term)));
            format!(
                "(name ILIKE ${0} ESCAPE E'\\\\' OR description ILIKE ${0} ESCAPE E'\\\\')",
                idx
            )
        }
        Condition::PriceAtLeast(min) => format!("price >= ${}", push_float(bind_params, *min)),
        Condition::PriceAtMost(max) => format!("price <= ${}", push_float(bind_params, *max)),
        Condition::Category(category) => {
            format!("category = ${}", push_text(bind_params, category.clone()))
        }
        Condition::InStock => "stock > 0".to_string(),
        Condition::OutOfStock => "stock <= 0".to_string(),
    }
}

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Name => "name",
        SortField::Price => "price",
        SortField::Stock => "stock",
        SortField::Category => "category",
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "updated_at",
    }
}

/// Sort column then id, both in the requested direction, so pages are stable.
fn push_order_by(sql: &mut String, sort: &SortSpec) {
    let dir = match sort.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    sql.push_str(&format!(
        " ORDER BY {} {dir}, id {dir}",
        sort_column(sort.field)
    ));
}

/// Half-open `[lower, upper)` buckets over the fixed boundaries.
fn price_bucket_expr() -> String {
    let mut expr = String::from("CASE");
    for (i, bounds) in PRICE_BOUNDARIES.windows(2).enumerate() {
        expr.push_str(&format!(
            " WHEN price >= {} AND price < {} THEN {}",
            bounds[0], bounds[1], i
        ));
    }
    expr.push_str(" ELSE -1 END");
    expr
}
