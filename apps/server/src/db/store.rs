//! PostgreSQL-backed product and cart store

use super::query_builder::{BindValue, QueryBuilder, PRODUCT_COLUMNS};
use crate::metrics;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marketplace_search::{
    Cart, CartItem, CartStore, FacetSummary, PageWindow, PriceBucket, Predicate, Product,
    ProductPatch, ProductRepository, ProductStore, SortSpec, StoreError, StoreResult,
};
use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::{PgConnection, PgPool, Postgres};
use std::future::Future;
use std::time::Instant;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    price: f64,
    stock: i64,
    category: String,
    seller_id: Option<Uuid>,
    product_image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            stock: row.stock,
            category: row.category,
            seller: row.seller_id,
            product_image: row.product_image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn bind_as<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    bind_values: Vec<BindValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in bind_values {
        query = match value {
            BindValue::Text(v) => query.bind(v),
            BindValue::Float(v) => query.bind(v),
            BindValue::Int(v) => query.bind(v),
            BindValue::Uuid(v) => query.bind(v),
        };
    }
    query
}

fn bind_scalar<'q, O>(
    mut query: QueryScalar<'q, Postgres, O, PgArguments>,
    bind_values: Vec<BindValue>,
) -> QueryScalar<'q, Postgres, O, PgArguments> {
    for value in bind_values {
        query = match value {
            BindValue::Text(v) => query.bind(v),
            BindValue::Float(v) => query.bind(v),
            BindValue::Int(v) => query.bind(v),
            BindValue::Uuid(v) => query.bind(v),
        };
    }
    query
}

fn error_type(err: &sqlx::Error) -> &'static str {
    match err {
        sqlx::Error::PoolTimedOut => "pool_timeout",
        sqlx::Error::PoolClosed => "pool_closed",
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => "connection",
        sqlx::Error::Database(_) => "database",
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => "decode",
        _ => "other",
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(err.to_string()),
        other => StoreError::Query(other.to_string()),
    }
}

/// Run one query, recording its duration and any failure under `query_type`.
async fn timed<T, F>(query_type: &'static str, query: F) -> Result<T, sqlx::Error>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    let start = Instant::now();
    let result = query.await;
    metrics::DB_QUERY_DURATION_SECONDS
        .with_label_values(&[query_type])
        .observe(start.elapsed().as_secs_f64());

    if let Err(e) = &result {
        metrics::DB_QUERY_ERRORS_TOTAL
            .with_label_values(&[query_type, error_type(e)])
            .inc();
        tracing::warn!(query_type, error = %e, "Product query failed");
    }
    result
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

async fn load_cart(conn: &mut PgConnection, user: Uuid) -> Result<Option<Cart>, sqlx::Error> {
    let header: Option<(DateTime<Utc>, DateTime<Utc>)> =
        sqlx::query_as("SELECT created_at, updated_at FROM carts WHERE user_id = $1")
            .bind(user)
            .fetch_optional(&mut *conn)
            .await?;
    let Some((created_at, updated_at)) = header else {
        return Ok(None);
    };

    let lines: Vec<(Uuid, i64)> = sqlx::query_as(
        "SELECT product_id, quantity FROM cart_items WHERE user_id = $1 ORDER BY line_no",
    )
    .bind(user)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(Cart {
        user,
        items: lines
            .into_iter()
            .map(|(product, quantity)| CartItem { product, quantity })
            .collect(),
        created_at,
        updated_at,
    }))
}

/// Upsert the cart and merge the line in one transaction.
async fn upsert_cart_line(
    pool: &PgPool,
    user: Uuid,
    product: Uuid,
    quantity: i64,
) -> Result<Cart, sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO carts (user_id, created_at, updated_at) VALUES ($1, $2, $2) \
         ON CONFLICT (user_id) DO UPDATE SET updated_at = EXCLUDED.updated_at",
    )
    .bind(user)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO cart_items (user_id, product_id, quantity) VALUES ($1, $2, $3) \
         ON CONFLICT (user_id, product_id) \
         DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity",
    )
    .bind(user)
    .bind(product)
    .bind(quantity)
    .execute(&mut *tx)
    .await?;

    let cart = load_cart(&mut *tx, user).await?.ok_or(sqlx::Error::RowNotFound)?;
    tx.commit().await?;
    Ok(cart)
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn count(&self, predicate: &Predicate) -> StoreResult<u64> {
        let (sql, bind_values) = QueryBuilder::new(predicate).build_count_sql();
        let query = bind_scalar(sqlx::query_scalar::<_, i64>(&sql), bind_values);

        let total = timed("search_count", query.fetch_one(&self.pool))
            .await
            .map_err(map_sqlx_error)?;
        Ok(to_count(total))
    }

    async fn find_page(
        &self,
        predicate: &Predicate,
        sort: &SortSpec,
        window: PageWindow,
    ) -> StoreResult<Vec<Product>> {
        let (sql, bind_values) = QueryBuilder::new(predicate).build_sql(sort, window);
        let query = bind_as(sqlx::query_as::<_, ProductRow>(&sql), bind_values);

        let rows = timed("search_page", query.fetch_all(&self.pool))
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn facets(&self, predicate: &Predicate) -> StoreResult<FacetSummary> {
        let builder = QueryBuilder::new(predicate);
        let (category_sql, category_binds) = builder.build_category_facet_sql();
        let (price_sql, price_binds) = builder.build_price_facet_sql();

        let category_query = bind_as(
            sqlx::query_as::<_, (String, i64)>(&category_sql),
            category_binds,
        );
        let price_query = bind_as(sqlx::query_as::<_, (i32, i64)>(&price_sql), price_binds);

        let (categories, prices) = tokio::try_join!(
            timed("facet_categories", category_query.fetch_all(&self.pool)),
            timed("facet_prices", price_query.fetch_all(&self.pool)),
        )
        .map_err(map_sqlx_error)?;

        Ok(FacetSummary::from_counts(
            categories
                .into_iter()
                .map(|(category, count)| (category, to_count(count))),
            prices
                .into_iter()
                .map(|(index, count)| (PriceBucket::from_index(index), to_count(count))),
        ))
    }
}

#[async_trait]
impl ProductRepository for PostgresProductStore {
    async fn list_all(&self) -> StoreResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC, id DESC");
        let rows = timed(
            "list",
            sqlx::query_as::<_, ProductRow>(&sql).fetch_all(&self.pool),
        )
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = timed(
            "read",
            sqlx::query_as::<_, ProductRow>(&sql)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.map(Product::from))
    }

    async fn list_by_seller(&self, seller: Uuid) -> StoreResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE seller_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        let rows = timed(
            "list_by_seller",
            sqlx::query_as::<_, ProductRow>(&sql)
                .bind(seller)
                .fetch_all(&self.pool),
        )
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn insert(&self, product: Product) -> StoreResult<Product> {
        let id = product.id;
        let sql = format!(
            "INSERT INTO products ({PRODUCT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let result = timed(
            "create",
            sqlx::query_as::<_, ProductRow>(&sql)
                .bind(product.id)
                .bind(product.name)
                .bind(product.description)
                .bind(product.price)
                .bind(product.stock)
                .bind(product.category)
                .bind(product.seller)
                .bind(product.product_image)
                .bind(product.created_at)
                .bind(product.updated_at)
                .fetch_one(&self.pool),
        )
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::Conflict(id))
            }
            Err(e) => Err(map_sqlx_error(e)),
        }
    }

    async fn update(&self, id: Uuid, patch: &ProductPatch) -> StoreResult<Product> {
        let sql = format!(
            "UPDATE products SET \
             name = COALESCE($2, name), \
             description = COALESCE($3, description), \
             price = COALESCE($4, price), \
             stock = COALESCE($5, stock), \
             category = COALESCE($6, category), \
             product_image = COALESCE($7, product_image), \
             updated_at = $8 \
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );
        let row = timed(
            "update",
            sqlx::query_as::<_, ProductRow>(&sql)
                .bind(id)
                .bind(patch.name.clone())
                .bind(patch.description.clone())
                .bind(patch.price)
                .bind(patch.stock)
                .bind(patch.category.clone())
                .bind(patch.product_image.clone())
                .bind(Utc::now())
                .fetch_optional(&self.pool),
        )
        .await
        .map_err(map_sqlx_error)?;

        row.map(Product::from).ok_or(StoreError::NotFound(id))
    }

    // Cart lines go with the product via ON DELETE CASCADE.
    async fn delete(&self, id: Uuid) -> StoreResult<Product> {
        let sql = format!("DELETE FROM products WHERE id = $1 RETURNING {PRODUCT_COLUMNS}");
        let row = timed(
            "delete",
            sqlx::query_as::<_, ProductRow>(&sql)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await
        .map_err(map_sqlx_error)?;

        row.map(Product::from).ok_or(StoreError::NotFound(id))
    }
}

#[async_trait]
impl CartStore for PostgresProductStore {
    async fn get_cart(&self, user: Uuid) -> StoreResult<Option<Cart>> {
        let result = timed("cart_read", async {
            let mut conn = self.pool.acquire().await?;
            load_cart(&mut *conn, user).await
        })
        .await;
        result.map_err(map_sqlx_error)
    }

    async fn add_to_cart(&self, user: Uuid, product: Uuid, quantity: i64) -> StoreResult<Cart> {
        let result = timed(
            "cart_add",
            upsert_cart_line(&self.pool, user, product, quantity),
        )
        .await;

        match result {
            Ok(cart) => Ok(cart),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(StoreError::NotFound(product))
            }
            Err(e) => Err(map_sqlx_error(e)),
        }
    }
}
