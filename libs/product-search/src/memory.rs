//! In-memory product and cart store

use crate::cart::Cart;
use crate::facets::{FacetAccumulator, FacetSummary};
use crate::model::{Product, ProductPatch};
use crate::pagination::PageWindow;
use crate::predicate::Predicate;
use crate::sort::SortSpec;
use crate::store::{CartStore, ProductRepository, ProductStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Product store backed by a vector behind an async read/write lock.
///
/// Predicates are evaluated with [`Predicate::matches`], so this store is the
/// reference for how other stores must behave.
///
/// Locks are always taken products first, then carts.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
    carts: RwLock<HashMap<Uuid, Cart>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: RwLock::new(products.into_iter().collect()),
            carts: RwLock::default(),
        }
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

fn clamp_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn newest_first(products: &mut [Product]) {
    let sort = SortSpec::default();
    products.sort_by(|a, b| sort.compare(a, b));
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn count(&self, predicate: &Predicate) -> StoreResult<u64> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| predicate.matches(p)).count() as u64)
    }

    async fn find_page(
        &self,
        predicate: &Predicate,
        sort: &SortSpec,
        window: PageWindow,
    ) -> StoreResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut matched: Vec<&Product> = products.iter().filter(|p| predicate.matches(p)).collect();
        matched.sort_by(|a, b| sort.compare(a, b));

        Ok(matched
            .into_iter()
            .skip(clamp_usize(window.offset))
            .take(clamp_usize(window.limit))
            .cloned()
            .collect())
    }

    async fn facets(&self, predicate: &Predicate) -> StoreResult<FacetSummary> {
        let products = self.products.read().await;
        let mut acc = FacetAccumulator::default();
        for product in products.iter().filter(|p| predicate.matches(p)) {
            acc.observe(product);
        }
        Ok(acc.finish())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductStore {
    async fn list_all(&self) -> StoreResult<Vec<Product>> {
        let mut all = self.products.read().await.clone();
        newest_first(&mut all);
        Ok(all)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_by_seller(&self, seller: Uuid) -> StoreResult<Vec<Product>> {
        let mut owned: Vec<Product> = self
            .products
            .read()
            .await
            .iter()
            .filter(|p| p.seller == Some(seller))
            .cloned()
            .collect();
        newest_first(&mut owned);
        Ok(owned)
    }

    async fn insert(&self, product: Product) -> StoreResult<Product> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::Conflict(product.id));
        }
        products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: Uuid, patch: &ProductPatch) -> StoreResult<Product> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        patch.apply(product, Utc::now());
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Product> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = products.remove(index);

        let mut carts = self.carts.write().await;
        for cart in carts.values_mut() {
            cart.remove_product(id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl CartStore for InMemoryProductStore {
    async fn get_cart(&self, user: Uuid) -> StoreResult<Option<Cart>> {
        Ok(self.carts.read().await.get(&user).cloned())
    }

    async fn add_to_cart(&self, user: Uuid, product: Uuid, quantity: i64) -> StoreResult<Cart> {
        // Held across the cart write so the product cannot vanish mid-add.
        let products = self.products.read().await;
        if !products.iter().any(|p| p.id == product) {
            return Err(StoreError::NotFound(product));
        }

        let now = Utc::now();
        let mut carts = self.carts.write().await;
        let cart = carts.entry(user).or_insert_with(|| Cart::new(user, now));
        cart.add(product, quantity, now);
        Ok(cart.clone())
    }
}
