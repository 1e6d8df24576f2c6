use crate::support::*;
use marketplace_search::{ProductPatch, ProductRepository, StoreError};
use uuid::Uuid;

#[tokio::test]
async fn insert_then_read_round_trips() -> anyhow::Result<()> {
    with_pg_store(|pg| {
        Box::pin(async move {
            let mut product = phone_catalog().remove(0);
            product.product_image = Some("uploads/x.png".to_string());
            let seller = Uuid::new_v4();
            let product = owned_by(product, seller);

            let stored = pg.store.insert(product.clone()).await?;
            assert_eq!(stored, product);
            assert_eq!(pg.store.get(product.id).await?, Some(product.clone()));
            assert_eq!(pg.store.list_by_seller(seller).await?, vec![product]);
            assert!(pg.store.list_by_seller(Uuid::new_v4()).await?.is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn duplicate_ids_conflict() -> anyhow::Result<()> {
    with_pg_store(|pg| {
        Box::pin(async move {
            let product = phone_catalog().remove(0);
            pg.store.insert(product.clone()).await?;

            let err = pg.store.insert(product.clone()).await.unwrap_err();
            assert!(matches!(err, StoreError::Conflict(id) if id == product.id));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn list_all_is_newest_first() -> anyhow::Result<()> {
    with_pg_store(|pg| {
        Box::pin(async move {
            pg.seed(&phone_catalog()).await?;

            let names: Vec<String> = pg
                .store
                .list_all()
                .await?
                .into_iter()
                .map(|p| p.name)
                .collect();
            assert_eq!(
                names,
                vec!["Desk", "Laptop", "Charger", "Phone case", "Smartphone X"]
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_changes_only_present_fields() -> anyhow::Result<()> {
    with_pg_store(|pg| {
        Box::pin(async move {
            let product = owned_by(phone_catalog().remove(0), Uuid::new_v4());
            pg.store.insert(product.clone()).await?;

            let patch = ProductPatch {
                price: Some(749.0),
                stock: Some(0),
                ..Default::default()
            };
            let updated = pg.store.update(product.id, &patch).await?;

            assert_eq!(updated.price, 749.0);
            assert_eq!(updated.stock, 0);
            assert_eq!(updated.name, product.name);
            assert_eq!(updated.description, product.description);
            assert_eq!(updated.category, product.category);
            assert_eq!(updated.seller, product.seller);
            assert_eq!(updated.created_at, product.created_at);
            assert!(updated.updated_at > product.updated_at);
            assert_eq!(pg.store.get(product.id).await?, Some(updated));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn missing_rows_are_not_found() -> anyhow::Result<()> {
    with_pg_store(|pg| {
        Box::pin(async move {
            let missing = Uuid::new_v4();
            let patch = ProductPatch {
                name: Some("x".to_string()),
                ..Default::default()
            };

            assert!(pg.store.get(missing).await?.is_none());
            assert!(matches!(
                pg.store.update(missing, &patch).await,
                Err(StoreError::NotFound(id)) if id == missing
            ));
            assert!(matches!(
                pg.store.delete(missing).await,
                Err(StoreError::NotFound(id)) if id == missing
            ));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_returns_the_removed_row() -> anyhow::Result<()> {
    with_pg_store(|pg| {
        Box::pin(async move {
            let catalog = phone_catalog();
            pg.seed(&catalog).await?;

            let removed = pg.store.delete(catalog[1].id).await?;
            assert_eq!(removed, catalog[1]);
            assert!(pg.store.get(catalog[1].id).await?.is_none());
            assert_eq!(pg.store.list_all().await?.len(), catalog.len() - 1);
            Ok(())
        })
    })
    .await
}
