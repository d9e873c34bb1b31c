use std::sync::Arc;

use tracing::debug;

use crate::{
    ids::{coerce_id, smallest_unused},
    models::{NewProduct, Product, ProductPatch},
    store::{self, DocumentStore, Stored},
};

use super::RepoResult;

/// Product collection. Every call re-reads the document; mutators hold the
/// store's write gate from load to save. Entries that do not decode as a
/// product are written back untouched and only take part in id allocation.
pub struct ProductRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for ProductRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore> ProductRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The collection as stored, undecodable entries included.
    pub async fn list(&self) -> RepoResult<Vec<Stored<Product>>> {
        Ok(store::load(self.store.as_ref()).await?)
    }

    pub async fn get_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let Some(id) = coerce_id(id) else {
            return Ok(None);
        };
        let products = self.list().await?;
        Ok(products
            .into_iter()
            .filter_map(Stored::into_entity)
            .find(|product| product.id == id))
    }

    pub async fn create(&self, new: NewProduct) -> RepoResult<Product> {
        let _guard = self.store.lock().await;
        let mut products: Vec<Stored<Product>> = store::load(self.store.as_ref()).await?;

        let id = smallest_unused(products.iter().filter_map(Stored::id));
        let product = new.with_id(id);
        products.push(Stored::Entity(product.clone()));

        store::save(self.store.as_ref(), &products).await?;
        debug!(product_id = id, "product created");
        Ok(product)
    }

    pub async fn update(&self, id: &str, patch: ProductPatch) -> RepoResult<Option<Product>> {
        let Some(id) = coerce_id(id) else {
            return Ok(None);
        };
        let _guard = self.store.lock().await;
        let mut products: Vec<Stored<Product>> = store::load(self.store.as_ref()).await?;

        let Some(product) = products
            .iter_mut()
            .filter_map(Stored::entity_mut)
            .find(|product| product.id == id)
        else {
            return Ok(None);
        };
        patch.apply_to(product);
        let updated = product.clone();

        store::save(self.store.as_ref(), &products).await?;
        debug!(product_id = id, "product updated");
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<Option<Product>> {
        let Some(id) = coerce_id(id) else {
            return Ok(None);
        };
        let _guard = self.store.lock().await;
        let mut products: Vec<Stored<Product>> = store::load(self.store.as_ref()).await?;

        let Some(index) = products
            .iter()
            .position(|stored| stored.entity().is_some_and(|product| product.id == id))
        else {
            return Ok(None);
        };
        let removed = products.remove(index);

        store::save(self.store.as_ref(), &products).await?;
        debug!(product_id = id, "product deleted");
        Ok(removed.into_entity())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Number, Value, json};

    use crate::store::MemoryStore;

    use super::*;

    fn repo_with_ids(ids: &[u64]) -> ProductRepository<MemoryStore> {
        let products: Vec<Product> = ids
            .iter()
            .map(|&id| NewProduct::default().with_id(id))
            .collect();
        let text = store::encode_collection(&products).unwrap();
        ProductRepository::new(MemoryStore::with_contents(text))
    }

    fn stored_ids(repo: &ProductRepository<MemoryStore>) -> Vec<Value> {
        let document: Value = serde_json::from_str(&repo.store().contents().unwrap()).unwrap();
        document
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["id"].clone())
            .collect()
    }

    #[tokio::test]
    async fn create_fills_the_first_gap() {
        let repo = repo_with_ids(&[1, 2, 4]);
        let product = repo.create(NewProduct::default()).await.unwrap();
        assert_eq!(product.id, 3);

        let repo = repo_with_ids(&[1, 2, 3]);
        assert_eq!(repo.create(NewProduct::default()).await.unwrap().id, 4);

        let repo = repo_with_ids(&[]);
        assert_eq!(repo.create(NewProduct::default()).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn create_applies_defaults_and_appends() {
        let repo = repo_with_ids(&[2]);
        let product = repo.create(NewProduct::default()).await.unwrap();

        assert_eq!(product.title.as_deref(), Some("Default Title"));
        assert_eq!(product.description.as_deref(), Some("Default Description"));
        assert_eq!(product.code.as_deref(), Some("00000"));
        assert_eq!(product.price, Some(Number::from(99u64)));
        assert_eq!(product.status, Some(true));
        assert_eq!(product.stock, Some(Number::from(99u64)));
        assert_eq!(product.category.as_deref(), Some("None"));
        assert_eq!(product.thumbnails, Some(Vec::new()));

        assert_eq!(stored_ids(&repo), vec![json!(2), json!(1)]);
    }

    #[tokio::test]
    async fn get_by_id_coerces_and_rejects_garbage() {
        let repo = repo_with_ids(&[1, 5]);

        assert_eq!(repo.get_by_id("5").await.unwrap().unwrap().id, 5);
        assert_eq!(repo.get_by_id(" 5.0 ").await.unwrap().unwrap().id, 5);
        assert!(repo.get_by_id("6").await.unwrap().is_none());
        assert!(repo.get_by_id("five").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_sets_only_supplied_fields() {
        let repo = repo_with_ids(&[1, 2]);
        let before = repo.get_by_id("1").await.unwrap().unwrap();

        let patch = ProductPatch {
            price: Some(Number::from(50u64)),
            ..Default::default()
        };
        let updated = repo.update("1", patch).await.unwrap().unwrap();

        assert_eq!(
            updated,
            Product {
                price: Some(Number::from(50u64)),
                ..before
            }
        );
        assert_eq!(repo.get_by_id("1").await.unwrap().unwrap(), updated);
        assert_eq!(
            repo.get_by_id("2").await.unwrap().unwrap().price,
            Some(Number::from(99u64))
        );
    }

    #[tokio::test]
    async fn update_keeps_fields_it_does_not_know() {
        let repo = ProductRepository::new(MemoryStore::with_contents(
            r#"[{"id": 1, "title": "Mug", "color": "blue", "tags": ["kitchen"]}]"#,
        ));
        let patch = ProductPatch {
            stock: Number::from_f64(2.5),
            ..Default::default()
        };
        repo.update("1", patch).await.unwrap().unwrap();

        let document: Value = serde_json::from_str(&repo.store().contents().unwrap()).unwrap();
        assert_eq!(
            document,
            json!([{"id": 1, "title": "Mug", "color": "blue", "tags": ["kitchen"], "stock": 2.5}])
        );
    }

    #[tokio::test]
    async fn list_returns_entries_as_stored() {
        let stored = json!([
            {"id": 1, "title": "Mug", "extra": true},
            {"id": 2, "title": 42}
        ]);
        let repo = ProductRepository::new(MemoryStore::with_contents(stored.to_string()));

        let listed = serde_json::to_value(repo.list().await.unwrap()).unwrap();
        assert_eq!(listed, stored);
    }

    #[tokio::test]
    async fn undecodable_entries_survive_mutations() {
        let stored = json!([
            {"id": 1, "title": "Mug", "stock": 2.5},
            {"id": 2, "title": 42},
            {"id": "3", "title": "String id"}
        ]);
        let repo = ProductRepository::new(MemoryStore::with_contents(stored.to_string()));

        let created = repo.create(NewProduct::default()).await.unwrap();
        assert_eq!(created.id, 3);
        assert_eq!(repo.get_by_id("1").await.unwrap().unwrap().stock, Number::from_f64(2.5));

        let document: Value = serde_json::from_str(&repo.store().contents().unwrap()).unwrap();
        let entries = document.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[..3], stored.as_array().unwrap()[..]);
    }

    #[tokio::test]
    async fn update_missing_product_does_not_write() {
        let repo = repo_with_ids(&[1]);
        let result = repo.update("9", ProductPatch::default()).await.unwrap();

        assert!(result.is_none());
        assert_eq!(repo.store().writes(), 0);
    }

    #[tokio::test]
    async fn delete_removes_and_returns_product() {
        let repo = repo_with_ids(&[1, 2, 3]);
        let removed = repo.delete("2").await.unwrap().unwrap();

        assert_eq!(removed.id, 2);
        assert_eq!(stored_ids(&repo), vec![json!(1), json!(3)]);

        // The freed id is handed out again.
        assert_eq!(repo.create(NewProduct::default()).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn delete_missing_product_does_not_write() {
        let repo = repo_with_ids(&[1]);
        let before = repo.store().contents();

        assert!(repo.delete("7").await.unwrap().is_none());
        assert!(repo.delete("x").await.unwrap().is_none());
        assert_eq!(repo.store().writes(), 0);
        assert_eq!(repo.store().contents(), before);
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let repo = repo_with_ids(&[]);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(NewProduct::default()).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
        assert_eq!(repo.list().await.unwrap().len(), 8);
    }
}
