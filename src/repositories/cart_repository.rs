use std::sync::Arc;

use tracing::debug;

use crate::{
    ids::{coerce_id, max_plus_one},
    models::Cart,
    store::{self, DocumentStore, Stored},
};

use super::{RepoError, RepoResult};

/// Cart collection. Ids are never reused.
pub struct CartRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for CartRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore> CartRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn create(&self) -> RepoResult<Cart> {
        let _guard = self.store.lock().await;
        let mut carts: Vec<Stored<Cart>> = store::load(self.store.as_ref()).await?;

        let id = max_plus_one(carts.iter().filter_map(Stored::id))
            .ok_or(RepoError::IdsExhausted { kind: "cart" })?;
        let cart = Cart::new(id);
        carts.push(Stored::Entity(cart.clone()));

        store::save(self.store.as_ref(), &carts).await?;
        debug!(cart_id = id, "cart created");
        Ok(cart)
    }

    pub async fn get_by_id(&self, id: &str) -> RepoResult<Option<Cart>> {
        let Some(id) = coerce_id(id) else {
            return Ok(None);
        };
        let carts: Vec<Stored<Cart>> = store::load(self.store.as_ref()).await?;
        Ok(carts
            .into_iter()
            .filter_map(Stored::into_entity)
            .find(|cart| cart.id == id))
    }

    /// Add one unit of `product_id` to the cart. A missing cart wins over a
    /// malformed product id; the product id is not checked against the
    /// product collection.
    pub async fn add_line_item(&self, cart_id: &str, product_id: &str) -> RepoResult<Option<Cart>> {
        let Some(cart_id) = coerce_id(cart_id) else {
            return Ok(None);
        };

        let _guard = self.store.lock().await;
        let mut carts: Vec<Stored<Cart>> = store::load(self.store.as_ref()).await?;

        let Some(cart) = carts
            .iter_mut()
            .filter_map(Stored::entity_mut)
            .find(|cart| cart.id == cart_id)
        else {
            return Ok(None);
        };
        let product = coerce_id(product_id).ok_or_else(|| RepoError::InvalidId {
            kind: "product",
            raw: product_id.to_string(),
        })?;
        cart.add_unit(product);
        let updated = cart.clone();

        store::save(self.store.as_ref(), &carts).await?;
        debug!(cart_id, product_id = product, "cart line item added");
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::{ids::MAX_ID, models::LineItem, store::MemoryStore};

    use super::*;

    fn repo_with_ids(ids: &[u64]) -> CartRepository<MemoryStore> {
        let carts: Vec<Cart> = ids.iter().map(|&id| Cart::new(id)).collect();
        let text = store::encode_collection(&carts).unwrap();
        CartRepository::new(MemoryStore::with_contents(text))
    }

    #[tokio::test]
    async fn create_uses_max_plus_one() {
        let repo = repo_with_ids(&[1, 3]);
        let cart = repo.create().await.unwrap();
        assert_eq!(cart.id, 4);
        assert!(cart.line_items().is_empty());

        let repo = repo_with_ids(&[]);
        assert_eq!(repo.create().await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn non_array_document_starts_fresh() {
        let repo = CartRepository::new(MemoryStore::with_contents("{\"carts\": []}"));
        assert_eq!(repo.create().await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn create_keeps_carts_it_cannot_read() {
        let stored = json!([
            {"id": 1, "products": [{"product": null, "quantity": 1}]},
            {"id": 2, "products": "none"},
            {"id": 3, "products": [], "owner": "sam"}
        ]);
        let repo = CartRepository::new(MemoryStore::with_contents(stored.to_string()));

        assert_eq!(repo.create().await.unwrap().id, 4);

        let document: Value = serde_json::from_str(&repo.store().contents().unwrap()).unwrap();
        let entries = document.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[..3], stored.as_array().unwrap()[..]);
        assert_eq!(entries[3], json!({"id": 4, "products": []}));
    }

    #[tokio::test]
    async fn create_fails_once_ids_run_out() {
        let repo = repo_with_ids(&[MAX_ID]);
        let err = repo.create().await.unwrap_err();

        assert!(matches!(err, RepoError::IdsExhausted { kind: "cart" }));
        assert_eq!(repo.store().writes(), 0);
    }

    #[tokio::test]
    async fn adding_same_product_twice_increments_quantity() {
        let repo = repo_with_ids(&[1]);
        repo.add_line_item("1", "7").await.unwrap().unwrap();
        let cart = repo.add_line_item("1", "7").await.unwrap().unwrap();

        assert_eq!(cart.line_items(), [LineItem::new(7, 2)]);
        assert_eq!(repo.get_by_id("1").await.unwrap().unwrap(), cart);
    }

    #[tokio::test]
    async fn adding_to_missing_cart_is_not_found() {
        let repo = repo_with_ids(&[1]);

        assert!(repo.add_line_item("2", "7").await.unwrap().is_none());
        assert!(repo.add_line_item("abc", "7").await.unwrap().is_none());
        assert_eq!(repo.store().writes(), 0);
        assert!(repo.get_by_id("2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_cart_wins_over_bad_product_id() {
        let repo = CartRepository::new(MemoryStore::with_contents("[]"));

        assert!(repo.add_line_item("99", "abc").await.unwrap().is_none());
        assert!(repo.add_line_item("x", "abc").await.unwrap().is_none());
        assert_eq!(repo.store().writes(), 0);
    }

    #[tokio::test]
    async fn invalid_product_id_is_rejected() {
        let repo = repo_with_ids(&[1]);
        let err = repo.add_line_item("1", "nope").await.unwrap_err();

        assert!(matches!(err, RepoError::InvalidId { kind: "product", .. }));
        assert_eq!(repo.store().writes(), 0);
    }

    #[tokio::test]
    async fn adding_keeps_unknown_line_item_fields() {
        let repo = CartRepository::new(MemoryStore::with_contents(
            r#"[{"id": 1, "products": [{"product": 7, "quantity": 1, "note": "gift"}]}]"#,
        ));
        repo.add_line_item("1", "7").await.unwrap().unwrap();

        let document: Value = serde_json::from_str(&repo.store().contents().unwrap()).unwrap();
        assert_eq!(
            document,
            json!([{"id": 1, "products": [{"product": 7, "quantity": 2, "note": "gift"}]}])
        );
    }

    #[tokio::test]
    async fn get_by_id_ignores_non_numeric_ids() {
        let repo = repo_with_ids(&[1]);
        assert!(repo.get_by_id("1").await.unwrap().is_some());
        assert!(repo.get_by_id("one").await.unwrap().is_none());
    }
}
