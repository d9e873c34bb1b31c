use crate::{
    config::AppConfig,
    repositories::{CartRepository, ProductRepository},
    store::{JsonFileStore, PathLocks},
};

#[derive(Clone)]
pub struct AppState {
    pub products: ProductRepository<JsonFileStore>,
    pub carts: CartRepository<JsonFileStore>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        let locks = PathLocks::new();
        Self {
            products: ProductRepository::new(JsonFileStore::with_locks(
                config.products_file.clone(),
                &locks,
            )),
            carts: CartRepository::new(JsonFileStore::with_locks(
                config.carts_file.clone(),
                &locks,
            )),
        }
    }
}
