use thiserror::Error;

use crate::store::StoreError;

pub mod cart_repository;
pub mod product_repository;

pub use cart_repository::CartRepository;
pub use product_repository::ProductRepository;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid {kind} id {raw:?}")]
    InvalidId { kind: &'static str, raw: String },

    #[error("no {kind} ids left to allocate")]
    IdsExhausted { kind: &'static str },
}

/// Not-found is `Ok(None)`; only storage failures and unusable input are errors.
pub type RepoResult<T> = Result<T, RepoError>;
