use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Cart, Product};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub message: String,
    pub product: Product,
}

impl ProductResponse {
    pub fn new(message: impl Into<String>, product: Product) -> Self {
        Self {
            message: message.into(),
            product,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub message: String,
    pub cart: Cart,
}

impl CartResponse {
    pub fn new(message: impl Into<String>, cart: Cart) -> Self {
        Self {
            message: message.into(),
            cart,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}
