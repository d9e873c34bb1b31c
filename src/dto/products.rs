use serde::Deserialize;
use serde_json::Number;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    ids::MAX_ID,
    models::{NewProduct, ProductPatch},
};

/// Every field is optional; omitted fields take the catalog defaults.
/// Accepted as JSON or as an urlencoded form (forms cannot carry `thumbnails`).
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub status: Option<bool>,
    pub stock: Option<f64>,
    pub category: Option<String>,
    pub thumbnails: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<f64>,
    pub status: Option<bool>,
    pub stock: Option<f64>,
    pub category: Option<String>,
    pub thumbnails: Option<Vec<String>>,
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> AppResult<NewProduct> {
        let defaults = NewProduct::default();
        Ok(NewProduct {
            title: self.title.unwrap_or(defaults.title),
            description: self.description.unwrap_or(defaults.description),
            code: self.code.unwrap_or(defaults.code),
            price: amount("price", self.price)?.unwrap_or(defaults.price),
            status: self.status.unwrap_or(defaults.status),
            stock: amount("stock", self.stock)?.unwrap_or(defaults.stock),
            category: self.category.unwrap_or(defaults.category),
            thumbnails: self.thumbnails.unwrap_or(defaults.thumbnails),
        })
    }
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> AppResult<ProductPatch> {
        Ok(ProductPatch {
            title: self.title,
            description: self.description,
            code: self.code,
            price: amount("price", self.price)?,
            status: self.status,
            stock: amount("stock", self.stock)?,
            category: self.category,
            thumbnails: self.thumbnails,
        })
    }
}

/// Non-negative amount, kept integral in the document when it is whole.
fn amount(field: &str, value: Option<f64>) -> AppResult<Option<Number>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let invalid = || AppError::BadRequest(format!("{field} must be a non-negative number"));
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    if value.fract() == 0.0 && value <= MAX_ID as f64 {
        return Ok(Some(Number::from(value as u64)));
    }
    Number::from_f64(value).map(Some).ok_or_else(invalid)
}
