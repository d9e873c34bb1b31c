use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use utoipa::ToSchema;

use crate::store::Entity;

/// A catalog product as stored. Fields absent from the document stay absent
/// and unknown fields are carried through rewrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub stock: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<Vec<String>>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

impl Entity for Product {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Field values for a product that does not have an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: Number,
    pub status: bool,
    pub stock: Number,
    pub category: String,
    pub thumbnails: Vec<String>,
}

impl Default for NewProduct {
    fn default() -> Self {
        Self {
            title: "Default Title".to_string(),
            description: "Default Description".to_string(),
            code: "00000".to_string(),
            price: Number::from(99u64),
            status: true,
            stock: Number::from(99u64),
            category: "None".to_string(),
            thumbnails: Vec::new(),
        }
    }
}

impl NewProduct {
    pub fn with_id(self, id: u64) -> Product {
        Product {
            id,
            title: Some(self.title),
            description: Some(self.description),
            code: Some(self.code),
            price: Some(self.price),
            status: Some(self.status),
            stock: Some(self.stock),
            category: Some(self.category),
            thumbnails: Some(self.thumbnails),
            extra: Map::new(),
        }
    }
}

/// Partial update; `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<Number>,
    pub status: Option<bool>,
    pub stock: Option<Number>,
    pub category: Option<String>,
    pub thumbnails: Option<Vec<String>>,
}

impl ProductPatch {
    pub fn apply_to(self, product: &mut Product) {
        if let Some(title) = self.title {
            product.title = Some(title);
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(code) = self.code {
            product.code = Some(code);
        }
        if let Some(price) = self.price {
            product.price = Some(price);
        }
        if let Some(status) = self.status {
            product.status = Some(status);
        }
        if let Some(stock) = self.stock {
            product.stock = Some(stock);
        }
        if let Some(category) = self.category {
            product.category = Some(category);
        }
        if let Some(thumbnails) = self.thumbnails {
            product.thumbnails = Some(thumbnails);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<LineItem>>,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

impl Entity for Cart {
    fn id(&self) -> u64 {
        self.id
    }
}

/// `product` is `None` for line items stored with a `null` product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub product: Option<u64>,
    pub quantity: u64,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    pub fn new(product: u64, quantity: u64) -> Self {
        Self {
            product: Some(product),
            quantity,
            extra: Map::new(),
        }
    }
}

impl Cart {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            products: Some(Vec::new()),
            extra: Map::new(),
        }
    }

    pub fn line_items(&self) -> &[LineItem] {
        self.products.as_deref().unwrap_or_default()
    }

    /// Adds one unit of `product`, collapsing onto an existing line item.
    pub fn add_unit(&mut self, product: u64) {
        let items = self.products.get_or_insert_with(Vec::new);
        match items.iter_mut().find(|item| item.product == Some(product)) {
            Some(item) => item.quantity += 1,
            None => items.push(LineItem::new(product, 1)),
        }
    }
}
