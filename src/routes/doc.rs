use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    models::{Cart, LineItem, Product},
    response::{CartResponse, ErrorBody, ProductResponse},
    routes::{carts, health, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        carts::create_cart,
        carts::cart_products,
        carts::add_product_to_cart
    ),
    components(
        schemas(
            Product,
            Cart,
            LineItem,
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            CartResponse,
            ErrorBody,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Carts", description = "Cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
