use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    error::{AppError, AppResult},
    models::LineItem,
    response::{CartResponse, ErrorBody},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_cart))
        .route("/{id}", get(cart_products))
        .route("/{id}/product/{product_id}", post(add_product_to_cart))
}

#[utoipa::path(
    post,
    path = "/api/carts",
    responses(
        (status = 201, description = "Create an empty cart", body = CartResponse)
    ),
    tag = "Carts"
)]
pub async fn create_cart(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<CartResponse>)> {
    let cart = state.carts.create().await?;
    Ok((
        StatusCode::CREATED,
        Json(CartResponse::new("Cart created successfully.", cart)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/carts/{id}",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "Line items of the cart", body = Vec<LineItem>),
        (status = 404, description = "Cart not found", body = ErrorBody),
    ),
    tag = "Carts"
)]
pub async fn cart_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<LineItem>>> {
    match state.carts.get_by_id(&id).await? {
        Some(cart) => Ok(Json(cart.line_items().to_vec())),
        None => Err(AppError::NotFound(format!("Cart with ID {id} not found."))),
    }
}

#[utoipa::path(
    post,
    path = "/api/carts/{id}/product/{product_id}",
    params(
        ("id" = String, Path, description = "Cart ID"),
        ("product_id" = String, Path, description = "Product ID, not checked against the catalog")
    ),
    responses(
        (status = 200, description = "Line item added or incremented", body = CartResponse),
        (status = 400, description = "Invalid product id", body = ErrorBody),
        (status = 404, description = "Cart not found", body = ErrorBody),
    ),
    tag = "Carts"
)]
pub async fn add_product_to_cart(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(String, String)>,
) -> AppResult<Json<CartResponse>> {
    match state.carts.add_line_item(&id, &product_id).await? {
        Some(cart) => Ok(Json(CartResponse::new(
            format!("Product {product_id} added to cart {id} successfully."),
            cart,
        ))),
        None => Err(AppError::NotFound(format!("Cart with ID {id} not found."))),
    }
}
