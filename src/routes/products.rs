use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    error::{AppError, AppResult},
    models::Product,
    response::{ErrorBody, ProductResponse},
    routes::payload::Payload,
    state::AppState,
    store::Stored,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products as stored", body = Vec<Product>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Stored<Product>>>> {
    Ok(Json(state.products.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = Product),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    match state.products.get_by_id(&id).await? {
        Some(product) => Ok(Json(product)),
        None => Err(AppError::NotFound("Product not found.".to_string())),
    }
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ProductResponse),
        (status = 400, description = "Invalid product fields", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Payload(payload): Payload<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let product = state.products.create(payload.into_new_product()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse::new("Product created successfully.", product)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Invalid product fields", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload<UpdateProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    let patch = payload.into_patch()?;

    match state.products.update(&id, patch).await? {
        Some(product) => Ok(Json(ProductResponse::new(
            format!("Product with ID {id} updated successfully."),
            product,
        ))),
        None => Err(AppError::NotFound(format!("Product with ID {id} not found."))),
    }
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    match state.products.delete(&id).await? {
        Some(product) => Ok(Json(ProductResponse::new(
            format!("Product with ID {id} deleted successfully."),
            product,
        ))),
        None => Err(AppError::NotFound(format!("Product with ID {id} not found."))),
    }
}
