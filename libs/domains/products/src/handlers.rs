//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    JsonBody,
    errors::responses::{
        BadRequestJsonResponse, BadRequestMissingFieldsResponse, BadRequestValidationResponse,
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, DeleteResponse, LowStockQuery, NumericInput, Product, ProductFilter,
    SearchQuery, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::validation::{Field, FieldViolation};

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        search_products,
        get_by_category,
        get_low_stock,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct, NumericInput,
            ProductFilter, DeleteResponse, Field, FieldViolation
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestMissingFieldsResponse,
            BadRequestJsonResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Inventory product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/low-stock", get(get_low_stock))
        .route("/category/{category}", get(get_by_category))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products with optional keyword and category filters
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestMissingFieldsResponse),
        (status = 409, response = ConflictResponse),
        (status = 422, response = BadRequestJsonResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(input): JsonBody<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Search products by keyword in name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = "Products",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<SearchQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let keyword = query.keyword.unwrap_or_default();
    let products = service.search_products(&keyword).await?;
    Ok(Json(products))
}

/// Get products in a category
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = "Products",
    params(
        ("category" = String, Path, description = "Exact category name")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_by_category(&category).await?;
    Ok(Json(products))
}

/// Get products running low on stock
#[utoipa::path(
    get,
    path = "/low-stock",
    tag = "Products",
    params(LowStockQuery),
    responses(
        (status = 200, description = "Products with quantity below the threshold", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_low_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<LowStockQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_low_stock(query.threshold()).await?;
    Ok(Json(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(&id).await?;
    Ok(Json(product))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(&id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = DeleteResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<DeleteResponse>> {
    service.delete_product(&id).await?;
    Ok(Json(DeleteResponse {
        message: "Product deleted successfully".to_string(),
    }))
}
