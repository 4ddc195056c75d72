use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, SearchQuery};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const ADD_PRODUCT_SUCCESS: &str = "Successfully added";

/// OpenAPI documentation for the catalog endpoints
#[derive(OpenApi)]
#[openapi(
    paths(add_product, list_products, search_products),
    components(
        schemas(Product, CreateProduct),
        responses(
            BadRequestResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog")
    )
)]
pub struct ApiDoc;

/// Routes: `POST /admin/addproduct`, `GET /users/productview`, `GET /users/search`
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/admin/addproduct", post(add_product))
        .route("/users/productview", get(list_products))
        .route("/users/search", get(search_products))
        .with_state(shared_service)
}

/// Add a product to the catalog
#[utoipa::path(
    post,
    path = "/admin/addproduct",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product stored", body = String, example = json!("Successfully added")),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<Json<&'static str>> {
    service.add_product(input).await?;
    Ok(Json(ADD_PRODUCT_SUCCESS))
}

/// List every product
#[utoipa::path(
    get,
    path = "/users/productview",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Search products by a case-sensitive name fragment
#[utoipa::path(
    get,
    path = "/users/search",
    tag = "Products",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<SearchQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.search_products(query.name.as_deref()).await?;
    Ok(Json(products))
}
