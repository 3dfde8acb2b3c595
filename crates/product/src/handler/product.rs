use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::{api::ApiResponse, product::ProductResponse},
    },
    middleware::validate::Validated,
    state::AppState,
    validation::{CreateProductRules, IdRules, UpdateProductRules},
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::{
    ErrorResponse, HttpError, NOT_FOUND_MESSAGE, RepositoryError, ServiceError,
    ValidationErrorResponse,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

pub const PRODUCT_NOT_FOUND: &str = NOT_FOUND_MESSAGE;

/// Writes answer a missing product with 400; reads keep the 404 of
/// [`HttpError::from`].
fn mutation_error(err: ServiceError) -> HttpError {
    match err {
        ServiceError::Repo(RepositoryError::NotFound) => {
            HttpError::BadRequest(PRODUCT_NOT_FOUND.to_string())
        }
        other => HttpError::from(other),
    }
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    description = "Return a list of products, newest first",
    responses(
        (status = 200, description = "Successful response", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    description = "Return a product based on its unique ID",
    params(("id" = i64, Path, description = "The Id of the product to retrieve")),
    responses(
        (status = 200, description = "Successful response", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Bad request, invalid Id", body = ValidationErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    input: Validated<IdRules>,
) -> Result<impl IntoResponse, HttpError> {
    let id = input
        .id()
        .ok_or_else(|| HttpError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;

    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    description = "Create a new product record in the database",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Bad request, invalid input data", body = ValidationErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    input: Validated<CreateProductRules>,
) -> Result<impl IntoResponse, HttpError> {
    let body = CreateProductRequest::from_body(input.body());
    let response = service.create_product(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    description = "Replace name, price and availability of a product",
    params(("id" = i64, Path, description = "The Id of the product to update")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Successful response", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Bad request, invalid Id, invalid input data or product not found")
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    input: Validated<UpdateProductRules>,
) -> Result<impl IntoResponse, HttpError> {
    let id = input
        .id()
        .ok_or_else(|| HttpError::BadRequest(PRODUCT_NOT_FOUND.to_string()))?;

    let body = UpdateProductRequest::from_body(id, input.body());
    let response = service.update_product(&body).await.map_err(mutation_error)?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    description = "Flip the availability of a product",
    params(("id" = i64, Path, description = "The Id of the product to update")),
    responses(
        (status = 200, description = "Successful response", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Bad request, invalid Id or product not found")
    )
)]
pub async fn toggle_availability(
    Extension(service): Extension<DynProductCommandService>,
    input: Validated<IdRules>,
) -> Result<impl IntoResponse, HttpError> {
    let id = input
        .id()
        .ok_or_else(|| HttpError::BadRequest(PRODUCT_NOT_FOUND.to_string()))?;

    let response = service
        .toggle_availability(id)
        .await
        .map_err(mutation_error)?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    description = "Delete a product and return a confirmation message",
    params(("id" = i64, Path, description = "The Id of the product to delete")),
    responses(
        (status = 200, description = "Successful response", body = ApiResponse<String>,
            example = json!({ "data": "Producto eliminado" })),
        (status = 400, description = "Bad request, invalid Id or product not found")
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    input: Validated<IdRules>,
) -> Result<impl IntoResponse, HttpError> {
    let id = input
        .id()
        .ok_or_else(|| HttpError::BadRequest(PRODUCT_NOT_FOUND.to_string()))?;

    let response = service.delete_product(id).await.map_err(mutation_error)?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/products", get(get_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product)
                .put(update_product)
                .patch(toggle_availability)
                .delete(delete_product),
        )
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
}
