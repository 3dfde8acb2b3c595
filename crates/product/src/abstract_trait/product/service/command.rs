use crate::domain::{
    requests::product::{CreateProductRequest, UpdateProductRequest},
    response::{api::ApiResponse, product::ProductResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn toggle_availability(
        &self,
        id: i64,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete_product(&self, id: i64) -> Result<ApiResponse<String>, ServiceError>;
}
