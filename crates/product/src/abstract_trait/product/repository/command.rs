use crate::{
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

/// Writes report [`RepositoryError::NotFound`] when the target row is gone.
#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError>;
    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError>;
    async fn update_availability(
        &self,
        id: i64,
        availability: bool,
    ) -> Result<ProductModel, RepositoryError>;
    async fn delete_product(&self, id: i64) -> Result<(), RepositoryError>;
}
