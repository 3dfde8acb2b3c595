use crate::domain::response::{api::ApiResponse, product::ProductResponse};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}
