use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::response::{api::ApiResponse, product::ProductResponse},
};
use async_trait::async_trait;
use opentelemetry::{
    KeyValue,
    global::{self, BoxedTracer},
};
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, TracingContext},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service");

        Self { query, metrics }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("product-query-service")
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        info!("🔍 Finding all products");

        let tracing_ctx = TracingContext::start(
            &self.get_tracer(),
            "product_find_all",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let products = match self.query.find_all().await {
            Ok(products) => {
                tracing_ctx.complete_success(&self.metrics, Method::Get, "Products retrieved");
                products
            }
            Err(err) => {
                error!("❌ Failed to fetch products: {err:?}");
                tracing_ctx.complete_error(&self.metrics, Method::Get, "Failed to fetch products");
                return Err(ServiceError::Repo(err));
            }
        };

        let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

        info!("✅ Retrieved {} products", data.len());

        Ok(ApiResponse::new(data))
    }

    async fn find_by_id(&self, id: i64) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let tracing_ctx = TracingContext::start(
            &self.get_tracer(),
            "product_find_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let product = match self.query.find_by_id(id).await {
            Ok(Some(product)) => {
                tracing_ctx.complete_success(&self.metrics, Method::Get, "Product retrieved");
                product
            }
            Ok(None) => {
                tracing_ctx.complete_error(&self.metrics, Method::Get, "Product not found");
                return Err(ServiceError::Repo(RepositoryError::NotFound));
            }
            Err(err) => {
                error!("❌ Failed to fetch product {id}: {err:?}");
                tracing_ctx.complete_error(&self.metrics, Method::Get, "Failed to fetch product");
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse::new(ProductResponse::from(product)))
    }
}
