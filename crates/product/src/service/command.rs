use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::{api::ApiResponse, product::ProductResponse},
    },
    model::product::Product as ProductModel,
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
use validator::Validate;

pub const PRODUCT_DELETED: &str = "Producto eliminado";

#[derive(Clone)]
pub struct ProductCommandService {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service");

        Self {
            query,
            command,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("product-command-service")
    }

    /// Looks the product up before a write. The write itself may still
    /// find the row gone; that also surfaces as not found.
    async fn find_existing(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        id: i64,
    ) -> Result<ProductModel, ServiceError> {
        match self.query.find_by_id(id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => {
                tracing_ctx.complete_error(&self.metrics, method, "Product not found");
                Err(ServiceError::Repo(RepositoryError::NotFound))
            }
            Err(err) => {
                error!("❌ Failed to look up product {id}: {err:?}");
                tracing_ctx.complete_error(&self.metrics, method, "Failed to look up product");
                Err(ServiceError::Repo(err))
            }
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏗️ Creating product: {}", req.name);

        let method = Method::Post;
        let tracing_ctx = TracingContext::start(
            &self.get_tracer(),
            "create_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        if let Err(errors) = req.validate() {
            tracing_ctx.complete_error(&self.metrics, method, "Invalid product data");
            return Err(ServiceError::from(errors));
        }

        let product = match self.command.create_product(req).await {
            Ok(product) => {
                tracing_ctx.complete_success(&self.metrics, method, "Product created");
                product
            }
            Err(err) => {
                error!("❌ Failed to create product: {err:?}");
                tracing_ctx.complete_error(&self.metrics, method, "Failed to create product");
                return Err(ServiceError::Repo(err));
            }
        };

        let response = ProductResponse::from(product);
        info!("✅ Product created: {} (ID: {})", response.name, response.id);

        Ok(ApiResponse::new(response))
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("✏️ Updating product ID: {}", req.id);

        let method = Method::Put;
        let tracing_ctx = TracingContext::start(
            &self.get_tracer(),
            "update_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", req.id.to_string()),
            ],
        );

        if let Err(errors) = req.validate() {
            tracing_ctx.complete_error(&self.metrics, method, "Invalid product data");
            return Err(ServiceError::from(errors));
        }

        self.find_existing(&tracing_ctx, method.clone(), req.id)
            .await?;

        let product = match self.command.update_product(req).await {
            Ok(product) => {
                tracing_ctx.complete_success(&self.metrics, method, "Product updated");
                product
            }
            Err(err) => {
                error!("❌ Failed to update product {}: {err:?}", req.id);
                tracing_ctx.complete_error(&self.metrics, method, "Failed to update product");
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse::new(ProductResponse::from(product)))
    }

    async fn toggle_availability(
        &self,
        id: i64,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔁 Toggling availability of product ID: {id}");

        let method = Method::Patch;
        let tracing_ctx = TracingContext::start(
            &self.get_tracer(),
            "toggle_availability",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "toggle_availability"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let current = self.find_existing(&tracing_ctx, method.clone(), id).await?;

        let product = match self
            .command
            .update_availability(id, !current.availability)
            .await
        {
            Ok(product) => {
                tracing_ctx.complete_success(&self.metrics, method, "Availability toggled");
                product
            }
            Err(err) => {
                error!("❌ Failed to toggle availability of product {id}: {err:?}");
                tracing_ctx.complete_error(&self.metrics, method, "Failed to toggle availability");
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse::new(ProductResponse::from(product)))
    }

    async fn delete_product(&self, id: i64) -> Result<ApiResponse<String>, ServiceError> {
        info!("🗑️ Deleting product ID: {id}");

        let method = Method::Delete;
        let tracing_ctx = TracingContext::start(
            &self.get_tracer(),
            "delete_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        self.find_existing(&tracing_ctx, method.clone(), id).await?;

        match self.command.delete_product(id).await {
            Ok(()) => {
                tracing_ctx.complete_success(&self.metrics, method, "Product deleted");
            }
            Err(err) => {
                error!("❌ Failed to delete product {id}: {err:?}");
                tracing_ctx.complete_error(&self.metrics, method, "Failed to delete product");
                return Err(ServiceError::Repo(err));
            }
        }

        Ok(ApiResponse::new(PRODUCT_DELETED.to_string()))
    }
}
