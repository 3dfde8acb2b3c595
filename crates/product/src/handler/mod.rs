mod product;

use crate::{
    middleware::cors::{CorsPolicy, cors_guard},
    state::AppState,
};
use anyhow::Result;
use axum::{
    Extension, Router,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    middleware,
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, error, info};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::product::{PRODUCT_NOT_FOUND, product_routes};

pub const DOCS_PATH: &str = "/docs";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST API Rust / Axum / SQLx",
        version = "1.0.0",
        description = "API Docs for Products"
    ),
    paths(
        product::get_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::toggle_availability,
        product::delete_product,
    ),
    tags(
        (name = "Products", description = "API operations related to products"),
    )
)]
struct ApiDoc;

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    if let Err(e) = encode(&mut buffer, &state.registry) {
        error!("Failed to encode metrics: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}"),
        );
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(shared_state: Arc<AppState>) -> Router {
        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(product_routes(shared_state.clone()));

        let (app_router, api) = api_router.split_for_parts();

        let cors: &CorsPolicy = &shared_state.cors;

        app_router
            .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, api))
            .layer(RequestBodyLimitLayer::new(1024 * 1024))
            .layer(cors.layer())
            .layer(middleware::from_fn(cors_guard))
            .layer(Extension(cors.clone()))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(Arc::new(app_state));

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}{DOCS_PATH}");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
