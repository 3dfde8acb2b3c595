use axum::{
    Extension,
    body::Body,
    http::{HeaderValue, Method, Request, header},
    middleware::Next,
    response::Response,
};
use shared::errors::HttpError;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

pub const CORS_ERROR: &str = "Error de Cors";

/// Single-origin CORS policy.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed_origin: Option<String>,
}

impl CorsPolicy {
    pub fn new(allowed_origin: Option<String>) -> Self {
        Self { allowed_origin }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origin.as_deref() == Some(origin)
    }

    /// Response headers and preflight handling for the allowed origin.
    pub fn layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE]);

        match self
            .allowed_origin
            .as_deref()
            .and_then(|origin| HeaderValue::from_str(origin).ok())
        {
            Some(origin) => layer.allow_origin(AllowOrigin::exact(origin)),
            None => layer,
        }
    }
}

/// Rejects requests whose `Origin` differs from the configured one.
/// Requests without an `Origin` header are not cross-origin and pass.
pub async fn cors_guard(
    Extension(policy): Extension<CorsPolicy>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    if let Some(origin) = req.headers().get(header::ORIGIN) {
        let origin = origin.to_str().unwrap_or_default();
        info!("Cross-origin request from {origin}");

        if !policy.is_allowed(origin) {
            warn!("Blocked request from origin {origin}");
            return Err(HttpError::Forbidden(CORS_ERROR.to_string()));
        }
    }

    Ok(next.run(req).await)
}
