use crate::{
    di::{DependenciesInject, DependenciesInjectDeps},
    middleware::cors::CorsPolicy,
};
use prometheus_client::registry::Registry;
use shared::{
    config::ConnectionPool,
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub cors: CorsPolicy,
    pub registry: Arc<Registry>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("cors", &self.cors)
            .field("registry", &self.registry)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool, cors: CorsPolicy) -> Self {
        Self::with_dependencies(DependenciesInjectDeps::postgres(pool), cors)
    }

    /// Must be called inside a tokio runtime: it spawns the system metrics
    /// collector.
    pub fn with_dependencies(deps: DependenciesInjectDeps, cors: CorsPolicy) -> Self {
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());

        let di_container = DependenciesInject::new(deps, &mut registry);

        system_metrics.register(&mut registry);

        tokio::spawn(run_metrics_collector(system_metrics.clone()));

        Self {
            di_container,
            cors,
            registry: Arc::new(registry),
            system_metrics,
        }
    }
}
