#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use product::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    di::DependenciesInjectDeps,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    handler::AppRouter,
    middleware::cors::CorsPolicy,
    model::product::Product,
    state::AppState,
};
use shared::errors::RepositoryError;
use std::sync::{Arc, Mutex};

pub const FRONTEND_URL: &str = "http://localhost:5173";

/// Products kept in memory, ids assigned in insertion order.
#[derive(Default)]
pub struct InMemoryProducts {
    rows: Mutex<Vec<Product>>,
    next_id: Mutex<i64>,
}

impl InMemoryProducts {
    fn update<F>(&self, id: i64, apply: F) -> Result<Product, RepositoryError>
    where
        F: FnOnce(&mut Product),
    {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        apply(row);
        row.updated_at = Some(Utc::now().naive_utc());
        Ok(row.clone())
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProducts {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProducts {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<Product, RepositoryError> {
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let now = Utc::now().naive_utc();
        let product = Product {
            id,
            name: req.name.clone(),
            price: req.price,
            availability: req.availability.unwrap_or(true),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.rows.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, req: &UpdateProductRequest) -> Result<Product, RepositoryError> {
        self.update(req.id, |p| {
            p.name = req.name.clone();
            p.price = req.price;
            p.availability = req.availability;
        })
    }

    async fn update_availability(
        &self,
        id: i64,
        availability: bool,
    ) -> Result<Product, RepositoryError> {
        self.update(id, |p| p.availability = availability)
    }

    async fn delete_product(&self, id: i64) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// A store whose every call fails, as when the database is unreachable.
pub struct BrokenStore;

fn unavailable() -> RepositoryError {
    RepositoryError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ProductQueryRepositoryTrait for BrokenStore {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Product>, RepositoryError> {
        Err(unavailable())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for BrokenStore {
    async fn create_product(&self, _req: &CreateProductRequest) -> Result<Product, RepositoryError> {
        Err(unavailable())
    }

    async fn update_product(&self, _req: &UpdateProductRequest) -> Result<Product, RepositoryError> {
        Err(unavailable())
    }

    async fn update_availability(
        &self,
        _id: i64,
        _availability: bool,
    ) -> Result<Product, RepositoryError> {
        Err(unavailable())
    }

    async fn delete_product(&self, _id: i64) -> Result<(), RepositoryError> {
        Err(unavailable())
    }
}

pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let store = Arc::new(InMemoryProducts::default());
        Self::spawn_with(DependenciesInjectDeps {
            query: store.clone(),
            command: store,
        })
        .await
    }

    pub async fn spawn_broken() -> Self {
        Self::spawn_with(DependenciesInjectDeps {
            query: Arc::new(BrokenStore),
            command: Arc::new(BrokenStore),
        })
        .await
    }

    async fn spawn_with(deps: DependenciesInjectDeps) -> Self {
        let state = AppState::with_dependencies(deps, CorsPolicy::new(Some(FRONTEND_URL.into())));
        let app = AppRouter::build(Arc::new(state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
