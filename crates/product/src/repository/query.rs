use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching all products");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let products = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, price, availability, created_at, updated_at
            FROM products
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Found {} products", products.len());
        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, price, availability, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        match &product {
            Some(p) => info!("✅ Found product ID {} ({})", p.id, p.name),
            None => info!("⚠️ Product ID {} not found", id),
        }

        Ok(product)
    }
}
