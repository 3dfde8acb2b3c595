use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        product: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Omitting the column lets the table default decide availability.
        let query = match product.availability {
            Some(availability) => sqlx::query_as::<_, ProductModel>(
                r#"
                INSERT INTO products (name, price, availability)
                VALUES ($1, $2, $3)
                RETURNING id, name, price, availability, created_at, updated_at
                "#,
            )
            .bind(&product.name)
            .bind(product.price)
            .bind(availability),
            None => sqlx::query_as::<_, ProductModel>(
                r#"
                INSERT INTO products (name, price)
                VALUES ($1, $2)
                RETURNING id, name, price, availability, created_at, updated_at
                "#,
            )
            .bind(&product.name)
            .bind(product.price),
        };

        let result = query.fetch_one(&mut *conn).await.map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", product.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created product ID {} ({})", result.id, result.name);
        Ok(result)
    }

    async fn update_product(
        &self,
        product: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = $2,
                price = $3,
                availability = $4,
                updated_at = current_timestamp
            WHERE id = $1
            RETURNING id, name, price, availability, created_at, updated_at
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.availability)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {}: {:?}", product.id, err);
            RepositoryError::from(err)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Updated product ID {}", result.id);
        Ok(result)
    }

    async fn update_availability(
        &self,
        id: i64,
        availability: bool,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET availability = $2,
                updated_at = current_timestamp
            WHERE id = $1
            RETURNING id, name, price, availability, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(availability)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update availability of product {}: {:?}", id, err);
            RepositoryError::from(err)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!(
            "🔄 Product ID {} availability set to {}",
            result.id, result.availability
        );
        Ok(result)
    }

    async fn delete_product(&self, id: i64) -> Result<(), RepositoryError> {
        info!("❌ Deleting product: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to delete product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("✅ Product ID {} permanently deleted", id);
        Ok(())
    }
}
