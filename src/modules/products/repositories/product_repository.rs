// MySQL persistence for the product catalog.
//
// Price changes are audited: updating current_price writes a price_history
// row in the same transaction as the product update.

use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::products::models::{
    CreateProductRequest, PriceHistory, Product, ProductSuggestion, UpdateProductRequest,
};

/// Maximum rows returned by the autocomplete search.
const SUGGESTION_LIMIT: i64 = 10;

pub struct ProductRepository {
    pool: MySqlPool,
}

impl ProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateProductRequest) -> Result<Product> {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            description: request.description,
            current_price: request.current_price,
            unit: request.unit,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, current_price, unit, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.current_price)
        .bind(&product.unit)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(product)
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, current_price, unit, created_at, updated_at
            FROM products
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, current_price, unit, created_at, updated_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(product)
    }

    /// Case-insensitive name search for autocomplete, capped at 10 rows.
    pub async fn search(&self, query: &str) -> Result<Vec<ProductSuggestion>> {
        let pattern = format!("%{}%", query);

        let suggestions = sqlx::query_as::<_, ProductSuggestion>(
            r#"
            SELECT id, name, description, current_price
            FROM products
            WHERE name LIKE ?
            ORDER BY name
            LIMIT ?
            "#,
        )
        .bind(pattern)
        .bind(SUGGESTION_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(suggestions)
    }

    /// Applies a partial update; a price change is recorded in price_history
    /// within the same transaction.
    pub async fn update(
        &self,
        id: &str,
        request: UpdateProductRequest,
        changed_by: &str,
    ) -> Result<Product> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;

        let updated = Product {
            id: existing.id.clone(),
            name: request.name.unwrap_or(existing.name),
            description: request.description.or(existing.description),
            current_price: request.current_price.unwrap_or(existing.current_price),
            unit: request.unit.unwrap_or(existing.unit),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        if updated.current_price != existing.current_price {
            let history = PriceHistory {
                id: Uuid::new_v4().to_string(),
                product_id: existing.id.clone(),
                old_price: existing.current_price,
                new_price: updated.current_price,
                changed_by: changed_by.to_string(),
                changed_at: Utc::now(),
            };

            sqlx::query(
                r#"
                INSERT INTO price_history (id, product_id, old_price, new_price, changed_by, changed_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&history.id)
            .bind(&history.product_id)
            .bind(history.old_price)
            .bind(history.new_price)
            .bind(&history.changed_by)
            .bind(history.changed_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, current_price = ?, unit = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&updated.name)
        .bind(&updated.description)
        .bind(updated.current_price)
        .bind(&updated.unit)
        .bind(updated.updated_at)
        .bind(&updated.id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok(updated)
    }
}
