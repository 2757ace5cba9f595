use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::dashboard::models::{DashboardStats, TopProduct};

const TOP_PRODUCT_LIMIT: i64 = 5;

pub struct StatsRepository {
    pool: MySqlPool,
}

impl StatsRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Aggregates over all invoices; `month_start` bounds the monthly
    /// revenue figure.
    pub async fn stats(&self, month_start: DateTime<Utc>) -> Result<DashboardStats> {
        let (total_invoices,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let (total_revenue,): (Decimal,) =
            sqlx::query_as("SELECT COALESCE(SUM(total_amount), 0) FROM invoices")
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        let (monthly_revenue,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(total_amount), 0) FROM invoices WHERE created_at >= ?",
        )
        .bind(month_start)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let top_products = sqlx::query_as::<_, TopProduct>(
            r#"
            SELECT product_name AS name,
                   COALESCE(SUM(quantity), 0) AS quantity,
                   COALESCE(SUM(amount), 0) AS amount
            FROM invoice_items
            GROUP BY product_name
            ORDER BY amount DESC
            LIMIT ?
            "#,
        )
        .bind(TOP_PRODUCT_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(DashboardStats {
            total_invoices,
            total_revenue,
            monthly_revenue,
            top_products,
        })
    }
}
