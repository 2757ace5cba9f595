use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Aggregates shown on the landing dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_invoices: i64,
    pub total_revenue: Decimal,
    pub monthly_revenue: Decimal,
    pub top_products: Vec<TopProduct>,
}

/// One of the five highest-billing products across all invoices.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TopProduct {
    pub name: String,
    pub quantity: Decimal,
    pub amount: Decimal,
}
