use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// Catalog product priced per unit
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub current_price: Decimal,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The slice of a product shown in autocomplete suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProductSuggestion {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub current_price: Decimal,
}

/// Price change audit record, written whenever a product's price moves.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PriceHistory {
    pub id: String,
    pub product_id: String,
    pub old_price: Decimal,
    pub new_price: Decimal,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub current_price: Decimal,
    #[serde(default = "default_unit")]
    pub unit: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub current_price: Option<Decimal>,
    pub unit: Option<String>,
}

fn default_unit() -> String {
    "pcs".to_string()
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Product name cannot be empty"));
        }

        if self.current_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Product price must be non-negative, got: {}",
                self.current_price
            )));
        }

        Ok(())
    }
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Product name cannot be empty"));
            }
        }

        if let Some(price) = self.current_price {
            if price < Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Product price must be non-negative, got: {}",
                    price
                )));
            }
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.current_price.is_none()
            && self.unit.is_none()
    }
}
