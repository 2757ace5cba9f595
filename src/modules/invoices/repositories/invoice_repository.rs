// MySQL persistence for invoices.
//
// An invoice is stored as one row plus its line items in a child table,
// written together in a transaction. Customer, bank details and the business
// profile snapshot are kept as JSON text columns; they are read back whole
// and never queried field-by-field.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::{Invoice, InvoiceStatus, LineItem};

pub struct InvoiceRepository {
    pool: MySqlPool,
}

#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: String,
    invoice_number: String,
    customer: String,
    subtotal: Decimal,
    tax_rate: Decimal,
    tax_amount: Decimal,
    total_amount: Decimal,
    bank_details: Option<String>,
    notes: Option<String>,
    status: String,
    invoice_date: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    business_profile: Option<String>,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ItemRow {
    product_id: Option<String>,
    product_name: String,
    description: Option<String>,
    quantity: Decimal,
    rate: Decimal,
    amount: Decimal,
}

impl InvoiceRow {
    fn into_invoice(self, items: Vec<LineItem>) -> Result<Invoice> {
        let status = InvoiceStatus::from_str(&self.status)
            .map_err(|e| AppError::internal(format!("Corrupt invoice row: {}", e)))?;

        Ok(Invoice {
            id: self.id,
            invoice_number: self.invoice_number,
            customer: serde_json::from_str(&self.customer)?,
            items,
            subtotal: self.subtotal,
            tax_rate: self.tax_rate,
            tax_amount: self.tax_amount,
            total_amount: self.total_amount,
            bank_details: self
                .bank_details
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?,
            notes: self.notes,
            status,
            invoice_date: self.invoice_date,
            due_date: self.due_date,
            business_profile: self
                .business_profile
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<ItemRow> for LineItem {
    fn from(row: ItemRow) -> Self {
        LineItem {
            product_id: row.product_id,
            product_name: row.product_name,
            description: row.description,
            quantity: row.quantity,
            rate: row.rate,
            amount: row.amount,
        }
    }
}

const SELECT_INVOICE: &str = r#"
SELECT id, invoice_number, customer, subtotal, tax_rate, tax_amount, total_amount,
       bank_details, notes, status, invoice_date, due_date, business_profile,
       created_by, created_at, updated_at
FROM invoices
"#;

impl InvoiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Persist an invoice and its line items in one transaction.
    pub async fn create(&self, invoice: &Invoice) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, invoice_number, customer, subtotal, tax_rate, tax_amount, total_amount,
                bank_details, notes, status, invoice_date, due_date, business_profile,
                created_by, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.invoice_number)
        .bind(serde_json::to_string(&invoice.customer)?)
        .bind(invoice.subtotal)
        .bind(invoice.tax_rate)
        .bind(invoice.tax_amount)
        .bind(invoice.total_amount)
        .bind(
            invoice
                .bank_details
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
        )
        .bind(&invoice.notes)
        .bind(invoice.status.to_string())
        .bind(invoice.invoice_date)
        .bind(invoice.due_date)
        .bind(
            invoice
                .business_profile
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
        )
        .bind(&invoice.created_by)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        for (position, item) in invoice.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    id, invoice_id, position, product_id, product_name, description,
                    quantity, rate, amount
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&invoice.id)
            .bind(position as i64)
            .bind(&item.product_id)
            .bind(&item.product_name)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.rate)
            .bind(item.amount)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(())
    }

    /// Total invoices ever created, used to assign the next invoice number.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(count.0)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Invoice>> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!("{} WHERE id = ?", SELECT_INVOICE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.find_items(&row.id).await?;
        Ok(Some(row.into_invoice(items)?))
    }

    /// All invoices, newest first.
    pub async fn list(&self) -> Result<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
            "{} ORDER BY created_at DESC",
            SELECT_INVOICE
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut invoices = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.find_items(&row.id).await?;
            invoices.push(row.into_invoice(items)?);
        }

        Ok(invoices)
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: InvoiceStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE invoices SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(updated_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Invoice not found"));
        }

        Ok(())
    }

    async fn find_items(&self, invoice_id: &str) -> Result<Vec<LineItem>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT product_id, product_name, description, quantity, rate, amount
            FROM invoice_items
            WHERE invoice_id = ?
            ORDER BY position
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(rows.into_iter().map(LineItem::from).collect())
    }
}
