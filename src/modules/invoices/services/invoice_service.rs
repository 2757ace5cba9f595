use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::core::money;
use crate::modules::invoices::models::{CreateInvoiceRequest, Invoice, InvoiceStatus};
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::invoices::services::renderer::{self, RenderMode};
use crate::modules::invoices::services::pdf;
use crate::modules::profile::repositories::ProfileRepository;

/// Service for invoice business logic
pub struct InvoiceService {
    invoice_repo: Arc<InvoiceRepository>,
    profile_repo: Arc<ProfileRepository>,
}

impl InvoiceService {
    pub fn new(invoice_repo: Arc<InvoiceRepository>, profile_repo: Arc<ProfileRepository>) -> Self {
        Self {
            invoice_repo,
            profile_repo,
        }
    }

    /// Create a new invoice from a submitted draft.
    ///
    /// The server is the sole writer of the invoice number, status and
    /// totals: item amounts are re-derived from quantity and rate, totals
    /// are computed from the unrounded amounts and rounded half-up at the
    /// persistence boundary, and the business profile is snapshotted so the
    /// document keeps rendering identically if the profile changes later.
    pub async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
        created_by: &str,
    ) -> Result<Invoice, AppError> {
        let due_date = request.due_date;
        let draft = request.into_draft()?;
        let totals = draft.compute_totals();

        let invoice_number = format!("INV-{:04}", self.invoice_repo.count().await? + 1);
        let business_profile = self.profile_repo.get().await?;
        let now = Utc::now();

        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            invoice_number,
            customer: draft.customer,
            items: draft.items,
            subtotal: money::round_money(totals.subtotal),
            tax_rate: draft.tax_rate,
            tax_amount: money::round_money(totals.tax_amount),
            total_amount: money::round_money(totals.total),
            bank_details: draft.bank_details,
            notes: draft.notes,
            status: InvoiceStatus::Draft,
            invoice_date: now,
            due_date,
            business_profile,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.invoice_repo.create(&invoice).await?;

        tracing::info!(
            invoice_number = %invoice.invoice_number,
            total = %invoice.total_amount,
            "Invoice created"
        );

        Ok(invoice)
    }

    /// Get invoice by ID
    pub async fn get_invoice(&self, id: &str) -> Result<Invoice, AppError> {
        self.invoice_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice not found"))
    }

    /// List all invoices, newest first
    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError> {
        self.invoice_repo.list().await
    }

    /// Apply a status change, enforcing the lifecycle.
    ///
    /// Requesting the current status is accepted as a no-op; any move not in
    /// the lifecycle is rejected without touching the record.
    pub async fn update_status(
        &self,
        id: &str,
        new_status: InvoiceStatus,
    ) -> Result<Invoice, AppError> {
        let invoice = self.get_invoice(id).await?;

        if invoice.status == new_status {
            return Ok(invoice);
        }

        if !invoice.status.can_transition(new_status) {
            return Err(AppError::validation(format!(
                "Invalid status transition from {} to {}",
                invoice.status, new_status
            )));
        }

        let updated_at = Utc::now();
        self.invoice_repo
            .update_status(id, new_status, updated_at)
            .await?;

        tracing::info!(
            invoice_number = %invoice.invoice_number,
            from = %invoice.status,
            to = %new_status,
            "Invoice status updated"
        );

        Ok(Invoice {
            status: new_status,
            updated_at,
            ..invoice
        })
    }

    /// Render the invoice document as HTML.
    pub async fn render_document(&self, id: &str, mode: RenderMode) -> Result<String, AppError> {
        let invoice = self.get_invoice(id).await?;
        Ok(renderer::render(&invoice, mode))
    }

    /// Render the invoice as a PDF byte stream.
    pub async fn render_pdf(&self, id: &str) -> Result<Vec<u8>, AppError> {
        let invoice = self.get_invoice(id).await?;
        let bytes = pdf::render(&invoice)?;

        if bytes.is_empty() {
            return Err(AppError::internal("PDF rendering produced no output"));
        }

        Ok(bytes)
    }
}
