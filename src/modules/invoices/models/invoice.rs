// The persisted invoice as returned by the API: the submitted draft plus the
// server-assigned number, status, computed totals and a snapshot of the
// business profile taken at creation time. The service is the sole writer of
// id, invoice_number, status and the totals; clients only read them back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::draft::{BankDetails, Customer, InvoiceDraft, InvoiceTotals, LineItem};
use crate::core::Result;
use crate::modules::profile::models::BusinessProfile;

/// Invoice lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Created but not yet issued to the customer
    Draft,

    /// Issued and awaiting payment
    Sent,

    /// Settled in full
    Paid,

    /// Issued and past its due date without payment
    Overdue,
}

impl InvoiceStatus {
    /// Legal lifecycle moves. Requesting the current status again is treated
    /// as a no-op by the service, not as a transition.
    pub fn can_transition(self, next: InvoiceStatus) -> bool {
        matches!(
            (self, next),
            (InvoiceStatus::Draft, InvoiceStatus::Sent)
                | (InvoiceStatus::Sent, InvoiceStatus::Paid)
                | (InvoiceStatus::Sent, InvoiceStatus::Overdue)
                | (InvoiceStatus::Overdue, InvoiceStatus::Paid)
        )
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Draft => write!(f, "draft"),
            InvoiceStatus::Sent => write!(f, "sent"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Overdue => write!(f, "overdue"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(InvoiceStatus::Draft),
            "sent" => Ok(InvoiceStatus::Sent),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

/// A persisted invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    #[serde(default)]
    pub bank_details: Option<BankDetails>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: InvoiceStatus,
    pub invoice_date: DateTime<Utc>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub business_profile: Option<BusinessProfile>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// The persisted totals as a value, for the renderer and tax breakdown.
    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals {
            subtotal: self.subtotal,
            tax_amount: self.tax_amount,
            total: self.total_amount,
        }
    }

    /// Half of the tax rate, shown against each of the CGST and SGST rows.
    pub fn split_rate(&self) -> Decimal {
        self.tax_rate / Decimal::TWO
    }
}

/// Submission payload for creating an invoice.
///
/// Item amounts and invoice totals are recomputed on the server from the
/// submitted quantities and rates; any client-sent amounts are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub customer: Customer,
    pub items: Vec<CreateItemRequest>,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,
    #[serde(default)]
    pub bank_details: Option<BankDetails>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub product_id: Option<String>,
    pub product_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: Decimal,
    pub rate: Decimal,
}

fn default_tax_rate() -> Decimal {
    Decimal::from(18)
}

impl CreateInvoiceRequest {
    /// Rebuilds the draft this request represents, re-deriving every item
    /// amount, and runs the submission validation.
    pub fn into_draft(self) -> Result<InvoiceDraft> {
        let mut items = Vec::with_capacity(self.items.len());
        for item in self.items {
            items.push(LineItem::new(
                item.product_id,
                item.product_name,
                item.description,
                item.quantity,
                item.rate,
            )?);
        }

        let draft = InvoiceDraft {
            customer: self.customer,
            items,
            tax_rate: self.tax_rate,
            bank_details: self.bank_details.filter(BankDetails::is_present),
            notes: self.notes.filter(|n| !n.is_empty()),
        };

        draft.validate()?;
        Ok(draft)
    }
}
