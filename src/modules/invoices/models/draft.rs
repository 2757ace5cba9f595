// An invoice draft is the in-memory invoice under construction: a customer,
// an ordered list of line items, a tax rate and optional bank details/notes.
// Drafts are edited through `DraftAction` values applied by a reducer, so the
// whole editing flow is a pure `(draft, action) -> draft'` function that can
// be unit tested without any UI attached.
//
// Invariants:
// - a draft always holds at least one line item
// - every item satisfies `amount == quantity * rate` after any edit
// - stored quantities are > 0 with at most 2 decimal places

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money;
use crate::core::{AppError, Result};
use crate::modules::products::models::ProductSuggestion;

/// Billing party details captured on an invoice. Only the name is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
}

/// Payment account details printed on the invoice document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub bank_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub ifsc_code: String,
    #[serde(default)]
    pub account_holder: String,
}

impl BankDetails {
    /// Bank details count as present only when a bank name was actually
    /// entered; a form submitted with blank fields is treated as absent.
    pub fn is_present(&self) -> bool {
        !self.bank_name.trim().is_empty()
    }
}

/// One row of an invoice: a quantity of a product or service at a rate.
///
/// `amount` is derived from `quantity * rate` and is never set directly;
/// every edit that touches quantity or rate recomputes it before returning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: Decimal,
    pub rate: Decimal,
    #[serde(default)]
    pub amount: Decimal,
}

impl LineItem {
    /// A freshly added row: one unit of nothing at rate zero.
    pub fn empty() -> Self {
        Self {
            product_id: None,
            product_name: String::new(),
            description: None,
            quantity: Decimal::ONE,
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }

    /// Builds a validated line item with its amount derived from
    /// quantity and rate.
    pub fn new(
        product_id: Option<String>,
        product_name: String,
        description: Option<String>,
        quantity: Decimal,
        rate: Decimal,
    ) -> Result<Self> {
        Self::validate_quantity(quantity)?;
        Self::validate_rate(rate)?;

        let mut item = Self {
            product_id,
            product_name,
            description: description.filter(|d| !d.is_empty()),
            quantity,
            rate,
            amount: Decimal::ZERO,
        };
        item.recalculate_amount();

        Ok(item)
    }

    fn recalculate_amount(&mut self) {
        self.amount = self.quantity * self.rate;
    }

    fn validate_quantity(quantity: Decimal) -> Result<()> {
        if quantity <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }

        if money::decimal_places(quantity) > 2 {
            return Err(AppError::validation(
                "Quantity cannot have more than 2 decimal places",
            ));
        }

        Ok(())
    }

    fn validate_rate(rate: Decimal) -> Result<()> {
        if rate < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Rate must be non-negative, got: {}",
                rate
            )));
        }

        Ok(())
    }
}

/// A single-field edit on one line item.
#[derive(Debug, Clone)]
pub enum ItemEdit {
    ProductName(String),
    Description(Option<String>),
    Quantity(Decimal),
    Rate(Decimal),
}

/// Every mutation the invoice editor can request.
#[derive(Debug, Clone)]
pub enum DraftAction {
    AddItem,
    RemoveItem { index: usize },
    EditItem { index: usize, edit: ItemEdit },
    SelectProduct { index: usize, product: ProductSuggestion },
    SetTaxRate(Decimal),
    SetCustomer(Customer),
    SetBankDetails(Option<BankDetails>),
    SetNotes(Option<String>),
}

/// Derived invoice-level amounts. Never stored; recomputed after every edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl InvoiceTotals {
    /// Central GST share: half of the tax amount by the fixed 50/50 split.
    pub fn cgst_amount(&self) -> Decimal {
        self.tax_amount / Decimal::TWO
    }

    /// State GST share: the other half.
    pub fn sgst_amount(&self) -> Decimal {
        self.tax_amount / Decimal::TWO
    }
}

/// An unsubmitted invoice being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub tax_rate: Decimal,
    #[serde(default)]
    pub bank_details: Option<BankDetails>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InvoiceDraft {
    /// A new draft starts with exactly one empty line item and the default
    /// GST rate of 18%.
    pub fn new() -> Self {
        Self {
            customer: Customer::default(),
            items: vec![LineItem::empty()],
            tax_rate: Decimal::from(18),
            bank_details: None,
            notes: None,
        }
    }

    /// Applies one editing action, leaving the draft untouched on error.
    pub fn apply(&mut self, action: DraftAction) -> Result<()> {
        match action {
            DraftAction::AddItem => {
                self.items.push(LineItem::empty());
                Ok(())
            }
            DraftAction::RemoveItem { index } => self.remove_item(index),
            DraftAction::EditItem { index, edit } => self.edit_item(index, edit),
            DraftAction::SelectProduct { index, product } => self.select_product(index, product),
            DraftAction::SetTaxRate(rate) => self.set_tax_rate(rate),
            DraftAction::SetCustomer(customer) => {
                self.customer = customer;
                Ok(())
            }
            DraftAction::SetBankDetails(details) => {
                // blank bank forms are normalized away immediately
                self.bank_details = details.filter(BankDetails::is_present);
                Ok(())
            }
            DraftAction::SetNotes(notes) => {
                self.notes = notes.filter(|n| !n.is_empty());
                Ok(())
            }
        }
    }

    /// Sums line amounts and derives tax and total, all unrounded.
    pub fn compute_totals(&self) -> InvoiceTotals {
        let subtotal: Decimal = self.items.iter().map(|item| item.amount).sum();
        let tax_amount = subtotal * self.tax_rate / Decimal::ONE_HUNDRED;

        InvoiceTotals {
            subtotal,
            tax_amount,
            total: subtotal + tax_amount,
        }
    }

    /// Submission gate: everything the API will refuse has to be caught here.
    pub fn validate(&self) -> Result<()> {
        if self.customer.name.trim().is_empty() {
            return Err(AppError::validation("Customer name cannot be empty"));
        }

        if self.items.is_empty() {
            return Err(AppError::validation(
                "Invoice must have at least one line item",
            ));
        }

        for (idx, item) in self.items.iter().enumerate() {
            if item.product_name.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Line item {} is missing a product name",
                    idx + 1
                )));
            }
        }

        Self::validate_tax_rate(self.tax_rate)?;

        Ok(())
    }

    fn remove_item(&mut self, index: usize) -> Result<()> {
        // The last row can never be removed; the editor treats this as a
        // silent no-op rather than an error.
        if self.items.len() == 1 {
            return Ok(());
        }

        if index >= self.items.len() {
            return Err(AppError::validation(format!(
                "Line item index {} out of range",
                index
            )));
        }

        self.items.remove(index);
        Ok(())
    }

    fn edit_item(&mut self, index: usize, edit: ItemEdit) -> Result<()> {
        // validate before touching the item so a rejected edit leaves
        // the previous value in place
        match &edit {
            ItemEdit::Quantity(quantity) => LineItem::validate_quantity(*quantity)?,
            ItemEdit::Rate(rate) => LineItem::validate_rate(*rate)?,
            _ => {}
        }

        let item = self.item_at_mut(index)?;

        match edit {
            ItemEdit::ProductName(name) => {
                item.product_name = name;
                // a hand-typed name no longer refers to a catalog product
                item.product_id = None;
            }
            ItemEdit::Description(description) => {
                item.description = description.filter(|d| !d.is_empty());
            }
            ItemEdit::Quantity(quantity) => {
                item.quantity = quantity;
                item.recalculate_amount();
            }
            ItemEdit::Rate(rate) => {
                item.rate = rate;
                item.recalculate_amount();
            }
        }

        Ok(())
    }

    fn select_product(&mut self, index: usize, product: ProductSuggestion) -> Result<()> {
        let item = self.item_at_mut(index)?;

        item.product_id = Some(product.id);
        item.product_name = product.name;
        item.description = product.description.filter(|d| !d.is_empty());
        item.rate = product.current_price;
        item.recalculate_amount();

        Ok(())
    }

    fn set_tax_rate(&mut self, rate: Decimal) -> Result<()> {
        Self::validate_tax_rate(rate)?;
        self.tax_rate = rate;
        Ok(())
    }

    fn validate_tax_rate(rate: Decimal) -> Result<()> {
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "Tax rate must be between 0 and 100, got: {}",
                rate
            )));
        }

        Ok(())
    }

    fn item_at_mut(&mut self, index: usize) -> Result<&mut LineItem> {
        let len = self.items.len();
        self.items.get_mut(index).ok_or_else(|| {
            AppError::validation(format!(
                "Line item index {} out of range (draft has {} items)",
                index, len
            ))
        })
    }
}

impl Default for InvoiceDraft {
    fn default() -> Self {
        Self::new()
    }
}
