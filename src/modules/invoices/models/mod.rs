mod draft;
mod invoice;

pub use draft::{
    BankDetails, Customer, DraftAction, InvoiceDraft, InvoiceTotals, ItemEdit, LineItem,
};
pub use invoice::{CreateInvoiceRequest, CreateItemRequest, Invoice, InvoiceStatus};
