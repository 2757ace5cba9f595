// Invoices module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::invoice_controller::configure;
pub use models::{Invoice, InvoiceDraft, InvoiceStatus, LineItem};
pub use repositories::InvoiceRepository;
pub use services::{InvoiceService, RenderMode};
