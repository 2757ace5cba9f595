pub mod invoice_service;
pub mod pdf;
pub mod renderer;

pub use invoice_service::InvoiceService;
pub use renderer::RenderMode;
