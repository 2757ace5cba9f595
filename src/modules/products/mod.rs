// Products module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::product_controller::configure;
pub use models::{Product, ProductSuggestion};
pub use repositories::ProductRepository;
pub use services::{ProductSearch, SuggestionFeed};
