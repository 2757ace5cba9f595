// Authentication module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::auth_controller::configure;
pub use models::{User, UserRole};
pub use repositories::UserRepository;
pub use services::{AuthService, TokenService};
