// Dashboard module

pub mod controllers;
pub mod models;
pub mod repositories;

pub use controllers::dashboard_controller::configure;
pub use models::{DashboardStats, TopProduct};
pub use repositories::StatsRepository;
