// Health and observability endpoints

pub mod controllers;

pub use controllers::health_controller::configure;
