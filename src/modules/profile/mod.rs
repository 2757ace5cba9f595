// Business profile module

pub mod controllers;
pub mod models;
pub mod repositories;

pub use controllers::profile_controller::configure;
pub use models::{BusinessProfile, BusinessProfileInput};
pub use repositories::ProfileRepository;
