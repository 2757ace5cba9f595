mod stats;

pub use stats::{DashboardStats, TopProduct};
