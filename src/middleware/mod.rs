pub mod auth;
pub mod metrics;
pub mod rate_limit;
pub mod request_id;

pub use auth::{BearerAuth, Session};
pub use metrics::{MetricsCollector, MetricsMiddleware};
pub use rate_limit::RateLimiter;
pub use request_id::RequestId;
