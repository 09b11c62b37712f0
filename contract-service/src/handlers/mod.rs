//! HTTP handlers for contract-service.

pub mod analyze;
pub mod connectivity;
pub mod health;
pub mod home;
pub mod metrics;

pub use analyze::analyze;
pub use connectivity::connectivity_test;
pub use health::health_check;
pub use home::index;
pub use self::metrics::metrics_endpoint;
