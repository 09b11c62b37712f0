pub mod analysis;
pub mod fallback;
pub mod metrics;
pub mod providers;
pub mod readiness;

pub use self::metrics::{get_metrics, init_metrics};
pub use readiness::{probe_provider, Readiness};
