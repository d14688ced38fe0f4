pub mod keys;
pub mod metrics;
pub mod stats;
pub mod ttl;

// Re-export commonly used types
pub use keys::{
    available_dates_key, daily_commission_key, daily_month_prefix, monthly_commission_key,
    monthly_ranking_key,
};
pub use metrics::METRIC_NAMESPACE;
pub use stats::{CacheStats, ServiceCacheStats};
pub use ttl::{CacheEntry, DataCache};
