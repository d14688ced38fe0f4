pub mod exchange_rate;
pub mod source;

pub use exchange_rate::{ExchangeRateError, ExchangeRateProvider, FixedExchangeRate};
pub use source::{DataSourceError, DataSourceResult, PerformanceDataSource};
