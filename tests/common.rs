// tests/common.rs - 整合測試共用工具

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use commission_engine::data_provider::{
    DataSourceError, DataSourceResult, PerformanceDataSource,
};
use commission_engine::domain_types::{RawPerformanceRecord, Roster};

/// 測試名冊：名字順序即碼位順序，便於驗證決勝行為
pub fn test_roster() -> Roster {
    Roster::from_slice(&["Amber", "Brian", "Celine"])
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("測試日期應有效")
}

pub fn record(
    advertiser: &str,
    day: &str,
    spend: Decimal,
    collected: Decimal,
    orders: u32,
) -> RawPerformanceRecord {
    RawPerformanceRecord::new(advertiser, date(day), spend, collected, orders)
}

/// 固定列集的資料來源，並記錄取數次數以驗證快取行為
pub struct StaticDataSource {
    records: Vec<RawPerformanceRecord>,
    fetch_count: AtomicUsize,
}

impl StaticDataSource {
    pub fn new(records: Vec<RawPerformanceRecord>) -> Arc<Self> {
        Arc::new(Self {
            records,
            fetch_count: AtomicUsize::new(0),
        })
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PerformanceDataSource for StaticDataSource {
    async fn fetch_all_performance_rows(&self) -> DataSourceResult<Vec<RawPerformanceRecord>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

/// 永遠失敗的資料來源
pub struct FailingDataSource;

#[async_trait]
impl PerformanceDataSource for FailingDataSource {
    async fn fetch_all_performance_rows(&self) -> DataSourceResult<Vec<RawPerformanceRecord>> {
        Err(DataSourceError::Connection("測試用連線失敗".to_string()))
    }
}
