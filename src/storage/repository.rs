// storage/repository.rs - 投放績效資料存取
//
// PerformanceDataSource 的 PostgreSQL 實現。查詢返回完整列集，
// 日期與名冊過濾由呼叫端（服務層）在客戶端完成。

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use crate::data_provider::{DataSourceError, DataSourceResult, PerformanceDataSource};
use crate::domain_types::RawPerformanceRecord;
use crate::storage::models::PerformanceRow;

impl From<sqlx::Error> for DataSourceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DataSourceError::Connection(err.to_string())
            }
            other => DataSourceError::Query(other.to_string()),
        }
    }
}

/// PostgreSQL投放績效存取實現
pub struct PgPerformanceRepository {
    pool: PgPool,
}

impl PgPerformanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 取得所有投放績效原始列（未轉換）
    pub async fn fetch_rows(&self) -> DataSourceResult<Vec<PerformanceRow>> {
        let rows = sqlx::query_as::<_, PerformanceRow>(
            r#"
            SELECT staff, date, ad_spend, credit_card_amount, credit_card_orders,
                   created_at, updated_at
            FROM performance_records
            ORDER BY date, staff
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl PerformanceDataSource for PgPerformanceRepository {
    async fn fetch_all_performance_rows(&self) -> DataSourceResult<Vec<RawPerformanceRecord>> {
        let rows = self.fetch_rows().await?;
        let total = rows.len();

        let records: Vec<RawPerformanceRecord> =
            rows.into_iter().filter_map(PerformanceRow::into_record).collect();

        let skipped = total - records.len();
        if skipped > 0 {
            warn!(skipped, total, "部分原始列日期無法解析，已略過");
        }

        Ok(records)
    }
}
