// data_provider/source.rs - 績效資料來源接口
//
// 管線唯一的 I/O 邊界。資料來源一次返回全部原始列，
// 日期與名冊過濾一律在客戶端進行。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain_types::RawPerformanceRecord;

/// 資料來源錯誤類型
///
/// 這些錯誤不會穿透服務層：呼叫端（計算器／排名引擎）捕捉後
/// 降級為名冊完整、標記錯誤的結果集。
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("資料來源連線失敗: {0}")]
    Connection(String),

    #[error("資料來源查詢失敗: {0}")]
    Query(String),

    #[error("資料來源回應格式無效: {0}")]
    InvalidPayload(String),
}

/// 資料來源結果類型
pub type DataSourceResult<T> = Result<T, DataSourceError>;

/// 績效資料來源特性 - 定義資料提供模組的核心接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PerformanceDataSource: Send + Sync {
    /// 取得所有投放績效原始列
    ///
    /// 契約：網路或授權失敗時返回錯誤；成功時返回完整列集，
    /// 由呼叫端自行過濾日期與名冊成員。
    async fn fetch_all_performance_rows(&self) -> DataSourceResult<Vec<RawPerformanceRecord>>;
}
