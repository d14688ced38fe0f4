// domain_types.rs - 領域模型模組
//
// 定義佣金計算管線使用的核心資料結構：
// 原始投放記錄、每日佣金結果、月度彙總與排名條目。

pub mod commission;
pub mod performance;
pub mod ranking;
pub mod roster;

// 重新導出常用類型
pub use commission::{CommissionStatus, DailyCommissionResult, MonthlyCommissionSummary};
pub use performance::RawPerformanceRecord;
pub use ranking::{RankInfo, RankedEntry};
pub use roster::Roster;
