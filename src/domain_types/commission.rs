// domain_types/commission.rs - 佣金計算結果模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 每日佣金結果狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionStatus {
    /// 當日無訂單資料
    NoData,
    /// ROI 達高標，適用最高佣金級距
    HighPerformance,
    /// ROI 達門檻，適用一般佣金級距
    Qualified,
    /// ROI 未達門檻，無佣金
    NoCommission,
    /// 原始資料取得失敗
    Error,
}

impl CommissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionStatus::NoData => "no_data",
            CommissionStatus::HighPerformance => "high_performance",
            CommissionStatus::Qualified => "qualified",
            CommissionStatus::NoCommission => "no_commission",
            CommissionStatus::Error => "error",
        }
    }
}

impl fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 單日單人佣金結果（衍生資料，短 TTL 快取）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCommissionResult {
    pub advertiser: String,
    pub date: NaiveDate,
    /// 當日訂單數（多筆原始記錄加總）
    pub order_count: u32,
    /// 轉換後收益 / 花費，四位小數
    pub roi: Decimal,
    /// 每單佣金級距，固定集合 {0, 5, 7}
    pub commission_per_order: Decimal,
    /// 訂單數 × 每單佣金，兩位小數
    pub total_commission: Decimal,
    pub status: CommissionStatus,
}

impl DailyCommissionResult {
    /// 建立數值全零的結果，用於無資料或錯誤降級
    pub fn zeroed(advertiser: impl Into<String>, date: NaiveDate, status: CommissionStatus) -> Self {
        Self {
            advertiser: advertiser.into(),
            date,
            order_count: 0,
            roi: Decimal::ZERO,
            commission_per_order: Decimal::ZERO,
            total_commission: Decimal::ZERO,
            status,
        }
    }
}

/// 單人月度佣金彙總（衍生資料，較長 TTL 快取）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCommissionSummary {
    pub advertiser: String,
    /// 月份字串（YYYY-MM）
    pub month: String,
    /// 當月佣金合計，兩位小數
    pub total_commission: Decimal,
    /// 當月訂單數合計
    pub total_orders: u32,
    /// 工作天數：有訂單或有佣金的日數
    pub working_days: u32,
    /// 有資料日的日 ROI 平均值，四位小數
    pub avg_roi: Decimal,
}

impl MonthlyCommissionSummary {
    /// 建立數值全零的彙總，用於無資料或錯誤降級
    pub fn zeroed(advertiser: impl Into<String>, month: impl Into<String>) -> Self {
        Self {
            advertiser: advertiser.into(),
            month: month.into(),
            total_commission: Decimal::ZERO,
            total_orders: 0,
            working_days: 0,
            avg_roi: Decimal::ZERO,
        }
    }
}
