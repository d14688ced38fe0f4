// domain_types/ranking.rs - 月度排名模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain_types::commission::MonthlyCommissionSummary;

/// 名次對應的靜態獎勵資訊
///
/// 只依名次決定，與持有該名次的身份無關。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankInfo {
    pub rank: u32,
    /// 名次稱號
    pub title: String,
    /// 獎勵說明
    pub reward: String,
}

impl RankInfo {
    pub fn new(rank: u32, title: impl Into<String>, reward: impl Into<String>) -> Self {
        Self {
            rank,
            title: title.into(),
            reward: reward.into(),
        }
    }
}

/// 月度排名條目：月度彙總欄位 + 名次 + 獎勵資訊
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub advertiser: String,
    pub month: String,
    pub total_commission: Decimal,
    pub total_orders: u32,
    pub working_days: u32,
    pub avg_roi: Decimal,
    /// 1 起算的名次
    pub rank: u32,
    pub rank_info: RankInfo,
}

impl RankedEntry {
    /// 由月度彙總與名次組合排名條目
    pub fn from_summary(summary: MonthlyCommissionSummary, rank: u32, rank_info: RankInfo) -> Self {
        Self {
            advertiser: summary.advertiser,
            month: summary.month,
            total_commission: summary.total_commission,
            total_orders: summary.total_orders,
            working_days: summary.working_days,
            avg_roi: summary.avg_roi,
            rank,
            rank_info,
        }
    }
}
