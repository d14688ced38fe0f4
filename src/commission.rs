// commission.rs - 佣金計算模組
//
// 核心管線：原始投放列 → 聚合計算（calculator）→ TTL 快取 →
// 穩定排序與名次標注（ranking），由 service 對外提供穩定接口。

pub mod calculator;
pub mod ranking;
pub mod service;

// 重新導出常用元素
pub use calculator::{
    DEFAULT_EXCHANGE_RATE, HIGH_PERFORMANCE_ROI, HIGH_TIER_COMMISSION, QUALIFIED_ROI,
    QUALIFIED_TIER_COMMISSION,
};
pub use ranking::{fallback_rankings, rank_info, rank_monthly};
pub use service::StableCommissionService;
