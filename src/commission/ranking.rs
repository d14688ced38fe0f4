// commission/ranking.rs - 穩定排名引擎
//
// 對月度彙總產生確定性的全序：多鍵遞降比較，數值鍵先量化到
// 業務精度（佣金兩位小數、ROI 四位小數）再比較，量化後的相等
// 視為同分，由下一個鍵決定。最後以身份字串的 Unicode 碼位順序
// 收尾，保證即使所有數值完全相同也存在唯一排序。

use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;

use crate::domain_types::{MonthlyCommissionSummary, RankInfo, RankedEntry, Roster};

/// 佣金比較精度：小於 0.01 的差異視為同分
const COMMISSION_CMP_SCALE: u32 = 2;
/// ROI 比較精度：小於 0.0001 的差異視為同分
const ROI_CMP_SCALE: u32 = 4;

/// 名次獎勵靜態對照表：前三名具名，其後通用
const RANK_TIERS: [(u32, &str, &str); 3] = [
    (1, "冠軍", "月度獎金加成 10%"),
    (2, "亞軍", "月度獎金加成 5%"),
    (3, "季軍", "月度獎金加成 3%"),
];

/// 第四名以後的通用稱號與獎勵
const DEFAULT_TIER: (&str, &str) = ("繼續加油", "無額外獎勵");

/// 查詢名次對應的獎勵資訊
///
/// 只依名次決定，與持有該名次的身份無關。
pub fn rank_info(rank: u32) -> RankInfo {
    RANK_TIERS
        .iter()
        .find(|(tier_rank, _, _)| *tier_rank == rank)
        .map(|(tier_rank, title, reward)| RankInfo::new(*tier_rank, *title, *reward))
        .unwrap_or_else(|| RankInfo::new(rank, DEFAULT_TIER.0, DEFAULT_TIER.1))
}

fn quantize(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// 多鍵遞降比較，每一鍵都是前一鍵的同分決勝
fn compare_summaries(a: &MonthlyCommissionSummary, b: &MonthlyCommissionSummary) -> Ordering {
    let commission_a = quantize(a.total_commission, COMMISSION_CMP_SCALE);
    let commission_b = quantize(b.total_commission, COMMISSION_CMP_SCALE);
    match commission_b.cmp(&commission_a) {
        Ordering::Equal => {}
        ordering => return ordering,
    }

    match b.total_orders.cmp(&a.total_orders) {
        Ordering::Equal => {}
        ordering => return ordering,
    }

    let roi_a = quantize(a.avg_roi, ROI_CMP_SCALE);
    let roi_b = quantize(b.avg_roi, ROI_CMP_SCALE);
    match roi_b.cmp(&roi_a) {
        Ordering::Equal => {}
        ordering => return ordering,
    }

    match b.working_days.cmp(&a.working_days) {
        Ordering::Equal => {}
        ordering => return ordering,
    }

    // 身份字串碼位順序遞增，保證全序
    a.advertiser.cmp(&b.advertiser)
}

/// 對月度彙總排序並標注名次
///
/// 缺席的名冊成員先以全零統計補入，名冊外或重複的條目剔除，
/// 因此輸出恆為名冊完整：每位成員恰好一筆。
pub fn rank_monthly(
    summaries: Vec<MonthlyCommissionSummary>,
    roster: &Roster,
    month: &str,
) -> Vec<RankedEntry> {
    let mut entries: Vec<MonthlyCommissionSummary> = Vec::with_capacity(roster.len());
    for summary in summaries {
        if !roster.contains(&summary.advertiser) {
            continue;
        }
        if entries.iter().any(|e| e.advertiser == summary.advertiser) {
            continue;
        }
        entries.push(summary);
    }
    for advertiser in roster.iter() {
        if !entries.iter().any(|e| e.advertiser == advertiser) {
            entries.push(MonthlyCommissionSummary::zeroed(advertiser, month));
        }
    }

    entries.sort_by(compare_summaries);

    entries
        .into_iter()
        .enumerate()
        .map(|(index, summary)| {
            let rank = index as u32 + 1;
            RankedEntry::from_summary(summary, rank, rank_info(rank))
        })
        .collect()
}

/// 月度彙總計算失敗時的降級排名：名冊順序、數值全零、名次 1..N
pub fn fallback_rankings(roster: &Roster, month: &str) -> Vec<RankedEntry> {
    roster
        .iter()
        .enumerate()
        .map(|(index, advertiser)| {
            let rank = index as u32 + 1;
            RankedEntry::from_summary(
                MonthlyCommissionSummary::zeroed(advertiser, month),
                rank,
                rank_info(rank),
            )
        })
        .collect()
}
