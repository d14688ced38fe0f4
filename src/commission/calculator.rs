// commission/calculator.rs - 佣金計算器
//
// 純函數：同一組輸入永遠產生相同輸出，不做任何 I/O。
// 所有公開函數都返回名冊完整的結果集，零資料成員以全零統計補入。

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::{BTreeMap, HashMap};

use crate::domain_types::{
    CommissionStatus, DailyCommissionResult, MonthlyCommissionSummary, RawPerformanceRecord,
    Roster,
};
use crate::utils::time_utils::{date_in_month, format_month};

/// 固定匯率常數：每 1 單位 A 幣別折合的 B 幣別數量
pub const DEFAULT_EXCHANGE_RATE: Decimal = rust_decimal_macros::dec!(20.0);

/// 高績效 ROI 門檻
pub const HIGH_PERFORMANCE_ROI: Decimal = rust_decimal_macros::dec!(1.0);
/// 合格 ROI 門檻
pub const QUALIFIED_ROI: Decimal = rust_decimal_macros::dec!(0.8);

/// 高績效級距每單佣金
pub const HIGH_TIER_COMMISSION: Decimal = rust_decimal_macros::dec!(7);
/// 合格級距每單佣金
pub const QUALIFIED_TIER_COMMISSION: Decimal = rust_decimal_macros::dec!(5);

/// ROI 小數位數
const ROI_SCALE: u32 = 4;
/// 佣金金額小數位數
const COMMISSION_SCALE: u32 = 2;

/// 單人單日聚合中間值
#[derive(Debug, Clone, Copy, Default)]
struct DailyAggregate {
    spend: Decimal,
    collected: Decimal,
    orders: u32,
}

impl DailyAggregate {
    fn absorb(&mut self, record: &RawPerformanceRecord) {
        self.spend += record.spend_amount;
        self.collected += record.collected_amount;
        self.orders += record.order_count;
    }
}

/// ROI 統一捨入：四位小數，四捨五入（遠離零）
pub fn round_roi(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(ROI_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// 佣金金額統一捨入：兩位小數，四捨五入（遠離零）
pub fn round_commission(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(COMMISSION_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// 將 B 幣別收款金額換算為 A 幣別
///
/// 匯率非正時回退到固定常數，換算永不失敗。
pub fn convert_collected(collected: Decimal, rate: Decimal) -> Decimal {
    let effective = if rate > Decimal::ZERO {
        rate
    } else {
        DEFAULT_EXCHANGE_RATE
    };
    collected.checked_div(effective).unwrap_or(Decimal::ZERO)
}

/// 依 ROI 與訂單數決定佣金級距
///
/// 級距判定使用未捨入的 ROI 比值；訂單數為零時一律無資料、無佣金，
/// 與 ROI 無關。
pub fn commission_tier(roi: Decimal, orders: u32) -> (Decimal, CommissionStatus) {
    if orders == 0 {
        return (Decimal::ZERO, CommissionStatus::NoData);
    }
    if roi >= HIGH_PERFORMANCE_ROI {
        (HIGH_TIER_COMMISSION, CommissionStatus::HighPerformance)
    } else if roi >= QUALIFIED_ROI {
        (QUALIFIED_TIER_COMMISSION, CommissionStatus::Qualified)
    } else {
        (Decimal::ZERO, CommissionStatus::NoCommission)
    }
}

/// 由單日聚合值建立佣金結果
fn build_daily_result(
    advertiser: &str,
    date: NaiveDate,
    aggregate: DailyAggregate,
    rate: Decimal,
) -> DailyCommissionResult {
    let revenue = convert_collected(aggregate.collected, rate);
    let roi_exact = if aggregate.spend > Decimal::ZERO {
        revenue.checked_div(aggregate.spend).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };
    let (commission_per_order, status) = commission_tier(roi_exact, aggregate.orders);
    let total_commission = round_commission(Decimal::from(aggregate.orders) * commission_per_order);

    DailyCommissionResult {
        advertiser: advertiser.to_string(),
        date,
        order_count: aggregate.orders,
        roi: round_roi(roi_exact),
        commission_per_order,
        total_commission,
        status,
    }
}

/// 計算指定日期的每日佣金結果
///
/// 輸入列中僅日期相符且屬於名冊的記錄參與聚合；同鍵多筆記錄加總。
/// 返回的結果集按名冊順序排列，每位成員恰好一筆。
pub fn calculate_daily(
    records: &[RawPerformanceRecord],
    roster: &Roster,
    date: NaiveDate,
    rate: Decimal,
) -> Vec<DailyCommissionResult> {
    let mut aggregates: HashMap<&str, DailyAggregate> = HashMap::new();
    for record in records.iter().filter(|r| r.date == date) {
        if !roster.contains(&record.advertiser) {
            continue;
        }
        aggregates
            .entry(record.advertiser.as_str())
            .or_default()
            .absorb(record);
    }

    roster
        .iter()
        .map(|advertiser| {
            let aggregate = aggregates.get(advertiser).copied().unwrap_or_default();
            build_daily_result(advertiser, date, aggregate, rate)
        })
        .collect()
}

/// 原始資料取得失敗時的降級結果：全員錯誤狀態、數值全零
pub fn error_results(roster: &Roster, date: NaiveDate) -> Vec<DailyCommissionResult> {
    roster
        .iter()
        .map(|advertiser| DailyCommissionResult::zeroed(advertiser, date, CommissionStatus::Error))
        .collect()
}

/// 計算指定月份的月度佣金彙總
///
/// 逐日折疊每位成員的日結果：佣金與訂單數加總；工作天數計
/// 有訂單或有佣金的日數；平均 ROI 取有資料日（該成員當日至少
/// 一筆原始列）的日 ROI 平均值。
pub fn calculate_monthly(
    records: &[RawPerformanceRecord],
    roster: &Roster,
    year: i32,
    month: u32,
    rate: Decimal,
) -> Vec<MonthlyCommissionSummary> {
    let month_str = format_month(year, month);

    // 先按成員、再按日期聚合當月記錄
    let mut by_advertiser: HashMap<&str, BTreeMap<NaiveDate, DailyAggregate>> = HashMap::new();
    for record in records {
        if !date_in_month(record.date, year, month) || !roster.contains(&record.advertiser) {
            continue;
        }
        by_advertiser
            .entry(record.advertiser.as_str())
            .or_default()
            .entry(record.date)
            .or_default()
            .absorb(record);
    }

    roster
        .iter()
        .map(|advertiser| {
            let Some(days) = by_advertiser.get(advertiser) else {
                return MonthlyCommissionSummary::zeroed(advertiser, month_str.as_str());
            };

            let mut total_commission = Decimal::ZERO;
            let mut total_orders: u32 = 0;
            let mut working_days: u32 = 0;
            let mut roi_sum = Decimal::ZERO;
            let mut days_with_data: u32 = 0;

            for (&date, &aggregate) in days {
                let daily = build_daily_result(advertiser, date, aggregate, rate);
                total_commission += daily.total_commission;
                total_orders += daily.order_count;
                if daily.order_count > 0 || daily.total_commission > Decimal::ZERO {
                    working_days += 1;
                }
                roi_sum += daily.roi;
                days_with_data += 1;
            }

            let avg_roi = if days_with_data > 0 {
                round_roi(
                    roi_sum
                        .checked_div(Decimal::from(days_with_data))
                        .unwrap_or(Decimal::ZERO),
                )
            } else {
                Decimal::ZERO
            };

            MonthlyCommissionSummary {
                advertiser: advertiser.to_string(),
                month: month_str.clone(),
                total_commission: round_commission(total_commission),
                total_orders,
                working_days,
                avg_roi,
            }
        })
        .collect()
}

/// 月度計算失敗時的降級彙總：全員數值全零
pub fn zeroed_summaries(roster: &Roster, month: &str) -> Vec<MonthlyCommissionSummary> {
    roster
        .iter()
        .map(|advertiser| MonthlyCommissionSummary::zeroed(advertiser, month))
        .collect()
}
