// tests/ranking_test.rs - 穩定排名引擎整合測試

mod common;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use commission_engine::commission::calculator::{calculate_monthly, DEFAULT_EXCHANGE_RATE};
use commission_engine::commission::ranking::{fallback_rankings, rank_info, rank_monthly};
use commission_engine::domain_types::{MonthlyCommissionSummary, Roster};

use common::{record, test_roster};

fn summary(
    advertiser: &str,
    commission: Decimal,
    orders: u32,
    avg_roi: Decimal,
    working_days: u32,
) -> MonthlyCommissionSummary {
    MonthlyCommissionSummary {
        advertiser: advertiser.to_string(),
        month: "2025-07".to_string(),
        total_commission: commission,
        total_orders: orders,
        working_days,
        avg_roi,
    }
}

/// 規格情境：只含單日資料的月份，排序為 Amber(70)、Brian(35)、Celine(0)
#[test]
fn test_month_ranking_scenario() {
    let roster = test_roster();
    let records = vec![
        record("Amber", "2025-07-15", dec!(100), dec!(2200), 10),
        record("Brian", "2025-07-15", dec!(50), dec!(1000), 5),
    ];
    let summaries = calculate_monthly(&records, &roster, 2025, 7, DEFAULT_EXCHANGE_RATE);
    let rankings = rank_monthly(summaries, &roster, "2025-07");

    let order: Vec<(&str, u32)> = rankings
        .iter()
        .map(|entry| (entry.advertiser.as_str(), entry.rank))
        .collect();
    assert_eq!(
        order,
        vec![("Amber", 1), ("Brian", 2), ("Celine", 3)]
    );
    assert_eq!(rankings[0].rank_info.title, "冠軍");
    assert_eq!(rankings[1].rank_info.title, "亞軍");
    assert_eq!(rankings[2].rank_info.title, "季軍");
}

/// 佣金與訂單數完全相同時，必須以 avg_roi 遞降決勝而非名字
#[test]
fn test_tie_break_cascade_uses_avg_roi_before_name() {
    let roster = test_roster();
    let rankings = rank_monthly(
        vec![
            summary("Amber", dec!(50), 10, dec!(0.9), 3),
            summary("Brian", dec!(50), 10, dec!(1.2), 3),
            summary("Celine", dec!(50), 10, dec!(1.2), 5),
        ],
        &roster,
        "2025-07",
    );

    let order: Vec<&str> = rankings.iter().map(|e| e.advertiser.as_str()).collect();
    // Celine 與 Brian 同 avg_roi，工作天數較多者在前；Amber 的 avg_roi 最低
    assert_eq!(order, vec!["Celine", "Brian", "Amber"]);
}

#[test]
fn test_rank_info_is_keyed_by_rank_only() {
    assert_eq!(rank_info(1).title, "冠軍");
    assert_eq!(rank_info(4).title, "繼續加油");
    assert_eq!(rank_info(4).rank, 4);
    // 同一名次不論誰持有都得到同一筆資訊
    assert_eq!(rank_info(2), rank_info(2));
}

#[test]
fn test_fallback_preserves_roster_order() {
    let roster = Roster::from_slice(&["Celine", "Amber", "Brian"]);
    let rankings = fallback_rankings(&roster, "2025-07");
    let order: Vec<&str> = rankings.iter().map(|e| e.advertiser.as_str()).collect();
    assert_eq!(order, vec!["Celine", "Amber", "Brian"]);
    assert_eq!(
        rankings.iter().map(|e| e.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

fn arb_summary(advertiser: &'static str) -> impl Strategy<Value = MonthlyCommissionSummary> {
    (0i64..500_000, 0u32..2000, 0i64..30_000, 0u32..31).prop_map(
        move |(commission_cents, orders, roi_ten_thousandths, working_days)| {
            MonthlyCommissionSummary {
                advertiser: advertiser.to_string(),
                month: "2025-07".to_string(),
                // 兩位小數的佣金、四位小數的 ROI，與計算器輸出同精度
                total_commission: Decimal::new(commission_cents, 2),
                total_orders: orders,
                working_days,
                avg_roi: Decimal::new(roi_ten_thousandths, 4),
            }
        },
    )
}

proptest! {
    /// 排名全序與確定性：任意輸入下，重複排序結果完全一致，
    /// 且名冊每位成員恰好出現一次、名次連續。
    #[test]
    fn test_ranking_totality_and_determinism(
        amber in arb_summary("Amber"),
        brian in arb_summary("Brian"),
        celine in arb_summary("Celine"),
    ) {
        let roster = test_roster();
        let input = vec![amber, brian, celine];

        let first = rank_monthly(input.clone(), &roster, "2025-07");
        let second = rank_monthly(input, &roster, "2025-07");

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), roster.len());

        for (index, entry) in first.iter().enumerate() {
            prop_assert_eq!(entry.rank, index as u32 + 1);
        }
        for member in roster.iter() {
            prop_assert_eq!(
                first.iter().filter(|e| e.advertiser == member).count(),
                1
            );
        }

        // 排序不變式：比較鍵遞降，完全同分時名字遞增
        // （輸入已在比較精度上生成，量化為恆等）
        for window in first.windows(2) {
            let (higher, lower) = (&window[0], &window[1]);
            let key = |e: &commission_engine::domain_types::RankedEntry| {
                (
                    e.total_commission,
                    e.total_orders,
                    e.avg_roi,
                    e.working_days,
                )
            };
            prop_assert!(
                key(higher) > key(lower)
                    || (key(higher) == key(lower) && higher.advertiser < lower.advertiser)
            );
        }
    }
}
