// domain_types/performance.rs - 原始投放績效記錄

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers;

/// 單筆投放績效原始記錄（外部資料服務，唯讀輸入）
///
/// 概念上以 (投放人員, 日期) 為鍵，但同一鍵可能存在多筆記錄，
/// 聚合時必須全數加總。外部服務的數值欄位可能以字串到達，
/// 反序列化時經由集中式寬鬆解析強制轉換，失敗回退為零。
///
/// 欄位別名對應外部服務的列形狀：
/// staff / ad_spend / credit_card_amount / credit_card_orders。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPerformanceRecord {
    /// 投放人員身份
    #[serde(alias = "staff")]
    pub advertiser: String,

    /// 投放日（ISO 日曆日，無時間成分）
    pub date: NaiveDate,

    /// 廣告花費（A 幣別，非負）
    #[serde(
        default,
        alias = "ad_spend",
        deserialize_with = "serde_helpers::decimal_or_zero"
    )]
    pub spend_amount: Decimal,

    /// 刷卡收款金額（B 幣別，非負）
    #[serde(
        default,
        alias = "credit_card_amount",
        deserialize_with = "serde_helpers::decimal_or_zero"
    )]
    pub collected_amount: Decimal,

    /// 訂單數（非負整數）
    #[serde(
        default,
        alias = "credit_card_orders",
        deserialize_with = "serde_helpers::order_count_or_zero"
    )]
    pub order_count: u32,
}

impl RawPerformanceRecord {
    pub fn new(
        advertiser: impl Into<String>,
        date: NaiveDate,
        spend_amount: Decimal,
        collected_amount: Decimal,
        order_count: u32,
    ) -> Self {
        Self {
            advertiser: advertiser.into(),
            date,
            spend_amount,
            collected_amount,
            order_count,
        }
    }
}
