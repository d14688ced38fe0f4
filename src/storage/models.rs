// storage/models.rs - 外部資料服務的列模型
//
// 託管資料服務以文字欄位儲存數值（歷史遺留的表結構），
// 轉換為領域記錄時經由集中式寬鬆解析，單筆髒資料不影響整批。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain_types::RawPerformanceRecord;
use crate::utils::serde_helpers::{parse_decimal_str, parse_order_count_str};
use crate::utils::time_utils::parse_date;

/// 投放績效原始列（外部資料服務的表結構）
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PerformanceRow {
    /// 投放人員身份
    pub staff: String,
    /// 投放日（ISO 字串）
    pub date: String,
    /// 廣告花費（文字欄位）
    pub ad_spend: Option<String>,
    /// 刷卡收款金額（文字欄位）
    pub credit_card_amount: Option<String>,
    /// 刷卡訂單數（文字欄位）
    pub credit_card_orders: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PerformanceRow {
    /// 轉換為領域記錄
    ///
    /// 日期無法解析時返回 None（該列略過）；數值欄位缺漏或
    /// 無效一律回退為零。
    pub fn into_record(self) -> Option<RawPerformanceRecord> {
        let date = parse_date(&self.date)?;
        Some(RawPerformanceRecord {
            advertiser: self.staff,
            date,
            spend_amount: self.ad_spend.as_deref().map(parse_decimal_str).unwrap_or_default(),
            collected_amount: self
                .credit_card_amount
                .as_deref()
                .map(parse_decimal_str)
                .unwrap_or_default(),
            order_count: self
                .credit_card_orders
                .as_deref()
                .map(parse_order_count_str)
                .unwrap_or_default(),
        })
    }
}
