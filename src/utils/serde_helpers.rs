// utils/serde_helpers.rs - 序列化與反序列化輔助函數
//
// 外部資料服務的數值欄位可能以數字或字串形式到達，甚至缺漏。
// 所有寬鬆解析集中在這裡：解析失敗一律回退為零，不讓單筆髒資料
// 中斷整體計算。

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 將字串解析為 Decimal，失敗時回退為零
///
/// 接受千分位逗號與前後空白，例如 "1,234.50"。
pub fn parse_decimal_str(value: &str) -> Decimal {
    value
        .trim()
        .replace(',', "")
        .parse::<Decimal>()
        .unwrap_or(Decimal::ZERO)
}

/// 將字串解析為訂單數，失敗時回退為零
///
/// 接受整數字串；帶小數點的輸入取整數部分。
pub fn parse_order_count_str(value: &str) -> u32 {
    let trimmed = value.trim().replace(',', "");
    if let Ok(count) = trimmed.parse::<u32>() {
        return count;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.trunc() as u32)
        .unwrap_or(0)
}

/// 將 JSON 值強制轉換為 Decimal（數字或字串皆可）
pub fn coerce_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Decimal::from(int)
            } else if let Some(float) = number.as_f64() {
                Decimal::try_from(float).unwrap_or(Decimal::ZERO)
            } else {
                Decimal::ZERO
            }
        }
        Value::String(text) => parse_decimal_str(text),
        _ => Decimal::ZERO,
    }
}

/// 將 JSON 值強制轉換為訂單數（數字或字串皆可）
pub fn coerce_order_count(value: &Value) -> u32 {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_u64() {
                u32::try_from(int).unwrap_or(u32::MAX)
            } else if let Some(float) = number.as_f64() {
                if float.is_finite() && float >= 0.0 {
                    float.trunc() as u32
                } else {
                    0
                }
            } else {
                0
            }
        }
        Value::String(text) => parse_order_count_str(text),
        _ => 0,
    }
}

/// serde 反序列化器：金額欄位寬鬆解析，缺值或無效值一律為零
pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_decimal(&value))
}

/// serde 反序列化器：訂單數欄位寬鬆解析，缺值或無效值一律為零
pub fn order_count_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_order_count(&value))
}
