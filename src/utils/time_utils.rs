// time_utils.rs
//
// 提供日曆日期與月份字串相關的工具函數，用於在系統不同層之間轉換時間格式。
// 主要功能：
// 1. 在外部資料層（ISO 字串）和領域模型層（NaiveDate）之間轉換
// 2. 月份字串（YYYY-MM）的解析與歸屬判斷

use chrono::{Datelike, NaiveDate};

//
// 基礎日期轉換函數
//

/// 將 ISO 日期字串（YYYY-MM-DD）解析為 NaiveDate
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// 將 NaiveDate 格式化為 ISO 日期字串（YYYY-MM-DD）
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

//
// 月份字串相關函數
//

/// 將月份字串（YYYY-MM）解析為 (年, 月)
///
/// 月份必須在 1 到 12 之間，否則返回 None。
pub fn parse_month(value: &str) -> Option<(i32, u32)> {
    let (year_part, month_part) = value.trim().split_once('-')?;
    let year: i32 = year_part.parse().ok()?;
    let month: u32 = month_part.parse().ok()?;
    if (1..=12).contains(&month) {
        Some((year, month))
    } else {
        None
    }
}

/// 取得日期所屬的月份字串（YYYY-MM）
pub fn month_of(date: NaiveDate) -> String {
    format_month(date.year(), date.month())
}

/// 將 (年, 月) 格式化為月份字串（YYYY-MM）
pub fn format_month(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// 判斷日期是否屬於指定的 (年, 月)
pub fn date_in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2025-07-15").expect("應可解析有效日期");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 7, 15).unwrap());

        // 允許前後空白
        assert!(parse_date(" 2025-07-15 ").is_some());

        // 無效輸入
        assert!(parse_date("2025-13-01").is_none());
        assert!(parse_date("2025/07/15").is_none());
        assert!(parse_date("not-a-date").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_format_date_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let formatted = format_date(date);
        assert_eq!(formatted, "2025-01-03");
        assert_eq!(parse_date(&formatted), Some(date));
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-07"), Some((2025, 7)));
        assert_eq!(parse_month("1999-12"), Some((1999, 12)));

        // 月份超出範圍
        assert_eq!(parse_month("2025-00"), None);
        assert_eq!(parse_month("2025-13"), None);

        // 格式錯誤
        assert_eq!(parse_month("202507"), None);
        assert_eq!(parse_month("2025-7x"), None);
        assert_eq!(parse_month(""), None);
    }

    #[test]
    fn test_month_of_and_membership() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
        assert_eq!(month_of(date), "2025-07");
        assert!(date_in_month(date, 2025, 7));
        assert!(!date_in_month(date, 2025, 8));
        assert!(!date_in_month(date, 2024, 7));
    }
}
