// utils.rs - 公共工具模組
//
// 提供各種通用的工具函數和輔助方法，用於簡化系統其他部分的代碼。

pub mod serde_helpers;
pub mod time_utils;

// 重新導出時間工具函數，使其可以通過 utils::function_name 直接訪問
pub use time_utils::{
    date_in_month, format_date, format_month, month_of, parse_date, parse_month,
};

pub use serde_helpers::{
    coerce_decimal, coerce_order_count, decimal_or_zero, order_count_or_zero, parse_decimal_str,
    parse_order_count_str,
};
