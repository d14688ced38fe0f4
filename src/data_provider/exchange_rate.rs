// data_provider/exchange_rate.rs - 匯率提供者
//
// 收款金額（B 幣別）換算為花費幣別（A）使用固定匯率常數。
// 即時匯率服務屬於盡力而為的外部關注點：任何失敗都不得阻塞或
// 中斷佣金計算，呼叫端一律回退到固定常數。

use rust_decimal::Decimal;
use thiserror::Error;

/// 匯率取得錯誤
#[derive(Debug, Error)]
pub enum ExchangeRateError {
    #[error("匯率服務不可用: {0}")]
    Unavailable(String),

    #[error("匯率值無效: {0}")]
    InvalidRate(String),
}

/// 匯率提供者特性
///
/// 實現必須立即返回（不做 I/O 等待）；需要遠端更新的實現
/// 應在背景刷新並在此返回最近一次的快照。
pub trait ExchangeRateProvider: Send + Sync {
    /// 當前 B 幣別對 A 幣別的匯率（每 1 單位 A 的 B 數量）
    fn current_rate(&self) -> Result<Decimal, ExchangeRateError>;
}

/// 固定匯率提供者
#[derive(Debug, Clone, Copy)]
pub struct FixedExchangeRate {
    rate: Decimal,
}

impl FixedExchangeRate {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }
}

impl ExchangeRateProvider for FixedExchangeRate {
    fn current_rate(&self) -> Result<Decimal, ExchangeRateError> {
        if self.rate <= Decimal::ZERO {
            return Err(ExchangeRateError::InvalidRate(self.rate.to_string()));
        }
        Ok(self.rate)
    }
}
