// commission/service.rs - 穩定佣金服務
//
// 對外的穩定接口：所有公開方法永不失敗，任何底層錯誤都降級為
// 名冊完整、形狀固定的結果集，顯示層不需要針對例外做特殊處理。
// 快取由服務實例顯式持有，生命週期跟隨宿主行程，避免隱式全域
// 狀態造成跨測試汙染。

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::cache::{
    available_dates_key, daily_commission_key, daily_month_prefix, monthly_commission_key,
    monthly_ranking_key, DataCache, ServiceCacheStats,
};
use crate::commission::{calculator, ranking};
use crate::config::ApplicationConfig;
use crate::data_provider::{
    DataSourceError, DataSourceResult, ExchangeRateProvider, FixedExchangeRate,
    PerformanceDataSource,
};
use crate::domain_types::{
    DailyCommissionResult, MonthlyCommissionSummary, RankedEntry, Roster,
};
use crate::utils::time_utils::{date_in_month, format_date, month_of, parse_date, parse_month};

/// 每日佣金結果預設 TTL
pub const DEFAULT_DAILY_TTL: Duration = Duration::from_secs(120);
/// 月度彙總預設 TTL
pub const DEFAULT_MONTHLY_TTL: Duration = Duration::from_secs(600);
/// 月度排名預設 TTL
pub const DEFAULT_RANKING_TTL: Duration = Duration::from_secs(480);
/// 可用日期清單預設 TTL
pub const DEFAULT_DATES_TTL: Duration = Duration::from_secs(120);

/// 穩定佣金服務
///
/// 持有資料來源、匯率提供者、注入的名冊，以及各結果類型的
/// TTL 快取。同一鍵的併發刷新可能重複計算，最後寫入者勝出；
/// 計算是同一輸入的純函數，重複計算產生相同結果而非汙染。
pub struct StableCommissionService {
    source: Arc<dyn PerformanceDataSource>,
    rates: Arc<dyn ExchangeRateProvider>,
    roster: Roster,
    fallback_rate: Decimal,
    daily_cache: DataCache<Vec<DailyCommissionResult>>,
    monthly_cache: DataCache<Vec<MonthlyCommissionSummary>>,
    ranking_cache: DataCache<Vec<RankedEntry>>,
    dates_cache: DataCache<Vec<String>>,
}

impl StableCommissionService {
    /// 以預設 TTL 與固定匯率建立服務
    pub fn new(source: Arc<dyn PerformanceDataSource>, roster: Roster) -> Self {
        Self {
            source,
            rates: Arc::new(FixedExchangeRate::new(calculator::DEFAULT_EXCHANGE_RATE)),
            roster,
            fallback_rate: calculator::DEFAULT_EXCHANGE_RATE,
            daily_cache: DataCache::new("daily", DEFAULT_DAILY_TTL),
            monthly_cache: DataCache::new("monthly", DEFAULT_MONTHLY_TTL),
            ranking_cache: DataCache::new("ranking", DEFAULT_RANKING_TTL),
            dates_cache: DataCache::new("dates", DEFAULT_DATES_TTL),
        }
    }

    /// 從應用配置建立服務：名冊、匯率與各快取 TTL 皆由配置注入
    pub fn from_config(source: Arc<dyn PerformanceDataSource>, config: &ApplicationConfig) -> Self {
        let roster = Roster::new(config.commission.roster.clone());
        let fallback_rate = Decimal::try_from(config.commission.exchange_rate)
            .ok()
            .filter(|rate| *rate > Decimal::ZERO)
            .unwrap_or(calculator::DEFAULT_EXCHANGE_RATE);

        Self {
            source,
            rates: Arc::new(FixedExchangeRate::new(fallback_rate)),
            roster,
            fallback_rate,
            daily_cache: DataCache::new("daily", config.cache.daily_ttl()),
            monthly_cache: DataCache::new("monthly", config.cache.monthly_ttl()),
            ranking_cache: DataCache::new("ranking", config.cache.ranking_ttl()),
            dates_cache: DataCache::new("dates", config.cache.dates_ttl()),
        }
    }

    /// 替換匯率提供者（即時匯率實現為盡力而為，失敗回退固定常數）
    pub fn with_rates(mut self, rates: Arc<dyn ExchangeRateProvider>) -> Self {
        self.rates = rates;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// 當前有效匯率：提供者失敗或返回非正值時回退固定常數
    fn effective_rate(&self) -> Decimal {
        match self.rates.current_rate() {
            Ok(rate) if rate > Decimal::ZERO => rate,
            Ok(rate) => {
                warn!(%rate, "匯率非正值，回退固定匯率");
                self.fallback_rate
            }
            Err(err) => {
                warn!(error = %err, "匯率服務失敗，回退固定匯率");
                self.fallback_rate
            }
        }
    }

    /// 取得指定日期的每日佣金結果（恆為名冊長度）
    ///
    /// 快取未命中時重新取數計算；取數失敗返回全員錯誤狀態的
    /// 結果集且不寫入快取，下次呼叫自然重試。
    pub async fn get_stable_daily_commission(&self, date: &str) -> Vec<DailyCommissionResult> {
        let key = daily_commission_key(date);
        if let Some(cached) = self.daily_cache.get(&key) {
            debug!(date, "每日佣金快取命中");
            return cached;
        }

        let Some(day) = parse_date(date) else {
            warn!(date, "無效的日期字串，返回錯誤狀態結果");
            return calculator::error_results(&self.roster, NaiveDate::default());
        };

        match self.source.fetch_all_performance_rows().await {
            Ok(rows) => {
                let results =
                    calculator::calculate_daily(&rows, &self.roster, day, self.effective_rate());
                self.daily_cache.set(&key, results.clone());
                results
            }
            Err(err) => {
                error!(date, error = %err, "原始資料取得失敗，返回錯誤狀態結果");
                calculator::error_results(&self.roster, day)
            }
        }
    }

    /// 取得指定月份的月度佣金彙總（恆為名冊長度）
    pub async fn get_stable_monthly_commission(
        &self,
        month: &str,
    ) -> Vec<MonthlyCommissionSummary> {
        match self.compute_monthly(month).await {
            Ok(summaries) => summaries,
            Err(err) => {
                error!(month, error = %err, "月度彙總計算失敗，返回全零彙總");
                calculator::zeroed_summaries(&self.roster, month)
            }
        }
    }

    /// 取得指定月份的排名（恆為名冊長度，已排序並標注名次）
    ///
    /// 底層月度彙總失敗時返回名冊順序、數值全零的降級排名，
    /// 不寫入快取。
    pub async fn get_stable_rankings(&self, month: &str) -> Vec<RankedEntry> {
        let key = monthly_ranking_key(month);
        if let Some(cached) = self.ranking_cache.get(&key) {
            debug!(month, "月度排名快取命中");
            return cached;
        }

        match self.compute_monthly(month).await {
            Ok(summaries) => {
                let ranked = ranking::rank_monthly(summaries, &self.roster, month);
                self.ranking_cache.set(&key, ranked.clone());
                ranked
            }
            Err(err) => {
                error!(month, error = %err, "月度排名計算失敗，返回名冊順序降級排名");
                ranking::fallback_rankings(&self.roster, month)
            }
        }
    }

    /// 取得指定月份有資料的日期清單（ISO 字串，遞降）
    pub async fn get_available_dates_for_month(&self, month: &str) -> Vec<String> {
        let key = available_dates_key(month);
        if let Some(cached) = self.dates_cache.get(&key) {
            debug!(month, "可用日期快取命中");
            return cached;
        }

        let Some((year, month_no)) = parse_month(month) else {
            warn!(month, "無效的月份字串，返回空日期清單");
            return Vec::new();
        };

        match self.source.fetch_all_performance_rows().await {
            Ok(rows) => {
                let mut dates: Vec<NaiveDate> = rows
                    .iter()
                    .filter(|row| {
                        date_in_month(row.date, year, month_no)
                            && self.roster.contains(&row.advertiser)
                    })
                    .map(|row| row.date)
                    .collect();
                dates.sort_unstable();
                dates.dedup();
                dates.reverse();

                let formatted: Vec<String> = dates.into_iter().map(format_date).collect();
                self.dates_cache.set(&key, formatted.clone());
                formatted
            }
            Err(err) => {
                error!(month, error = %err, "原始資料取得失敗，返回空日期清單");
                Vec::new()
            }
        }
    }

    /// 強制刷新：使關聯的快取鍵失效
    ///
    /// 指定日期時連同其所屬月份的衍生彙總一併失效；指定月份時
    /// 失效該月的彙總、排名、日期清單與整月的每日結果；兩者皆
    /// 未指定時清空全部快取。
    pub fn force_refresh(&self, date: Option<&str>, month: Option<&str>) {
        if date.is_none() && month.is_none() {
            self.daily_cache.clear();
            self.monthly_cache.clear();
            self.ranking_cache.clear();
            self.dates_cache.clear();
            info!("已清空全部佣金快取");
            return;
        }

        if let Some(date_str) = date {
            self.daily_cache.invalidate(&daily_commission_key(date_str));
            if let Some(day) = parse_date(date_str) {
                self.invalidate_month(&month_of(day));
            }
            debug!(date = date_str, "已失效每日佣金快取");
        }

        if let Some(month_str) = month {
            self.invalidate_month(month_str);
            self.daily_cache
                .invalidate_by_prefix(&daily_month_prefix(month_str));
            debug!(month = month_str, "已失效月度佣金快取");
        }
    }

    /// 獲取全部快取統計信息
    pub fn cache_stats(&self) -> ServiceCacheStats {
        ServiceCacheStats {
            daily: self.daily_cache.stats(),
            monthly: self.monthly_cache.stats(),
            ranking: self.ranking_cache.stats(),
            dates: self.dates_cache.stats(),
        }
    }

    /// 月度彙總計算（含快取），排名與公開月度接口共用
    ///
    /// 排名的降級行為需要分辨「成功但全零」與「計算失敗」，
    /// 因此這裡保留錯誤而非直接降級。
    async fn compute_monthly(
        &self,
        month: &str,
    ) -> DataSourceResult<Vec<MonthlyCommissionSummary>> {
        let key = monthly_commission_key(month);
        if let Some(cached) = self.monthly_cache.get(&key) {
            debug!(month, "月度彙總快取命中");
            return Ok(cached);
        }

        let Some((year, month_no)) = parse_month(month) else {
            return Err(DataSourceError::InvalidPayload(format!(
                "無效的月份字串: {month}"
            )));
        };

        let rows = self.source.fetch_all_performance_rows().await?;
        let summaries = calculator::calculate_monthly(
            &rows,
            &self.roster,
            year,
            month_no,
            self.effective_rate(),
        );
        self.monthly_cache.set(&key, summaries.clone());
        Ok(summaries)
    }

    fn invalidate_month(&self, month: &str) {
        self.monthly_cache.invalidate(&monthly_commission_key(month));
        self.ranking_cache.invalidate(&monthly_ranking_key(month));
        self.dates_cache.invalidate(&available_dates_key(month));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_provider::source::MockPerformanceDataSource;
    use crate::data_provider::ExchangeRateError;
    use crate::domain_types::{CommissionStatus, RawPerformanceRecord};
    use rust_decimal_macros::dec;

    struct FailingRates;

    impl ExchangeRateProvider for FailingRates {
        fn current_rate(&self) -> Result<Decimal, ExchangeRateError> {
            Err(ExchangeRateError::Unavailable("測試".to_string()))
        }
    }

    fn roster() -> Roster {
        Roster::from_slice(&["怡君", "家豪"])
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_error_roster() {
        let mut mock = MockPerformanceDataSource::new();
        mock.expect_fetch_all_performance_rows()
            .returning(|| Err(DataSourceError::Connection("拒絕連線".to_string())));

        let service = StableCommissionService::new(Arc::new(mock), roster());
        let results = service.get_stable_daily_commission("2025-07-15").await;

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.status == CommissionStatus::Error));
        // 錯誤結果不落快取
        assert_eq!(service.cache_stats().daily.size, 0);
    }

    #[tokio::test]
    async fn test_rate_provider_failure_falls_back_to_constant() {
        let day = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let mut mock = MockPerformanceDataSource::new();
        mock.expect_fetch_all_performance_rows().returning(move || {
            Ok(vec![RawPerformanceRecord::new(
                "怡君",
                day,
                dec!(100),
                dec!(2200),
                10,
            )])
        });

        let service = StableCommissionService::new(Arc::new(mock), roster())
            .with_rates(Arc::new(FailingRates));
        let results = service.get_stable_daily_commission("2025-07-15").await;

        // 以固定匯率 20 換算：2200 / 20 = 110，roi = 1.1
        assert_eq!(results[0].roi, dec!(1.1));
        assert_eq!(results[0].total_commission, dec!(70));
    }

    #[tokio::test]
    async fn test_invalid_date_string_is_not_cached() {
        let mock = MockPerformanceDataSource::new();
        let service = StableCommissionService::new(Arc::new(mock), roster());

        let results = service.get_stable_daily_commission("not-a-date").await;
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.status == CommissionStatus::Error));
        assert_eq!(service.cache_stats().daily.size, 0);
    }

    #[tokio::test]
    async fn test_invalid_month_ranking_falls_back_to_roster_order() {
        let mock = MockPerformanceDataSource::new();
        let service =
            StableCommissionService::new(Arc::new(mock), Roster::from_slice(&["淑芬", "怡君"]));

        let rankings = service.get_stable_rankings("2025/07").await;
        let order: Vec<&str> = rankings.iter().map(|e| e.advertiser.as_str()).collect();
        assert_eq!(order, vec!["淑芬", "怡君"]);
    }
}
