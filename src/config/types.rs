use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use serde::{Deserialize, Serialize};

/// 應用程序配置結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub database: DatabaseConfig,
    pub log: LogConfig,
    pub commission: CommissionConfig,
    pub cache: CacheConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.database.validate()?;
        self.log.validate()?;
        self.commission.validate()?;
        self.cache.validate()?;

        Ok(())
    }
}

/// 數據庫配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Validator for DatabaseConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證數據庫配置
        ValidationUtils::not_empty(&self.host, "database.host")?;
        ValidationUtils::not_empty(&self.username, "database.username")?;
        ValidationUtils::not_empty(&self.database, "database.database")?;
        ValidationUtils::in_range(self.port, 1, 65535, "database.port")?;
        ValidationUtils::in_range(
            self.max_connections,
            self.min_connections,
            1000,
            "database.max_connections",
        )?;

        Ok(())
    }
}

impl DatabaseConfig {
    /// 獲取最大生命週期持續時間
    pub fn max_lifetime(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.max_lifetime_secs)
    }

    /// 獲取獲取連接超時持續時間
    pub fn acquire_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.acquire_timeout_secs)
    }

    /// 獲取閒置超時持續時間
    pub fn idle_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.idle_timeout_secs)
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(
            &self.level.to_lowercase(),
            &["trace", "debug", "info", "warn", "error"]
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<String>>(),
            "log.level",
        )?;

        Ok(())
    }
}

/// 佣金計算配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionConfig {
    /// 投放人員名冊（固定身份清單，由配置注入）
    pub roster: Vec<String>,
    /// B 幣別對 A 幣別的固定匯率
    pub exchange_rate: f64,
}

impl Validator for CommissionConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.roster.is_empty() {
            return Err(ValidationError::MissingField(
                "commission.roster".to_string(),
            ));
        }
        for member in &self.roster {
            ValidationUtils::not_empty(member, "commission.roster")?;
        }
        ValidationUtils::all_unique(&self.roster, "commission.roster")?;

        if !self.exchange_rate.is_finite() || self.exchange_rate <= 0.0 {
            return Err(ValidationError::InvalidValue(format!(
                "commission.exchange_rate 必須為正數: {}",
                self.exchange_rate
            )));
        }

        Ok(())
    }
}

/// 快取 TTL 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub daily_ttl_secs: u64,
    pub monthly_ttl_secs: u64,
    pub ranking_ttl_secs: u64,
    pub dates_ttl_secs: u64,
}

impl Validator for CacheConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // TTL 需落在 1 秒到 1 天之間
        ValidationUtils::in_range(self.daily_ttl_secs, 1, 86400, "cache.daily_ttl_secs")?;
        ValidationUtils::in_range(self.monthly_ttl_secs, 1, 86400, "cache.monthly_ttl_secs")?;
        ValidationUtils::in_range(self.ranking_ttl_secs, 1, 86400, "cache.ranking_ttl_secs")?;
        ValidationUtils::in_range(self.dates_ttl_secs, 1, 86400, "cache.dates_ttl_secs")?;

        Ok(())
    }
}

impl CacheConfig {
    pub fn daily_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.daily_ttl_secs)
    }

    pub fn monthly_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.monthly_ttl_secs)
    }

    pub fn ranking_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ranking_ttl_secs)
    }

    pub fn dates_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.dates_ttl_secs)
    }
}
