// monitor/diagnostics.rs - 診斷服務
//
// 對資料來源與快取狀態做盡力而為的健康檢查，產生可直接渲染的
// 報告。所有檢查都不得拋出：失敗本身就是一種檢查結果。

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

use crate::cache::ServiceCacheStats;
use crate::data_provider::PerformanceDataSource;
use crate::domain_types::Roster;

/// 單項檢查狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticStatus {
    /// 正常
    Healthy,
    /// 可用但有異常跡象
    Degraded,
    /// 檢查失敗
    Failed,
}

impl DiagnosticStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticStatus::Healthy => "healthy",
            DiagnosticStatus::Degraded => "degraded",
            DiagnosticStatus::Failed => "failed",
        }
    }
}

/// 單項檢查結果
#[derive(Debug, Clone)]
pub struct DiagnosticCheck {
    pub name: &'static str,
    pub status: DiagnosticStatus,
    pub detail: String,
}

/// 診斷報告
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    pub generated_at: DateTime<Utc>,
    pub checks: Vec<DiagnosticCheck>,
}

impl DiagnosticReport {
    /// 整體狀態取所有檢查中最差的一項
    pub fn overall(&self) -> DiagnosticStatus {
        self.checks
            .iter()
            .map(|check| check.status)
            .max()
            .unwrap_or(DiagnosticStatus::Healthy)
    }
}

/// 診斷服務
pub struct DiagnosticService {
    source: Arc<dyn PerformanceDataSource>,
    roster: Roster,
}

impl DiagnosticService {
    pub fn new(source: Arc<dyn PerformanceDataSource>, roster: Roster) -> Self {
        Self { source, roster }
    }

    /// 執行全部檢查
    pub async fn run(&self) -> DiagnosticReport {
        let mut checks = Vec::new();

        match self.source.fetch_all_performance_rows().await {
            Ok(records) => {
                checks.push(DiagnosticCheck {
                    name: "data_source",
                    status: DiagnosticStatus::Healthy,
                    detail: format!("資料來源可達，共 {} 筆原始列", records.len()),
                });

                checks.push(self.roster_coverage_check(&records));
                checks.push(Self::freshness_check(&records));
            }
            Err(err) => {
                checks.push(DiagnosticCheck {
                    name: "data_source",
                    status: DiagnosticStatus::Failed,
                    detail: format!("資料來源不可達: {}", err),
                });
            }
        }

        let report = DiagnosticReport {
            generated_at: Utc::now(),
            checks,
        };
        info!(overall = report.overall().as_str(), "診斷完成");
        report
    }

    /// 名冊涵蓋度：原始列中出現的名冊外身份代表資料或配置漂移
    fn roster_coverage_check(
        &self,
        records: &[crate::domain_types::RawPerformanceRecord],
    ) -> DiagnosticCheck {
        let unknown: BTreeSet<&str> = records
            .iter()
            .filter(|record| !self.roster.contains(&record.advertiser))
            .map(|record| record.advertiser.as_str())
            .collect();

        if unknown.is_empty() {
            DiagnosticCheck {
                name: "roster_coverage",
                status: DiagnosticStatus::Healthy,
                detail: "所有原始列身份皆屬於名冊".to_string(),
            }
        } else {
            DiagnosticCheck {
                name: "roster_coverage",
                status: DiagnosticStatus::Degraded,
                detail: format!(
                    "發現 {} 個名冊外身份: {}",
                    unknown.len(),
                    unknown.into_iter().collect::<Vec<_>>().join(", ")
                ),
            }
        }
    }

    /// 資料新鮮度：最新資料日期落後過久視為異常
    fn freshness_check(
        records: &[crate::domain_types::RawPerformanceRecord],
    ) -> DiagnosticCheck {
        let Some(latest) = records.iter().map(|record| record.date).max() else {
            return DiagnosticCheck {
                name: "data_freshness",
                status: DiagnosticStatus::Degraded,
                detail: "資料來源沒有任何原始列".to_string(),
            };
        };

        let today: NaiveDate = Utc::now().date_naive();
        let lag_days = (today - latest).num_days();
        let status = if lag_days <= 3 {
            DiagnosticStatus::Healthy
        } else {
            DiagnosticStatus::Degraded
        };

        DiagnosticCheck {
            name: "data_freshness",
            status,
            detail: format!("最新資料日期 {}，落後 {} 天", latest, lag_days.max(0)),
        }
    }
}

/// 由服務快取統計組裝檢查項，由宿主與診斷報告一併呈現
pub fn cache_stats_check(stats: &ServiceCacheStats) -> DiagnosticCheck {
    DiagnosticCheck {
        name: "cache_usage",
        status: DiagnosticStatus::Healthy,
        detail: format!(
            "快取條目 — 每日: {}, 月度: {}, 排名: {}, 日期: {}",
            stats.daily.size, stats.monthly.size, stats.ranking.size, stats.dates.size
        ),
    }
}
