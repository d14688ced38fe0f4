// cache/ttl.rs - TTL 記憶體快取
//
// 以絕對到期時間儲存鍵值，讀取時惰性逐出過期條目。
// 快取生命週期短（分鐘級）且鍵空間有限（名冊 × 當月天數），
// 不需要背景清掃器。

use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::cache::metrics;
use crate::cache::stats::CacheStats;

/// 快取條目：值與絕對到期時間
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub expires_at: Instant,
}

/// 泛型 TTL 快取
///
/// 所有操作皆不失敗；「不存在」是唯一的未命中形式，
/// 由呼叫端回退到重新計算。
pub struct DataCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    default_ttl: Duration,
    /// 監控指標用的快取名稱
    name: &'static str,
}

impl<V: Clone> DataCache<V> {
    /// 建立新的快取實例
    ///
    /// # Arguments
    /// * `name` - 快取名稱（監控指標標籤）
    /// * `default_ttl` - 預設過期時間
    pub fn new(name: &'static str, default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
            name,
        }
    }

    /// 以預設 TTL 寫入，無條件覆蓋既有條目
    pub fn set(&self, key: &str, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// 以指定 TTL 寫入，無條件覆蓋既有條目
    pub fn set_with_ttl(&self, key: &str, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.insert(key.to_string(), entry);
    }

    /// 讀取快取值
    ///
    /// 條目存在且未過期（now <= expires_at）時返回其值；
    /// 過期條目在讀取時逐出並視為未命中。
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(key) {
            if now <= entry.expires_at {
                metrics::record_hit(self.name);
                return Some(entry.value.clone());
            }
        }

        // 過期條目惰性逐出
        if self
            .entries
            .remove_if(key, |_, entry| now > entry.expires_at)
            .is_some()
        {
            metrics::record_eviction(self.name);
        }

        metrics::record_miss(self.name);
        None
    }

    /// 移除單一鍵
    pub fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }

    /// 移除所有以指定前綴開頭的鍵
    pub fn invalidate_by_prefix(&self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }

    /// 清空所有條目（強制刷新用）
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// 獲取快取統計信息（只計未過期條目）
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let size = self
            .entries
            .iter()
            .filter(|entry| now <= entry.expires_at)
            .count();
        CacheStats { size }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn test_cache() -> DataCache<String> {
        DataCache::new("test", Duration::from_secs(60))
    }

    #[test]
    fn test_set_then_get_returns_value() {
        let cache = test_cache();
        cache.set("k1", "v1".to_string());
        assert_eq!(cache.get("k1"), Some("v1".to_string()));
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let cache = test_cache();
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_set_overwrites_unconditionally() {
        let cache = test_cache();
        cache.set("k1", "old".to_string());
        cache.set("k1", "new".to_string());
        assert_eq!(cache.get("k1"), Some("new".to_string()));
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let cache = test_cache();
        cache.set_with_ttl("k1", "v1".to_string(), Duration::from_millis(20));
        thread::sleep(Duration::from_millis(40));

        assert_eq!(cache.get("k1"), None);
        // 逐出後統計不再計入
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn test_invalidate_by_prefix() {
        let cache = test_cache();
        cache.set("daily_commission:2025-07-01", "a".to_string());
        cache.set("daily_commission:2025-07-02", "b".to_string());
        cache.set("daily_commission:2025-08-01", "c".to_string());

        cache.invalidate_by_prefix("daily_commission:2025-07");

        assert_eq!(cache.get("daily_commission:2025-07-01"), None);
        assert_eq!(cache.get("daily_commission:2025-07-02"), None);
        assert_eq!(
            cache.get("daily_commission:2025-08-01"),
            Some("c".to_string())
        );
    }

    #[test]
    fn test_clear_drops_all_entries() {
        let cache = test_cache();
        cache.set("k1", "v1".to_string());
        cache.set("k2", "v2".to_string());
        cache.clear();
        assert_eq!(cache.get("k1"), None);
        assert_eq!(cache.get("k2"), None);
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn test_stats_excludes_expired_entries() {
        let cache = test_cache();
        cache.set("fresh", "v".to_string());
        cache.set_with_ttl("stale", "v".to_string(), Duration::from_millis(10));
        thread::sleep(Duration::from_millis(30));
        assert_eq!(cache.stats().size, 1);
    }
}
