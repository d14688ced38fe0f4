// cache/metrics.rs - 快取監控指標
//
// 以 metrics 計數器記錄命中、未命中與逐出事件。
// 未安裝 recorder 時這些呼叫是無操作，不影響控制流程。

/// 指標命名空間
pub const METRIC_NAMESPACE: &str = "commission_cache";

/// 記錄一次快取命中
pub fn record_hit(cache: &'static str) {
    metrics::counter!("commission_cache_hits_total", "cache" => cache).increment(1);
}

/// 記錄一次快取未命中
pub fn record_miss(cache: &'static str) {
    metrics::counter!("commission_cache_misses_total", "cache" => cache).increment(1);
}

/// 記錄一次過期逐出
pub fn record_eviction(cache: &'static str) {
    metrics::counter!("commission_cache_evictions_total", "cache" => cache).increment(1);
}
