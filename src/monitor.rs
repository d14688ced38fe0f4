// monitor.rs - 監控系統模組

pub mod diagnostics;
pub mod logging;

// 重新導出常用元素，使其可直接從 monitor 模組使用
pub use diagnostics::{DiagnosticCheck, DiagnosticReport, DiagnosticService, DiagnosticStatus};
pub use logging::init_logging;
