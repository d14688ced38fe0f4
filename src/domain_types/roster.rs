// domain_types/roster.rs - 投放人員名冊
//
// 名冊是佣金系統追蹤的固定身份清單，由配置注入而非散落在程式中的
// 字面量。所有公開查詢都依名冊迭代產生結果，因此「名冊完整性」
// （每位成員恰好出現一次）由結構保證。

use serde::{Deserialize, Serialize};

/// 固定的投放人員名冊，保留配置中的順序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<String>,
}

impl Roster {
    /// 從成員清單建立名冊
    ///
    /// 空白成員會被剔除，重複成員只保留第一次出現的位置。
    pub fn new(members: Vec<String>) -> Self {
        let mut seen = Vec::with_capacity(members.len());
        for member in members {
            let trimmed = member.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !seen.iter().any(|existing: &String| existing == trimmed) {
                seen.push(trimmed.to_string());
            }
        }
        Self { members: seen }
    }

    /// 測試與範例用的便利建構子
    pub fn from_slice(members: &[&str]) -> Self {
        Self::new(members.iter().map(|m| m.to_string()).collect())
    }

    /// 依配置順序迭代成員
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.as_str())
    }

    /// 判斷身份是否屬於名冊
    pub fn contains(&self, advertiser: &str) -> bool {
        self.members.iter().any(|m| m == advertiser)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_dedup_preserves_order() {
        let roster = Roster::new(vec![
            "怡君".to_string(),
            "家豪".to_string(),
            "怡君".to_string(),
            "  ".to_string(),
            "淑芬".to_string(),
        ]);
        let members: Vec<&str> = roster.iter().collect();
        assert_eq!(members, vec!["怡君", "家豪", "淑芬"]);
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_roster_contains() {
        let roster = Roster::from_slice(&["怡君", "家豪"]);
        assert!(roster.contains("怡君"));
        assert!(!roster.contains("志明"));
        assert!(!roster.is_empty());
    }

    #[test]
    fn test_roster_trims_whitespace() {
        let roster = Roster::new(vec![" 怡君 ".to_string()]);
        assert!(roster.contains("怡君"));
    }
}
