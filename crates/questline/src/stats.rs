//! Stat store schema for the progression engine.
//!
//! A flat record of named counters. Boolean event flags are 0/1
//! counters so the whole record serializes as one name -> value map.
//! All counters are monotonically non-decreasing except the
//! current-streak key, which the streak policy may reset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of stat names the engine understands.
///
/// Triggers reference these keys directly, so a trigger can never name
/// a stat that does not exist in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    /// Lessons finished in the learning hub
    LessonsCompleted,
    /// Bubbles opened in the market explorer
    BubblesExplored,
    /// Chat messages sent
    MessagesSent,
    /// Wallets run through the reputation analyzer
    WalletsAnalyzed,
    /// Marketing briefs generated
    BriefsGenerated,
    /// Days since the account was created
    AccountAgeDays,
    /// Consecutive active days (reset on a skipped day)
    CurrentStreak,
    /// Best streak ever reached
    LongestStreak,
    // Boolean event flags (0/1) backing custom triggers
    /// User analyzed their own connected wallet
    OwnWalletAnalyzed,
    /// User connected a wallet
    WalletConnected,
    /// User finished the intro tour
    TourCompleted,
    /// User found the hidden easter egg
    EasterEggFound,
}

impl StatKey {
    /// Every key in the schema, in declaration order.
    pub const ALL: &'static [StatKey] = &[
        StatKey::LessonsCompleted,
        StatKey::BubblesExplored,
        StatKey::MessagesSent,
        StatKey::WalletsAnalyzed,
        StatKey::BriefsGenerated,
        StatKey::AccountAgeDays,
        StatKey::CurrentStreak,
        StatKey::LongestStreak,
        StatKey::OwnWalletAnalyzed,
        StatKey::WalletConnected,
        StatKey::TourCompleted,
        StatKey::EasterEggFound,
    ];

    /// Wire name of this key (the snake_case serde form).
    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::LessonsCompleted => "lessons_completed",
            StatKey::BubblesExplored => "bubbles_explored",
            StatKey::MessagesSent => "messages_sent",
            StatKey::WalletsAnalyzed => "wallets_analyzed",
            StatKey::BriefsGenerated => "briefs_generated",
            StatKey::AccountAgeDays => "account_age_days",
            StatKey::CurrentStreak => "current_streak",
            StatKey::LongestStreak => "longest_streak",
            StatKey::OwnWalletAnalyzed => "own_wallet_analyzed",
            StatKey::WalletConnected => "wallet_connected",
            StatKey::TourCompleted => "tour_completed",
            StatKey::EasterEggFound => "easter_egg_found",
        }
    }
}

impl std::str::FromStr for StatKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKey::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown stat '{s}'"))
    }
}

/// Flat record of per-user counters, keyed by [`StatKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats(pub BTreeMap<StatKey, u64>);

impl UserStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter (0 if never touched).
    pub fn get(&self, key: StatKey) -> u64 {
        self.0.get(&key).copied().unwrap_or(0)
    }

    /// Increment a counter by `n`.
    pub fn bump(&mut self, key: StatKey, n: u64) {
        *self.0.entry(key).or_insert(0) += n;
    }

    /// Overwrite a counter. Used by the streak policy and the
    /// account-age refresh, which are allowed to set rather than add.
    pub fn set(&mut self, key: StatKey, value: u64) {
        self.0.insert(key, value);
    }

    /// Raise a boolean event flag.
    pub fn set_flag(&mut self, key: StatKey) {
        self.0.insert(key, 1);
    }

    /// Whether a boolean event flag is raised.
    pub fn flag(&self, key: StatKey) -> bool {
        self.get(key) >= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_stat_reads_zero() {
        let stats = UserStats::new();
        assert_eq!(stats.get(StatKey::LessonsCompleted), 0);
        assert!(!stats.flag(StatKey::WalletConnected));
    }

    #[test]
    fn test_bump_accumulates() {
        let mut stats = UserStats::new();
        stats.bump(StatKey::BubblesExplored, 3);
        stats.bump(StatKey::BubblesExplored, 2);
        assert_eq!(stats.get(StatKey::BubblesExplored), 5);
    }

    #[test]
    fn test_flags_are_unit_counters() {
        let mut stats = UserStats::new();
        stats.set_flag(StatKey::TourCompleted);
        assert!(stats.flag(StatKey::TourCompleted));
        assert_eq!(stats.get(StatKey::TourCompleted), 1);
    }

    #[test]
    fn test_wire_names_match_serde() {
        for key in StatKey::ALL {
            let json = serde_json::to_string(key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
            assert_eq!(key.as_str().parse::<StatKey>().unwrap(), *key);
        }
        assert!("bogus_stat".parse::<StatKey>().is_err());
    }

    #[test]
    fn test_serializes_as_name_value_map() {
        let mut stats = UserStats::new();
        stats.bump(StatKey::MessagesSent, 7);
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"messages_sent":7}"#);
    }
}
