//! Achievement triggers and the trigger evaluator.
//!
//! Two trigger shapes: a stat threshold comparison, or a named custom
//! event. Custom tags form a closed enum; a tag this build does not
//! know deserializes to [`EventTag::Unrecognized`] and never fires, so
//! the catalog may describe hooks a deployment has not wired up yet.

use crate::registry::{AchievementDef, Registry};
use crate::stats::{StatKey, UserStats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Known custom-trigger tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventTag {
    OwnWalletAnalyzed,
    WalletConnected,
    TourCompleted,
    EasterEggFound,
    /// A tag this build has no event wired for. Permanently unsatisfied.
    Unrecognized,
}

impl EventTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventTag::OwnWalletAnalyzed => "own_wallet_analyzed",
            EventTag::WalletConnected => "wallet_connected",
            EventTag::TourCompleted => "tour_completed",
            EventTag::EasterEggFound => "easter_egg_found",
            EventTag::Unrecognized => "unrecognized",
        }
    }

    pub fn parse(tag: &str) -> Self {
        match tag {
            "own_wallet_analyzed" => EventTag::OwnWalletAnalyzed,
            "wallet_connected" => EventTag::WalletConnected,
            "tour_completed" => EventTag::TourCompleted,
            "easter_egg_found" => EventTag::EasterEggFound,
            _ => EventTag::Unrecognized,
        }
    }

    /// Boolean stat flag this tag inspects, if the build knows it.
    pub fn backing_flag(&self) -> Option<StatKey> {
        match self {
            EventTag::OwnWalletAnalyzed => Some(StatKey::OwnWalletAnalyzed),
            EventTag::WalletConnected => Some(StatKey::WalletConnected),
            EventTag::TourCompleted => Some(StatKey::TourCompleted),
            EventTag::EasterEggFound => Some(StatKey::EasterEggFound),
            EventTag::Unrecognized => None,
        }
    }
}

impl From<String> for EventTag {
    fn from(s: String) -> Self {
        EventTag::parse(&s)
    }
}

impl From<EventTag> for String {
    fn from(tag: EventTag) -> Self {
        tag.as_str().to_string()
    }
}

/// Rule attached to an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Satisfied when `stats[stat] >= threshold`.
    Threshold { stat: StatKey, threshold: u64 },
    /// Satisfied when the named event flag has been raised.
    Event { tag: EventTag },
}

impl Trigger {
    /// Evaluate this trigger against the current stats. Pure.
    pub fn is_satisfied(&self, stats: &UserStats) -> bool {
        match self {
            Trigger::Threshold { stat, threshold } => stats.get(*stat) >= *threshold,
            Trigger::Event { tag } => match tag.backing_flag() {
                Some(flag) => stats.flag(flag),
                None => false,
            },
        }
    }
}

/// Evaluate the full catalog against the current stats and return the
/// definitions that should newly enter the unlocked set.
///
/// Deterministic given its inputs, and idempotent: IDs already in
/// `unlocked` are skipped, so calling this after every stat mutation
/// is safe even when redundant. The caller merges the result and
/// appends timeline entries.
pub fn evaluate<'a>(
    registry: &'a Registry,
    stats: &UserStats,
    unlocked: &BTreeSet<String>,
) -> Vec<&'a AchievementDef> {
    registry
        .achievements()
        .iter()
        .filter(|def| !unlocked.contains(&def.id))
        .filter(|def| def.trigger.is_satisfied(stats))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    fn test_registry() -> Registry {
        Registry::builtin().unwrap()
    }

    #[test]
    fn test_threshold_boundary() {
        let trigger = Trigger::Threshold {
            stat: StatKey::WalletsAnalyzed,
            threshold: 10,
        };
        let mut stats = UserStats::new();
        stats.bump(StatKey::WalletsAnalyzed, 9);
        assert!(!trigger.is_satisfied(&stats));
        stats.bump(StatKey::WalletsAnalyzed, 1);
        assert!(trigger.is_satisfied(&stats));
    }

    #[test]
    fn test_unrecognized_tag_is_inert() {
        let trigger = Trigger::Event {
            tag: EventTag::parse("holo_deck_opened"),
        };
        let mut stats = UserStats::new();
        for key in [
            StatKey::OwnWalletAnalyzed,
            StatKey::WalletConnected,
            StatKey::TourCompleted,
            StatKey::EasterEggFound,
        ] {
            stats.set_flag(key);
        }
        assert!(!trigger.is_satisfied(&stats));
    }

    #[test]
    fn test_event_tag_roundtrip() {
        let json = serde_json::to_string(&EventTag::TourCompleted).unwrap();
        assert_eq!(json, r#""tour_completed""#);
        let back: EventTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EventTag::TourCompleted);

        let unknown: EventTag = serde_json::from_str(r#""warp_drive""#).unwrap();
        assert_eq!(unknown, EventTag::Unrecognized);
    }

    #[test]
    fn test_evaluate_skips_already_unlocked() {
        let registry = test_registry();
        let mut stats = UserStats::new();
        stats.bump(StatKey::BubblesExplored, 1);

        let mut unlocked = BTreeSet::new();
        let first = evaluate(&registry, &stats, &unlocked);
        assert!(first.iter().any(|d| d.id == "first_bubble"));

        for def in &first {
            unlocked.insert(def.id.clone());
        }
        let second = evaluate(&registry, &stats, &unlocked);
        assert!(second.is_empty());
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let registry = test_registry();
        let mut stats = UserStats::new();
        stats.bump(StatKey::LessonsCompleted, 5);
        stats.set_flag(StatKey::WalletConnected);

        let unlocked = BTreeSet::new();
        let a: Vec<_> = evaluate(&registry, &stats, &unlocked)
            .iter()
            .map(|d| d.id.clone())
            .collect();
        let b: Vec<_> = evaluate(&registry, &stats, &unlocked)
            .iter()
            .map(|d| d.id.clone())
            .collect();
        assert_eq!(a, b);
    }
}
