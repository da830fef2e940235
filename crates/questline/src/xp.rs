//! XP and rank derivation.
//!
//! Total XP is always recomputed from the snapshot's sources of truth
//! (stats, unlocked set, completed nodes, current streak). Every
//! summand is non-negative, so XP is >= 0 by construction.

use crate::registry::Registry;
use crate::snapshot::ProgressSnapshot;
use crate::stats::{StatKey, UserStats};
use serde::Serialize;

/// XP granted per unit of each weighted action counter. Exploration
/// counters carry no weight; exploring earns XP through achievements.
pub const ACTION_WEIGHTS: &[(StatKey, u64)] = &[
    (StatKey::LessonsCompleted, 25),
    (StatKey::MessagesSent, 2),
    (StatKey::WalletsAnalyzed, 10),
    (StatKey::BriefsGenerated, 15),
];

/// XP per streak day, and the cap that keeps the streak term from
/// dominating the score.
pub const STREAK_BONUS_PER_DAY: u64 = 10;
pub const STREAK_BONUS_CAP_DAYS: u64 = 30;

/// An entry in the static rank table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rank {
    pub name: &'static str,
    pub min_xp: u64,
}

/// Rank thresholds, ascending. Current rank is the last entry whose
/// threshold is <= total XP.
pub const RANKS: &[Rank] = &[
    Rank { name: "Newcomer", min_xp: 0 },
    Rank { name: "Curious", min_xp: 100 },
    Rank { name: "Explorer", min_xp: 300 },
    Rank { name: "Analyst", min_xp: 750 },
    Rank { name: "Strategist", min_xp: 1500 },
    Rank { name: "Insider", min_xp: 3000 },
    Rank { name: "Luminary", min_xp: 6000 },
];

/// Current rank plus progress toward the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankProgress {
    pub current: Rank,
    /// None at the ceiling
    pub next: Option<Rank>,
    /// Percent toward the next threshold, 0..=100; 100 at the ceiling
    pub percent_to_next: u8,
}

fn streak_bonus(current_streak: u64) -> u64 {
    current_streak.min(STREAK_BONUS_CAP_DAYS) * STREAK_BONUS_PER_DAY
}

fn action_xp(stats: &UserStats) -> u64 {
    ACTION_WEIGHTS
        .iter()
        .map(|&(stat, weight)| stats.get(stat) * weight)
        .sum()
}

/// Recompute total XP from the snapshot alone.
///
/// Unlocked achievement ids or completed node ids the registry no
/// longer knows contribute nothing rather than erroring, so a snapshot
/// written against an older catalog stays loadable.
pub fn total_xp(registry: &Registry, snapshot: &ProgressSnapshot) -> u64 {
    let achievement_xp: u64 = snapshot
        .unlocked
        .iter()
        .filter_map(|id| registry.achievement(id))
        .map(|def| def.xp)
        .sum();

    let node_xp: u64 = snapshot
        .completed_nodes
        .iter()
        .filter_map(|id| registry.node(id))
        .map(|node| node.xp)
        .sum();

    action_xp(&snapshot.stats) + achievement_xp + node_xp + streak_bonus(snapshot.current_streak as u64)
}

/// Look up the rank bracket for a total-XP value.
pub fn rank_progress(xp: u64) -> RankProgress {
    let mut current = RANKS[0];
    let mut next = None;
    for (i, rank) in RANKS.iter().enumerate() {
        if rank.min_xp <= xp {
            current = *rank;
            next = RANKS.get(i + 1).copied();
        } else {
            break;
        }
    }

    let percent_to_next = match next {
        Some(n) => {
            let span = n.min_xp - current.min_xp;
            let into = xp - current.min_xp;
            ((into * 100) / span).min(100) as u8
        }
        None => 100,
    };

    RankProgress {
        current,
        next,
        percent_to_next,
    }
}
