//! The progression engine facade.
//!
//! Owns the registry, the in-memory snapshot and the persistence
//! store. Every inbound event runs the same cycle: mutate stats,
//! re-evaluate triggers, merge new unlocks append-only, persist the
//! whole snapshot. Queries are pure reads over the snapshot; XP and
//! rank are derived on every call, never cached.
//!
//! Single-threaded and synchronous. Two processes sharing one store
//! overwrite each other whole-snapshot, last writer wins; the data is
//! cosmetic progression and does not warrant cross-context locking.

use crate::registry::{AchievementDef, Registry};
use crate::skill_graph::{self, NodeStatus};
use crate::snapshot::{ProgressSnapshot, TimelineEntry};
use crate::stats::{StatKey, UserStats};
use crate::store::{self, SnapshotStore};
use crate::streak;
use crate::trigger::{self, EventTag};
use crate::xp::{self, RankProgress};
use crate::MAX_FEATURED;
use chrono::{NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// An achievement definition paired with its unlock state, for
/// listing views.
#[derive(Debug, Clone)]
pub struct AchievementView<'a> {
    pub def: &'a AchievementDef,
    pub unlocked: bool,
}

pub struct ProgressionEngine {
    registry: Registry,
    snapshot: ProgressSnapshot,
    store: Box<dyn SnapshotStore>,
}

impl ProgressionEngine {
    /// Open the engine against a store, loading the persisted snapshot
    /// or starting from the empty default.
    pub fn open(registry: Registry, store: Box<dyn SnapshotStore>) -> Self {
        let snapshot = store::load_snapshot(store.as_ref());
        debug!(
            unlocked = snapshot.unlocked.len(),
            completed_nodes = snapshot.completed_nodes.len(),
            "Progress snapshot loaded"
        );
        Self {
            registry,
            snapshot,
            store,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    // ========== Session ==========

    /// Count today's session: apply the streak policy once with the
    /// pre-update `last_active`, then advance `last_active` so a
    /// second call the same day is a no-op. Also refreshes the derived
    /// account-age and streak stat mirrors, since dedication triggers
    /// read those.
    pub fn begin_session(&mut self, today: NaiveDate) {
        let new_streak = streak::advance_streak(
            self.snapshot.last_active,
            self.snapshot.current_streak,
            today,
        );
        self.snapshot.current_streak = new_streak;
        self.snapshot.longest_streak = self.snapshot.longest_streak.max(new_streak);
        self.snapshot.last_active = Some(today);

        let created = *self.snapshot.created_at.get_or_insert(today);
        let age_days = (today - created).num_days().max(0) as u64;

        self.snapshot.stats.set(StatKey::CurrentStreak, new_streak as u64);
        self.snapshot
            .stats
            .set(StatKey::LongestStreak, self.snapshot.longest_streak as u64);
        self.snapshot.stats.set(StatKey::AccountAgeDays, age_days);

        self.evaluate_and_persist();
    }

    // ========== Inbound events ==========

    /// Increment a stat counter by `n`.
    pub fn record(&mut self, stat: StatKey, n: u64) {
        self.snapshot.stats.bump(stat, n);
        self.evaluate_and_persist();
    }

    /// Fire a custom-trigger event by raising its backing flag. An
    /// unrecognized tag is inert.
    pub fn fire(&mut self, tag: EventTag) {
        match tag.backing_flag() {
            Some(flag) => {
                self.snapshot.stats.set_flag(flag);
                self.evaluate_and_persist();
            }
            None => warn!("Ignoring unrecognized event tag"),
        }
    }

    /// Toggle a skill node's completion. Unknown ids are ignored with
    /// a warning; the catalog, not the user, defines the tree.
    pub fn set_node_completed(&mut self, id: &str, completed: bool) {
        if self.registry.node(id).is_none() {
            warn!("Ignoring completion toggle for unknown skill node '{id}'");
            return;
        }
        let present = self.snapshot.is_node_completed(id);
        if completed && !present {
            self.snapshot.completed_nodes.push(id.to_string());
        } else if !completed && present {
            self.snapshot.completed_nodes.retain(|n| n != id);
        } else {
            return;
        }
        self.evaluate_and_persist();
    }

    /// Replace the featured list. Unknown and duplicate ids are
    /// dropped and the result is truncated to [`MAX_FEATURED`].
    pub fn set_featured(&mut self, ids: &[String]) {
        let mut seen = BTreeSet::new();
        self.snapshot.featured = ids
            .iter()
            .filter(|id| self.registry.achievement(id).is_some())
            .filter(|id| seen.insert((*id).clone()))
            .take(MAX_FEATURED)
            .cloned()
            .collect();
        self.persist();
    }

    // ========== Outbound queries ==========

    /// Status of every skill node, derived from the completed set.
    pub fn node_statuses(&self) -> BTreeMap<String, NodeStatus> {
        let completed: BTreeSet<String> =
            self.snapshot.completed_nodes.iter().cloned().collect();
        skill_graph::resolve(&self.registry, &completed)
    }

    /// Total XP, recomputed from the snapshot.
    pub fn xp(&self) -> u64 {
        xp::total_xp(&self.registry, &self.snapshot)
    }

    /// Current rank, next rank and progress percent.
    pub fn rank_progress(&self) -> RankProgress {
        xp::rank_progress(self.xp())
    }

    /// Catalog listing with unlock state. Secret achievements are
    /// omitted until unlocked.
    pub fn achievements(&self) -> Vec<AchievementView<'_>> {
        self.registry
            .achievements()
            .iter()
            .map(|def| AchievementView {
                def,
                unlocked: self.snapshot.is_unlocked(&def.id),
            })
            .filter(|view| !view.def.secret || view.unlocked)
            .collect()
    }

    pub fn unlocked_ids(&self) -> &[String] {
        &self.snapshot.unlocked
    }

    pub fn featured(&self) -> &[String] {
        &self.snapshot.featured
    }

    pub fn stats(&self) -> &UserStats {
        &self.snapshot.stats
    }

    pub fn current_streak(&self) -> u32 {
        self.snapshot.current_streak
    }

    /// The `n` most recent unlock events, newest first.
    pub fn recent_timeline(&self, n: usize) -> Vec<&TimelineEntry> {
        self.snapshot.timeline.iter().rev().take(n).collect()
    }

    // ========== Internals ==========

    /// Re-evaluate triggers, merge newly unlocked ids append-only,
    /// stamp timeline entries, write the snapshot back.
    fn evaluate_and_persist(&mut self) {
        let unlocked: BTreeSet<String> = self.snapshot.unlocked.iter().cloned().collect();
        let newly: Vec<(String, u64)> =
            trigger::evaluate(&self.registry, &self.snapshot.stats, &unlocked)
                .into_iter()
                .map(|def| (def.id.clone(), def.xp))
                .collect();

        let now = Utc::now();
        for (id, xp) in newly {
            info!("Achievement unlocked: {id} (+{xp} XP)");
            self.snapshot.unlocked.push(id.clone());
            self.snapshot.timeline.push(TimelineEntry {
                id,
                unlocked_at: now,
            });
        }
        self.persist();
    }

    fn persist(&mut self) {
        store::save_snapshot(self.store.as_mut(), &self.snapshot);
    }
}
