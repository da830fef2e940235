//! Questline - progression engine for the learning hub.
//!
//! Everything user-visible (XP, rank, node statuses) is derived on read
//! from two sources of truth: the stat counters and the unlocked set.
//! The engine never stores a derived quantity redundantly.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod registry;
pub mod skill_graph;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod streak;
pub mod trigger;
pub mod xp;

pub use engine::ProgressionEngine;
pub use error::QuestlineError;
pub use registry::{AchievementDef, Category, Rarity, Registry, SkillNode};
pub use skill_graph::NodeStatus;
pub use snapshot::{ProgressSnapshot, TimelineEntry, SNAPSHOT_VERSION};
pub use stats::{StatKey, UserStats};
pub use store::{FileStore, MemoryStore, SnapshotStore};
pub use trigger::{EventTag, Trigger};
pub use xp::{Rank, RankProgress};

/// Maximum number of featured achievements a user may pin.
pub const MAX_FEATURED: usize = 3;

/// Snapshot file name inside the state directory.
pub const SNAPSHOT_FILE: &str = "progress.json";
