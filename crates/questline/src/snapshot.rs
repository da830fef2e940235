//! The persisted progression snapshot.
//!
//! One JSON blob per user, written wholesale on every mutation and
//! read wholesale at startup. Unknown fields are ignored on load so
//! the schema can grow additively; the `version` field exists for the
//! day a breaking migration is unavoidable.

use crate::stats::UserStats;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    // Blobs written before the version field existed are treated as v1
    SNAPSHOT_VERSION
}

/// One unlock event, in the order first observed. A display record,
/// not a source of truth for membership in the unlocked set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: String,
    pub unlocked_at: DateTime<Utc>,
}

/// All persisted progression state for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub stats: UserStats,
    /// Achievement ids, insertion-ordered, append-only
    #[serde(default)]
    pub unlocked: Vec<String>,
    /// Skill node ids the user marked complete (toggling allowed)
    #[serde(default)]
    pub completed_nodes: Vec<String>,
    /// Up to three pinned achievement ids, order-significant
    #[serde(default)]
    pub featured: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    /// Date the snapshot was first created (account age anchor)
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
    /// Calendar date of the last counted session
    #[serde(default)]
    pub last_active: Option<NaiveDate>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            stats: UserStats::new(),
            unlocked: Vec::new(),
            completed_nodes: Vec::new(),
            featured: Vec::new(),
            timeline: Vec::new(),
            created_at: None,
            last_active: None,
            current_streak: 0,
            longest_streak: 0,
        }
    }
}

impl ProgressSnapshot {
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }

    pub fn is_node_completed(&self, id: &str) -> bool {
        self.completed_nodes.iter().any(|n| n == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_first_run() {
        let snap = ProgressSnapshot::default();
        assert_eq!(snap.version, SNAPSHOT_VERSION);
        assert!(snap.unlocked.is_empty());
        assert!(snap.timeline.is_empty());
        assert!(snap.last_active.is_none());
        assert_eq!(snap.current_streak, 0);
    }

    #[test]
    fn test_legacy_blob_without_version_loads_as_v1() {
        let snap: ProgressSnapshot =
            serde_json::from_str(r#"{"unlocked":["first_bubble"]}"#).unwrap();
        assert_eq!(snap.version, SNAPSHOT_VERSION);
        assert!(snap.is_unlocked("first_bubble"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let snap: ProgressSnapshot =
            serde_json::from_str(r#"{"version":1,"future_field":{"a":1}}"#).unwrap();
        assert_eq!(snap, ProgressSnapshot::default());
    }

    #[test]
    fn test_roundtrip() {
        let mut snap = ProgressSnapshot::default();
        snap.unlocked.push("first_scan".to_string());
        snap.timeline.push(TimelineEntry {
            id: "first_scan".to_string(),
            unlocked_at: Utc::now(),
        });
        snap.last_active = NaiveDate::from_ymd_opt(2024, 6, 1);
        snap.current_streak = 2;

        let json = serde_json::to_string(&snap).unwrap();
        let back: ProgressSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
