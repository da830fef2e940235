//! Skill graph resolver.
//!
//! Status is a pure function of the completed set and the registry's
//! prerequisite edges, recomputed in full on every query. A node only
//! checks its direct prerequisites' completion; no transitive-closure
//! reasoning is needed.

use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Derived status of a skill node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Locked,
    Available,
    Completed,
}

impl NodeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            NodeStatus::Locked => "locked",
            NodeStatus::Available => "available",
            NodeStatus::Completed => "completed",
        }
    }
}

/// Derive a status for every node in the registry.
pub fn resolve(registry: &Registry, completed: &BTreeSet<String>) -> BTreeMap<String, NodeStatus> {
    registry
        .nodes()
        .iter()
        .map(|node| {
            let status = if completed.contains(&node.id) {
                NodeStatus::Completed
            } else if node.prerequisites.iter().all(|p| completed.contains(p)) {
                // Vacuously true for a root node
                NodeStatus::Available
            } else {
                NodeStatus::Locked
            };
            (node.id.clone(), status)
        })
        .collect()
}
