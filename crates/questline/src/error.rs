//! Error types for Questline.

use thiserror::Error;

/// Errors raised by the progression engine.
///
/// Registry variants are fatal at construction time: a broken catalog
/// must abort startup rather than produce silently wrong statuses.
/// Store variants are plumbing only; snapshot loading never surfaces
/// them (it falls back to a default snapshot instead).
#[derive(Error, Debug)]
pub enum QuestlineError {
    #[error("Duplicate achievement id in catalog: {0}")]
    DuplicateAchievement(String),

    #[error("Duplicate skill node id in catalog: {0}")]
    DuplicateNode(String),

    #[error("Skill node '{node}' lists unknown prerequisite '{missing}'")]
    DanglingPrerequisite { node: String, missing: String },

    #[error("Prerequisite cycle among skill nodes: {}", .0.join(", "))]
    PrerequisiteCycle(Vec<String>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
