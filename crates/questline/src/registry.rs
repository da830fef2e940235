//! Immutable catalog of achievement and skill-node definitions.
//!
//! Built once at startup and never mutated. Construction validates
//! catalog integrity (unique IDs, no dangling prerequisite, acyclic
//! prerequisite graph) so queries never have to.

use crate::error::QuestlineError;
use crate::trigger::Trigger;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Achievement grouping shown in the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Exploration,
    Learning,
    Social,
    Analysis,
    Dedication,
    Special,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::Exploration,
        Category::Learning,
        Category::Social,
        Category::Analysis,
        Category::Dedication,
        Category::Special,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Exploration => "Exploration",
            Category::Learning => "Learning",
            Category::Social => "Social",
            Category::Analysis => "Analysis",
            Category::Dedication => "Dedication",
            Category::Special => "Special",
        }
    }
}

/// Rarity tiers, ordered common -> legendary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// A single achievement definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDef {
    /// Unique id across the whole catalog
    pub id: String,
    /// Short display name
    pub name: String,
    /// How to earn it
    pub description: String,
    pub category: Category,
    pub rarity: Rarity,
    /// XP granted on unlock
    pub xp: u64,
    /// Hidden from listings until unlocked
    pub secret: bool,
    pub trigger: Trigger,
}

/// A unit of progression in the skill tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillNode {
    /// Unique id across the tree
    pub id: String,
    /// Short display name
    pub name: String,
    /// Direct prerequisites; all must be completed before this node
    /// becomes available
    pub prerequisites: Vec<String>,
    /// XP granted on completion
    pub xp: u64,
}

/// Validated, immutable catalog with O(1) lookup by id.
#[derive(Debug, Clone)]
pub struct Registry {
    achievements: Vec<AchievementDef>,
    nodes: Vec<SkillNode>,
    achievement_index: HashMap<String, usize>,
    node_index: HashMap<String, usize>,
    category_index: HashMap<Category, Vec<usize>>,
}

impl Registry {
    /// Build a registry, rejecting a broken catalog up front.
    pub fn new(
        achievements: Vec<AchievementDef>,
        nodes: Vec<SkillNode>,
    ) -> Result<Self, QuestlineError> {
        let mut achievement_index = HashMap::with_capacity(achievements.len());
        let mut category_index: HashMap<Category, Vec<usize>> = HashMap::new();
        for (i, def) in achievements.iter().enumerate() {
            if achievement_index.insert(def.id.clone(), i).is_some() {
                return Err(QuestlineError::DuplicateAchievement(def.id.clone()));
            }
            category_index.entry(def.category).or_default().push(i);
        }

        let mut node_index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if node_index.insert(node.id.clone(), i).is_some() {
                return Err(QuestlineError::DuplicateNode(node.id.clone()));
            }
        }

        for node in &nodes {
            for prereq in &node.prerequisites {
                if !node_index.contains_key(prereq) {
                    return Err(QuestlineError::DanglingPrerequisite {
                        node: node.id.clone(),
                        missing: prereq.clone(),
                    });
                }
            }
        }

        check_acyclic(&nodes, &node_index)?;

        Ok(Self {
            achievements,
            nodes,
            achievement_index,
            node_index,
            category_index,
        })
    }

    /// The shipped production catalog.
    pub fn builtin() -> Result<Self, QuestlineError> {
        Self::new(crate::catalog::achievements(), crate::catalog::skill_nodes())
    }

    pub fn achievements(&self) -> &[AchievementDef] {
        &self.achievements
    }

    pub fn nodes(&self) -> &[SkillNode] {
        &self.nodes
    }

    pub fn achievement(&self, id: &str) -> Option<&AchievementDef> {
        self.achievement_index.get(id).map(|&i| &self.achievements[i])
    }

    pub fn node(&self, id: &str) -> Option<&SkillNode> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    /// Achievements in a category, catalog order.
    pub fn by_category(&self, category: Category) -> Vec<&AchievementDef> {
        self.category_index
            .get(&category)
            .map(|indexes| indexes.iter().map(|&i| &self.achievements[i]).collect())
            .unwrap_or_default()
    }
}

/// Kahn toposort over the prerequisite edges. Leftover nodes after the
/// queue drains are exactly the members of some cycle.
fn check_acyclic(
    nodes: &[SkillNode],
    index: &HashMap<String, usize>,
) -> Result<(), QuestlineError> {
    let n = nodes.len();
    let mut in_degree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

    for (i, node) in nodes.iter().enumerate() {
        for prereq in &node.prerequisites {
            let p = index[prereq];
            in_degree[i] += 1;
            dependents[p].push(i);
        }
    }

    let mut queue: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut visited = 0usize;
    while let Some(i) = queue.pop() {
        visited += 1;
        for &d in &dependents[i] {
            in_degree[d] -= 1;
            if in_degree[d] == 0 {
                queue.push(d);
            }
        }
    }

    if visited == n {
        Ok(())
    } else {
        let cycle: BTreeSet<String> = (0..n)
            .filter(|&i| in_degree[i] > 0)
            .map(|i| nodes[i].id.clone())
            .collect();
        Err(QuestlineError::PrerequisiteCycle(cycle.into_iter().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatKey;

    fn def(id: &str) -> AchievementDef {
        AchievementDef {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            category: Category::Exploration,
            rarity: Rarity::Common,
            xp: 10,
            secret: false,
            trigger: Trigger::Threshold {
                stat: StatKey::BubblesExplored,
                threshold: 1,
            },
        }
    }

    fn node(id: &str, prereqs: &[&str]) -> SkillNode {
        SkillNode {
            id: id.to_string(),
            name: id.to_string(),
            prerequisites: prereqs.iter().map(|s| s.to_string()).collect(),
            xp: 50,
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let registry = Registry::builtin().unwrap();
        assert!(!registry.achievements().is_empty());
        assert!(!registry.nodes().is_empty());
    }

    #[test]
    fn test_duplicate_achievement_rejected() {
        let err = Registry::new(vec![def("a"), def("a")], vec![]).unwrap_err();
        assert!(matches!(err, QuestlineError::DuplicateAchievement(id) if id == "a"));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let err = Registry::new(vec![], vec![node("a", &[]), node("a", &[])]).unwrap_err();
        assert!(matches!(err, QuestlineError::DuplicateNode(id) if id == "a"));
    }

    #[test]
    fn test_dangling_prerequisite_rejected() {
        let err = Registry::new(vec![], vec![node("a", &["ghost"])]).unwrap_err();
        match err {
            QuestlineError::DanglingPrerequisite { node, missing } => {
                assert_eq!(node, "a");
                assert_eq!(missing, "ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cycle_rejected() {
        let nodes = vec![node("a", &["c"]), node("b", &["a"]), node("c", &["b"])];
        let err = Registry::new(vec![], nodes).unwrap_err();
        match err {
            QuestlineError::PrerequisiteCycle(members) => {
                assert_eq!(members, vec!["a", "b", "c"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let nodes = vec![
            node("root", &[]),
            node("left", &["root"]),
            node("right", &["root"]),
            node("tip", &["left", "right"]),
        ];
        assert!(Registry::new(vec![], nodes).is_ok());
    }

    #[test]
    fn test_by_category_preserves_catalog_order() {
        let registry = Registry::builtin().unwrap();
        let exploration = registry.by_category(Category::Exploration);
        assert!(!exploration.is_empty());
        let all_ids: Vec<&String> = registry
            .achievements()
            .iter()
            .filter(|d| d.category == Category::Exploration)
            .map(|d| &d.id)
            .collect();
        let grouped_ids: Vec<&String> = exploration.iter().map(|d| &d.id).collect();
        assert_eq!(grouped_ids, all_ids);
    }

    #[test]
    fn test_lookup_by_id() {
        let registry = Registry::new(vec![def("a")], vec![node("n", &[])]).unwrap();
        assert_eq!(registry.achievement("a").unwrap().id, "a");
        assert_eq!(registry.node("n").unwrap().id, "n");
        assert!(registry.achievement("missing").is_none());
        assert!(registry.node("missing").is_none());
    }
}
