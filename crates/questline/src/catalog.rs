//! Shipped production catalog: achievement definitions and skill tree.
//!
//! Data only. Integrity (unique ids, acyclic prerequisites) is checked
//! by [`Registry::new`](crate::registry::Registry::new) at startup.

use crate::registry::{AchievementDef, Category, Rarity, SkillNode};
use crate::stats::StatKey;
use crate::trigger::{EventTag, Trigger};

fn threshold(
    id: &str,
    name: &str,
    desc: &str,
    category: Category,
    rarity: Rarity,
    xp: u64,
    stat: StatKey,
    at: u64,
) -> AchievementDef {
    AchievementDef {
        id: id.to_string(),
        name: name.to_string(),
        description: desc.to_string(),
        category,
        rarity,
        xp,
        secret: false,
        trigger: Trigger::Threshold { stat, threshold: at },
    }
}

fn event(
    id: &str,
    name: &str,
    desc: &str,
    category: Category,
    rarity: Rarity,
    xp: u64,
    tag: EventTag,
    secret: bool,
) -> AchievementDef {
    AchievementDef {
        id: id.to_string(),
        name: name.to_string(),
        description: desc.to_string(),
        category,
        rarity,
        xp,
        secret,
        trigger: Trigger::Event { tag },
    }
}

/// All shipped achievements.
pub fn achievements() -> Vec<AchievementDef> {
    use Category::*;
    use Rarity::*;
    use StatKey::*;

    vec![
        // Exploration
        threshold("first_bubble", "First Contact", "Open your first market bubble", Exploration, Common, 10, BubblesExplored, 1),
        threshold("bubble_surfer", "Bubble Surfer", "Explore 25 market bubbles", Exploration, Uncommon, 25, BubblesExplored, 25),
        threshold("deep_diver", "Deep Diver", "Explore 100 market bubbles", Exploration, Rare, 60, BubblesExplored, 100),

        // Learning
        threshold("first_lesson", "Student", "Complete your first lesson", Learning, Common, 15, LessonsCompleted, 1),
        threshold("quick_study", "Quick Study", "Complete 5 lessons", Learning, Uncommon, 40, LessonsCompleted, 5),
        threshold("scholar", "Scholar", "Complete 20 lessons", Learning, Rare, 100, LessonsCompleted, 20),

        // Social
        threshold("first_message", "Ice Breaker", "Send your first message", Social, Common, 10, MessagesSent, 1),
        threshold("conversationalist", "Conversationalist", "Send 50 messages", Social, Uncommon, 30, MessagesSent, 50),
        threshold("community_voice", "Community Voice", "Send 250 messages", Social, Rare, 75, MessagesSent, 250),

        // Analysis
        threshold("first_scan", "First Scan", "Analyze a wallet", Analysis, Common, 15, WalletsAnalyzed, 1),
        threshold("wallet_detective", "Wallet Detective", "Analyze 10 wallets", Analysis, Uncommon, 40, WalletsAnalyzed, 10),
        threshold("chain_oracle", "Chain Oracle", "Analyze 50 wallets", Analysis, Epic, 120, WalletsAnalyzed, 50),
        threshold("first_brief", "Briefed", "Generate your first brief", Analysis, Common, 15, BriefsGenerated, 1),
        threshold("brief_machine", "Brief Machine", "Generate 10 briefs", Analysis, Rare, 80, BriefsGenerated, 10),

        // Dedication
        threshold("streak_3", "On Fire", "Reach a 3-day streak", Dedication, Common, 20, LongestStreak, 3),
        threshold("streak_7", "Week Warrior", "Reach a 7-day streak", Dedication, Uncommon, 50, LongestStreak, 7),
        threshold("streak_30", "Monthly Master", "Reach a 30-day streak", Dedication, Epic, 150, LongestStreak, 30),
        threshold("week_old", "One Week In", "Keep your account for a week", Dedication, Common, 15, AccountAgeDays, 7),
        threshold("month_old", "Month Veteran", "Keep your account for a month", Dedication, Uncommon, 40, AccountAgeDays, 30),

        // Special (event-driven)
        event("connected", "Plugged In", "Connect a wallet", Special, Common, 10, EventTag::WalletConnected, false),
        event("tourist", "Grand Tour", "Finish the intro tour", Special, Common, 10, EventTag::TourCompleted, false),
        event("self_aware", "Know Thyself", "Analyze your own wallet", Special, Rare, 60, EventTag::OwnWalletAnalyzed, true),
        event("egg_hunter", "Egg Hunter", "Find the hidden easter egg", Special, Legendary, 200, EventTag::EasterEggFound, true),
    ]
}

/// The shipped skill tree. Three branches out of `first_steps` that
/// converge on `alpha_synthesis`.
pub fn skill_nodes() -> Vec<SkillNode> {
    fn node(id: &str, name: &str, prereqs: &[&str], xp: u64) -> SkillNode {
        SkillNode {
            id: id.to_string(),
            name: name.to_string(),
            prerequisites: prereqs.iter().map(|s| s.to_string()).collect(),
            xp,
        }
    }

    vec![
        node("first_steps", "First Steps", &[], 25),
        node("market_basics", "Market Basics", &["first_steps"], 50),
        node("token_anatomy", "Token Anatomy", &["market_basics"], 75),
        node("wallet_setup", "Wallet Setup", &["first_steps"], 50),
        node("wallet_hygiene", "Wallet Hygiene", &["wallet_setup"], 75),
        node("onchain_analysis", "On-chain Analysis", &["wallet_hygiene", "token_anatomy"], 125),
        node("narrative_craft", "Narrative Craft", &["first_steps"], 50),
        node("brief_writing", "Brief Writing", &["narrative_craft"], 75),
        node("campaign_design", "Campaign Design", &["brief_writing", "market_basics"], 125),
        node("alpha_synthesis", "Alpha Synthesis", &["onchain_analysis", "campaign_design"], 250),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_achievements_exist() {
        let secrets: Vec<_> = achievements().into_iter().filter(|a| a.secret).collect();
        assert!(secrets.len() >= 2);
    }

    #[test]
    fn test_all_categories_covered() {
        let defs = achievements();
        for category in Category::ALL {
            assert!(
                defs.iter().any(|d| d.category == *category),
                "no achievement in category {category:?}"
            );
        }
    }

    #[test]
    fn test_root_node_has_no_prerequisites() {
        let nodes = skill_nodes();
        let root = nodes.iter().find(|n| n.id == "first_steps").unwrap();
        assert!(root.prerequisites.is_empty());
    }
}
