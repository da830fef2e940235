//! Terminal rendering for engine queries.

use owo_colors::OwoColorize;
use questline::engine::AchievementView;
use questline::{
    Category, NodeStatus, ProgressionEngine, Rarity, StatKey, TimelineEntry,
};

fn rarity_tag(rarity: Rarity) -> String {
    let label = rarity.label();
    match rarity {
        Rarity::Common => label.white().to_string(),
        Rarity::Uncommon => label.green().to_string(),
        Rarity::Rare => label.blue().to_string(),
        Rarity::Epic => label.magenta().to_string(),
        Rarity::Legendary => label.yellow().to_string(),
    }
}

/// XP, rank card and raw counters.
pub fn stats(engine: &ProgressionEngine) {
    let xp = engine.xp();
    let rank = engine.rank_progress();

    println!("{}", "PROGRESSION".bold());
    println!("{}", "-".repeat(50));
    println!("  XP:     {}", xp.to_string().bold());
    match rank.next {
        Some(next) => println!(
            "  Rank:   {} ({}% to {})",
            rank.current.name.bold(),
            rank.percent_to_next,
            next.name
        ),
        None => println!("  Rank:   {} (max)", rank.current.name.bold()),
    }
    println!("  Streak: {} day(s)", engine.current_streak());

    if !engine.featured().is_empty() {
        let names: Vec<&str> = engine
            .featured()
            .iter()
            .filter_map(|id| engine.registry().achievement(id))
            .map(|def| def.name.as_str())
            .collect();
        println!("  Featured: {}", names.join(", "));
    }

    println!("{}", "-".repeat(50));
    for key in StatKey::ALL {
        let value = engine.stats().get(*key);
        if value > 0 {
            println!("  {:<22} {}", key.as_str(), value);
        }
    }
}

/// Achievement catalog grouped by category.
pub fn achievements(engine: &ProgressionEngine, all: bool) {
    let views: Vec<AchievementView> = engine.achievements();
    let unlocked = views.iter().filter(|v| v.unlocked).count();
    println!(
        "{} ({}/{} unlocked)",
        "ACHIEVEMENTS".bold(),
        unlocked,
        views.len()
    );

    for category in Category::ALL {
        let in_category: Vec<&AchievementView> = views
            .iter()
            .filter(|v| v.def.category == *category)
            .filter(|v| all || v.unlocked)
            .collect();
        if in_category.is_empty() {
            continue;
        }
        println!("\n{}", category.label().bold());
        for view in in_category {
            let marker = if view.unlocked { "[*]" } else { "[ ]" };
            println!(
                "  {} {:<20} {:<10} +{:<4} {}",
                marker,
                view.def.name,
                rarity_tag(view.def.rarity),
                view.def.xp,
                view.def.description.dimmed()
            );
        }
    }
}

/// Skill tree with derived per-node status.
pub fn tree(engine: &ProgressionEngine) {
    let statuses = engine.node_statuses();
    println!("{}", "SKILL TREE".bold());
    for node in engine.registry().nodes() {
        let status = statuses[&node.id];
        let marker = match status {
            NodeStatus::Completed => "[x]".green().to_string(),
            NodeStatus::Available => "[ ]".to_string(),
            NodeStatus::Locked => "[-]".dimmed().to_string(),
        };
        let prereqs = if node.prerequisites.is_empty() {
            String::new()
        } else {
            format!("  (needs {})", node.prerequisites.join(", "))
        };
        println!(
            "  {} {:<20} +{:<4} {}{}",
            marker,
            node.name,
            node.xp,
            status.label(),
            prereqs.dimmed()
        );
    }
}

/// Recent unlock events, newest first.
pub fn timeline(engine: &ProgressionEngine, limit: usize) {
    let entries: Vec<&TimelineEntry> = engine.recent_timeline(limit);
    if entries.is_empty() {
        println!("No unlocks yet.");
        return;
    }
    println!("{}", "RECENT UNLOCKS".bold());
    for entry in entries {
        let name = engine
            .registry()
            .achievement(&entry.id)
            .map(|d| d.name.as_str())
            .unwrap_or(entry.id.as_str());
        println!(
            "  {}  {}",
            entry.unlocked_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            name
        );
    }
}
