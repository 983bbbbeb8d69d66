use std::collections::BTreeSet;
use std::sync::RwLock;

use crate::model::{Category, ContentSection, LinkItem, Snapshot};

/// Groups classified items into per-category sections and serves read-mostly
/// snapshots to the exporters.
///
/// Reorganizing rebuilds the whole section list off-lock and swaps it in under
/// the write lock, so readers never observe a partially populated map.
pub struct ContentManager {
    sections: RwLock<Vec<ContentSection>>,
}

impl ContentManager {
    pub fn new() -> Self {
        ContentManager {
            sections: RwLock::new(default_sections()),
        }
    }

    /// Replace the previous organization wholesale. Items land in their
    /// category's section in arrival order; an item whose category has no
    /// section (cannot happen with the closed enum, kept as a guard) goes to
    /// Tools.
    pub fn organize(&self, items: Vec<LinkItem>) {
        let mut fresh = default_sections();
        for item in items {
            let slot = fresh
                .iter()
                .position(|s| s.category == item.category)
                .or_else(|| fresh.iter().position(|s| s.category == Category::Tools));
            if let Some(slot) = slot {
                fresh[slot].items.push(item);
            }
        }
        let mut guard = self.sections.write().unwrap_or_else(|p| p.into_inner());
        *guard = fresh;
    }

    /// Point-in-time view for export: non-empty sections only, plus the
    /// distinct tag set and total item count.
    pub fn snapshot(&self) -> Snapshot {
        let guard = self.sections.read().unwrap_or_else(|p| p.into_inner());
        let sections: Vec<ContentSection> = guard
            .iter()
            .filter(|s| !s.items.is_empty())
            .cloned()
            .collect();
        let all_tags: BTreeSet<String> = sections
            .iter()
            .flat_map(|s| s.items.iter())
            .flat_map(|i| i.tags.iter().cloned())
            .collect();
        let total_items = sections.iter().map(|s| s.items.len()).sum();
        Snapshot {
            sections,
            all_tags: all_tags.into_iter().collect(),
            total_items,
        }
    }
}

impl Default for ContentManager {
    fn default() -> Self {
        Self::new()
    }
}

fn default_sections() -> Vec<ContentSection> {
    Category::ALL.iter().map(|c| ContentSection::new(*c)).collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::config::AppConfig;
    use crate::taxonomy::Taxonomy;

    fn item(title: &str, url: &str) -> LinkItem {
        let tax = Taxonomy::from_config(&AppConfig::default());
        classify(&tax, title, url, "")
    }

    #[test]
    fn snapshot_drops_empty_sections() {
        let manager = ContentManager::new();
        manager.organize(vec![item("Gunsmoke Western", "https://example.org/g")]);
        let snapshot = manager.snapshot();
        assert_eq!(snapshot.sections.len(), 1);
        assert_eq!(snapshot.sections[0].category, Category::Westerns);
        assert_eq!(snapshot.total_items, 1);
    }

    #[test]
    fn reorganize_does_not_accumulate() {
        let manager = ContentManager::new();
        manager.organize(vec![item("Gunsmoke Western", "https://example.org/g")]);
        manager.organize(vec![item("Winnie The Pooh", "https://example.org/p")]);
        let snapshot = manager.snapshot();
        assert_eq!(snapshot.total_items, 1);
        assert_eq!(snapshot.sections[0].category, Category::Kids);
    }

    #[test]
    fn items_keep_arrival_order_within_section() {
        let manager = ContentManager::new();
        manager.organize(vec![
            item("Gunsmoke Western", "https://example.org/1"),
            item("Cheyenne Western", "https://example.org/2"),
            item("Cowboy Movie Western", "https://example.org/3"),
        ]);
        let snapshot = manager.snapshot();
        let urls: Vec<&str> = snapshot.sections[0]
            .items
            .iter()
            .map(|i| i.url.as_str())
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://example.org/1",
                "https://example.org/2",
                "https://example.org/3"
            ]
        );
    }

    #[test]
    fn aggregate_tags_are_distinct() {
        let manager = ContentManager::new();
        manager.organize(vec![
            item("Gunsmoke Western", "https://example.org/1"),
            item("Cheyenne Western Classic", "https://example.org/2"),
        ]);
        let snapshot = manager.snapshot();
        let western_count = snapshot
            .all_tags
            .iter()
            .filter(|t| t.as_str() == "western")
            .count();
        assert_eq!(western_count, 1);
    }

    #[test]
    fn empty_run_yields_empty_snapshot() {
        let manager = ContentManager::new();
        manager.organize(Vec::new());
        let snapshot = manager.snapshot();
        assert!(snapshot.is_empty());
        assert!(snapshot.sections.is_empty());
        assert!(snapshot.all_tags.is_empty());
    }
}
