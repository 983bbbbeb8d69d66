use crate::model::{Category, LinkItem};
use crate::normalize::normalize;
use crate::taxonomy::Taxonomy;

/// Classify one raw navigation link into an immutable `LinkItem`. Pure and
/// total: unmatched categories, tags, decades, and flags degrade to
/// default/empty/false instead of failing.
pub fn classify(taxonomy: &Taxonomy, title: &str, url: &str, description: &str) -> LinkItem {
    let display_title = normalize(title);
    let title_lower = display_title.to_lowercase();

    // First matching rule wins; rule order comes straight from configuration.
    let category = taxonomy
        .category_rules
        .iter()
        .find(|rule| matches_any(&title_lower, &rule.keywords))
        .map(|rule| rule.category)
        .unwrap_or(Category::Tools);

    // Decade is matched against the original-cased title, not the lowered one.
    let decade = taxonomy
        .decade_patterns
        .iter()
        .find_map(|re| re.find(&display_title))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let mut tags: Vec<String> = Vec::new();
    for rule in &taxonomy.tag_rules {
        if matches_any(&title_lower, &rule.keywords) && !tags.contains(&rule.tag) {
            tags.push(rule.tag.clone());
        }
    }

    let is_featured = matches_any(&title_lower, &taxonomy.featured_keywords);
    let is_live = matches_any(&title_lower, &taxonomy.live_keywords);
    let is_kidsafe = matches_any(&title_lower, &taxonomy.kids_keywords);
    let is_series = matches_any(&title_lower, &taxonomy.series_keywords);

    let description = if description.is_empty() {
        default_description(&title_lower, category)
    } else {
        description.to_string()
    };
    let thumbnail = taxonomy.thumbnail_for(&display_title, category);

    LinkItem {
        id: item_id(title, url),
        title: title.to_string(),
        url: url.to_string(),
        display_title,
        description,
        category,
        subcategory: String::new(),
        tags,
        thumbnail,
        decade,
        is_featured,
        is_live,
        is_kidsafe,
        is_series,
    }
}

/// Short display/reference key over (title, url). Collisions are tolerated,
/// not corrected; 8 hex chars is plenty for a single navigation page.
fn item_id(title: &str, url: &str) -> String {
    let digest = blake3::hash(format!("{}{}", title, url).as_bytes());
    digest.to_hex()[..8].to_string()
}

fn default_description(title_lower: &str, category: Category) -> String {
    if title_lower.contains("alex jones") {
        return "Curated selection by Alex Jones and editors.".to_string();
    }
    Taxonomy::description_for(category).to_string()
}

fn matches_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw.as_str()))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, TagRuleConfig};

    fn taxonomy() -> Taxonomy {
        Taxonomy::from_config(&AppConfig::default())
    }

    #[test]
    fn live_news_title() {
        let item = classify(&taxonomy(), "LIVE NOW: Rumble News", "https://example.org/live", "");
        assert_eq!(item.category, Category::LiveTv);
        assert!(item.is_live);
        assert!(item.decade.is_empty());
    }

    #[test]
    fn kids_title_beats_classic_keyword() {
        let item = classify(&taxonomy(), "Winnie The Pooh Classic", "https://example.org/pooh", "");
        assert_eq!(item.category, Category::Kids);
        assert!(item.is_kidsafe);
        assert!(!item.is_live);
    }

    #[test]
    fn western_title_with_decade() {
        let item = classify(
            &taxonomy(),
            "Gunsmoke Western 1960s",
            "https://example.org/gunsmoke",
            "",
        );
        assert_eq!(item.category, Category::Westerns);
        assert_eq!(item.decade, "1960s");
        assert!(item.tags.contains(&"western".to_string()));
    }

    #[test]
    fn unmatched_title_defaults_to_tools() {
        let item = classify(&taxonomy(), "Zyx Qwerty", "https://example.org/x", "");
        assert_eq!(item.category, Category::Tools);
        assert!(item.tags.is_empty());
        assert!(!item.is_featured && !item.is_live && !item.is_kidsafe && !item.is_series);
    }

    #[test]
    fn deterministic_including_id() {
        let tax = taxonomy();
        let a = classify(&tax, "Classic Movies", "https://example.org/m", "");
        let b = classify(&tax, "Classic Movies", "https://example.org/m", "");
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
        assert_eq!(a.id.len(), 8);
        assert!(a.id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tags_are_deduplicated() {
        let mut config = AppConfig::default();
        config.tag_rules.push(TagRuleConfig {
            tag: "western".into(),
            keywords: vec!["gunsmoke".into()],
        });
        let tax = Taxonomy::from_config(&config);
        let item = classify(&tax, "Gunsmoke Western", "https://example.org/g", "");
        let western_count = item.tags.iter().filter(|t| t.as_str() == "western").count();
        assert_eq!(western_count, 1);
    }

    #[test]
    fn provided_description_is_kept() {
        let item = classify(&taxonomy(), "Control Hub", "https://example.org/", "Main portal.");
        assert_eq!(item.description, "Main portal.");
        let filled = classify(&taxonomy(), "Control Hub", "https://example.org/", "");
        assert_eq!(filled.description, "Navigation and portal tools.");
    }
}
