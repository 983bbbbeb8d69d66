use std::collections::HashMap;

use regex::Regex;
use tracing::warn;

use crate::config::AppConfig;
use crate::model::Category;

/// One ordered category rule. Keywords are stored lower-cased; matching is a
/// case-insensitive substring test against the title.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TagRule {
    pub tag: String,
    pub keywords: Vec<String>,
}

/// Immutable rule set compiled from configuration at startup. Rule order is
/// load-bearing: the classifier takes the first category rule that matches.
#[derive(Debug)]
pub struct Taxonomy {
    pub category_rules: Vec<CategoryRule>,
    pub tag_rules: Vec<TagRule>,
    pub featured_keywords: Vec<String>,
    pub live_keywords: Vec<String>,
    pub kids_keywords: Vec<String>,
    pub series_keywords: Vec<String>,
    pub decade_patterns: Vec<Regex>,
    placeholder_base: String,
    category_colors: HashMap<String, String>,
    thumbnail_overrides: HashMap<String, String>,
}

impl Taxonomy {
    /// Compile the rule tables. Unknown category keys and invalid decade
    /// patterns are skipped with a warning rather than failing the build.
    pub fn from_config(config: &AppConfig) -> Taxonomy {
        let category_rules = config
            .classification_rules
            .iter()
            .filter_map(|rule| match Category::from_key(&rule.category) {
                Some(category) => Some(CategoryRule {
                    category,
                    keywords: lowercase_all(&rule.keywords),
                }),
                None => {
                    warn!("skipping rule for unknown category key {:?}", rule.category);
                    None
                }
            })
            .collect();

        let tag_rules = config
            .tag_rules
            .iter()
            .map(|rule| TagRule {
                tag: rule.tag.clone(),
                keywords: lowercase_all(&rule.keywords),
            })
            .collect();

        let decade_patterns = config
            .decade_patterns
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("skipping invalid decade pattern {:?}: {}", pattern, e);
                    None
                }
            })
            .collect();

        Taxonomy {
            category_rules,
            tag_rules,
            featured_keywords: lowercase_all(&config.featured_keywords),
            live_keywords: lowercase_all(&config.live_keywords),
            kids_keywords: lowercase_all(&config.kids_keywords),
            series_keywords: lowercase_all(&config.series_keywords),
            decade_patterns,
            placeholder_base: config.thumbnails.placeholder_base.clone(),
            category_colors: config.thumbnails.category_colors.clone(),
            thumbnail_overrides: config.thumbnails.by_title.clone(),
        }
    }

    /// Canned blurb for items scraped without a description.
    pub fn description_for(category: Category) -> &'static str {
        match category {
            Category::LiveTv => "Live streams and broadcast channels.",
            Category::Series => "Television series and episodic content.",
            Category::Movies => "Feature films and cinematic releases.",
            Category::Kids => "Family-friendly and children's programming.",
            Category::Documentary => "Documentaries and educational features.",
            Category::Radio => "Radio streams, podcasts, and talk audio.",
            Category::Special => "Curated special collections and archives.",
            Category::Tools => "Navigation and portal tools.",
            Category::News => "News, commentary, and current events.",
            Category::Classics => "Classic cinema and golden-age features.",
            Category::Westerns => "Classic western films and series.",
            Category::Comedy => "Comedy features and sitcoms.",
            Category::SciFi => "Science fiction and fantasy.",
        }
    }

    /// Thumbnail resolution: exact display-title override, then a category
    /// placeholder, then the generic placeholder.
    pub fn thumbnail_for(&self, display_title: &str, category: Category) -> String {
        if let Some(url) = self.thumbnail_overrides.get(display_title) {
            return url.clone();
        }
        let color = self
            .category_colors
            .get(category.key())
            .or_else(|| self.category_colors.get("default"));
        match color {
            Some(color) => format!("{}{}", self.placeholder_base, color),
            None => String::new(),
        }
    }
}

fn lowercase_all(keywords: &[String]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}

// ── Tests ──
