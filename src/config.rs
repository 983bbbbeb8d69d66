use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// One ordered classification rule: `category` is a symbolic category key,
/// `keywords` are case-insensitive substrings. Rules are arrays in the config
/// file (not objects) so first-match order survives the wire format.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRuleConfig {
    pub category: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagRuleConfig {
    pub tag: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Prefix for generated placeholder thumbnails.
    pub placeholder_base: String,
    /// Category key -> color/path suffix appended to `placeholder_base`.
    pub category_colors: HashMap<String, String>,
    /// Exact display-title overrides.
    pub by_title: HashMap<String, String>,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        let colors = [
            ("live_tv", "FF0000/FFFFFF?text=LIVE"),
            ("series", "4285F4/FFFFFF?text=SERIES"),
            ("movies", "EA4335/FFFFFF?text=MOVIE"),
            ("kids", "34A853/FFFFFF?text=KIDS"),
            ("documentary", "9C27B0/FFFFFF?text=DOC"),
            ("westerns", "FF9800/FFFFFF?text=WEST"),
            ("scifi", "00BCD4/FFFFFF?text=SCI-FI"),
            ("default", "666666/FFFFFF?text=CONTENT"),
        ];
        ThumbnailConfig {
            placeholder_base: "https://via.placeholder.com/200x120/".to_string(),
            category_colors: colors
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            by_title: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub retries: u32,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout_secs: 30,
            retries: 3,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classification_rules: Vec<CategoryRuleConfig>,
    pub tag_rules: Vec<TagRuleConfig>,
    pub featured_keywords: Vec<String>,
    pub live_keywords: Vec<String>,
    pub kids_keywords: Vec<String>,
    pub series_keywords: Vec<String>,
    pub decade_patterns: Vec<String>,
    pub thumbnails: ThumbnailConfig,
    pub fetch: FetchConfig,
    pub output_dir: PathBuf,
    pub check_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            classification_rules: default_classification_rules(),
            tag_rules: default_tag_rules(),
            featured_keywords: strings(&["now playing", "featured", "spotlight", "new", "latest"]),
            live_keywords: strings(&["live", "streaming now", "now playing"]),
            kids_keywords: strings(&[
                "kids",
                "children",
                "family",
                "cartoon",
                "pooh",
                "looney tunes",
            ]),
            series_keywords: strings(&["series", "season", "episode", "tv show"]),
            decade_patterns: strings(&[r"19\d0s", r"20\d0s"]),
            thumbnails: ThumbnailConfig::default(),
            fetch: FetchConfig::default(),
            output_dir: PathBuf::from("output"),
            check_interval_secs: 300,
        }
    }
}

impl AppConfig {
    /// Load from a JSON file. Missing or malformed config never fails the
    /// caller: it logs and falls back to the built-in defaults.
    pub fn load(path: &Path) -> AppConfig {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => {
                info!("no config file at {}, using defaults", path.display());
                return AppConfig::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(config) => {
                info!("loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("failed to parse {}, using defaults: {}", path.display(), e);
                AppConfig::default()
            }
        }
    }
}

fn strings(source: &[&str]) -> Vec<String> {
    source.iter().map(|s| s.to_string()).collect()
}

/// Default category rules, ordered. First match wins, so specific categories
/// (kids, westerns) come before broad ones whose keywords overlap them
/// (movies carries "classic").
fn default_classification_rules() -> Vec<CategoryRuleConfig> {
    let table: &[(&str, &[&str])] = &[
        ("live_tv", &["live", "now playing", "streaming now", "rumble"]),
        ("kids", &["kids", "children", "cartoon", "animation", "family", "pooh"]),
        ("series", &["series", "season", "episode", "tv show", "comedy series"]),
        ("westerns", &["western", "cowboy", "gunsmoke", "cheyenne"]),
        ("scifi", &["sci-fi", "science fiction", "fantasy", "space"]),
        ("comedy", &["comedy", "funny", "humor"]),
        ("documentary", &["documentary", "docu", "education", "history"]),
        ("news", &["news", "current", "alex jones", "epoch"]),
        ("radio", &["radio", "podcast", "audio", "talk"]),
        ("classics", &["classic cinema", "rewind", "golden age"]),
        ("movies", &["movie", "film", "cinema", "classic", "feature"]),
        ("special", &["collection", "archive", "vault"]),
        ("tools", &["control", "hub", "tools", "settings", "player"]),
    ];
    table
        .iter()
        .map(|(category, keywords)| CategoryRuleConfig {
            category: category.to_string(),
            keywords: strings(keywords),
        })
        .collect()
}

fn default_tag_rules() -> Vec<TagRuleConfig> {
    let table: &[(&str, &[&str])] = &[
        ("comedy", &["comedy", "funny", "humor", "sitcom"]),
        ("western", &["western", "cowboy", "ranch", "frontier"]),
        ("scifi", &["sci-fi", "space", "alien", "future", "robot"]),
        ("classic", &["classic", "vintage", "retro", "golden age"]),
        ("british", &["british", "uk", "england", "bbc"]),
        ("animated", &["animated", "cartoon", "animation"]),
        ("live", &["live", "streaming", "now playing"]),
        ("series", &["series", "season", "episode"]),
        ("movie", &["movie", "film", "feature"]),
        ("kids", &["kids", "children", "family"]),
        ("documentary", &["documentary", "docu", "educational"]),
    ];
    table
        .iter()
        .map(|(tag, keywords)| TagRuleConfig {
            tag: tag.to_string(),
            keywords: strings(keywords),
        })
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load(Path::new("/nonexistent/config.json"));
        assert_eq!(config.fetch.retries, 3);
        assert_eq!(config.classification_rules[0].category, "live_tv");
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let config = AppConfig::load(file.path());
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"output_dir": "elsewhere", "fetch": {{"retries": 5}}}}"#
        )
        .unwrap();
        let config = AppConfig::load(file.path());
        assert_eq!(config.output_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.fetch.retries, 5);
        assert_eq!(config.fetch.timeout_secs, 30);
        assert!(!config.classification_rules.is_empty());
    }

    #[test]
    fn rule_order_survives_serde() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"classification_rules": [
                {{"category": "westerns", "keywords": ["gunsmoke"]}},
                {{"category": "movies", "keywords": ["gunsmoke", "film"]}}
            ]}}"#
        )
        .unwrap();
        let config = AppConfig::load(file.path());
        assert_eq!(config.classification_rules[0].category, "westerns");
        assert_eq!(config.classification_rules[1].category, "movies");
    }
}
