use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// Closed set of content kinds. Every classified item carries exactly one;
/// `Tools` is the fallback when no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    LiveTv,
    Series,
    Movies,
    Kids,
    Documentary,
    Radio,
    Special,
    Tools,
    News,
    Classics,
    Westerns,
    Comedy,
    SciFi,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::LiveTv,
        Category::Series,
        Category::Movies,
        Category::Kids,
        Category::Documentary,
        Category::Radio,
        Category::Special,
        Category::Tools,
        Category::News,
        Category::Classics,
        Category::Westerns,
        Category::Comedy,
        Category::SciFi,
    ];

    /// Symbolic key: internal identity, section map key, config rule key.
    pub fn key(self) -> &'static str {
        match self {
            Category::LiveTv => "live_tv",
            Category::Series => "series",
            Category::Movies => "movies",
            Category::Kids => "kids",
            Category::Documentary => "documentary",
            Category::Radio => "radio",
            Category::Special => "special",
            Category::Tools => "tools",
            Category::News => "news",
            Category::Classics => "classics",
            Category::Westerns => "westerns",
            Category::Comedy => "comedy",
            Category::SciFi => "scifi",
        }
    }

    /// Display string: what exports show. Kept separate from `key` so internal
    /// identity is not coupled to presentation text.
    pub fn display(self) -> &'static str {
        match self {
            Category::LiveTv => "Live TV / Streams",
            Category::Series => "Series",
            Category::Movies => "Movies",
            Category::Kids => "Kids & Family",
            Category::Documentary => "Documentaries",
            Category::Radio => "Radio & Podcasts",
            Category::Special => "Special Collections",
            Category::Tools => "Tools / Control Hub",
            Category::News => "News & Current Events",
            Category::Classics => "Classic Cinema",
            Category::Westerns => "Westerns",
            Category::Comedy => "Comedy",
            Category::SciFi => "Sci-Fi & Fantasy",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.key() == key)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display())
    }
}

/// One classified navigation entry. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct LinkItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub display_title: String,
    pub description: String,
    pub category: Category,
    pub subcategory: String,
    pub tags: Vec<String>,
    pub thumbnail: String,
    pub decade: String,
    pub is_featured: bool,
    pub is_live: bool,
    pub is_kidsafe: bool,
    pub is_series: bool,
}

/// Per-category container within a snapshot. UI hints (icon, collapsible,
/// default_expanded) ride along for the HTML consumer but do not affect
/// correctness.
#[derive(Debug, Clone, Serialize)]
pub struct ContentSection {
    pub name: String,
    pub category: Category,
    pub description: String,
    pub icon: String,
    pub is_collapsible: bool,
    pub default_expanded: bool,
    pub is_kidsafe: bool,
    pub decade: String,
    pub items: Vec<LinkItem>,
}

impl ContentSection {
    pub fn new(category: Category) -> Self {
        ContentSection {
            name: category.display().to_string(),
            category,
            description: format!("{} content", category.display()),
            icon: String::new(),
            is_collapsible: true,
            default_expanded: false,
            is_kidsafe: category == Category::Kids,
            decade: String::new(),
            items: Vec::new(),
        }
    }
}

/// Complete point-in-time view handed to the exporters: non-empty sections in
/// taxonomy order, the distinct tag set, and the total item count.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub sections: Vec<ContentSection>,
    pub all_tags: Vec<String>,
    pub total_items: usize,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

// Sections serialize as a map keyed by symbolic category key, preserving
// taxonomy order, while staying an ordered Vec in memory.
impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct SectionMap<'a>(&'a [ContentSection]);

        impl Serialize for SectionMap<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for section in self.0 {
                    map.serialize_entry(section.category.key(), section)?;
                }
                map.end()
            }
        }

        let mut s = serializer.serialize_struct("Snapshot", 3)?;
        s.serialize_field("sections", &SectionMap(&self.sections))?;
        s.serialize_field("all_tags", &self.all_tags)?;
        s.serialize_field("total_items", &self.total_items)?;
        s.end()
    }
}

// ── Tests ──
