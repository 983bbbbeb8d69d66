use crate::model::LinkItem;

/// Content fingerprint over the ordered (title, url, category) triples.
/// Items must be fed in extraction order for tokens to be comparable across
/// runs; the token itself is only ever tested for equality.
pub fn fingerprint(items: &[LinkItem]) -> String {
    let mut hasher = blake3::Hasher::new();
    for item in items {
        hasher.update(item.display_title.as_bytes());
        hasher.update(item.url.as_bytes());
        hasher.update(item.category.display().as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

pub fn changed(previous: Option<&str>, current: &str) -> bool {
    previous != Some(current)
}

// ── Tests ──
