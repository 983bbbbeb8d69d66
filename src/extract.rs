use scraper::{Html, Selector};
use url::Url;

use crate::error::HubError;

/// Pull (anchor text, absolute url) pairs out of fetched markup.
///
/// The page's main navigation is assumed to be the `<ul>` with the most
/// descendant `a[href]` anchors; ties go to the first list in document order.
/// Anchors with empty visible text are skipped, everything else is kept. A
/// synthetic ("Home", base) entry is prepended unless the first link already
/// reads like one.
pub fn extract_links(html: &str, base_url: &Url) -> Result<Vec<(String, String)>, HubError> {
    let document = Html::parse_document(html);
    let ul_selector = Selector::parse("ul").expect("static selector");
    let anchor_selector = Selector::parse("a[href]").expect("static selector");

    let mut best = None;
    let mut best_count = 0usize;
    for ul in document.select(&ul_selector) {
        let count = ul.select(&anchor_selector).count();
        if best.is_none() || count > best_count {
            best = Some(ul);
            best_count = count;
        }
    }
    let main_list = best.ok_or_else(|| {
        HubError::Extraction("no <ul> elements found on page".to_string())
    })?;

    let mut links = Vec::new();
    for anchor in main_list.select(&anchor_selector) {
        let text = anchor.text().collect::<String>().trim().to_string();
        if text.is_empty() {
            continue;
        }
        let href = anchor.value().attr("href").unwrap_or_default();
        // Unresolvable hrefs are carried through verbatim rather than dropped.
        let resolved = base_url
            .join(href)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| href.to_string());
        links.push((text, resolved));
    }

    if let Some((first_title, _)) = links.first() {
        if !first_title.to_lowercase().contains("home") {
            links.insert(0, ("Home".to_string(), base_url.to_string()));
        }
    }

    Ok(links)
}

// ── Tests ──
