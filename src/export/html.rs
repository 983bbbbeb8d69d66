use crate::model::Snapshot;

use super::ExportMeta;

/// Render the catalog as one self-contained static page: a block per
/// non-empty section, a card per item. Everything scraped (titles, urls,
/// tags) is escaped before it reaches the markup.
pub fn render(snapshot: &Snapshot, meta: &ExportMeta) -> String {
    let mut sections_html = String::new();
    for section in &snapshot.sections {
        let mut items_html = String::new();
        for item in &section.items {
            let tags = item
                .tags
                .iter()
                .map(|t| escape(t))
                .collect::<Vec<_>>()
                .join(", ");
            items_html.push_str(&format!(
                r#"            <div class="item">
                <a href="{url}" target="_blank" rel="noopener noreferrer">{title}</a>
                <div class="tags">{tags}</div>
            </div>
"#,
                url = escape(&item.url),
                title = escape(&item.display_title),
                tags = tags,
            ));
        }
        sections_html.push_str(&format!(
            r#"        <div class="section">
            <h2>{name}</h2>
            <p>{description}</p>
{items}        </div>
"#,
            name = escape(&section.name),
            description = escape(&section.description),
            items = items_html,
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Content Hub</title>
    <style>
        body {{ font-family: Arial, sans-serif; background: #0a001a; color: white; margin: 0; padding: 20px; }}
        h1 {{ color: #00ffff; text-align: center; }}
        .section {{ margin: 20px 0; padding: 15px; background: rgba(26,26,46,0.8); border-radius: 8px; }}
        .section h2 {{ color: #00ffff; margin-top: 0; }}
        .item {{ display: inline-block; margin: 10px; padding: 10px; background: #1a1a2e; border-radius: 6px; text-align: center; }}
        .item a {{ color: #00ffff; text-decoration: none; font-weight: bold; }}
        .item a:hover {{ text-decoration: underline; }}
        .tags {{ font-size: 0.8em; color: #aaa; margin-top: 5px; }}
        .footer {{ text-align: center; margin-top: 30px; color: #666; }}
    </style>
</head>
<body>
    <h1>Content Hub</h1>
    <p style="text-align: center;">Updated: {updated}</p>
    <div id="content">
{sections}    </div>
    <div class="footer">Generated from {source}</div>
</body>
</html>
"#,
        updated = escape(&meta.updated_at),
        sections = sections_html,
        source = escape(&meta.source_url),
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

// ── Tests ──
