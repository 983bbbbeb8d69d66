use crate::model::Snapshot;

const HEADER: &str =
    "section,title,url,category,tags,description,thumbnail,decade,is_featured,is_live,is_kidsafe";

/// Flatten every item across every section into one row per item. Zero items
/// produce an empty file: no header, no rows.
pub fn render(snapshot: &Snapshot) -> String {
    let mut rows = Vec::new();
    for section in &snapshot.sections {
        for item in &section.items {
            let fields = [
                section.category.key().to_string(),
                item.display_title.clone(),
                item.url.clone(),
                item.category.display().to_string(),
                item.tags.join(", "),
                item.description.clone(),
                item.thumbnail.clone(),
                item.decade.clone(),
                item.is_featured.to_string(),
                item.is_live.to_string(),
                item.is_kidsafe.to_string(),
            ];
            let row = fields
                .iter()
                .map(|f| escape_field(f))
                .collect::<Vec<_>>()
                .join(",");
            rows.push(row);
        }
    }

    if rows.is_empty() {
        return String::new();
    }
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }
    out
}

fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::config::AppConfig;
    use crate::organize::ContentManager;
    use crate::taxonomy::Taxonomy;

    fn snapshot_of(titles: &[(&str, &str)]) -> Snapshot {
        let tax = Taxonomy::from_config(&AppConfig::default());
        let manager = ContentManager::new();
        manager.organize(
            titles
                .iter()
                .map(|(t, u)| classify(&tax, t, u, ""))
                .collect(),
        );
        manager.snapshot()
    }

    #[test]
    fn zero_items_means_empty_file_content() {
        assert_eq!(render(&snapshot_of(&[])), "");
    }

    #[test]
    fn one_row_per_item_with_header() {
        let out = render(&snapshot_of(&[
            ("Gunsmoke Western", "https://example.org/g"),
            ("Winnie The Pooh", "https://example.org/p"),
        ]));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert!(lines.iter().any(|l| l.starts_with("westerns,")));
        assert!(lines.iter().any(|l| l.starts_with("kids,")));
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let out = render(&snapshot_of(&[(
            "Gunsmoke Western Classic",
            "https://example.org/g",
        )]));
        // Tag list joins with ", " and must survive as a single column
        assert!(out.contains("\"western, classic\""));
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("plain"), "plain");
    }
}
