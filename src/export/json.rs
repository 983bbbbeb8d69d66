use crate::error::HubError;
use crate::model::Snapshot;

use super::ExportMeta;

/// Full nested snapshot plus update metadata, pretty-printed. Category values
/// come out as display strings via the model's serializers.
pub fn render(snapshot: &Snapshot, meta: &ExportMeta) -> Result<String, HubError> {
    let mut document = serde_json::to_value(snapshot)?;
    if let Some(map) = document.as_object_mut() {
        map.insert("updated".to_string(), meta.updated_at.clone().into());
        map.insert("source".to_string(), meta.source_url.clone().into());
    }
    let mut out = serde_json::to_string_pretty(&document)?;
    out.push('\n');
    Ok(out)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::config::AppConfig;
    use crate::organize::ContentManager;
    use crate::taxonomy::Taxonomy;

    #[test]
    fn document_layout() {
        let tax = Taxonomy::from_config(&AppConfig::default());
        let manager = ContentManager::new();
        manager.organize(vec![classify(
            &tax,
            "Gunsmoke Western 1960s",
            "https://example.org/gunsmoke",
            "",
        )]);
        let meta = ExportMeta {
            updated_at: "now".into(),
            source_url: "https://example.org/".into(),
        };
        let raw = render(&manager.snapshot(), &meta).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(doc["total_items"], 1);
        assert_eq!(doc["updated"], "now");
        let section = &doc["sections"]["westerns"];
        assert_eq!(section["category"], "Westerns");
        assert_eq!(section["items"][0]["decade"], "1960s");
        assert!(doc["all_tags"].as_array().unwrap().iter().any(|t| t == "western"));
    }
}
