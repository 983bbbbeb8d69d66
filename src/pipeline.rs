use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use url::Url;

use crate::classify::classify;
use crate::config::AppConfig;
use crate::detect;
use crate::error::HubError;
use crate::export::{self, ExportFormat, ExportMeta};
use crate::extract;
use crate::fetch;
use crate::model::{LinkItem, Snapshot};
use crate::organize::ContentManager;
use crate::taxonomy::Taxonomy;

/// Progress emitted by a generation run: percent 0..=100 plus a message.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub percent: u8,
    pub message: String,
}

#[derive(Debug)]
pub struct GenerationResult {
    pub raw_link_count: usize,
    pub snapshot: Arc<Snapshot>,
    pub fingerprint: String,
}

/// One full extraction run: fetch, extract, classify, organize. The
/// cancellation token is checked at every stage boundary (and inside the
/// retry wait); once signalled, no further progress or results are emitted.
pub async fn run_generation(
    source_url: &str,
    config: &AppConfig,
    taxonomy: &Taxonomy,
    manager: &ContentManager,
    progress: &mpsc::Sender<ProgressEvent>,
    cancel: &CancellationToken,
) -> Result<GenerationResult, HubError> {
    emit(progress, 0, "Starting extraction...").await;

    let base = Url::parse(source_url)
        .map_err(|e| HubError::Extraction(format!("invalid source url {:?}: {}", source_url, e)))?;

    emit(progress, 10, "Fetching website content...").await;
    let body = fetch::fetch_page(source_url, &config.fetch, cancel).await?;
    check_cancelled(cancel)?;

    emit(progress, 50, "Extracting links...").await;
    let raw_links = extract::extract_links(&body, &base)?;
    if raw_links.is_empty() {
        return Err(HubError::Extraction("no links found on page".to_string()));
    }
    check_cancelled(cancel)?;

    emit(progress, 70, "Classifying content...").await;
    let items = build_items(taxonomy, &raw_links);
    check_cancelled(cancel)?;

    let fingerprint = detect::fingerprint(&items);
    let item_count = items.len();
    manager.organize(items);
    let snapshot = Arc::new(manager.snapshot());

    emit(progress, 100, "Extraction complete!").await;
    info!(
        "classified {} of {} links into {} sections",
        item_count,
        raw_links.len(),
        snapshot.sections.len()
    );

    Ok(GenerationResult {
        raw_link_count: raw_links.len(),
        snapshot,
        fingerprint,
    })
}

/// Classify raw links in extraction order, dropping later duplicates of the
/// same normalized title (first occurrence wins). Dedup is per run only.
pub fn build_items(taxonomy: &Taxonomy, raw_links: &[(String, String)]) -> Vec<LinkItem> {
    let mut seen = HashSet::new();
    let mut items = Vec::new();
    for (title, url) in raw_links {
        let item = classify(taxonomy, title, url, "");
        if seen.insert(item.display_title.clone()) {
            items.push(item);
        }
    }
    items
}

/// Write all three formats concurrently against the same immutable snapshot.
/// The workers are independent: one failing does not stop the others, and no
/// completion order is guaranteed.
pub async fn export_all(
    snapshot: Arc<Snapshot>,
    meta: ExportMeta,
    output_dir: PathBuf,
) -> Vec<(ExportFormat, Result<PathBuf, HubError>)> {
    let mut handles = Vec::new();
    for format in ExportFormat::ALL {
        let snapshot = Arc::clone(&snapshot);
        let meta = meta.clone();
        let dir = output_dir.clone();
        let handle =
            tokio::task::spawn_blocking(move || export::export(format, &snapshot, &meta, &dir));
        handles.push((format, handle));
    }

    let mut results = Vec::new();
    for (format, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(HubError::FileOperation(format!(
                "{} export worker failed: {}",
                format, e
            ))),
        };
        results.push((format, result));
    }
    results
}

async fn emit(progress: &mpsc::Sender<ProgressEvent>, percent: u8, message: &str) {
    // A closed receiver just means nobody is watching.
    let _ = progress
        .send(ProgressEvent {
            percent,
            message: message.to_string(),
        })
        .await;
}

fn check_cancelled(cancel: &CancellationToken) -> Result<(), HubError> {
    if cancel.is_cancelled() {
        Err(HubError::Cancelled)
    } else {
        Ok(())
    }
}

// ── Tests ──
