mod classify;
mod config;
mod detect;
mod error;
mod export;
mod extract;
mod fetch;
mod model;
mod normalize;
mod organize;
mod pipeline;
mod taxonomy;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use config::AppConfig;
use export::{ExportFormat, ExportMeta};
use organize::ContentManager;
use pipeline::ProgressEvent;
use taxonomy::Taxonomy;

#[derive(Parser)]
#[command(name = "hub_catalog", about = "Site navigation catalog generator")]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the site once and export all formats
    Generate {
        /// Source page URL
        url: String,
        /// Output directory (default: from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Re-scrape on a timer, exporting only when content changed
    Watch {
        /// Source page URL
        url: String,
        /// Check interval in seconds (default: from config)
        #[arg(short, long)]
        interval: Option<u64>,
        /// Output directory (default: from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a previously exported catalog file
    Show {
        /// Which export to read
        #[arg(value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output directory (default: from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    match cli.command {
        Commands::Generate { url, output } => {
            let output = output.unwrap_or_else(|| config.output_dir.clone());
            generate_once(&url, &config, output, &cancel).await
        }
        Commands::Watch {
            url,
            interval,
            output,
        } => {
            let output = output.unwrap_or_else(|| config.output_dir.clone());
            let interval = interval.unwrap_or(config.check_interval_secs);
            watch(&url, &config, output, interval, &cancel).await
        }
        Commands::Show { format, output } => {
            let output = output.unwrap_or_else(|| config.output_dir.clone());
            show(format, &output)
        }
    }
}

/// One generation run with a progress bar, then all three exports in parallel.
async fn generate_once(
    url: &str,
    config: &AppConfig,
    output: PathBuf,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let taxonomy = Taxonomy::from_config(config);
    let manager = ContentManager::new();

    let (tx, rx) = mpsc::channel::<ProgressEvent>(16);
    let bar = tokio::spawn(drive_progress_bar(rx));
    let result = pipeline::run_generation(url, config, &taxonomy, &manager, &tx, cancel).await;
    drop(tx);
    let _ = bar.await;

    let generation = match result {
        Ok(generation) => generation,
        Err(e) => {
            error!("{} error: {}", e.category(), e);
            anyhow::bail!("generation failed: {}", e);
        }
    };

    println!(
        "Extracted {} links into {} sections ({} items after dedup).",
        generation.raw_link_count,
        generation.snapshot.sections.len(),
        generation.snapshot.total_items
    );

    let results =
        pipeline::export_all(generation.snapshot, export_meta(url), output).await;
    let mut failures = 0;
    for (format, result) in results {
        match result {
            Ok(path) => println!("Saved {}: {}", format, path.display()),
            Err(e) => {
                failures += 1;
                error!("{} export failed ({}): {}", format, e.category(), e);
            }
        }
    }
    if failures > 0 {
        anyhow::bail!("{} export(s) failed", failures);
    }
    Ok(())
}

/// Timer loop: regenerate, compare fingerprints, export only on change.
/// A failed run is reported and the loop keeps going.
async fn watch(
    url: &str,
    config: &AppConfig,
    output: PathBuf,
    interval_secs: u64,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let taxonomy = Taxonomy::from_config(config);
    let manager = ContentManager::new();
    let mut last_fingerprint: Option<String> = None;

    // Progress events are logged, not drawn, in watch mode.
    let (tx, mut rx) = mpsc::channel::<ProgressEvent>(16);
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            tracing::debug!("progress {}%: {}", event.percent, event.message);
        }
    });

    info!("watching {} every {}s", url, interval_secs);
    loop {
        if cancel.is_cancelled() {
            break;
        }

        match pipeline::run_generation(url, config, &taxonomy, &manager, &tx, cancel).await {
            Ok(generation) => {
                if detect::changed(last_fingerprint.as_deref(), &generation.fingerprint) {
                    info!(
                        "change detected ({} items), exporting",
                        generation.snapshot.total_items
                    );
                    let results = pipeline::export_all(
                        generation.snapshot,
                        export_meta(url),
                        output.clone(),
                    )
                    .await;
                    for (format, result) in results {
                        match result {
                            Ok(path) => info!("saved {}: {}", format, path.display()),
                            Err(e) => error!("{} export failed: {}", format, e),
                        }
                    }
                    last_fingerprint = Some(generation.fingerprint);
                } else {
                    info!("no change detected");
                }
            }
            Err(error::HubError::Cancelled) => break,
            Err(e) => error!("{} error, will retry next cycle: {}", e.category(), e),
        }

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(interval_secs)) => {}
            _ = cancel.cancelled() => break,
        }
    }

    info!("watch stopped");
    Ok(())
}

fn show(format: ExportFormat, output: &std::path::Path) -> anyhow::Result<()> {
    let path = output.join(format.file_name());
    match export::read_previous_export(&path)? {
        Some(content) => {
            const PREVIEW_LIMIT: usize = 2000;
            if content.len() > PREVIEW_LIMIT {
                let cut = content
                    .char_indices()
                    .take_while(|(i, _)| *i < PREVIEW_LIMIT)
                    .map(|(i, c)| i + c.len_utf8())
                    .last()
                    .unwrap_or(0);
                println!("{}...", &content[..cut]);
            } else {
                println!("{}", content);
            }
            Ok(())
        }
        None => {
            println!("No {} export found at {}. Run 'generate' first.", format, path.display());
            Ok(())
        }
    }
}

fn export_meta(url: &str) -> ExportMeta {
    ExportMeta {
        updated_at: chrono::Local::now()
            .format("%B %d, %Y at %H:%M")
            .to_string(),
        source_url: url.to_string(),
    }
}

async fn drive_progress_bar(mut rx: mpsc::Receiver<ProgressEvent>) {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/100 {msg}")
            .expect("static progress template")
            .progress_chars("=> "),
    );
    while let Some(event) = rx.recv().await {
        pb.set_position(event.percent as u64);
        pb.set_message(event.message);
    }
    pb.finish_and_clear();
}
