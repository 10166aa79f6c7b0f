mod app;
mod catalog;
mod config;
mod directive;
mod pipeline;
mod query;
mod render;

use anyhow::{Context, Result};
use clap::Parser;

use app::{Cli, summarize_catalog};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("CLI: Failed to initialize thread pool")?;
    }

    let site = match &cli.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("CLI: Failed to load site config {:?}", path))?,
        None => SiteConfig::default(),
    };

    let listings_dir = cli.content.join(&site.listings_dir);
    let destinations_dir = cli.content.join(&site.destinations_dir);
    anyhow::ensure!(
        destinations_dir.is_dir(),
        "CLI: destinations directory {:?} does not exist",
        destinations_dir
    );

    let listings = catalog::load_listings(&listings_dir)?;
    let (listing_count, tag_count) = summarize_catalog(&listings);
    tracing::info!(
        "Catalog: {} listings, {} distinct tags",
        listing_count,
        tag_count
    );

    let start = std::time::Instant::now();
    let summary = pipeline::process_tree(&destinations_dir, &site, &listings, cli.dry_run)?;

    let elapsed = start.elapsed();
    tracing::info!(
        "Done! Generated {} files from {} documents in {:.2}s",
        summary.generated,
        summary.files,
        elapsed.as_secs_f64()
    );
    if summary.failed > 0 {
        tracing::warn!("{} directives were skipped due to errors", summary.failed);
    }

    Ok(())
}
