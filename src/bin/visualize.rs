//! Render the exploratory report for the project dataset.
//!
//! Reads `data/raw/filtered.tsv` under the current directory and writes the
//! figures to `reports/figures/`. Set `RUST_LOG=debug` for file-level detail.

use anyhow::{Context, Result};
use detox_viz::dataset::{load_df, DEFAULT_DATASET_PATH};
use detox_viz::report::{visualize_with, ReportConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let root = std::env::current_dir().context("Failed to resolve the working directory")?;
    let dataset = load_df(&root)
        .with_context(|| format!("Failed to load {}", root.join(DEFAULT_DATASET_PATH).display()))?;
    log::info!(
        "Loaded {} rows with {} numeric columns",
        dataset.row_count(),
        dataset.column_count()
    );

    let config = ReportConfig::with_root(&root);
    let paths = visualize_with(&dataset, &config)
        .with_context(|| format!("Failed to write figures to {}", config.dir().display()))?;

    for path in paths.iter() {
        log::info!("Saved {}", path.display());
    }
    Ok(())
}
