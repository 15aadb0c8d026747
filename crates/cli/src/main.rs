//! articled entry point.
//!
//! Takes zero or more URLs (or local HTML paths) as positional arguments
//! and prints each input followed by its normalized record as indented
//! JSON. Configuration comes entirely from the environment (`CACHE_DIR`,
//! `CACHE_DISABLE`, `OUTPUT_FORMAT`); no flags are parsed. Logging goes to
//! stderr so stdout stays clean for the records. Any failure aborts the
//! run; records already printed stay printed.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use articled_client::Pipeline;
use articled_core::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        cache_dir = %config.cache_dir.display(),
        output_format = %config.output_format,
        "starting articled"
    );

    let pipeline = Pipeline::new(&config)?;

    for url in std::env::args().skip(1) {
        let record = pipeline.run(&url, &config.output_format).await?;
        println!("{url}");
        println!("{}", serde_json::to_string_pretty(&record)?);
    }

    Ok(())
}
