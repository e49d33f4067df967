use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use dataset_extractor::{DATASETS, config, extractor_for};

/// Downloads datasets and extracts them into train and test frames.
#[derive(Parser)]
#[command(name = "dataset_extractor", version)]
struct Cli {
    /// The folder datasets are extracted under
    #[arg(long)]
    root: Option<PathBuf>,

    /// Only download the archives, leaving them in each dataset's tmp folder
    #[arg(long)]
    download_only: bool,

    /// The datasets to prepare
    #[arg(required = true, value_parser = clap::builder::PossibleValuesParser::new(DATASETS.iter().copied()))]
    datasets: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let root = config::datasets_root(cli.root.as_deref())?;
    info!(root:? = root; "datasets root");

    for name in &cli.datasets {
        let mut extractor = extractor_for(name, &root)?;

        extractor
            .download()
            .with_context(|| format!("downloading {name}"))?;

        if !cli.download_only {
            extractor
                .extract()
                .with_context(|| format!("extracting {name}"))?;
        }
    }

    Ok(())
}
