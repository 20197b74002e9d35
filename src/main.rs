mod commands;
mod config;
mod error;
mod extractor;
mod fetcher;
mod logging;
mod manifest;
mod naming;
mod scanner;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use crate::config::{Config, Overrides};

/// Command-line arguments. Anything left out comes from `.imgharvest.toml` or the defaults.
#[derive(Parser)]
#[command(
    name = "imgharvest",
    about = "Download remote images referenced from markdown docs"
)]
struct Cli {
    /// Directory to scan for documents [default: docs]
    #[arg(long)]
    input_dir: Option<PathBuf>,
    /// Where to write the reference map [default: image-map.txt]
    #[arg(long)]
    map_file: Option<PathBuf>,
    /// Where to save downloaded images [default: images]
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    let overrides = Overrides {
        input_dir: cli.input_dir,
        map_file: cli.map_file,
        output_dir: cli.output_dir,
    };

    let config = match Config::load(Path::new(".")) {
        Ok(c) => c.with_overrides(overrides),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        },
    };

    return match commands::harvest(&config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    };
}
