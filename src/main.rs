// CardForge - main.rs
// Builds one Anki package for a single card set.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cardforge::package::read_package;
use cardforge::{build_set, init_logging, Config, Context};

#[derive(Debug, Parser)]
#[command(name = "build-deck", version, about = "Build an Anki deck for one card set")]
struct Args {
    /// Set code, e.g. `dsk`
    #[arg(short = 's', long = "set")]
    set: String,

    /// Directory the .apkg is written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Directory holding front.html, back.html and styles.css
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Catalog API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Re-open the written package and check its note count
    #[arg(long)]
    verify: bool,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(dir) = args.templates {
        config.templates_dir = dir;
    }
    if let Some(url) = args.api_url {
        config.api_base = url;
    }

    let ctx = match Context::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("Could not start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = match build_set(&ctx, &args.set, &args.output) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Failed to build deck for set {}: {}", args.set.to_uppercase(), e);
            return ExitCode::FAILURE;
        }
    };

    let file_name = report.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    println!("Anki deck created: {} ({} cards)", file_name, report.card_count);
    let shown = report.path.canonicalize().unwrap_or_else(|_| report.path.clone());
    println!("Deck saved to: {}", shown.display());

    if args.verify {
        match read_package(&report.path) {
            Ok(summary) if summary.notes.len() == report.card_count => {
                log::info!("Verified {} notes in {}", summary.notes.len(), file_name);
            }
            Ok(summary) => {
                log::error!("{} holds {} notes, expected {}", file_name, summary.notes.len(), report.card_count);
                return ExitCode::FAILURE;
            }
            Err(e) => {
                log::error!("Could not read back {}: {}", file_name, e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
