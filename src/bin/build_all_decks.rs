// CardForge - build_all_decks.rs
// Builds a package for every recent expansion in the catalog.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cardforge::catalog::eligible_set_codes;
use cardforge::{build_sets, init_logging, Config, Context};

#[derive(Debug, Parser)]
#[command(name = "build-all-decks", version, about = "Build Anki decks for every eligible set")]
struct Args {
    /// Directory the .apkg files are written to
    #[arg(short, long, default_value = "decks")]
    output: PathBuf,

    /// Earliest release year to include
    #[arg(long)]
    min_year: Option<i32>,

    /// Set type to include (exact match)
    #[arg(long)]
    set_type: Option<String>,

    /// Directory holding front.html, back.html and styles.css
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Catalog API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Carry on with the next set when one fails
    #[arg(long)]
    keep_going: bool,

    /// Only list the sets that would be built
    #[arg(long)]
    dry_run: bool,
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
    if let Some(year) = args.min_year {
        config.min_release_year = year;
    }
    if let Some(set_type) = args.set_type {
        config.set_type = set_type;
    }

    let ctx = match Context::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("Could not start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sets = match ctx.client.fetch_sets() {
        Ok(sets) => sets,
        Err(e) => {
            log::error!("Could not list sets: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let codes = eligible_set_codes(&sets, ctx.config.min_release_year, &ctx.config.set_type);
    log::info!(
        "{} of {} sets are {} released in {} or later",
        codes.len(),
        sets.len(),
        ctx.config.set_type,
        ctx.config.min_release_year
    );

    if args.dry_run {
        for code in &codes {
            println!("{}", code);
        }
        return ExitCode::SUCCESS;
    }

    match build_sets(&ctx, &codes, &args.output, args.keep_going) {
        Ok(outcome) if outcome.failed.is_empty() => {
            log::info!("Built {} decks into {:?}", outcome.built.len(), args.output);
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            let failed: Vec<&str> = outcome.failed.iter().map(|(code, _)| code.as_str()).collect();
            log::error!("{} set(s) failed: {}", failed.len(), failed.join(", "));
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
