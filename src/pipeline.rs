// src/pipeline.rs
// The single-set pipeline: fetch, build, write. Each stage only runs if the
// previous one succeeded.

use std::path::{Path, PathBuf};

use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::debug::Tracer;
use crate::deck::{build_deck, CardRenderer};
use crate::error::PipelineError;
use crate::package::write_package;

/// Everything a pipeline run needs, loaded once per process.
pub struct Context {
    pub config: Config,
    pub client: CatalogClient,
    pub renderer: CardRenderer,
}

impl Context {
    pub fn new(config: Config) -> Result<Self, PipelineError> {
        let client = CatalogClient::new(&config)?;
        let renderer = CardRenderer::from_dir(&config.templates_dir)?;
        Ok(Context { config, client, renderer })
    }
}

/// Outcome of one successful run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub set_code: String,
    pub card_count: usize,
    pub path: PathBuf,
}

pub fn build_set(ctx: &Context, set_code: &str, output_dir: &Path) -> Result<BuildReport, PipelineError> {
    let _trace = Tracer::new(format!("build_set({})", set_code));

    let cards = {
        let _t = Tracer::new("fetch");
        ctx.client.fetch_cards(set_code)?
    };
    println!("Fetched {} cards from set {}.", cards.len(), set_code.to_uppercase());

    let deck = {
        let _t = Tracer::new("build");
        build_deck(set_code, &cards, &ctx.renderer)?
    };

    let stylesheet = ctx.config.stylesheet_path();
    let path = {
        let _t = Tracer::new("write");
        write_package(&deck, output_dir, Some(stylesheet.as_path()))?
    };

    Ok(BuildReport {
        set_code: deck.name,
        card_count: deck.entries.len(),
        path,
    })
}

/// Result of running the pipeline over several sets.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub built: Vec<BuildReport>,
    pub failed: Vec<(String, PipelineError)>,
}

/// Runs `build_set` for each code in order. Without `keep_going` the first
/// failure is returned and the remaining sets are not attempted.
pub fn build_sets(
    ctx: &Context,
    codes: &[String],
    output_dir: &Path,
    keep_going: bool,
) -> Result<BatchOutcome, PipelineError> {
    let mut outcome = BatchOutcome::default();
    for code in codes {
        match build_set(ctx, code, output_dir) {
            Ok(report) => {
                println!("Anki deck created: {} ({} cards)", report.path.display(), report.card_count);
                outcome.built.push(report);
            }
            Err(e) if keep_going => {
                log::warn!("Skipping set {}: {}", code.to_uppercase(), e);
                outcome.failed.push((code.clone(), e));
            }
            Err(e) => {
                log::error!("Stopping at set {}", code.to_uppercase());
                return Err(e);
            }
        }
    }
    Ok(outcome)
}
