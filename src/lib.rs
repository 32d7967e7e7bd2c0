// CardForge - lib.rs
// Builds Anki packages from Scryfall card sets.

pub mod catalog;
pub mod config;
pub mod debug;
pub mod deck;
pub mod error;
pub mod html;
pub mod package;
pub mod pipeline;

pub use config::Config;
pub use error::{FetchError, PipelineError, RenderError, WriteError};
pub use pipeline::{build_set, build_sets, BatchOutcome, BuildReport, Context};

/// Sets up `env_logger` with `info` as the default level.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
