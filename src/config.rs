// src/config.rs

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const API_URL_VAR: &str = "CARDFORGE_API_URL";
pub const TEMPLATES_VAR: &str = "CARDFORGE_TEMPLATES";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Pause between consecutive catalog requests.
    pub request_delay: Duration,
    pub templates_dir: PathBuf,
    pub stylesheet_name: &'static str,
    pub min_release_year: i32,
    pub set_type: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_base: "https://api.scryfall.com".to_string(),
            user_agent: format!("cardforge/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
            request_delay: Duration::from_millis(100),
            templates_dir: PathBuf::from("templates"),
            stylesheet_name: "styles.css",
            min_release_year: 2025,
            set_type: "expansion".to_string(),
        }
    }

    /// Defaults, overridden by any `CARDFORGE_*` variables that are set.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(url) = env::var(API_URL_VAR) {
            config.api_base = url;
        }
        if let Ok(dir) = env::var(TEMPLATES_VAR) {
            config.templates_dir = PathBuf::from(dir);
        }
        config
    }

    /// The shared stylesheet embedded into every package, if present.
    pub fn stylesheet_path(&self) -> PathBuf {
        self.templates_dir.join(self.stylesheet_name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
