// src/error.rs
// Error types for each stage of the deck pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Anything that goes wrong while talking to the catalog API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}: {details}")]
    Status {
        url: String,
        status: u16,
        details: String,
    },

    #[error("{url} reported more results but gave no next page")]
    MissingCursor { url: String },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Template loading and rendering failures.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not load template '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("could not render template '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// Failures while serializing a deck into (or reading it back from) an .apkg.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("collection database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("package archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("collection JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid package: {0}")]
    Invalid(String),
}

impl WriteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WriteError::Io {
            path: path.into(),
            source,
        }
    }
}

/// The single-set pipeline stops at the first failing stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("write failed: {0}")]
    Write(#[from] WriteError),
}
