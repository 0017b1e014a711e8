//! Error types shared across the crate.
//!
//! Per-author failures ([`NotFoundError`], [`FetchError`]) are caught by the
//! harvest loop and downgraded to an [`AuthorFailure`](crate::AuthorFailure).
//! Only [`HarvestError`] ever reaches the caller of a run.

use crate::harvest::AuthorFailure;
use std::path::PathBuf;
use thiserror::Error;

/// The search endpoint returned no candidates for a name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No DBLP author found for '{name}'")]
pub struct NotFoundError {
    pub name: String,
}

/// A request to the remote service failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Rate limited by {url}, gave up after {attempts} attempts")]
    RateLimited { url: String, attempts: u32 },

    #[error("Malformed response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Anything that can go wrong while processing a single author.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Errors that abort a whole run.
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid year range: start year {start} is after end year {end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("No publications fetched: all {attempted} authors failed")]
    NothingFetched {
        attempted: usize,
        failures: Vec<AuthorFailure>,
    },
}

/// A specialized Result type for run-level operations.
pub type Result<T> = std::result::Result<T, HarvestError>;
