//! DBLP client: author lookup and BibTeX export download.
//!
//! # Example
//!
//! ```no_run
//! use dblp_bib::{DblpClient, HarvestConfig};
//!
//! let client = DblpClient::from_config(&HarvestConfig::default()).unwrap();
//! let author = client.resolve_identifier("Donald E. Knuth").unwrap();
//! let bibtex = client.fetch_entries(&author.identifier).unwrap();
//! println!("{} bytes of BibTeX for {}", bibtex.len(), author.canonical_name);
//! ```

mod backoff;
#[cfg(test)]
pub(crate) mod fakes;
mod transport;

pub use backoff::{Backoff, Sleeper, ThreadSleeper};
pub use transport::{HttpResponse, ReqwestTransport, Transport};

use crate::error::{AuthorError, FetchError, HarvestError, NotFoundError};
use crate::harvest::HarvestConfig;
use crate::utils::pid_from_url;
use serde::Deserialize;
use tracing::{info, warn};

/// Result of a name search: the first hit's person id and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAuthor {
    pub identifier: String,
    pub canonical_name: String,
}

// --- DBLP author search response ---

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    /// Absent when the search matched nothing.
    #[serde(default)]
    hit: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    info: Option<SearchHitInfo>,
}

#[derive(Debug, Deserialize)]
struct SearchHitInfo {
    author: Option<String>,
    url: String,
}

/// Client for the DBLP author search and person export endpoints.
///
/// The HTTP layer and the sleeps between retries are injectable; production
/// code uses [`DblpClient::from_config`].
#[derive(Debug, Clone)]
pub struct DblpClient<T = ReqwestTransport, S = ThreadSleeper> {
    transport: T,
    sleeper: S,
    backoff: Backoff,
    max_retries: u32,
    search_url: String,
    pid_base_url: String,
}

impl DblpClient {
    /// Creates a client talking to the endpoints named in `config`.
    pub fn from_config(config: &HarvestConfig) -> Result<Self, HarvestError> {
        let transport = ReqwestTransport::new(config.request_timeout, &config.user_agent)?;
        Ok(Self::with_parts(transport, ThreadSleeper, config))
    }
}

impl<T: Transport, S: Sleeper> DblpClient<T, S> {
    /// Creates a client from an explicit transport and sleeper.
    pub fn with_parts(transport: T, sleeper: S, config: &HarvestConfig) -> Self {
        Self {
            transport,
            sleeper,
            backoff: config.backoff,
            max_retries: config.max_retries,
            search_url: config.search_url.clone(),
            pid_base_url: config.pid_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Export URL for a person id.
    pub fn export_url(&self, identifier: &str) -> String {
        format!("{}/{}.bib", self.pid_base_url, identifier)
    }

    /// Looks an author up by name and returns the top-ranked hit.
    ///
    /// The service's own ranking is trusted; no re-ranking happens here.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorError::NotFound`] when the search has no hits and
    /// [`AuthorError::Fetch`] when the request or the response is bad. Search
    /// requests are not retried.
    pub fn resolve_identifier(&self, display_name: &str) -> Result<ResolvedAuthor, AuthorError> {
        info!("Searching DBLP for: {}", display_name);

        let url = self.search_url.as_str();
        let response = self
            .transport
            .get(url, &[("q", display_name), ("format", "json"), ("h", "1")])?;
        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            }
            .into());
        }

        let decode_error = |message: String| FetchError::Decode {
            url: url.to_string(),
            message,
        };
        let parsed: SearchResponse =
            serde_json::from_str(&response.body).map_err(|e| decode_error(e.to_string()))?;

        let Some(hit) = parsed.result.hits.hit.into_iter().next() else {
            warn!("No DBLP author found for: {}", display_name);
            return Err(NotFoundError {
                name: display_name.to_string(),
            }
            .into());
        };
        let info = hit
            .info
            .ok_or_else(|| decode_error("search hit without info".to_string()))?;
        let identifier = pid_from_url(&info.url)
            .ok_or_else(|| decode_error(format!("no person id in '{}'", info.url)))?;

        let resolved = ResolvedAuthor {
            identifier,
            canonical_name: info.author.unwrap_or_else(|| display_name.to_string()),
        };
        info!(
            "Found: {} (PID: {})",
            resolved.canonical_name, resolved.identifier
        );
        Ok(resolved)
    }

    /// Downloads the BibTeX export for a person id.
    ///
    /// A 429 answer is retried up to `max_retries` times, waiting
    /// [`Backoff::delay`] between attempts. Anything else that is not a
    /// success fails at once.
    pub fn fetch_entries(&self, identifier: &str) -> Result<String, FetchError> {
        let url = self.export_url(identifier);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let response = self.transport.get(&url, &[])?;

            if response.is_success() {
                info!("Retrieved BibTeX export for PID {}", identifier);
                return Ok(response.body);
            }
            if !response.is_rate_limited() {
                return Err(FetchError::Status {
                    url,
                    status: response.status,
                });
            }
            if attempt > self.max_retries {
                return Err(FetchError::RateLimited {
                    url,
                    attempts: attempt,
                });
            }

            let wait = self.backoff.delay(attempt);
            warn!(
                "Rate limited. Waiting {} seconds before retry {}/{}...",
                wait.as_secs_f64(),
                attempt,
                self.max_retries
            );
            self.sleeper.sleep(wait);
        }
    }

    /// Canonical DBLP page for a person id.
    pub fn person_url(&self, identifier: &str) -> String {
        format!("{}/{}", self.pid_base_url, identifier)
    }
}
