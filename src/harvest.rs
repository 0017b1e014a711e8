//! Run orchestration: fetch every author, filter, combine, write.
//!
//! Authors are processed one at a time, in input order, with a fixed pause
//! between consecutive authors to stay within DBLP's acceptable use. A failed
//! lookup or download only costs that author's entries; the run carries on.

use crate::bibtex::BibtexParser;
use crate::combine::Combiner;
use crate::error::{AuthorError, HarvestError, Result};
use crate::fetch::{Backoff, DblpClient, ReqwestTransport, Sleeper, ThreadSleeper, Transport};
use crate::filter::YearRange;
use crate::{AuthorResult, CitationParser, ResearcherSpec};
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Settings for one harvest run.
///
/// # Examples
///
/// ```
/// use dblp_bib::HarvestConfig;
/// use std::time::Duration;
///
/// let config = HarvestConfig::default()
///     .with_author_delay(Duration::from_secs(5))
///     .with_request_timeout(Duration::from_secs(10));
/// assert_eq!(config.max_retries, 3);
/// ```
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// DBLP author search endpoint
    pub search_url: String,
    /// Base of person pages; exports live at `<base>/<pid>.bib`
    pub pid_base_url: String,
    /// Upper bound on every HTTP request
    pub request_timeout: Duration,
    /// Pause between consecutive authors
    pub author_delay: Duration,
    /// Wait schedule for rate-limited export requests
    pub backoff: Backoff,
    /// Retries after the first rate-limited export attempt
    pub max_retries: u32,
    pub user_agent: String,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            search_url: "https://dblp.org/search/author/api".to_string(),
            pid_base_url: crate::combine::DBLP_PID_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            author_delay: Duration::from_secs(3),
            backoff: Backoff::default(),
            max_retries: 3,
            user_agent: concat!("dblp-bib/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HarvestConfig {
    #[must_use]
    pub fn with_search_url(mut self, url: &str) -> Self {
        self.search_url = url.to_string();
        self
    }

    #[must_use]
    pub fn with_pid_base_url(mut self, url: &str) -> Self {
        self.pid_base_url = url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_author_delay(mut self, delay: Duration) -> Self {
        self.author_delay = delay;
        self
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// An author that contributed nothing to the run, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorFailure {
    pub display_name: String,
    pub reason: String,
}

/// Per-author outcome of the fetch phase.
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    pub results: Vec<AuthorResult>,
    pub failures: Vec<AuthorFailure>,
}

impl Harvest {
    pub fn attempted(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}

/// Statistics for a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub authors_attempted: usize,
    pub authors_succeeded: usize,
    /// Sum of per-author entry counts after year filtering
    pub total_before_dedup: usize,
    pub total_after_dedup: usize,
    pub duplicates_removed: usize,
    pub failures: Vec<AuthorFailure>,
    pub year_range: YearRange,
    pub output_path: PathBuf,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.authors_succeeded > 0
    }
}

/// Drives a run from an author list to a written BibTeX file.
pub struct Harvester<T = ReqwestTransport, S = ThreadSleeper> {
    client: DblpClient<T, S>,
    config: HarvestConfig,
    parser: BibtexParser,
    combiner: Combiner,
}

impl<T: Transport, S: Sleeper> Harvester<T, S> {
    pub fn new(client: DblpClient<T, S>, config: HarvestConfig) -> Self {
        let combiner = Combiner::new().with_pid_base_url(&config.pid_base_url);
        Self {
            client,
            config,
            parser: BibtexParser::new(),
            combiner,
        }
    }

    /// Resolves, downloads, parses and filters one author.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorError`] when the name search finds nobody or a request fails.
    pub fn process_author(
        &self,
        spec: &ResearcherSpec,
        range: &YearRange,
    ) -> std::result::Result<AuthorResult, AuthorError> {
        let (identifier, matched_name) = match &spec.identifier {
            Some(identifier) => (identifier.clone(), None),
            None => {
                let resolved = self.client.resolve_identifier(&spec.display_name)?;
                (resolved.identifier, Some(resolved.canonical_name))
            }
        };

        let blob = self.client.fetch_entries(&identifier)?;
        let entries = self.parser.parse(&blob);
        let total_count = entries.len();
        let entries = range.filter(entries);
        let filtered_count = entries.len();

        if range.is_unbounded() {
            info!("Parsed {} publications", total_count);
        } else {
            info!(
                "Filtered: {}/{} publications in range",
                filtered_count, total_count
            );
        }

        Ok(AuthorResult {
            spec: spec.clone(),
            resolved_id: Some(identifier),
            matched_name,
            entries,
            total_count,
            filtered_count,
        })
    }

    /// Processes every author in order, pausing between consecutive authors.
    ///
    /// Never fails: per-author errors are logged and collected in
    /// [`Harvest::failures`].
    pub fn harvest(&self, authors: &[ResearcherSpec], range: &YearRange) -> Harvest {
        let mut harvest = Harvest::default();

        for (idx, spec) in authors.iter().enumerate() {
            if idx > 0 && !self.config.author_delay.is_zero() {
                self.client.sleeper().sleep(self.config.author_delay);
            }

            info!(
                "[{}/{}] Processing: {}",
                idx + 1,
                authors.len(),
                spec.display_name
            );
            match self.process_author(spec, range) {
                Ok(result) => harvest.results.push(result),
                Err(err) => {
                    warn!("Skipping {}: {}", spec.display_name, err);
                    harvest.failures.push(AuthorFailure {
                        display_name: spec.display_name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        harvest
    }

    /// Runs a full harvest and overwrites `output` with the combined file.
    ///
    /// The file is written once, after every author has been processed.
    ///
    /// # Errors
    ///
    /// - [`HarvestError::NothingFetched`] when no author succeeded; no file is written
    /// - [`HarvestError::Write`] when the output file cannot be written
    pub fn run(
        &self,
        authors: &[ResearcherSpec],
        range: YearRange,
        output: impl AsRef<Path>,
    ) -> Result<RunReport> {
        let output = output.as_ref();
        let harvest = self.harvest(authors, &range);

        if harvest.results.is_empty() {
            return Err(HarvestError::NothingFetched {
                attempted: harvest.attempted(),
                failures: harvest.failures,
            });
        }

        info!("Combining publications...");
        let combined = self
            .combiner
            .combine(&harvest.results, &range, Local::now().naive_local());

        std::fs::write(output, combined.render()).map_err(|source| HarvestError::Write {
            path: output.to_path_buf(),
            source,
        })?;
        info!("Publications saved to: {}", output.display());

        Ok(RunReport {
            authors_attempted: harvest.attempted(),
            authors_succeeded: harvest.results.len(),
            total_before_dedup: combined.total_before_dedup(),
            total_after_dedup: combined.total_after_dedup(),
            duplicates_removed: combined.duplicates_removed(),
            failures: harvest.failures,
            year_range: range,
            output_path: output.to_path_buf(),
        })
    }
}
