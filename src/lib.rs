//! Fetch, filter, and merge DBLP BibTeX exports for a group of researchers.
//!
//! `dblp-bib` downloads each researcher's publication list from DBLP, optionally
//! restricts it to a publication-year window, and merges everything into one
//! BibTeX file with duplicates (co-authored papers) removed by citation key.
//!
//! # Key Features
//!
//! - **Resilient fetching**: author lookup by name when no PID is given, and
//!   linear backoff when DBLP answers with HTTP 429
//! - **Lightweight BibTeX scanning**: records are split on line-leading `@`
//!   markers and only the key and year are extracted; the verbatim text is
//!   re-emitted untouched
//! - **Order-preserving merge**: the first author to contribute a key keeps it
//!
//! # Basic Usage
//!
//! ```rust
//! use dblp_bib::{BibtexParser, CitationParser, YearRange};
//!
//! let input = r#"@article{DBLP:journals/x/Doe21,
//!   author = {Jane Doe},
//!   year   = {2021}
//! }
//! "#;
//!
//! let entries = BibtexParser::new().parse(input);
//! assert_eq!(entries[0].key, "DBLP:journals/x/Doe21");
//! assert_eq!(entries[0].year, Some(2021));
//!
//! let range = YearRange::new(Some(2020), Some(2024)).unwrap();
//! assert_eq!(range.filter(entries).len(), 1);
//! ```
//!
//! # Running a Harvest
//!
//! ```rust,no_run
//! use dblp_bib::{DblpClient, HarvestConfig, Harvester, YearRange, authors::load_authors};
//!
//! let config = HarvestConfig::default();
//! let authors = load_authors("authors.txt").unwrap();
//! let client = DblpClient::from_config(&config).unwrap();
//! let harvester = Harvester::new(client, config);
//! let report = harvester
//!     .run(&authors, YearRange::all(), "publications.bib")
//!     .unwrap();
//! println!("{}/{} authors fetched", report.authors_succeeded, report.authors_attempted);
//! ```
//!
//! # Error Handling
//!
//! Lookup and download failures are scoped to one author: they are logged,
//! recorded in the [`RunReport`], and the run carries on. Only
//! [`HarvestError`] values (unreadable input, unwritable output, an invalid
//! year range, or zero successful authors) abort a run.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

pub mod authors;
pub mod bibtex;
pub mod combine;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod harvest;
mod regex;
mod utils;

// Reexports
pub use bibtex::BibtexParser;
pub use combine::{CombinedOutput, Combiner};
pub use error::{AuthorError, FetchError, HarvestError, NotFoundError, Result};
pub use fetch::{Backoff, DblpClient, ResolvedAuthor};
pub use filter::YearRange;
pub use harvest::{AuthorFailure, HarvestConfig, Harvester, RunReport};

/// One researcher to fetch publications for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearcherSpec {
    /// Name as written in the authors file
    pub display_name: String,
    /// DBLP person id; resolved by name search when absent
    pub identifier: Option<String>,
}

impl ResearcherSpec {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            identifier: None,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

/// A single BibTeX record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationEntry {
    /// The verbatim record, from the leading `@` through the closing brace
    pub raw_text: String,
    /// Citation key from the declaration line
    pub key: CompactString,
    /// Record type, e.g. `article` or `inproceedings`
    pub entry_type: CompactString,
    /// Publication year, if the record carries a numeric one
    pub year: Option<i32>,
}

/// Everything fetched for one author during a run.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResult {
    pub spec: ResearcherSpec,
    /// The DBLP person id used for the export request
    pub resolved_id: Option<String>,
    /// Canonical name reported by the search endpoint, when search was used
    pub matched_name: Option<String>,
    /// Entries that passed the year filter, in export order
    pub entries: Vec<CitationEntry>,
    /// Number of parsed entries before filtering
    pub total_count: usize,
    /// Number of entries after filtering
    pub filtered_count: usize,
}

impl AuthorResult {
    /// The name to show for this author: the canonical DBLP name when one was
    /// looked up, the configured name otherwise.
    pub fn display_name(&self) -> &str {
        self.matched_name
            .as_deref()
            .unwrap_or(&self.spec.display_name)
    }
}

/// Trait for citation blob parsers.
pub trait CitationParser {
    /// Parse a string containing zero or more records.
    ///
    /// Malformed records are skipped rather than reported, so this never fails.
    fn parse(&self, input: &str) -> Vec<CitationEntry>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_researcher_spec_builder() {
        let spec = ResearcherSpec::new("Jane Doe").with_identifier("12/3456");
        assert_eq!(spec.display_name, "Jane Doe");
        assert_eq!(spec.identifier.as_deref(), Some("12/3456"));
    }

    #[test]
    fn test_author_result_prefers_matched_name() {
        let mut result = AuthorResult {
            spec: ResearcherSpec::new("J. Doe"),
            resolved_id: Some("12/3456".to_string()),
            matched_name: None,
            entries: Vec::new(),
            total_count: 0,
            filtered_count: 0,
        };
        assert_eq!(result.display_name(), "J. Doe");

        result.matched_name = Some("Jane Doe 0001".to_string());
        assert_eq!(result.display_name(), "Jane Doe 0001");
    }
}
