//! Merging per-author results into one BibTeX file.
//!
//! Co-authored papers show up once per author in the group. [`Combiner`]
//! walks the authors in order, and each author's entries in export order, and
//! keeps only the first entry seen for every citation key.
//!
//! ## Usage
//!
//! ```rust
//! use dblp_bib::{AuthorResult, BibtexParser, CitationParser, Combiner, ResearcherSpec, YearRange};
//! use chrono::NaiveDate;
//!
//! let shared = "@article{DBLP:shared,\n  year = {2021}\n}";
//! let author = |name: &str, pid: &str| {
//!     let entries = BibtexParser::new().parse(shared);
//!     AuthorResult {
//!         spec: ResearcherSpec::new(name).with_identifier(pid),
//!         resolved_id: Some(pid.to_string()),
//!         matched_name: None,
//!         total_count: entries.len(),
//!         filtered_count: entries.len(),
//!         entries,
//!     }
//! };
//!
//! let generated_at = NaiveDate::from_ymd_opt(2024, 5, 1)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//! let output = Combiner::new().combine(
//!     &[author("Jane Doe", "1/1"), author("John Smith", "2/2")],
//!     &YearRange::all(),
//!     generated_at,
//! );
//!
//! assert_eq!(output.total_before_dedup(), 2);
//! assert_eq!(output.total_after_dedup(), 1);
//! assert!(output.render().contains("% Duplicates removed: 1"));
//! ```

use crate::filter::YearRange;
use crate::utils::comment_lines;
use crate::{AuthorResult, CitationEntry};
use chrono::NaiveDateTime;
use compact_str::CompactString;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Base of DBLP person page URLs.
pub const DBLP_PID_BASE_URL: &str = "https://dblp.org/pid";

const HEADER_TITLE: &str = "DBLP Publications - Combined BibTeX";
const HEADER_RULE: &str = "========================================";

/// Publication counts for one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCount {
    pub display_name: String,
    /// Entries that passed the year filter
    pub filtered: usize,
    /// Entries still present after cross-author deduplication
    pub kept: usize,
}

/// One author's block in the combined file.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorSection {
    pub display_name: String,
    pub resolved_id: Option<String>,
    /// Canonical DBLP page for `resolved_id`
    pub person_url: Option<String>,
    /// Entries not already contributed by an earlier author
    pub entries: Vec<CitationEntry>,
}

impl AuthorSection {
    fn marker(&self) -> String {
        match &self.person_url {
            Some(url) => format!("% ---- {} ({}) ----", self.display_name, url),
            None => format!("% ---- {} ----", self.display_name),
        }
    }

    fn render(&self) -> String {
        std::iter::once(self.marker())
            .chain(self.entries.iter().map(|entry| entry.raw_text.clone()))
            .join("\n\n")
    }
}

/// The merged, deduplicated result of a run.
///
/// Keys are unique across all sections. Sections follow author order and
/// entries within a section follow that author's export order.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedOutput {
    pub header_comment_block: String,
    pub sections: Vec<AuthorSection>,
    /// Per-author counts, in author order
    pub per_author_counts: Vec<AuthorCount>,
}

impl CombinedOutput {
    /// All surviving entries in output order.
    pub fn entries(&self) -> impl Iterator<Item = &CitationEntry> {
        self.sections.iter().flat_map(|section| section.entries.iter())
    }

    /// Filtered entry count for the first author with this display name.
    pub fn count_for(&self, display_name: &str) -> Option<usize> {
        self.per_author_counts
            .iter()
            .find(|count| count.display_name == display_name)
            .map(|count| count.filtered)
    }

    /// Sum of the per-author filtered counts.
    pub fn total_before_dedup(&self) -> usize {
        self.per_author_counts.iter().map(|count| count.filtered).sum()
    }

    pub fn total_after_dedup(&self) -> usize {
        self.sections.iter().map(|section| section.entries.len()).sum()
    }

    pub fn duplicates_removed(&self) -> usize {
        self.total_before_dedup() - self.total_after_dedup()
    }

    /// The complete file contents: header, then one block per author.
    pub fn render(&self) -> String {
        let body = self.sections.iter().map(AuthorSection::render).join("\n\n");
        format!("{}\n\n{}\n", self.header_comment_block, body)
    }
}

/// Merges author results, dropping repeated citation keys.
///
/// # Examples
///
/// ```
/// use dblp_bib::Combiner;
///
/// let combiner = Combiner::new().with_pid_base_url("https://dblp.uni-trier.de/pid");
/// ```
#[derive(Debug, Clone)]
pub struct Combiner {
    pid_base_url: String,
}

impl Default for Combiner {
    fn default() -> Self {
        Self::new()
    }
}

impl Combiner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pid_base_url: DBLP_PID_BASE_URL.to_string(),
        }
    }

    /// Sets the base used to build each section's person URL.
    #[must_use]
    pub fn with_pid_base_url(mut self, base: &str) -> Self {
        self.pid_base_url = base.trim_end_matches('/').to_string();
        self
    }

    /// Merges `results` in order. The first occurrence of a key wins.
    ///
    /// # Arguments
    ///
    /// * `results` - Per-author results in input order
    /// * `range` - The year range the results were filtered with, for the header
    /// * `generated_at` - Timestamp written into the header
    pub fn combine(
        &self,
        results: &[AuthorResult],
        range: &YearRange,
        generated_at: NaiveDateTime,
    ) -> CombinedOutput {
        let mut seen: HashSet<&CompactString> = HashSet::new();
        let mut sections = Vec::with_capacity(results.len());
        let mut per_author_counts = Vec::with_capacity(results.len());

        for result in results {
            let display_name = result.display_name().to_string();
            let mut kept = Vec::new();

            for entry in &result.entries {
                if seen.insert(&entry.key) {
                    kept.push(entry.clone());
                } else {
                    debug!("Dropping duplicate {} from {}", entry.key, display_name);
                }
            }

            per_author_counts.push(AuthorCount {
                display_name: display_name.clone(),
                filtered: result.filtered_count,
                kept: kept.len(),
            });
            sections.push(AuthorSection {
                display_name,
                resolved_id: result.resolved_id.clone(),
                person_url: result
                    .resolved_id
                    .as_ref()
                    .map(|id| format!("{}/{}", self.pid_base_url, id)),
                entries: kept,
            });
        }

        let unique = sections.iter().map(|s| s.entries.len()).sum();
        let header_comment_block =
            Self::render_header(&per_author_counts, unique, range, generated_at);

        CombinedOutput {
            header_comment_block,
            sections,
            per_author_counts,
        }
    }

    fn render_header(
        counts: &[AuthorCount],
        unique: usize,
        range: &YearRange,
        generated_at: NaiveDateTime,
    ) -> String {
        let total: usize = counts.iter().map(|count| count.filtered).sum();

        let mut lines = vec![
            HEADER_TITLE.to_string(),
            format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
            format!("Total Authors: {}", counts.len()),
            format!("Year Range: {}", range.describe()),
            String::new(),
            "Authors included:".to_string(),
        ];
        lines.extend(
            counts
                .iter()
                .map(|count| format!("- {}: {} publications", count.display_name, count.filtered)),
        );
        lines.extend([
            String::new(),
            format!("Total entries (before de-duplication): {total}"),
            format!("Unique publications (after de-duplication): {unique}"),
            format!("Duplicates removed: {}", total - unique),
            String::new(),
            "NOTE: Duplicates occur when multiple authors from this group".to_string(),
            "      co-author papers together.".to_string(),
            String::new(),
            HEADER_RULE.to_string(),
        ]);

        comment_lines(&lines.join("\n"))
    }
}
