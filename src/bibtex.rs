//! BibTeX record scanner.
//!
//! This is deliberately not a BibTeX grammar. The merge step only needs each
//! record's key, its year and its verbatim text, so records are located by
//! line-leading `@` markers and the two fields are pulled out with patterns.
//!
//! # Example
//!
//! ```
//! use dblp_bib::{BibtexParser, CitationParser};
//!
//! let input = r#"@inproceedings{DBLP:conf/sp/Doe24,
//!   author    = {Jane Doe},
//!   title     = {Example Title},
//!   year      = {2024}
//! }"#;
//!
//! let entries = BibtexParser::new().parse(input);
//! assert_eq!(entries[0].key, "DBLP:conf/sp/Doe24");
//! assert_eq!(entries[0].entry_type, "inproceedings");
//! assert_eq!(entries[0].year, Some(2024));
//! ```

mod fields;
mod split;

use crate::{CitationEntry, CitationParser};
use fields::{parse_declaration, parse_year};
use split::RecordSplit;
use tracing::debug;

/// Parser for BibTeX exports such as those served by DBLP.
#[derive(Debug, Clone, Default)]
pub struct BibtexParser;

impl BibtexParser {
    /// Creates a new BibTeX parser instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use dblp_bib::BibtexParser;
    /// let parser = BibtexParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CitationParser for BibtexParser {
    /// Splits `input` into records and extracts key and year from each.
    ///
    /// Chunks whose first line is not a `@<type>{<key>,` declaration are
    /// skipped. Returned entries keep the input order.
    fn parse(&self, input: &str) -> Vec<CitationEntry> {
        RecordSplit::new(input)
            .filter_map(|(line_number, chunk)| {
                let raw_text = chunk.trim();
                if raw_text.is_empty() {
                    return None;
                }

                let first_line = raw_text.lines().next().unwrap_or_default();
                let Some((entry_type, key)) = parse_declaration(first_line) else {
                    debug!(line_number, "skipping chunk without a record declaration");
                    return None;
                };

                Some(CitationEntry {
                    raw_text: raw_text.to_string(),
                    key,
                    entry_type,
                    year: parse_year(raw_text),
                })
            })
            .collect()
    }
}
