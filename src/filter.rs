//! Publication-year filtering.
//!
//! A [`YearRange`] with neither bound set lets every entry through, including
//! entries without a year. As soon as either bound is set, entries without a
//! parseable year are dropped.

use crate::error::{HarvestError, Result};
use crate::CitationEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive, optionally open-ended range of publication years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    start: Option<i32>,
    end: Option<i32>,
}

impl YearRange {
    /// Creates a range, rejecting a start year after the end year.
    ///
    /// # Examples
    ///
    /// ```
    /// use dblp_bib::YearRange;
    ///
    /// assert!(YearRange::new(Some(2020), Some(2024)).is_ok());
    /// assert!(YearRange::new(Some(2024), Some(2020)).is_err());
    /// ```
    pub fn new(start: Option<i32>, end: Option<i32>) -> Result<Self> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(HarvestError::InvalidYearRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// A range with no bounds.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<i32> {
        self.start
    }

    pub fn end(&self) -> Option<i32> {
        self.end
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether an entry with the given year passes this range.
    pub fn contains(&self, year: Option<i32>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(year) = year else {
            return false;
        };
        self.start.is_none_or(|start| year >= start) && self.end.is_none_or(|end| year <= end)
    }

    /// Keeps the entries inside this range, preserving their order.
    pub fn filter(&self, entries: Vec<CitationEntry>) -> Vec<CitationEntry> {
        if self.is_unbounded() {
            return entries;
        }
        entries
            .into_iter()
            .filter(|entry| self.contains(entry.year))
            .collect()
    }

    /// Human-readable description used in the output header.
    pub fn describe(&self) -> String {
        match (self.start, self.end) {
            (None, None) => "all years".to_string(),
            (Some(start), Some(end)) => format!("{start}-{end}"),
            (Some(start), None) => format!("{start}+"),
            (None, Some(end)) => format!("up to {end}"),
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Filters `entries` to the inclusive range `start..=end`; either bound may be open.
///
/// Unlike [`YearRange::new`] this does not validate the bounds; a start after
/// the end simply matches nothing.
pub fn filter_by_year(
    entries: Vec<CitationEntry>,
    start: Option<i32>,
    end: Option<i32>,
) -> Vec<CitationEntry> {
    YearRange { start, end }.filter(entries)
}
