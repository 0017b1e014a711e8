//! Authors file loading.
//!
//! One researcher per line, either `Display Name` or `Display Name, PID`.
//! Blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! # Our group
//! Jane Doe, 12/3456
//! John Smith
//! ```

use crate::ResearcherSpec;
use crate::error::{HarvestError, Result};
use std::path::Path;
use tracing::info;

/// Parses authors file contents.
///
/// The line is split at its first comma; text after it is the PID. An empty
/// PID is treated as absent and a line with an empty name is skipped.
///
/// # Examples
///
/// ```
/// use dblp_bib::authors::parse_authors;
///
/// let authors = parse_authors("# comment\nJane Doe, 12/3456\n\nJohn Smith\n");
/// assert_eq!(authors.len(), 2);
/// assert_eq!(authors[0].identifier.as_deref(), Some("12/3456"));
/// assert_eq!(authors[1].identifier, None);
/// ```
pub fn parse_authors(text: &str) -> Vec<ResearcherSpec> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (name, identifier) = match line.split_once(',') {
                Some((name, identifier)) => (name.trim(), identifier.trim()),
                None => (line, ""),
            };
            if name.is_empty() {
                return None;
            }
            Some(ResearcherSpec {
                display_name: name.to_string(),
                identifier: (!identifier.is_empty()).then(|| identifier.to_string()),
            })
        })
        .collect()
}

/// Reads and parses an authors file.
pub fn load_authors(path: impl AsRef<Path>) -> Result<Vec<ResearcherSpec>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| HarvestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let authors = parse_authors(&text);
    info!("Loaded {} authors from {}", authors.len(), path.display());
    Ok(authors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_parse_authors() {
        let input = "\
# Research group
Jane Doe, 12/3456

   # indented comment
John Smith
  Ada Lovelace ,  h/Lovelace
Grace Hopper,
, 99/999
";
        let authors = parse_authors(input);
        assert_eq!(
            authors,
            vec![
                ResearcherSpec::new("Jane Doe").with_identifier("12/3456"),
                ResearcherSpec::new("John Smith"),
                ResearcherSpec::new("Ada Lovelace").with_identifier("h/Lovelace"),
                ResearcherSpec::new("Grace Hopper"),
            ]
        );
    }

    #[test]
    fn test_parse_authors_empty() {
        assert!(parse_authors("").is_empty());
        assert!(parse_authors("# only comments\n\n").is_empty());
    }

    #[test]
    fn test_load_authors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Jane Doe, 12/3456").unwrap();
        writeln!(file, "John Smith").unwrap();

        let authors = load_authors(file.path()).unwrap();
        assert_eq!(authors.len(), 2);
    }

    #[test]
    fn test_load_authors_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_authors(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, HarvestError::Io { .. }));
    }
}
