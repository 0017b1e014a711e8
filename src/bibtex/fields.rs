//! Extraction of the few fields the merge step needs from a raw record.

use crate::regex::Regex;
use compact_str::CompactString;
use std::sync::LazyLock;

/// `@<type>{<key>,` on a record's first line.
static DECLARATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*@\s*([A-Za-z][A-Za-z0-9_-]*)\s*\{([^,]*),").unwrap());

/// First `year = 2023`, `year = {2023}` or `year = "2023"` assignment.
static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\byear\s*=\s*[{"]?\s*([0-9]+)"#).unwrap());

/// Record types that carry no citation.
const NON_CITATION_TYPES: [&str; 3] = ["comment", "preamble", "string"];

/// The record type and key from a declaration line.
///
/// Returns `None` when the line does not have the `@<type>{<key>,` shape, the
/// key is blank, or the record is a `@comment`, `@preamble` or `@string`.
pub(crate) fn parse_declaration(first_line: &str) -> Option<(CompactString, CompactString)> {
    let captures = DECLARATION_REGEX.captures(first_line)?;
    let entry_type = captures.get(1)?.as_str();
    let key = captures.get(2)?.as_str().trim();

    if key.is_empty()
        || NON_CITATION_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(entry_type))
    {
        return None;
    }

    Some((
        CompactString::from(entry_type.to_ascii_lowercase()),
        CompactString::from(key),
    ))
}

/// The first numeric year assignment anywhere in a record.
pub(crate) fn parse_year(record: &str) -> Option<i32> {
    YEAR_REGEX
        .captures(record)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse::<i32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("@article{DBLP:journals/cacm/Knuth74,", "article", "DBLP:journals/cacm/Knuth74")]
    #[case("@InProceedings{ key1 ,", "inproceedings", "key1")]
    #[case("  @misc{k, title = {x}}", "misc", "k")]
    #[case("@phdthesis {DBLP:phd/Doe20,", "phdthesis", "DBLP:phd/Doe20")]
    fn test_parse_declaration_valid(
        #[case] line: &str,
        #[case] expected_type: &str,
        #[case] expected_key: &str,
    ) {
        let (entry_type, key) = parse_declaration(line).unwrap();
        assert_eq!(entry_type, expected_type);
        assert_eq!(key, expected_key);
    }

    #[rstest]
    #[case("")]
    #[case("% not a record")]
    #[case("@article{no-comma-here")]
    #[case("@article{ ,")]
    #[case("@comment{generated by hand,")]
    #[case("@String{ieee = \"IEEE\",")]
    #[case("author = {Doe, Jane},")]
    fn test_parse_declaration_invalid(#[case] line: &str) {
        assert_eq!(parse_declaration(line), None);
    }

    #[rstest]
    #[case("@a{k,\n  year = {2023}\n}", Some(2023))]
    #[case("@a{k,\n  year = 2019,\n}", Some(2019))]
    #[case("@a{k,\n  YEAR=\"1999\"\n}", Some(1999))]
    #[case("@a{k,\n  year = { 2001 },\n}", Some(2001))]
    #[case("@a{k,\n  title = {No Year}\n}", None)]
    #[case("@a{k,\n  year = {in press}\n}", None)]
    #[case("@a{k,\n  year = {99999999999}\n}", None)]
    #[case("@a{k,\n  year = {2020},\n  year = {2021}\n}", Some(2020))]
    #[case("@a{k,\n  pubyear = {2020}\n}", None)]
    fn test_parse_year(#[case] record: &str, #[case] expected: Option<i32>) {
        assert_eq!(parse_year(record), expected);
    }
}
