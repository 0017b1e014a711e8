/// An [Iterator] which splits BibTeX text into record-sized chunks.
///
/// A chunk starts at a line whose first non-blank character is `@` and runs
/// up to (not including) the next such line. Text ahead of the first record is
/// returned as its own chunk. `@` characters in the middle of a line, as found
/// in e-mail addresses and URLs, never start a chunk.
///
/// [Iterator::next] returns each chunk along with its starting line number.
pub(crate) struct RecordSplit<'a> {
    line_number: usize,
    text: &'a str,
}

impl<'a> RecordSplit<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            line_number: 1,
            text,
        }
    }
}

/// Whether a line opens a new record.
pub(crate) fn is_record_start(line: &str) -> bool {
    line.trim_start_matches([' ', '\t']).starts_with('@')
}

impl<'a> Iterator for RecordSplit<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.text.is_empty() {
            return None;
        }

        let mut i = 0;
        let mut lines = 0;
        for line in self.text.split_inclusive('\n') {
            if lines > 0 && is_record_start(line) {
                break;
            }
            lines += 1;
            i += line.len();
        }

        let (part, rest) = self.text.split_at(i);
        let line_number = self.line_number;
        self.text = rest;
        self.line_number += lines;
        Some((line_number, part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("", &[])]
    #[case("\n", &[(1, "\n")])]
    #[case("@a{k,\n}", &[(1, "@a{k,\n}")])]
    #[case("@a{k,\n}\n@b{j,\n}\n", &[(1, "@a{k,\n}\n"), (3, "@b{j,\n}\n")])]
    #[case("@a{k,\n}\n\n\n@b{j,\n}\n", &[(1, "@a{k,\n}\n\n\n"), (5, "@b{j,\n}\n")])]
    #[case("% header\n\n@a{k,\n}\n", &[(1, "% header\n\n"), (3, "@a{k,\n}\n")])]
    #[case("  @a{k,\n}\n\t@b{j,\n}", &[(1, "  @a{k,\n}\n"), (3, "\t@b{j,\n}")])]
    #[case("@a{k,\n  note = {mail me@example.org}\n}\n", &[(1, "@a{k,\n  note = {mail me@example.org}\n}\n")])]
    fn test_record_split(#[case] text: &str, #[case] expected: &[(usize, &str)]) {
        let actual = RecordSplit::new(text).collect_vec();
        assert_eq!(&actual, expected)
    }

    #[rstest]
    #[case("@article{x,", true)]
    #[case("   @misc{y,", true)]
    #[case("\t@book{z,", true)]
    #[case("  author = {a@b.c},", false)]
    #[case("", false)]
    fn test_is_record_start(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_record_start(line), expected);
    }
}
