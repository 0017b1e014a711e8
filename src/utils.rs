/// Extracts a DBLP person id from a person page URL.
///
/// Person ids contain slashes (`12/3456`, `h/JohnDoe`), so everything after
/// `/pid/` is taken. URLs without a `/pid/` segment fall back to the last path
/// segment.
///
/// # Arguments
///
/// * `url` - A person page URL such as `https://dblp.org/pid/12/3456`
pub fn pid_from_url(url: &str) -> Option<String> {
    let url = url.trim();
    let pid = match url.find("/pid/") {
        Some(pos) => &url[pos + "/pid/".len()..],
        None => url.trim_end_matches('/').rsplit('/').next().unwrap_or_default(),
    };
    let pid = pid
        .trim_end_matches('/')
        .trim_end_matches(".html")
        .trim_end_matches(".bib");

    if pid.is_empty() || pid.contains("://") {
        None
    } else {
        Some(pid.to_string())
    }
}

/// Prefixes every line of `text` with a BibTeX comment marker.
pub fn comment_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                "%".to_string()
            } else {
                format!("% {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pid_from_url() {
        let test_cases = vec![
            ("https://dblp.org/pid/12/3456", Some("12/3456".to_string())),
            ("https://dblp.org/pid/h/JohnDoe", Some("h/JohnDoe".to_string())),
            ("https://dblp.org/pid/12/3456/", Some("12/3456".to_string())),
            ("https://dblp.org/pid/12/3456.html", Some("12/3456".to_string())),
            (" https://dblp.org/pid/77/1-1 ", Some("77/1-1".to_string())),
            ("https://example.org/people/jdoe", Some("jdoe".to_string())),
            ("https://dblp.org/pid/", None),
            ("", None),
        ];

        for (input, expected) in test_cases {
            assert_eq!(pid_from_url(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_comment_lines() {
        assert_eq!(comment_lines("one\n\ntwo"), "% one\n%\n% two");
        assert_eq!(comment_lines(""), "");
    }
}
