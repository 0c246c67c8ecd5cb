//! Header block splitting.

/// The line that opens and closes a header block.
pub const DELIMITER: &str = "---";

/// Header extraction result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// The raw header text (without delimiters). `Some("")` for an empty block.
    pub header: Option<&'a str>,
    /// The content after the closing delimiter line.
    pub body: &'a str,
    /// Line number where the body starts (1-indexed).
    pub body_start_line: usize,
}

impl<'a> FrontmatterSplit<'a> {
    fn without_header(content: &'a str) -> Self {
        Self {
            header: None,
            body: content,
            body_start_line: 1,
        }
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Split a document into header and body.
///
/// A header exists only when the first line is exactly `---` and a later
/// line is exactly `---` as well. Without a closing delimiter the whole
/// document is body.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return FrontmatterSplit::without_header(content);
    };
    if strip_line_ending(first) != DELIMITER {
        return FrontmatterSplit::without_header(content);
    }

    let header_start = first.len();
    let mut offset = header_start;

    for (idx, line) in lines.enumerate() {
        if strip_line_ending(line) == DELIMITER {
            let header = strip_line_ending(&content[header_start..offset]);
            return FrontmatterSplit {
                header: Some(header),
                body: &content[offset + line.len()..],
                body_start_line: idx + 3,
            };
        }
        offset += line.len();
    }

    FrontmatterSplit::without_header(content)
}

/// Extract the raw header text, if any.
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    split_frontmatter(content).header
}

/// Body of a document with any header removed.
pub fn remove_frontmatter(content: &str) -> &str {
    split_frontmatter(content).body
}

/// Assemble a document from header text and body.
pub fn wrap_header(header: &str, body: &str) -> String {
    let header = header.trim_end_matches('\n');
    if header.is_empty() {
        format!("{DELIMITER}\n{DELIMITER}\n{body}")
    } else {
        format!("{DELIMITER}\n{header}\n{DELIMITER}\n{body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_no_frontmatter() {
        let content = "Just some content";
        let split = split_frontmatter(content);
        assert!(split.header.is_none());
        assert_eq!(split.body, "Just some content");
        assert_eq!(split.body_start_line, 1);
    }

    #[test]
    fn test_split_with_frontmatter() {
        let split = split_frontmatter("---\nK: V\n---\nbody");
        assert_eq!(split.header, Some("K: V"));
        assert_eq!(split.body, "body");
        assert_eq!(split.body_start_line, 4);
    }

    #[test]
    fn test_split_multiline_header() {
        let content = "---\ntitle: Test\ntags: [a, b]\n---\n\nContent here";
        let split = split_frontmatter(content);
        assert_eq!(split.header, Some("title: Test\ntags: [a, b]"));
        assert_eq!(split.body, "\nContent here");
        assert_eq!(split.body_start_line, 5);
    }

    #[test]
    fn test_empty_header_is_not_absent() {
        let split = split_frontmatter("---\n---\nbody");
        assert_eq!(split.header, Some(""));
        assert_eq!(split.body, "body");
    }

    #[test]
    fn test_split_frontmatter_at_eof() {
        let split = split_frontmatter("---\ntitle: Test\n---");
        assert_eq!(split.header, Some("title: Test"));
        assert_eq!(split.body, "");
    }

    #[test]
    fn test_no_closing_delimiter() {
        let content = "---\ntitle: Test\n\nContent without closing";
        let split = split_frontmatter(content);
        assert!(split.header.is_none());
        assert_eq!(split.body, content);
    }

    #[test]
    fn test_delimiter_must_be_exact() {
        let content = "--- \ntitle: Test\n---\nbody";
        assert!(split_frontmatter(content).header.is_none());

        let content = "---\ntitle: Test\n----\nbody";
        assert!(split_frontmatter(content).header.is_none());

        let content = "\n---\ntitle: Test\n---\nbody";
        assert!(split_frontmatter(content).header.is_none());
    }

    #[test]
    fn test_crlf_line_endings() {
        let split = split_frontmatter("---\r\nK: V\r\n---\r\nbody");
        assert_eq!(split.header, Some("K: V"));
        assert_eq!(split.body, "body");
    }

    #[test]
    fn test_triple_dash_in_content() {
        let content = "---\ntitle: Test\n---\n\n---\n\nThis has triple dashes in content";
        let split = split_frontmatter(content);
        assert_eq!(split.header, Some("title: Test"));
        assert!(split.body.contains("---"));
    }

    #[test]
    fn test_wrap_header() {
        assert_eq!(wrap_header("K: V\n", "body"), "---\nK: V\n---\nbody");
        assert_eq!(wrap_header("", "body"), "---\n---\nbody");

        let doc = wrap_header("name: Books", "- [ ] read");
        let split = split_frontmatter(&doc);
        assert_eq!(split.header, Some("name: Books"));
        assert_eq!(split.body, "- [ ] read");
    }
}
