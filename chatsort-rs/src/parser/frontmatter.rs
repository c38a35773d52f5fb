//! YAML header block handling.
//!
//! A header block starts on the very first line with `---` and ends at the
//! next `---` line. Delimiter lines may carry trailing whitespace. Anything
//! else is body text.

use crate::error::{ArchiveError, Result};
use serde_yaml::{Mapping, Value};
use std::io::BufRead;
use std::path::Path;

const DELIMITER: &str = "---";

/// Trailing whitespace (including line endings) is allowed after `---`.
fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// A document split into its header and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML (without delimiters), if a closed header block exists.
    pub yaml: Option<&'a str>,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}

/// Split raw document text into header and body.
///
/// An unterminated header is not a header: the whole text is returned as body.
pub fn split_frontmatter(text: &str) -> FrontmatterSplit<'_> {
    let no_header = FrontmatterSplit {
        yaml: None,
        body: text,
    };

    let mut lines = text.split_inclusive('\n');
    let yaml_start = match lines.next() {
        Some(first) if first.ends_with('\n') && is_delimiter(first) => first.len(),
        _ => return no_header,
    };

    let mut offset = yaml_start;
    for line in lines {
        if is_delimiter(line) {
            let yaml = text[yaml_start..offset].trim_end_matches(['\r', '\n']);
            return FrontmatterSplit {
                yaml: Some(yaml),
                body: &text[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    no_header
}

/// Body text with any leading header block removed.
pub fn strip_frontmatter(text: &str) -> &str {
    split_frontmatter(text).body
}

/// Parse the header block of `text` into a YAML mapping.
///
/// Returns `Ok(None)` when there is no header. An empty header yields an
/// empty mapping.
pub fn parse_frontmatter(text: &str, path: &Path) -> Result<Option<Mapping>> {
    match split_frontmatter(text).yaml {
        Some(yaml) => parse_yaml_mapping(yaml, path).map(Some),
        None => Ok(None),
    }
}

fn parse_yaml_mapping(yaml: &str, path: &Path) -> Result<Mapping> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| ArchiveError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(ArchiveError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: "frontmatter is not a mapping".to_string(),
        }),
    }
}

/// Read only the header block from a reader, stopping at the closing delimiter.
///
/// Used for listing, where the body must not be read.
pub fn read_frontmatter<R: BufRead>(reader: R, path: &Path) -> Result<Option<Mapping>> {
    let mut lines = reader.lines();

    let first = match lines.next() {
        Some(line) => line?,
        None => return Ok(None),
    };
    if !is_delimiter(&first) {
        return Ok(None);
    }

    let mut yaml = String::new();
    for line in lines {
        let line = line?;
        if is_delimiter(&line) {
            return parse_yaml_mapping(&yaml, path).map(Some);
        }
        yaml.push_str(&line);
        yaml.push('\n');
    }

    // Unterminated: not a header.
    Ok(None)
}

/// Serialize a mapping as a delimited header block.
pub fn serialize_frontmatter(map: &Mapping) -> Result<String> {
    let yaml = serde_yaml::to_string(map)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
}

/// Replace (or insert) the header block, keeping the body byte-for-byte.
pub fn replace_frontmatter(text: &str, map: &Mapping) -> Result<String> {
    let split = split_frontmatter(text);
    let header = serialize_frontmatter(map)?;
    Ok(format!("{}{}", header, split.body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_split_no_frontmatter() {
        let split = split_frontmatter("Just some content");
        assert!(split.yaml.is_none());
        assert_eq!(split.body, "Just some content");
    }

    #[test]
    fn test_split_with_frontmatter() {
        let text = "---\ntitle: Test\ntags: [a, b]\n---\n\nContent here";
        let split = split_frontmatter(text);
        assert_eq!(split.yaml, Some("title: Test\ntags: [a, b]"));
        assert_eq!(split.body, "\nContent here");
    }

    #[test]
    fn test_split_crlf() {
        let text = "---\r\ntitle: Test\r\n---\r\nBody";
        let split = split_frontmatter(text);
        assert_eq!(split.yaml, Some("title: Test"));
        assert_eq!(split.body, "Body");
    }

    #[test]
    fn test_split_header_at_eof() {
        let split = split_frontmatter("---\ntitle: Test\n---");
        assert_eq!(split.yaml, Some("title: Test"));
        assert_eq!(split.body, "");
    }

    #[test]
    fn test_delimiters_with_trailing_whitespace() {
        let text = "--- \ntitle: Test\n---\t\r\nBody";
        let split = split_frontmatter(text);
        assert_eq!(split.yaml, Some("title: Test"));
        assert_eq!(split.body, "Body");

        let streamed = read_frontmatter(Cursor::new(text), Path::new("a.md"))
            .unwrap()
            .unwrap();
        let parsed = parse_frontmatter(text, Path::new("a.md")).unwrap().unwrap();
        assert_eq!(streamed, parsed);
    }

    #[test]
    fn test_unterminated_header_is_body() {
        let text = "---\ntitle: Test\n\nno closing line";
        let split = split_frontmatter(text);
        assert!(split.yaml.is_none());
        assert_eq!(split.body, text);
    }

    #[test]
    fn test_rule_in_body_is_kept() {
        let text = "---\ntitle: Test\n---\n\n---\n\nAfter a horizontal rule";
        assert_eq!(strip_frontmatter(text), "\n---\n\nAfter a horizontal rule");
    }

    #[test]
    fn test_parse_frontmatter() {
        let text = "---\ntitle: My Chat\ntags:\n  - misc/rust\n  - misc/cli\n---\nBody";
        let map = parse_frontmatter(text, Path::new("a.md")).unwrap().unwrap();
        assert_eq!(map.get("title").and_then(Value::as_str), Some("My Chat"));
        assert_eq!(
            map.get("tags").and_then(Value::as_sequence).map(|s| s.len()),
            Some(2)
        );
    }

    #[test]
    fn test_invalid_frontmatter() {
        let text = "---\ninvalid: yaml: syntax:\n---\nContent";
        let result = parse_frontmatter(text, Path::new("bad.md"));
        assert!(matches!(
            result,
            Err(ArchiveError::InvalidFrontmatter { ref path, .. }) if path == Path::new("bad.md")
        ));
    }

    #[test]
    fn test_read_frontmatter_stops_at_header() {
        let text = "---\ntitle: Streamed\n---\nbody that is never parsed: [\n";
        let map = read_frontmatter(Cursor::new(text), Path::new("a.md"))
            .unwrap()
            .unwrap();
        assert_eq!(map.get("title").and_then(Value::as_str), Some("Streamed"));

        let none = read_frontmatter(Cursor::new("no header"), Path::new("b.md")).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_replace_frontmatter_keeps_body() {
        let text = "---\ntitle: Old\n---\n\nBody stays";
        let mut map = parse_frontmatter(text, Path::new("a.md")).unwrap().unwrap();
        map.insert(
            Value::String("tags".to_string()),
            Value::Sequence(vec![Value::String("misc/rust".to_string())]),
        );

        let updated = replace_frontmatter(text, &map).unwrap();
        assert!(updated.starts_with("---\ntitle: Old\ntags:\n- misc/rust\n---\n"));
        assert!(updated.ends_with("\nBody stays"));
    }

    #[test]
    fn test_replace_inserts_missing_header() {
        let map = Mapping::new();
        let updated = replace_frontmatter("Plain body", &map).unwrap();
        assert!(updated.starts_with("---\n"));
        assert!(updated.ends_with("---\nPlain body"));
    }
}
