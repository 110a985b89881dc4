//! Frontmatter splitting and re-serialization.
//!
//! A document is a `---` line, a YAML mapping, a closing `---` line, and a
//! body. Parsing never fails: text without a well-formed header comes back
//! as body with empty metadata.

use serde_yaml::{Mapping, Value};

pub const DELIMITER: &str = "---";

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub metadata: Mapping,
    pub body: String,
    pub header_valid: bool,
    /// Set only when delimiters were found but the block did not parse.
    pub header_error: Option<String>,
}

impl ParsedDocument {
    fn plain(body: &str) -> Self {
        ParsedDocument {
            metadata: Mapping::new(),
            body: body.to_string(),
            header_valid: false,
            header_error: None,
        }
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

pub fn parse(raw: &str) -> ParsedDocument {
    let lines: Vec<&str> = raw.split('\n').collect();

    if !lines.first().map(|l| is_delimiter(l)).unwrap_or(false) {
        return ParsedDocument::plain(raw);
    }

    let end = match lines.iter().skip(1).position(|l| is_delimiter(l)) {
        Some(offset) => offset + 1,
        None => return ParsedDocument::plain(raw),
    };

    let header = lines[1..end].join("\n");
    let body = lines[end + 1..].join("\n");

    match serde_yaml::from_str::<Value>(&header) {
        Ok(Value::Mapping(metadata)) => ParsedDocument {
            metadata,
            body,
            header_valid: true,
            header_error: None,
        },
        Ok(Value::Null) => ParsedDocument {
            metadata: Mapping::new(),
            body,
            header_valid: true,
            header_error: None,
        },
        Ok(other) => ParsedDocument {
            metadata: Mapping::new(),
            body,
            header_valid: false,
            header_error: Some(format!("expected a mapping, found {}", value_kind(&other))),
        },
        Err(e) => ParsedDocument {
            metadata: Mapping::new(),
            body,
            header_valid: false,
            header_error: Some(e.to_string()),
        },
    }
}

/// Serialize `metadata` in its insertion order, followed by `body`.
pub fn stringify(metadata: &Mapping, body: &str) -> Result<String, serde_yaml::Error> {
    let mut out = String::with_capacity(body.len() + 256);
    out.push_str(DELIMITER);
    out.push('\n');
    if !metadata.is_empty() {
        let yaml = serde_yaml::to_string(metadata)?;
        out.push_str(&yaml);
        if !yaml.ends_with('\n') {
            out.push('\n');
        }
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(body);
    Ok(out)
}

pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Non-empty, trimmed string value of `key`, if any.
pub fn non_empty_str<'a>(metadata: &'a Mapping, key: &str) -> Option<&'a str> {
    metadata
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Treat a scalar as a one-element list so authors may write `tags: python`.
pub fn as_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Sequence(seq) => seq.clone(),
        Value::Null => Vec::new(),
        other => vec![other.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "---\ntitle: Python\ndescription: x\ntags:\n- python\n---\n# Python\n\nUse black.\n";

    #[test]
    fn test_parse_valid_header() {
        let doc = parse(DOC);

        assert!(doc.header_valid);
        assert_eq!(doc.header_error, None);
        assert_eq!(non_empty_str(&doc.metadata, "title"), Some("Python"));
        assert_eq!(doc.body, "# Python\n\nUse black.\n");
    }

    #[test]
    fn test_parse_without_opening_delimiter_keeps_everything_as_body() {
        let raw = "# Title\n\n---\nnot: frontmatter\n---\n";
        let doc = parse(raw);

        assert!(!doc.header_valid);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.header_error, None);
        assert_eq!(doc.body, raw);
    }

    #[test]
    fn test_parse_unclosed_header_falls_back_to_body() {
        let raw = "---\ntitle: x\n# never closed\n";
        let doc = parse(raw);

        assert!(!doc.header_valid);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, raw);
    }

    #[test]
    fn test_parse_malformed_header_recovers_body() {
        let raw = "---\ntitle: [unterminated\ntags: : :\n---\nBody survives.\n";
        let doc = parse(raw);

        assert!(!doc.header_valid);
        assert!(doc.header_error.is_some());
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "Body survives.\n");
    }

    #[test]
    fn test_parse_non_mapping_header_is_malformed() {
        let doc = parse("---\n- a\n- b\n---\nbody");

        assert!(!doc.header_valid);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.header_error.as_deref(), Some("expected a mapping, found sequence"));
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_parse_empty_header_is_valid() {
        let doc = parse("---\n---\nbody\n");

        assert!(doc.header_valid);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "body\n");
    }

    #[test]
    fn test_parse_handles_crlf_delimiters() {
        let doc = parse("---\r\ntitle: x\r\n---\r\nbody\r\n");

        assert!(doc.header_valid);
        assert_eq!(non_empty_str(&doc.metadata, "title"), Some("x"));
        assert_eq!(doc.body, "body\r\n");
    }

    #[test]
    fn test_round_trip_preserves_metadata_and_body() {
        let first = parse(
            "---\ntitle: 'Long: title with # marks'\ndescription: |\n  multi\n  line\ntags: [a, b]\nversion: 2\n---\nbody\n---\nmore body",
        );
        assert!(first.header_valid);

        let raw = stringify(&first.metadata, &first.body).unwrap();
        let second = parse(&raw);

        assert!(second.header_valid);
        assert_eq!(second.metadata, first.metadata);
        assert_eq!(second.body, first.body);
    }

    #[test]
    fn test_stringify_preserves_insertion_order() {
        let mut metadata = Mapping::new();
        metadata.insert("zeta".into(), "last-alphabetically".into());
        metadata.insert("alpha".into(), "first-alphabetically".into());

        let raw = stringify(&metadata, "").unwrap();
        assert_eq!(raw, "---\nzeta: last-alphabetically\nalpha: first-alphabetically\n---\n");
    }

    #[test]
    fn test_stringify_does_not_wrap_long_lines() {
        let long = "word ".repeat(60);
        let mut metadata = Mapping::new();
        metadata.insert("description".into(), long.trim().into());

        let raw = stringify(&metadata, "").unwrap();
        assert_eq!(raw.lines().count(), 3);
    }

    #[test]
    fn test_stringify_empty_mapping() {
        assert_eq!(stringify(&Mapping::new(), "body").unwrap(), "---\n---\nbody");
    }

    #[test]
    fn test_as_list_promotes_scalars() {
        assert_eq!(as_list(&Value::from("python")), vec![Value::from("python")]);
        assert!(as_list(&Value::Null).is_empty());
    }
}
