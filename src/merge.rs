//! Combining inferred metadata with the author's header.
//!
//! Merging is a pure function of its inputs: the existing header is never
//! mutated, and the result is emitted in a canonical key order so repeated
//! runs over unchanged input produce byte-identical documents.

use serde_yaml::{Mapping, Value};

use crate::analyzer::tag_text;
use crate::frontmatter::as_list;
use crate::rules::Recommendation;

/// Key order used when writing a header. Unknown keys follow, in their
/// original relative order.
pub const CANONICAL_ORDER: &[&str] = &[
    "title",
    "description",
    "category",
    "tags",
    "inclusion",
    "applicableTo",
    "requiredDependencies",
    "filePatterns",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Union inferred list values into existing ones instead of replacing them.
    pub preserve_existing: bool,
    /// Replace the tag list with the inferred one.
    pub overwrite_tags: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions {
            preserve_existing: true,
            overwrite_tags: false,
        }
    }
}

pub fn merge(existing: &Mapping, inferred: &Recommendation, options: MergeOptions) -> Mapping {
    let mut merged = existing.clone();

    if let Some(tags) = &inferred.enhanced_tags {
        let value = match existing.get("tags") {
            Some(current) if !options.overwrite_tags => union_tags(current, tags),
            _ => Value::Sequence(string_values(tags.iter().map(String::as_str))),
        };
        merged.insert("tags".into(), value);
    }

    let list_fields = [
        (
            "applicableTo",
            inferred
                .applicable_to
                .as_ref()
                .map(|set| string_values(set.iter().map(|pt| pt.as_str()))),
        ),
        (
            "requiredDependencies",
            inferred
                .required_dependencies
                .as_ref()
                .map(|set| string_values(set.iter().map(String::as_str))),
        ),
        (
            "filePatterns",
            inferred
                .file_patterns
                .as_ref()
                .map(|set| string_values(set.iter().map(String::as_str))),
        ),
    ];

    for (key, values) in list_fields {
        let Some(values) = values else {
            continue;
        };
        let value = match existing.get(key) {
            Some(current) if options.preserve_existing => union_values(current, &values),
            _ => Value::Sequence(values),
        };
        merged.insert(key.into(), value);
    }

    canonical_order(merged)
}

fn string_values<'a>(items: impl Iterator<Item = &'a str>) -> Vec<Value> {
    items.map(|s| Value::String(s.to_string())).collect()
}

/// Existing tags first, then inferred ones. Scalar entries are compared by
/// their trimmed text so `2024` and `"2024"` count as the same tag.
fn union_tags(current: &Value, inferred: &[String]) -> Value {
    let mut out: Vec<Value> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for value in as_list(current) {
        match tag_text(&value) {
            Some(text) => push_tag(&mut out, &mut seen, &text),
            None if !out.contains(&value) => out.push(value),
            None => {}
        }
    }
    for tag in inferred {
        push_tag(&mut out, &mut seen, tag);
    }
    Value::Sequence(out)
}

fn push_tag(out: &mut Vec<Value>, seen: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if text.is_empty() || seen.iter().any(|t| t == text) {
        return;
    }
    seen.push(text.to_string());
    out.push(Value::String(text.to_string()));
}

/// Existing values first, then inferred values not structurally equal to
/// any value already present.
fn union_values(current: &Value, inferred: &[Value]) -> Value {
    let mut out: Vec<Value> = Vec::new();
    for value in as_list(current).into_iter().chain(inferred.iter().cloned()) {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    Value::Sequence(out)
}

/// Reorder keys into [`CANONICAL_ORDER`], keeping unknown keys after them.
pub fn canonical_order(mut metadata: Mapping) -> Mapping {
    let mut ordered = Mapping::with_capacity(metadata.len());
    for key in CANONICAL_ORDER {
        if let Some(value) = metadata.shift_remove(*key) {
            ordered.insert((*key).into(), value);
        }
    }
    for (key, value) in metadata {
        ordered.insert(key, value);
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parse;
    use crate::rules::ProjectType;
    use std::collections::BTreeSet;

    fn header(yaml: &str) -> Mapping {
        let doc = parse(&format!("---\n{}---\n", yaml));
        assert!(doc.header_valid, "fixture header must parse");
        doc.metadata
    }

    fn keys(metadata: &Mapping) -> Vec<String> {
        metadata
            .keys()
            .map(|k| k.as_str().unwrap_or_default().to_string())
            .collect()
    }

    fn seq(metadata: &Mapping, key: &str) -> Vec<String> {
        as_list(metadata.get(key).unwrap())
            .into_iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    fn set(items: &[&str]) -> Option<BTreeSet<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_tags_union_existing_first() {
        let existing = header("title: T\ntags: [python, style]\n");
        let inferred = Recommendation {
            enhanced_tags: Some(vec!["formatting".into(), "python".into()]),
            ..Recommendation::default()
        };

        let merged = merge(&existing, &inferred, MergeOptions::default());
        assert_eq!(seq(&merged, "tags"), vec!["python", "style", "formatting"]);
    }

    #[test]
    fn test_tag_union_normalizes_scalar_entries() {
        let existing = header("tags: [2024, ' old ', old, true, '']\n");
        let inferred = Recommendation {
            enhanced_tags: Some(vec!["2024".into(), "old".into(), "true".into(), "security".into()]),
            ..Recommendation::default()
        };

        let merged = merge(&existing, &inferred, MergeOptions::default());
        assert_eq!(seq(&merged, "tags"), vec!["2024", "old", "true", "security"]);
    }

    #[test]
    fn test_tag_union_keeps_nested_entries() {
        let existing = header("tags:\n- python\n- [nested]\n");
        let inferred = Recommendation {
            enhanced_tags: Some(vec!["python".into(), "formatting".into()]),
            ..Recommendation::default()
        };

        let merged = merge(&existing, &inferred, MergeOptions::default());
        let tags = as_list(merged.get("tags").unwrap());
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0], Value::from("python"));
        assert!(tags[1].is_sequence());
        assert_eq!(tags[2], Value::from("formatting"));
    }

    #[test]
    fn test_overwrite_tags_replaces() {
        let existing = header("tags: [legacy, python]\n");
        let inferred = Recommendation {
            enhanced_tags: Some(vec!["python".into(), "formatting".into()]),
            ..Recommendation::default()
        };

        let options = MergeOptions {
            overwrite_tags: true,
            ..MergeOptions::default()
        };
        let merged = merge(&existing, &inferred, options);
        assert_eq!(seq(&merged, "tags"), vec!["python", "formatting"]);
    }

    #[test]
    fn test_absent_inferred_fields_leave_header_untouched() {
        let existing = header("title: T\nrequiredDependencies: [custom]\nfilePatterns: '**/*.rs'\n");
        let merged = merge(&existing, &Recommendation::default(), MergeOptions::default());

        assert_eq!(merged, existing);
        assert_eq!(merged.get("filePatterns"), Some(&Value::from("**/*.rs")));
    }

    #[test]
    fn test_list_fields_union_when_preserving() {
        let existing = header("requiredDependencies: [express, cors]\napplicableTo: [api-server]\n");
        let inferred = Recommendation {
            required_dependencies: set(&["express", "helmet"]),
            applicable_to: Some([ProjectType::ApiServer, ProjectType::WebApp].into_iter().collect()),
            ..Recommendation::default()
        };

        let merged = merge(&existing, &inferred, MergeOptions::default());
        assert_eq!(seq(&merged, "requiredDependencies"), vec!["express", "cors", "helmet"]);
        assert_eq!(seq(&merged, "applicableTo"), vec!["api-server", "web-app"]);
    }

    #[test]
    fn test_list_fields_replaced_without_preserve() {
        let existing = header("filePatterns: ['**/*.js']\n");
        let inferred = Recommendation {
            file_patterns: set(&["**/*.ts"]),
            ..Recommendation::default()
        };

        let options = MergeOptions {
            preserve_existing: false,
            ..MergeOptions::default()
        };
        let merged = merge(&existing, &inferred, options);
        assert_eq!(seq(&merged, "filePatterns"), vec!["**/*.ts"]);
    }

    #[test]
    fn test_union_dedups_structurally() {
        let existing = header("filePatterns:\n- '**/*.py'\n- '**/*.py'\n");
        let inferred = Recommendation {
            file_patterns: set(&["**/*.py"]),
            ..Recommendation::default()
        };

        let merged = merge(&existing, &inferred, MergeOptions::default());
        assert_eq!(seq(&merged, "filePatterns"), vec!["**/*.py"]);
    }

    #[test]
    fn test_required_fields_pass_through_and_order_is_canonical() {
        let existing = header(
            "author: someone\nfilePatterns: ['**/*.py']\ntags: [a, b]\ninclusion: always\ndescription: D\ncategory: testing\ntitle: T\nversion: 1\n",
        );
        let inferred = Recommendation {
            required_dependencies: set(&["pytest"]),
            ..Recommendation::default()
        };

        let merged = merge(&existing, &inferred, MergeOptions::default());
        assert_eq!(
            keys(&merged),
            vec![
                "title",
                "description",
                "category",
                "tags",
                "inclusion",
                "requiredDependencies",
                "filePatterns",
                "author",
                "version"
            ]
        );
        assert_eq!(merged.get("title"), existing.get("title"));
        assert_eq!(merged.get("description"), existing.get("description"));
        assert_eq!(merged.get("inclusion"), existing.get("inclusion"));
        assert_eq!(merged.get("category"), existing.get("category"));
    }

    #[test]
    fn test_merge_is_a_fixed_point() {
        let existing = header("title: T\ndescription: D\ntags: [python]\n");
        let inferred = Recommendation {
            enhanced_tags: Some(vec!["python".into(), "formatting".into()]),
            file_patterns: set(&["**/*.py"]),
            applicable_to: Some([ProjectType::Library].into_iter().collect()),
            ..Recommendation::default()
        };

        let once = merge(&existing, &inferred, MergeOptions::default());
        let twice = merge(&once, &inferred, MergeOptions::default());
        assert_eq!(keys(&once), keys(&twice));
        assert_eq!(once, twice);
    }
}
