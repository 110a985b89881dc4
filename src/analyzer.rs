use serde_yaml::{Mapping, Value};

use crate::frontmatter::as_list;
use crate::rules::{apply_rules, AnalysisContext, Recommendation};

/// Infer metadata for one document and fold its existing tags into the
/// inferred tag list.
pub fn analyze(ctx: &AnalysisContext) -> Recommendation {
    let mut rec = apply_rules(ctx);
    let existing = existing_tags(ctx.existing_metadata);
    let inferred = rec.enhanced_tags.take().unwrap_or_default();

    let tags = reconcile_tags(&existing, &inferred);
    rec.enhanced_tags = (!tags.is_empty()).then_some(tags);
    rec
}

/// Tags already in the header, as strings. Non-scalar entries are skipped.
pub fn existing_tags(metadata: &Mapping) -> Vec<String> {
    metadata
        .get("tags")
        .map(as_list)
        .unwrap_or_default()
        .iter()
        .filter_map(tag_text)
        .collect()
}

/// Text of a scalar tag entry. Sequences and mappings have none.
pub fn tag_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Existing tags in their original order, then new tags not already present.
/// Matching is exact after trimming; empty tags are dropped.
pub fn reconcile_tags(existing: &[String], inferred: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(existing.len() + inferred.len());
    for tag in existing.iter().chain(inferred) {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parse;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reconcile_keeps_existing_order_first() {
        let tags = reconcile_tags(
            &strings(&["zeta", "alpha"]),
            &strings(&["alpha", "beta", "zeta", "gamma"]),
        );
        assert_eq!(tags, strings(&["zeta", "alpha", "beta", "gamma"]));
    }

    #[test]
    fn test_reconcile_trims_and_drops_empty() {
        let tags = reconcile_tags(&strings(&[" python ", "", "   "]), &strings(&["python", "Python"]));
        assert_eq!(tags, strings(&["python", "Python"]));
    }

    #[test]
    fn test_analyze_merges_existing_and_rule_tags() {
        let doc = parse("---\ntitle: Python\ndescription: x\ntags: [python, style]\n---\nUse black.\n");
        let ctx = AnalysisContext::new(
            "code-formatting/python-formatting.md",
            "code-formatting",
            None,
            &doc.metadata,
            &doc.body,
        );

        let rec = analyze(&ctx);
        assert_eq!(
            rec.enhanced_tags,
            Some(strings(&["python", "style", "formatting", "code-generation"]))
        );
        assert!(rec.file_patterns.unwrap().contains("**/*.py"));
    }

    #[test]
    fn test_analyze_keeps_existing_tags_without_rules() {
        let doc = parse("---\ntags: [notes, 2024]\n---\n");
        let ctx = AnalysisContext::new("misc/plain.md", "misc", None, &doc.metadata, &doc.body);

        let rec = analyze(&ctx);
        assert_eq!(rec.enhanced_tags, Some(strings(&["notes", "2024"])));
        assert_eq!(rec.file_patterns, None);
    }

    #[test]
    fn test_analyze_nothing_to_say() {
        let metadata = Mapping::new();
        let ctx = AnalysisContext::new("misc/plain.md", "misc", None, &metadata, "");
        assert!(analyze(&ctx).is_empty());
    }

    #[test]
    fn test_existing_tags_accepts_scalar() {
        let doc = parse("---\ntags: python\n---\n");
        assert_eq!(existing_tags(&doc.metadata), strings(&["python"]));
    }
}
