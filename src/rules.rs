//! Declarative metadata inference.
//!
//! Every rule pairs a [`Matcher`] with a fragment of metadata. All rules are
//! evaluated for every document and the fragments of the matching ones are
//! unioned, so the result does not depend on evaluation order.

use serde::Serialize;
use serde_yaml::Mapping;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    WebApp,
    Library,
    CliTool,
    ApiServer,
    VscodeExtension,
}

impl ProjectType {
    pub const ALL: [ProjectType; 5] = [
        ProjectType::WebApp,
        ProjectType::Library,
        ProjectType::CliTool,
        ProjectType::ApiServer,
        ProjectType::VscodeExtension,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::WebApp => "web-app",
            ProjectType::Library => "library",
            ProjectType::CliTool => "cli-tool",
            ProjectType::ApiServer => "api-server",
            ProjectType::VscodeExtension => "vscode-extension",
        }
    }

    pub fn from_name(name: &str) -> Option<ProjectType> {
        ProjectType::ALL.into_iter().find(|pt| pt.as_str() == name)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inferred metadata. `None` means no rule had an opinion on the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recommendation {
    pub required_dependencies: Option<BTreeSet<String>>,
    pub applicable_to: Option<BTreeSet<ProjectType>>,
    pub file_patterns: Option<BTreeSet<String>>,
    /// Ordered and duplicate-free.
    pub enhanced_tags: Option<Vec<String>>,
}

impl Recommendation {
    pub fn is_empty(&self) -> bool {
        self.required_dependencies.is_none()
            && self.applicable_to.is_none()
            && self.file_patterns.is_none()
            && self.enhanced_tags.is_none()
    }

    /// Field-wise union. Sets are unioned; tags keep first-seen order.
    pub fn union(&mut self, other: Recommendation) {
        union_set(&mut self.required_dependencies, other.required_dependencies);
        union_set(&mut self.applicable_to, other.applicable_to);
        union_set(&mut self.file_patterns, other.file_patterns);
        if let Some(tags) = other.enhanced_tags {
            let slot = self.enhanced_tags.get_or_insert_with(Vec::new);
            for tag in tags {
                if !slot.contains(&tag) {
                    slot.push(tag);
                }
            }
        }
    }
}

fn union_set<T: Ord>(slot: &mut Option<BTreeSet<T>>, other: Option<BTreeSet<T>>) {
    if let Some(values) = other {
        slot.get_or_insert_with(BTreeSet::new).extend(values);
    }
}

/// Read-only view of one document, built once per document.
#[derive(Debug)]
pub struct AnalysisContext<'a> {
    pub document_path: &'a str,
    pub category: &'a str,
    pub subcategory: Option<&'a str>,
    pub existing_metadata: &'a Mapping,
    pub body: &'a str,
    path_lower: String,
    body_lower: String,
    subcategory_lower: Option<String>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        document_path: &'a str,
        category: &'a str,
        subcategory: Option<&'a str>,
        existing_metadata: &'a Mapping,
        body: &'a str,
    ) -> Self {
        AnalysisContext {
            document_path,
            category,
            subcategory,
            existing_metadata,
            body,
            path_lower: document_path.to_lowercase(),
            body_lower: body.to_lowercase(),
            subcategory_lower: subcategory.map(str::to_lowercase),
        }
    }

    pub fn path_mentions(&self, keyword: &str) -> bool {
        self.path_lower.contains(keyword)
    }

    /// Body matches are word-bounded so "expressions" does not mean Express.
    pub fn body_mentions(&self, keyword: &str) -> bool {
        if self.body.is_empty() {
            return false;
        }
        mentions_word(&self.body_lower, keyword)
    }

    pub fn subcategory_mentions(&self, keyword: &str) -> bool {
        self.subcategory_lower
            .as_deref()
            .map(|s| s.contains(keyword))
            .unwrap_or(false)
    }
}

/// `keyword` occurs in `haystack` with no alphanumeric character on either side.
pub fn mentions_word(haystack: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    let bytes = haystack.as_bytes();
    haystack.match_indices(keyword).any(|(start, _)| {
        let end = start + keyword.len();
        let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        before_ok && after_ok
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFamily {
    Language,
    Framework,
    Practice,
}

#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    Path(&'static [&'static str]),
    PathOrBody(&'static [&'static str]),
    PathOrSubcategory(&'static [&'static str]),
}

impl Matcher {
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Matcher::Path(kws) | Matcher::PathOrBody(kws) | Matcher::PathOrSubcategory(kws) => kws,
        }
    }

    pub fn matches(&self, ctx: &AnalysisContext) -> bool {
        match self {
            Matcher::Path(kws) => kws.iter().any(|kw| ctx.path_mentions(kw)),
            Matcher::PathOrBody(kws) => kws
                .iter()
                .any(|kw| ctx.path_mentions(kw) || ctx.body_mentions(kw)),
            Matcher::PathOrSubcategory(kws) => kws
                .iter()
                .any(|kw| ctx.path_mentions(kw) || ctx.subcategory_mentions(kw)),
        }
    }
}

/// Static metadata asserted by a rule. Empty slices assert nothing.
#[derive(Debug, Clone, Copy)]
pub struct FragmentSpec {
    pub dependencies: &'static [&'static str],
    pub applicable_to: &'static [ProjectType],
    pub file_patterns: &'static [&'static str],
    pub tags: &'static [&'static str],
}

impl FragmentSpec {
    const fn tags(tags: &'static [&'static str]) -> Self {
        FragmentSpec {
            dependencies: &[],
            applicable_to: &[],
            file_patterns: &[],
            tags,
        }
    }

    const fn deps(self, dependencies: &'static [&'static str]) -> Self {
        FragmentSpec {
            dependencies,
            applicable_to: self.applicable_to,
            file_patterns: self.file_patterns,
            tags: self.tags,
        }
    }

    const fn applies_to(self, applicable_to: &'static [ProjectType]) -> Self {
        FragmentSpec {
            dependencies: self.dependencies,
            applicable_to,
            file_patterns: self.file_patterns,
            tags: self.tags,
        }
    }

    const fn patterns(self, file_patterns: &'static [&'static str]) -> Self {
        FragmentSpec {
            dependencies: self.dependencies,
            applicable_to: self.applicable_to,
            file_patterns,
            tags: self.tags,
        }
    }

    pub fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            required_dependencies: string_set(self.dependencies),
            applicable_to: (!self.applicable_to.is_empty())
                .then(|| self.applicable_to.iter().copied().collect()),
            file_patterns: string_set(self.file_patterns),
            enhanced_tags: (!self.tags.is_empty())
                .then(|| self.tags.iter().map(|t| t.to_string()).collect()),
        }
    }
}

fn string_set(items: &[&str]) -> Option<BTreeSet<String>> {
    (!items.is_empty()).then(|| items.iter().map(|s| s.to_string()).collect())
}

#[derive(Clone, Copy)]
pub enum Fragment {
    Static(FragmentSpec),
    Derived(fn(&AnalysisContext) -> Recommendation),
}

impl Fragment {
    pub fn produce(&self, ctx: &AnalysisContext) -> Recommendation {
        match self {
            Fragment::Static(spec) => spec.to_recommendation(),
            Fragment::Derived(derive) => derive(ctx),
        }
    }
}

pub struct MetadataRule {
    pub name: &'static str,
    pub family: RuleFamily,
    pub matcher: Matcher,
    pub fragment: Fragment,
}

use self::ProjectType::{ApiServer, CliTool, Library, VscodeExtension, WebApp};

pub static RULES: &[MetadataRule] = &[
    // Languages: matched on the document path only.
    MetadataRule {
        name: "python",
        family: RuleFamily::Language,
        matcher: Matcher::Path(&["python"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["python"])
                .applies_to(&[Library, CliTool, ApiServer])
                .patterns(&["**/*.py"]),
        ),
    },
    MetadataRule {
        name: "typescript",
        family: RuleFamily::Language,
        matcher: Matcher::Path(&["typescript"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["typescript"])
                .deps(&["typescript"])
                .applies_to(&[WebApp, Library, ApiServer, VscodeExtension])
                .patterns(&["**/*.ts", "**/*.tsx"]),
        ),
    },
    MetadataRule {
        name: "javascript",
        family: RuleFamily::Language,
        matcher: Matcher::Path(&["javascript"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["javascript"])
                .applies_to(&[WebApp, Library, ApiServer])
                .patterns(&["**/*.js", "**/*.jsx", "**/*.mjs", "**/*.cjs"]),
        ),
    },
    MetadataRule {
        name: "bash",
        family: RuleFamily::Language,
        matcher: Matcher::Path(&["bash", "shell"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["bash", "shell"])
                .applies_to(&[CliTool])
                .patterns(&["**/*.sh", "**/*.bash"]),
        ),
    },
    MetadataRule {
        name: "css",
        family: RuleFamily::Language,
        matcher: Matcher::Path(&["css"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["css", "styling"])
                .applies_to(&[WebApp])
                .patterns(&["**/*.css", "**/*.scss", "**/*.sass", "**/*.less"]),
        ),
    },
    MetadataRule {
        name: "json",
        family: RuleFamily::Language,
        matcher: Matcher::Path(&["json"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["json", "configuration"]).patterns(&["**/*.json"]),
        ),
    },
    MetadataRule {
        name: "yaml",
        family: RuleFamily::Language,
        matcher: Matcher::Path(&["yaml", "yml"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["yaml", "configuration"]).patterns(&["**/*.yaml", "**/*.yml"]),
        ),
    },
    MetadataRule {
        name: "sql",
        family: RuleFamily::Language,
        matcher: Matcher::Path(&["sql"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["sql", "database"])
                .applies_to(&[ApiServer, WebApp])
                .patterns(&["**/*.sql"]),
        ),
    },
    MetadataRule {
        name: "markdown",
        family: RuleFamily::Language,
        matcher: Matcher::Path(&["markdown"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["markdown", "documentation"]).patterns(&["**/*.md", "**/*.mdx"]),
        ),
    },
    // Frameworks: matched on the path or anywhere in the body.
    MetadataRule {
        name: "react",
        family: RuleFamily::Framework,
        matcher: Matcher::PathOrBody(&["react"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["react", "frontend"])
                .deps(&["react", "react-dom"])
                .applies_to(&[WebApp])
                .patterns(&["**/*.jsx", "**/*.tsx"]),
        ),
    },
    MetadataRule {
        name: "nextjs",
        family: RuleFamily::Framework,
        matcher: Matcher::PathOrBody(&["nextjs", "next.js"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["nextjs", "react", "frontend"])
                .deps(&["next", "react", "react-dom"])
                .applies_to(&[WebApp])
                .patterns(&["app/**/*.tsx", "pages/**/*.tsx"]),
        ),
    },
    MetadataRule {
        name: "vue",
        family: RuleFamily::Framework,
        matcher: Matcher::PathOrBody(&["vue"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["vue", "frontend"])
                .deps(&["vue"])
                .applies_to(&[WebApp])
                .patterns(&["**/*.vue"]),
        ),
    },
    MetadataRule {
        name: "angular",
        family: RuleFamily::Framework,
        matcher: Matcher::PathOrBody(&["angular"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["angular", "frontend"])
                .deps(&["@angular/core", "@angular/common"])
                .applies_to(&[WebApp])
                .patterns(&["**/*.component.ts", "**/*.module.ts"]),
        ),
    },
    MetadataRule {
        name: "express",
        family: RuleFamily::Framework,
        matcher: Matcher::PathOrBody(&["express"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["express", "nodejs", "backend"])
                .deps(&["express"])
                .applies_to(&[ApiServer])
                .patterns(&[
                    "**/routes/**/*.js",
                    "**/routes/**/*.ts",
                    "**/middleware/**/*.js",
                    "**/middleware/**/*.ts",
                ]),
        ),
    },
    MetadataRule {
        name: "django",
        family: RuleFamily::Framework,
        matcher: Matcher::PathOrBody(&["django"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["django", "python", "backend"])
                .deps(&["django"])
                .applies_to(&[WebApp, ApiServer])
                .patterns(&["**/models.py", "**/views.py", "**/urls.py"]),
        ),
    },
    MetadataRule {
        name: "fastapi",
        family: RuleFamily::Framework,
        matcher: Matcher::PathOrBody(&["fastapi"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["fastapi", "python", "api"])
                .deps(&["fastapi", "pydantic"])
                .applies_to(&[ApiServer])
                .patterns(&["**/*.py"]),
        ),
    },
    MetadataRule {
        name: "flask",
        family: RuleFamily::Framework,
        matcher: Matcher::PathOrBody(&["flask"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["flask", "python", "backend"])
                .deps(&["flask"])
                .applies_to(&[WebApp, ApiServer])
                .patterns(&["**/*.py"]),
        ),
    },
    MetadataRule {
        name: "vscode",
        family: RuleFamily::Framework,
        matcher: Matcher::PathOrBody(&["vscode-extension", "vscode"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["vscode", "extension"])
                .deps(&["@types/vscode"])
                .applies_to(&[VscodeExtension])
                .patterns(&["src/extension.ts", "package.json"]),
        ),
    },
    // Practices: matched on the path or the scanner's subcategory.
    MetadataRule {
        name: "testing",
        family: RuleFamily::Practice,
        matcher: Matcher::PathOrSubcategory(&["testing", "test"]),
        fragment: Fragment::Derived(testing_fragment),
    },
    MetadataRule {
        name: "security",
        family: RuleFamily::Practice,
        matcher: Matcher::PathOrSubcategory(&["security"]),
        fragment: Fragment::Static(FragmentSpec::tags(&["security", "best-practices"])),
    },
    MetadataRule {
        name: "code-quality",
        family: RuleFamily::Practice,
        matcher: Matcher::PathOrSubcategory(&["code-quality", "quality"]),
        fragment: Fragment::Static(FragmentSpec::tags(&["code-quality", "best-practices"])),
    },
    MetadataRule {
        name: "formatting",
        family: RuleFamily::Practice,
        matcher: Matcher::PathOrSubcategory(&["formatting", "style-guide"]),
        fragment: Fragment::Static(FragmentSpec::tags(&["formatting", "code-generation"])),
    },
    MetadataRule {
        name: "workflow",
        family: RuleFamily::Practice,
        matcher: Matcher::PathOrSubcategory(&["workflow"]),
        fragment: Fragment::Static(FragmentSpec::tags(&["workflow", "development-process"])),
    },
    MetadataRule {
        name: "documentation",
        family: RuleFamily::Practice,
        matcher: Matcher::PathOrSubcategory(&["documentation"]),
        fragment: Fragment::Static(FragmentSpec::tags(&["documentation"]).patterns(&["**/*.md"])),
    },
    MetadataRule {
        name: "performance",
        family: RuleFamily::Practice,
        matcher: Matcher::PathOrSubcategory(&["performance"]),
        fragment: Fragment::Static(FragmentSpec::tags(&["performance", "optimization"])),
    },
    MetadataRule {
        name: "accessibility",
        family: RuleFamily::Practice,
        matcher: Matcher::PathOrSubcategory(&["accessibility", "a11y"]),
        fragment: Fragment::Static(
            FragmentSpec::tags(&["accessibility", "frontend"]).applies_to(&[WebApp]),
        ),
    },
    MetadataRule {
        name: "api-design",
        family: RuleFamily::Practice,
        matcher: Matcher::PathOrSubcategory(&["api-design", "rest-api", "graphql"]),
        fragment: Fragment::Static(FragmentSpec::tags(&["api-design"]).applies_to(&[ApiServer])),
    },
    MetadataRule {
        name: "architecture",
        family: RuleFamily::Practice,
        matcher: Matcher::PathOrSubcategory(&["architecture"]),
        fragment: Fragment::Static(FragmentSpec::tags(&["architecture", "design"])),
    },
];

/// Frameworks whose dependencies are not declared through an npm-style
/// manifest; their documents need not list `requiredDependencies`.
pub const PYTHON_FRAMEWORKS: &[&str] = &["django", "fastapi", "flask"];

fn testing_fragment(ctx: &AnalysisContext) -> Recommendation {
    let mut patterns: Vec<&str> = Vec::new();
    if ctx.path_mentions("python") {
        patterns.extend(["**/test_*.py", "**/*_test.py", "**/tests/**/*.py"]);
    }
    if ctx.path_mentions("typescript") {
        patterns.extend(["**/*.test.ts", "**/*.spec.ts", "**/*.test.tsx"]);
    }
    if ctx.path_mentions("javascript") {
        patterns.extend(["**/*.test.js", "**/*.spec.js"]);
    }
    if patterns.is_empty() {
        patterns.extend(["**/*.test.*", "**/*.spec.*", "**/tests/**"]);
    }

    Recommendation {
        file_patterns: string_set(&patterns),
        enhanced_tags: Some(vec!["testing".to_string(), "quality-assurance".to_string()]),
        ..Recommendation::default()
    }
}

/// Union of the fragments of every rule whose matcher accepts `ctx`.
pub fn apply_rules(ctx: &AnalysisContext) -> Recommendation {
    let mut result = Recommendation::default();
    for rule in RULES.iter().filter(|rule| rule.matcher.matches(ctx)) {
        tracing::trace!("rule {} matched {}", rule.name, ctx.document_path);
        result.union(rule.fragment.produce(ctx));
    }
    result
}

/// Names of the rules that fire for `ctx`, in table order.
pub fn matching_rules(ctx: &AnalysisContext) -> Vec<&'static str> {
    RULES
        .iter()
        .filter(|rule| rule.matcher.matches(ctx))
        .map(|rule| rule.name)
        .collect()
}

/// Framework rules whose keywords occur (as substrings) in any of `texts`.
pub fn mentioned_frameworks<'t>(texts: impl IntoIterator<Item = &'t str>) -> Vec<&'static str> {
    let lowered: Vec<String> = texts.into_iter().map(str::to_lowercase).collect();
    RULES
        .iter()
        .filter(|rule| rule.family == RuleFamily::Framework)
        .filter(|rule| {
            rule.matcher
                .keywords()
                .iter()
                .any(|kw| lowered.iter().any(|text| text.contains(kw)))
        })
        .map(|rule| rule.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommend(path: &str, subcategory: Option<&str>, body: &str) -> Recommendation {
        let metadata = Mapping::new();
        let ctx = AnalysisContext::new(path, "test-category", subcategory, &metadata, body);
        apply_rules(&ctx)
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sorted(tags: &Option<Vec<String>>) -> Vec<String> {
        let mut tags = tags.clone().unwrap_or_default();
        tags.sort();
        tags
    }

    #[test]
    fn test_no_matching_rules_yields_empty_recommendation() {
        let rec = recommend("misc/notes.md", None, "nothing to see");
        assert!(rec.is_empty());
        assert_eq!(rec, Recommendation::default());
    }

    #[test]
    fn test_python_formatting_document() {
        let rec = recommend("code-formatting/python-formatting.md", None, "Use black.");

        assert_eq!(
            rec.enhanced_tags,
            Some(vec![
                "python".to_string(),
                "formatting".to_string(),
                "code-generation".to_string()
            ])
        );
        assert!(rec.file_patterns.unwrap().contains("**/*.py"));
        assert_eq!(rec.required_dependencies, None);
        assert!(rec.applicable_to.unwrap().contains(&ProjectType::Library));
    }

    #[test]
    fn test_language_and_framework_rules_union() {
        let rec = recommend(
            "frameworks/typescript-react.md",
            None,
            "Components are plain functions.",
        );

        assert_eq!(
            rec.required_dependencies,
            Some(set(&["typescript", "react", "react-dom"]))
        );
        let patterns = rec.file_patterns.unwrap();
        assert!(patterns.contains("**/*.ts"));
        assert!(patterns.contains("**/*.jsx"));
        assert_eq!(
            rec.applicable_to.unwrap(),
            [ProjectType::WebApp, ProjectType::Library, ProjectType::ApiServer, ProjectType::VscodeExtension]
                .into_iter()
                .collect()
        );
        assert_eq!(
            rec.enhanced_tags,
            Some(vec!["typescript".to_string(), "react".to_string(), "frontend".to_string()])
        );
    }

    #[test]
    fn test_framework_matches_body_on_word_boundaries() {
        let rec = recommend("frameworks/backend.md", None, "We build APIs with Express and Node.");
        assert_eq!(rec.required_dependencies, Some(set(&["express"])));

        let rec = recommend("frameworks/backend.md", None, "Prefer small expressions.");
        assert_eq!(rec.required_dependencies, None);
    }

    #[test]
    fn test_practice_rules_match_subcategory() {
        let rec = recommend("guides/checklist.md", Some("security"), "");
        assert_eq!(
            rec.enhanced_tags,
            Some(vec!["security".to_string(), "best-practices".to_string()])
        );
    }

    #[test]
    fn test_testing_rule_derives_language_patterns() {
        let rec = recommend("testing/python-testing.md", None, "");
        let patterns = rec.file_patterns.unwrap();
        assert!(patterns.contains("**/test_*.py"));
        assert!(patterns.contains("**/*.py"));
        assert!(!patterns.contains("**/*.test.*"));

        let rec = recommend("testing/strategy.md", None, "");
        assert_eq!(
            rec.file_patterns,
            Some(set(&["**/*.test.*", "**/*.spec.*", "**/tests/**"]))
        );
    }

    #[test]
    fn test_union_is_commutative_and_idempotent() {
        let a = FragmentSpec::tags(&["python", "formatting"])
            .deps(&["black"])
            .patterns(&["**/*.py"])
            .to_recommendation();
        let b = FragmentSpec::tags(&["formatting", "security"])
            .applies_to(&[ProjectType::CliTool])
            .patterns(&["**/*.sh"])
            .to_recommendation();

        let mut ab = a.clone();
        ab.union(b.clone());
        let mut ba = b.clone();
        ba.union(a.clone());

        assert_eq!(ab.required_dependencies, ba.required_dependencies);
        assert_eq!(ab.applicable_to, ba.applicable_to);
        assert_eq!(ab.file_patterns, ba.file_patterns);
        assert_eq!(sorted(&ab.enhanced_tags), sorted(&ba.enhanced_tags));

        let mut aa = a.clone();
        aa.union(a.clone());
        assert_eq!(aa, a);
    }

    #[test]
    fn test_mentioned_frameworks() {
        assert_eq!(mentioned_frameworks(["frameworks/express-api.md"]), vec!["express"]);
        assert_eq!(
            mentioned_frameworks(["guides/web.md", "Django", "python"]),
            vec!["django"]
        );
        assert!(mentioned_frameworks(["testing/unit.md", "testing"]).is_empty());
    }

    #[test]
    fn test_mentions_word() {
        assert!(mentions_word("use react hooks", "react"));
        assert!(mentions_word("react-native", "react"));
        assert!(!mentions_word("reactive streams", "react"));
        assert!(!mentions_word("set up reactjs first", "react"));
        assert!(mentions_word("built on next.js.", "next.js"));
        assert!(!mentions_word("anything", ""));
    }

    #[test]
    fn test_project_type_names() {
        for pt in ProjectType::ALL {
            assert_eq!(ProjectType::from_name(pt.as_str()), Some(pt));
        }
        assert_eq!(ProjectType::from_name("desktop"), None);
        assert_eq!(serde_json::to_string(&ProjectType::CliTool).unwrap(), "\"cli-tool\"");
    }

    #[test]
    fn test_rule_names_are_unique() {
        let mut names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
