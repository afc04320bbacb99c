//! Tag-pattern compilation and expansion against the tag inventory.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;

use morfsynth_types::FIELD_SEPARATOR;

/// Compiled whole-string matcher for a tag pattern.
///
/// `+` separates top-level alternatives; the rest of the pattern is regex
/// syntax. Matching is anchored at both ends, so a pattern only accepts
/// complete tags.
pub struct TagMatcher {
    re: Regex,
}

impl TagMatcher {
    pub fn compile(spec: &str) -> Result<Self> {
        let re = Regex::new(&format!("^(?:{})$", spec.replace('+', "|")))
            .with_context(|| format!("invalid tag pattern `{spec}`"))?;
        Ok(Self { re })
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.re.is_match(tag)
    }

    /// Inventory tags satisfying the pattern, in inventory order.
    pub fn expand<'a>(&'a self, inventory: &'a [String]) -> impl Iterator<Item = &'a str> {
        inventory
            .iter()
            .map(String::as_str)
            .filter(|tag| self.matches(tag))
    }
}

static ABBREV_FIELD: OnceLock<Regex> = OnceLock::new();

/// Expand dotted abbreviation fields into inline alternation groups so the
/// tag can be fed to [`TagMatcher`]: `subst:sg:nom:m.f` becomes
/// `subst:sg:nom:(.*m.*|.*f.*)`. Tags with no letter-dot-letter field come
/// back unchanged.
pub fn correct_tag(tag: &str) -> String {
    if !tag.contains('.') {
        return tag.to_string();
    }
    let abbrev = ABBREV_FIELD
        .get_or_init(|| Regex::new(r"[a-z]\.[a-z]").expect("abbreviation shape is a valid regex"));
    let mut rewritten = false;
    let fields: Vec<String> = tag
        .split(FIELD_SEPARATOR)
        .map(|field| {
            if abbrev.is_match(field) {
                rewritten = true;
                format!("(.*{}.*)", field.replace('.', ".*|.*"))
            } else {
                field.to_string()
            }
        })
        .collect();
    if !rewritten {
        return tag.to_string();
    }
    fields.join(&FIELD_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn matching_is_anchored_to_the_whole_tag() {
        let matcher = TagMatcher::compile("subst:sg").expect("compile");
        assert!(matcher.matches("subst:sg"));
        assert!(!matcher.matches("subst:sg:nom:m2"));
        assert!(!matcher.matches("xsubst:sg"));
    }

    #[test]
    fn plus_separates_alternatives() {
        let matcher = TagMatcher::compile("subst:sg:nom:m2+subst:sg:gen:m2").expect("compile");
        assert!(matcher.matches("subst:sg:nom:m2"));
        assert!(matcher.matches("subst:sg:gen:m2"));
        assert!(!matcher.matches("subst:pl:nom:m2"));
    }

    #[test]
    fn expansion_follows_inventory_order() {
        let inv = inventory(&[
            "subst:sg:nom:m2",
            "adj:sg:nom:m1:pos:aff",
            "subst:pl:nom:m2",
        ]);
        let matcher = TagMatcher::compile("subst:(sg|pl):nom:m2").expect("compile");
        let matched: Vec<&str> = matcher.expand(&inv).collect();
        assert_eq!(matched, vec!["subst:sg:nom:m2", "subst:pl:nom:m2"]);
    }

    #[test]
    fn expansion_without_matches_is_empty() {
        let inv = inventory(&["subst:sg:nom:m2"]);
        let matcher = TagMatcher::compile("verb:.*").expect("compile");
        assert_eq!(matcher.expand(&inv).count(), 0);
    }

    #[test]
    fn broken_pattern_is_an_error() {
        assert!(TagMatcher::compile("subst:(sg").is_err());
    }

    #[test]
    fn correct_tag_leaves_dotless_tags_alone() {
        assert_eq!(correct_tag("subst:sg:nom:m2"), "subst:sg:nom:m2");
    }

    #[test]
    fn correct_tag_expands_abbreviated_fields() {
        assert_eq!(
            correct_tag("subst:sg:nom:m.f"),
            "subst:sg:nom:(.*m.*|.*f.*)"
        );
        assert_eq!(correct_tag("adj:sg:m.f.n"), "adj:sg:(.*m.*|.*f.*|.*n.*)");
    }

    #[test]
    fn correct_tag_ignores_wildcard_fields() {
        // `.*` contains a dot but is not a letter-dot-letter abbreviation.
        assert_eq!(correct_tag("subst:sg:.*"), "subst:sg:.*");
    }

    #[test]
    fn correct_tag_is_idempotent() {
        let once = correct_tag("subst:sg:nom:m.f");
        assert_eq!(correct_tag(&once), once);
    }

    #[test]
    fn corrected_tag_compiles_and_matches_both_alternatives() {
        let matcher = TagMatcher::compile(&correct_tag("adj:sg:m.f")).expect("compile");
        assert!(matcher.matches("adj:sg:m1"));
        assert!(matcher.matches("adj:sg:f"));
        assert!(!matcher.matches("adj:sg:n"));
    }
}
