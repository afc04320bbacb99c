//! Shared types for the Polish word-form synthesizer.
//!
//! Morphosyntactic tags are colon-separated strings (part of speech first,
//! grammatical features after, e.g. `subst:sg:nom:m2`). Instead of scattering
//! substring scans across the synthesizer, [`Tag`] wraps a tag string and
//! exposes field-scoped marker checks; the reserved markers themselves live
//! here as constants so every crate agrees on them.
//!
//! ```rust
//! use morfsynth_types::{AnalyzedToken, Tag, lookup_key};
//!
//! let tag = Tag::new("adj:sg:nom:m1:pos:neg");
//! assert!(tag.has_negation());
//! assert!(!tag.has_comparative());
//! assert_eq!(tag.negated_lookup_tag(), "adj:sg:nom:m1:pos:aff");
//!
//! let token = AnalyzedToken::new("kot", Some("subst:sg:nom:m2"));
//! assert_eq!(lookup_key(&token.lemma, "subst:sg:nom:m2"), "kot|subst:sg:nom:m2");
//! ```

use std::fmt;

/// Marker field for an explicitly negated form.
pub const NEGATION_MARKER: &str = "neg";
/// Marker field for a form that may carry negation (`aff` in the dictionary).
pub const POTENTIAL_NEGATION_MARKER: &str = "aff";
/// Marker for comparative-grade forms.
pub const COMPARATIVE_MARKER: &str = "com";
/// Marker for superlative-grade forms.
pub const SUPERLATIVE_MARKER: &str = "sup";

/// Prefix attached to stems when synthesizing a negated form.
pub const NEGATION_PREFIX: &str = "nie";

/// Separator between fields within a tag.
pub const FIELD_SEPARATOR: char = ':';
/// Separator between lemma and tag in a dictionary lookup key.
pub const KEY_SEPARATOR: char = '|';

/// Borrowed view over a colon-separated tag string.
///
/// Marker checks look at fields past the first one (the part of speech),
/// matching the dictionary convention that markers never open a tag. A check
/// passes if the marker occurs anywhere inside such a field, so it also works
/// on tag patterns where a field may be a group like `(neg|aff)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tag<'a>(&'a str);

impl<'a> Tag<'a> {
    pub fn new(tag: &'a str) -> Self {
        Tag(tag)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Iterate over the tag's fields in order.
    pub fn fields(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.0.split(FIELD_SEPARATOR)
    }

    pub fn has_negation(&self) -> bool {
        self.has_marker(NEGATION_MARKER)
    }

    pub fn has_comparative(&self) -> bool {
        self.has_marker(COMPARATIVE_MARKER)
    }

    pub fn has_superlative(&self) -> bool {
        self.has_marker(SUPERLATIVE_MARKER)
    }

    /// The tag to query the dictionary with when synthesizing a negated form:
    /// the first negation marker is rewritten to the potentially-negated
    /// marker, so the lookup hits the non-negated paradigm entry.
    pub fn negated_lookup_tag(&self) -> String {
        let from = format!("{FIELD_SEPARATOR}{NEGATION_MARKER}");
        let to = format!("{FIELD_SEPARATOR}{POTENTIAL_NEGATION_MARKER}");
        self.0.replacen(&from, &to, 1)
    }

    fn has_marker(&self, marker: &str) -> bool {
        self.fields().skip(1).any(|field| field.contains(marker))
    }
}

impl fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A token as produced by upstream analysis: a lemma plus the tag it
/// currently carries, if any. Read-only for the synthesizer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnalyzedToken {
    pub lemma: String,
    pub pos_tag: Option<String>,
}

impl AnalyzedToken {
    pub fn new(lemma: impl Into<String>, pos_tag: Option<&str>) -> Self {
        Self {
            lemma: lemma.into(),
            pos_tag: pos_tag.map(str::to_string),
        }
    }
}

/// One dictionary entry for a `lemma|tag` key. `stem` is `None` for
/// placeholder entries, which callers filter rather than treat as errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DictEntry<'a> {
    pub stem: Option<&'a str>,
    pub tag: &'a str,
}

/// Build the dictionary lookup key for a lemma and a concrete tag.
pub fn lookup_key(lemma: &str, tag: &str) -> String {
    format!("{lemma}{KEY_SEPARATOR}{tag}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_exposes_its_raw_string() {
        let tag = Tag::new("subst:sg:nom:m2");
        assert_eq!(tag.as_str(), "subst:sg:nom:m2");
        assert_eq!(tag.to_string(), "subst:sg:nom:m2");
    }

    #[test]
    fn markers_are_field_scoped() {
        assert!(Tag::new("adj:sg:nom:m1:pos:neg").has_negation());
        assert!(Tag::new("adj:sg:nom:m1:com").has_comparative());
        assert!(Tag::new("adj:sg:nom:m1:sup").has_superlative());
        assert!(!Tag::new("subst:sg:nom:m2").has_negation());
    }

    #[test]
    fn marker_in_leading_field_does_not_count() {
        // The part-of-speech field never carries a negation marker.
        assert!(!Tag::new("negative:sg:nom").has_negation());
        assert!(!Tag::new("composite").has_comparative());
    }

    #[test]
    fn markers_match_inside_pattern_groups() {
        assert!(Tag::new("adj:sg:nom:m1:pos:(neg|aff)").has_negation());
    }

    #[test]
    fn negated_lookup_tag_rewrites_first_marker_only() {
        assert_eq!(
            Tag::new("adj:sg:nom:m1:pos:neg").negated_lookup_tag(),
            "adj:sg:nom:m1:pos:aff"
        );
        assert_eq!(
            Tag::new("adj:neg:neg").negated_lookup_tag(),
            "adj:aff:neg"
        );
        assert_eq!(
            Tag::new("subst:sg:nom:m2").negated_lookup_tag(),
            "subst:sg:nom:m2"
        );
    }

    #[test]
    fn lookup_key_joins_with_pipe() {
        assert_eq!(lookup_key("kot", "subst:sg:nom:m2"), "kot|subst:sg:nom:m2");
    }
}
