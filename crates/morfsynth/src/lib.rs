//! Polish word-form synthesizer.
//!
//! Given a lemma and a morphosyntactic tag, produce the inflected surface
//! forms recorded in the synthesis dictionary. A tag may also be a *pattern*
//! (`+` separates alternatives, the rest is regex syntax); patterns are
//! expanded against the closed tag inventory before lookup. Negation markers
//! rewrite the lookup tag to the non-negated paradigm entry and prefix the
//! resulting stems with `nie`.
//!
//! # How it works
//! 1. An absent tag yields an absent result (nothing to synthesize).
//! 2. A concrete tag is looked up once, honoring the negation rule.
//! 3. A pattern is expanded over the tag inventory in order; each matching
//!    tag is looked up and the forms are collected into an order-preserving
//!    set, so duplicates across tags are dropped.
//!
//! The dictionary and the tag inventory load lazily on first use and are
//! shared read-only afterwards; the exact-tag path never touches the
//! inventory.
//!
//! # Example
//! ```no_run
//! use morfsynth::Synthesizer;
//! use morfsynth_types::AnalyzedToken;
//!
//! # fn main() -> anyhow::Result<()> {
//! let synth = Synthesizer::new("pl/synth.dict", "pl/tags.txt");
//! let token = AnalyzedToken::new("kot", Some("subst:sg:nom:m2"));
//!
//! if let Some(forms) = synth.synthesize(&token, Some("subst:sg:gen:m2"))? {
//!     println!("{forms:?}");
//! }
//! let all = synth.synthesize_with(&token, Some("subst:sg:.*:m2"), true)?;
//! println!("{all:?}");
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see
//! `cargo run -p morfsynth --example synthesize -- <dict> <tags> <lemma> <tag>`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, trace};

use morfsynth_dict::{LoadMode, SynthDict, load_tag_inventory};
use morfsynth_types::AnalyzedToken;

mod negation;
mod pattern;

pub use pattern::{TagMatcher, correct_tag};

/// Word-form synthesizer over a lazily-loaded dictionary and tag inventory.
///
/// Synthesis takes `&self`, so one instance can serve parallel callers; first
/// use initializes each resource exactly once. Racing first callers may each
/// load, but only one result is stored and every caller observes that same
/// instance. A failed load stores nothing, so a later call re-attempts it.
pub struct Synthesizer {
    dict_path: PathBuf,
    tags_path: PathBuf,
    mode: LoadMode,
    dictionary: OnceLock<SynthDict>,
    tag_inventory: OnceLock<Vec<String>>,
}

impl Synthesizer {
    /// Create a synthesizer over a dictionary file and a tag inventory file,
    /// memory-mapping the dictionary on first use.
    pub fn new(dict_path: impl AsRef<Path>, tags_path: impl AsRef<Path>) -> Self {
        Self::with_mode(dict_path, tags_path, LoadMode::Mmap)
    }

    /// Like [`new`](Self::new), choosing the dictionary backing at runtime.
    pub fn with_mode(
        dict_path: impl AsRef<Path>,
        tags_path: impl AsRef<Path>,
        mode: LoadMode,
    ) -> Self {
        Self {
            dict_path: dict_path.as_ref().to_path_buf(),
            tags_path: tags_path.as_ref().to_path_buf(),
            mode,
            dictionary: OnceLock::new(),
            tag_inventory: OnceLock::new(),
        }
    }

    /// Create a synthesizer over already-materialized resources. Nothing is
    /// read from disk; useful for embedders and tests.
    pub fn with_resources(dictionary: SynthDict, tag_inventory: Vec<String>) -> Self {
        Self {
            dict_path: PathBuf::new(),
            tags_path: PathBuf::new(),
            mode: LoadMode::Mmap,
            dictionary: OnceLock::from(dictionary),
            tag_inventory: OnceLock::from(tag_inventory),
        }
    }

    /// Synthesize the forms of `token`'s lemma for a concrete tag.
    ///
    /// An absent tag yields `Ok(None)`; a present tag with no dictionary
    /// entry yields `Ok(Some(vec![]))` — callers can tell the two apart. A
    /// tag carrying a `+` alternation is handed to the pattern path.
    pub fn synthesize(
        &self,
        token: &AnalyzedToken,
        tag: Option<&str>,
    ) -> Result<Option<Vec<String>>> {
        let Some(tag) = tag else {
            return Ok(None);
        };
        if tag.find('+').is_some_and(|i| i > 0) {
            return self.synthesize_with(token, Some(tag), true);
        }
        let negated = negation::is_negated(tag, token.pos_tag.as_deref());
        let dict = self.dictionary()?;
        let mut forms = FormSet::default();
        negation::collect_forms(dict, token, tag, negated, &mut forms);
        Ok(Some(forms.into_vec()))
    }

    /// Synthesize for a tag specification that may be a pattern.
    ///
    /// With `is_pattern == false` this defers to
    /// [`synthesize`](Self::synthesize). Otherwise the specification is
    /// expanded against the tag inventory and each matching tag is looked up;
    /// the result is deduplicated across the whole call, first occurrence in
    /// inventory order winning.
    pub fn synthesize_with(
        &self,
        token: &AnalyzedToken,
        spec: Option<&str>,
        is_pattern: bool,
    ) -> Result<Option<Vec<String>>> {
        let Some(spec) = spec else {
            return Ok(None);
        };
        if !is_pattern {
            return self.synthesize(token, Some(spec));
        }

        let inventory = self.tag_inventory()?;
        let dict = self.dictionary()?;

        let negated = negation::is_negated(spec, token.pos_tag.as_deref());
        let spec = if negated {
            negation::neutralize_pattern(spec)
        } else {
            spec.to_string()
        };
        let matcher = TagMatcher::compile(&spec)?;

        let mut forms = FormSet::default();
        let mut matched = 0usize;
        for tag in matcher.expand(inventory) {
            matched += 1;
            negation::collect_forms(dict, token, tag, negated, &mut forms);
        }
        trace!("pattern `{spec}` matched {matched} inventory tag(s)");
        Ok(Some(forms.into_vec()))
    }

    fn dictionary(&self) -> Result<&SynthDict> {
        if let Some(dict) = self.dictionary.get() {
            return Ok(dict);
        }
        let start = Instant::now();
        let dict = SynthDict::load_with_mode(&self.dict_path, self.mode)?;
        debug!(
            "dictionary {} loaded in {} ms ({} keys)",
            self.dict_path.display(),
            start.elapsed().as_millis(),
            dict.key_count()
        );
        // Racing loaders keep only the first stored instance.
        Ok(self.dictionary.get_or_init(|| dict))
    }

    fn tag_inventory(&self) -> Result<&[String]> {
        if let Some(tags) = self.tag_inventory.get() {
            return Ok(tags.as_slice());
        }
        let tags = load_tag_inventory(&self.tags_path)?;
        debug!(
            "tag inventory {} loaded ({} tags)",
            self.tags_path.display(),
            tags.len()
        );
        Ok(self.tag_inventory.get_or_init(|| tags).as_slice())
    }
}

/// Order-preserving set of synthesized forms: the first occurrence keeps its
/// position, later duplicates are dropped.
#[derive(Default)]
struct FormSet {
    seen: HashSet<String>,
    forms: Vec<String>,
}

impl FormSet {
    fn insert(&mut self, form: String) {
        if self.seen.insert(form.clone()) {
            self.forms.push(form);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.forms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_set_keeps_first_occurrence_order() {
        let mut set = FormSet::default();
        for form in ["kota", "kot", "kota", "koty", "kot"] {
            set.insert(form.to_string());
        }
        assert_eq!(set.into_vec(), vec!["kota", "kot", "koty"]);
    }
}
