//! Negation decisions and per-tag form collection.

use morfsynth_dict::SynthDict;
use morfsynth_types::{
    AnalyzedToken, FIELD_SEPARATOR, NEGATION_MARKER, NEGATION_PREFIX, POTENTIAL_NEGATION_MARKER,
    Tag, lookup_key,
};

use crate::FormSet;

/// Whether synthesizing the requested tag needs the negated form.
///
/// A negation marker on the requested tag always wins. A marker inherited
/// from the token's current tag is suppressed when the request asks for a
/// comparative or superlative grade: negation on the base form does not
/// propagate to derived grades unless requested explicitly.
pub(crate) fn is_negated(requested: &str, current: Option<&str>) -> bool {
    let requested = Tag::new(requested);
    let inherited = current.is_some_and(|tag| Tag::new(tag).has_negation())
        && !requested.has_comparative()
        && !requested.has_superlative();
    requested.has_negation() || inherited
}

/// Rewrite every negation marker in a pattern to the potentially-negated
/// marker plus an optional quantifier, so expansion matches the dictionary's
/// non-negated paradigm tags. Operates on the raw pattern text because the
/// marker may sit inside a regex group.
pub(crate) fn neutralize_pattern(spec: &str) -> String {
    let from = format!("{FIELD_SEPARATOR}{NEGATION_MARKER}");
    let to = format!("{FIELD_SEPARATOR}{POTENTIAL_NEGATION_MARKER}?");
    spec.replace(&from, &to)
}

/// Look up one concrete tag for the token and push the resulting forms.
///
/// Negated lookups query the non-negated paradigm entry and prefix each stem;
/// placeholder entries without a stem are dropped either way.
pub(crate) fn collect_forms(
    dict: &SynthDict,
    token: &AnalyzedToken,
    tag: &str,
    negated: bool,
    out: &mut FormSet,
) {
    if negated {
        let lookup_tag = Tag::new(tag).negated_lookup_tag();
        for entry in dict.lookup(&lookup_key(&token.lemma, &lookup_tag)) {
            if let Some(stem) = entry.stem {
                out.insert(format!("{NEGATION_PREFIX}{stem}"));
            }
        }
    } else {
        for entry in dict.lookup(&lookup_key(&token.lemma, tag)) {
            if let Some(stem) = entry.stem {
                out.insert(stem.to_string());
            }
        }
    }
}
