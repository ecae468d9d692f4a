//! Normalizer — lower-casing, whitespace tokenization and whole-word containment.

use regex::Regex;

/// Lower-cases raw text. All downstream matching runs on this form.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Splits text into whitespace-delimited tokens, in order. Empty input yields no tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Builds the pattern used for whole-word matching of `term`.
///
/// A `\b` anchor is only placed on a side of the term that starts/ends with an
/// alphanumeric character. Terms such as `.net`, `c++` or `c#` have no word
/// boundary on their symbol side, so that side degrades to plain substring
/// matching.
pub fn whole_word_pattern(term: &str) -> String {
    let leading = term.chars().next().is_some_and(char::is_alphanumeric);
    let trailing = term.chars().last().is_some_and(char::is_alphanumeric);

    format!(
        "{}{}{}",
        if leading { r"\b" } else { "" },
        regex::escape(term),
        if trailing { r"\b" } else { "" }
    )
}

/// Compiles the whole-word matcher for `term`.
pub fn whole_word_regex(term: &str) -> Result<Regex, regex::Error> {
    Regex::new(&whole_word_pattern(term))
}

/// True if `term` occurs in `text` as a whole word (see [`whole_word_pattern`]).
///
/// Both sides are expected to be normalized already. An empty term never matches.
#[allow(dead_code)]
pub fn contains_whole_word(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    match whole_word_regex(term) {
        Ok(re) => re.is_match(text),
        Err(e) => {
            tracing::debug!("Falling back to substring match for '{term}': {e}");
            text.contains(term)
        }
    }
}
