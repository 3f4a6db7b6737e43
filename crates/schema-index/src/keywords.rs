//! Keyword extraction for the field index.

/// Words must be longer than this to be indexed.
const MIN_WORD_LEN: usize = 2;

/// Words of a type name: a trailing `Type` suffix is dropped and the rest is
/// split at upper-case letters, so `PlayerMatchType` yields `player` and
/// `match`.
pub(crate) fn type_name_words(type_name: &str) -> Vec<String> {
    let stem = if type_name.to_ascii_lowercase().ends_with("type") {
        &type_name[..type_name.len() - 4]
    } else {
        type_name
    };

    let mut words = Vec::new();
    let mut current = String::new();
    for c in stem.chars() {
        if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.retain(|w| is_indexable(w));
    words
}

/// Whitespace-separated, lower-cased words of a description.
pub(crate) fn description_words(description: &str) -> impl Iterator<Item = String> + '_ {
    description
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| is_indexable(w))
}

fn is_indexable(word: &str) -> bool {
    word.chars().count() > MIN_WORD_LEN
}
