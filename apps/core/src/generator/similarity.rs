//! Word-set similarity used for merging, relevance weighting and
//! dependency matching.

use std::collections::HashSet;

/// Lowercased word set of a text span.
pub fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '-' && c != '\'' && c != '#')
        .filter(|word| !word.is_empty())
        .map(|word| word.to_string())
        .collect()
}

/// Jaccard similarity of two word sets. Empty sets compare as 0.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f32 / union as f32
}

/// True when every word of one set appears in the other.
///
/// This is the token-level reading of "one title is a substring of the
/// other": titles are joins of tokens, so containment is decided on words
/// rather than characters.
pub fn word_subset(a: &HashSet<String>, b: &HashSet<String>) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.len() <= b.len() {
        a.is_subset(b)
    } else {
        b.is_subset(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sets_have_full_similarity() {
        let a = word_set("Projekt X fertigstellen");
        let b = word_set("projekt x fertigstellen");
        assert!((jaccard(&a, &b) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn disjoint_sets_have_zero_similarity() {
        let a = word_set("eins zwei");
        let b = word_set("drei vier");
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn empty_sets_compare_as_zero() {
        let a = word_set("");
        let b = word_set("etwas");
        assert_eq!(jaccard(&a, &b), 0.0);
        assert!(!word_subset(&a, &b));
    }

    #[test]
    fn subset_detection_ignores_direction() {
        let short = word_set("Projekt X fertigstellen");
        let long = word_set("das Projekt X nächste Woche fertigstellen");
        assert!(word_subset(&short, &long));
        assert!(word_subset(&long, &short));
    }

    #[test]
    fn partial_overlap_is_fractional() {
        let a = word_set("a b c d");
        let b = word_set("c d e f");
        // intersection 2, union 6
        assert!((jaccard(&a, &b) - 2.0 / 6.0).abs() < 1e-6);
    }
}
