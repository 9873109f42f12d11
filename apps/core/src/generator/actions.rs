//! Action item candidate extraction.

use std::sync::Arc;

use super::lexicon::LexiconStore;
use super::tokenizer::{join, Token};

/// Tokens taken before a trigger word.
const BEFORE_WINDOW: usize = 5;
/// Tokens taken after a trigger word.
const AFTER_WINDOW: usize = 8;

/// Extracts raw task-candidate strings around action verbs and imperative
/// markers.
///
/// Overlapping candidates are emitted as-is: deduplication happens later on
/// fully processed tasks, where the richer scored representation is
/// available to decide what is actually the same task.
#[derive(Clone)]
pub struct ActionItemExtractor {
    lexicon: Arc<LexiconStore>,
}

impl ActionItemExtractor {
    pub fn new(lexicon: Arc<LexiconStore>) -> Self {
        Self { lexicon }
    }

    /// Returns the candidate strings in document order: the action-verb pass
    /// first, then the imperative-marker pass.
    pub fn extract(&self, tokens: &[Token]) -> Vec<String> {
        let lowered: Vec<String> = tokens
            .iter()
            .map(|token| token.text.to_lowercase())
            .collect();

        let mut candidates = Vec::new();
        for (i, word) in lowered.iter().enumerate() {
            if self.lexicon.is_action_verb(word) {
                candidates.push(window(tokens, i));
            }
        }
        for (i, word) in lowered.iter().enumerate() {
            if self.lexicon.is_imperative_marker(word) {
                candidates.push(window(tokens, i));
            }
        }
        candidates
    }
}

fn window(tokens: &[Token], i: usize) -> String {
    let from = i.saturating_sub(BEFORE_WINDOW);
    let to = (i + 1 + AFTER_WINDOW).min(tokens.len());
    join(&tokens[from..to])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tokenizer::tokenize;

    fn extractor() -> ActionItemExtractor {
        ActionItemExtractor::new(Arc::new(LexiconStore::builtin()))
    }

    #[test]
    fn action_verbs_trigger_candidates() {
        let candidates = extractor().extract(&tokenize("Bitte erledige das Budget-Review"));
        assert!(candidates
            .iter()
            .any(|candidate| candidate.contains("erledige") && candidate.contains("Budget-Review")));
    }

    #[test]
    fn imperative_markers_trigger_candidates() {
        let candidates = extractor().extract(&tokenize("Maria soll die Präsentation vorbereiten"));
        // "soll" (marker) and "vorbereiten" (verb) each yield a candidate
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|candidate| candidate.contains("Maria")));
    }

    #[test]
    fn overlapping_candidates_are_not_deduplicated_here() {
        let candidates = extractor().extract(&tokenize("bitte erledige den Bericht"));
        // "bitte" and "erledige" both trigger over nearly the same span
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn no_triggers_no_candidates() {
        let candidates = extractor().extract(&tokenize("Der Himmel ist blau und die Sonne scheint"));
        assert!(candidates.is_empty());
    }

    #[test]
    fn window_is_bounded() {
        let text = "a b c d e f g h erledige i j k l m n o p q r s";
        let candidates = extractor().extract(&tokenize(text));
        let words: Vec<&str> = candidates[0].split(' ').collect();
        // 5 before + trigger + 8 after
        assert_eq!(words.len(), 14);
        assert_eq!(words[5], "erledige");
    }
}
