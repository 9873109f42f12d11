//! Urgency signal detection.

use std::sync::Arc;

use super::lexicon::LexiconStore;
use super::tokenizer::{join, Token};
use crate::models::UrgencyIndicator;

/// Tokens of context captured on each side of a match.
const CONTEXT_WINDOW: usize = 3;

/// Scans tokens against the urgency lexicon.
///
/// Intentionally over-inclusive: a lowercased token matches when it merely
/// contains a lexicon keyword, so inflected forms like "dringende" still
/// register. Downstream scoring discounts indicators by contextual
/// relevance instead of filtering here.
#[derive(Clone)]
pub struct UrgencyAnalyzer {
    lexicon: Arc<LexiconStore>,
}

impl UrgencyAnalyzer {
    pub fn new(lexicon: Arc<LexiconStore>) -> Self {
        Self { lexicon }
    }

    pub fn analyze(&self, tokens: &[Token]) -> Vec<UrgencyIndicator> {
        let mut indicators = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            let lower = token.text.to_lowercase();
            // One indicator per token: the first matching keyword wins.
            if let Some((keyword, score)) = self
                .lexicon
                .urgency_entries()
                .iter()
                .find(|(keyword, _)| lower.contains(keyword.as_str()))
            {
                let from = i.saturating_sub(CONTEXT_WINDOW);
                let to = (i + 1 + CONTEXT_WINDOW).min(tokens.len());
                indicators.push(UrgencyIndicator {
                    score: *score,
                    keyword: keyword.clone(),
                    context: join(&tokens[from..to]),
                });
            }
        }
        indicators
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tokenizer::tokenize;

    fn analyzer() -> UrgencyAnalyzer {
        UrgencyAnalyzer::new(Arc::new(LexiconStore::builtin()))
    }

    #[test]
    fn detects_urgency_keywords() {
        let indicators = analyzer().analyze(&tokenize("Das ist dringend zu erledigen"));
        assert_eq!(indicators.len(), 1);
        assert_eq!(indicators[0].keyword, "dringend");
        assert!(indicators[0].score >= 0.9);
    }

    #[test]
    fn matches_inflected_forms_by_substring() {
        let indicators = analyzer().analyze(&tokenize("eine dringende Angelegenheit"));
        assert_eq!(indicators.len(), 1);
        assert_eq!(indicators[0].keyword, "dringend");
    }

    #[test]
    fn captures_a_context_window() {
        let indicators = analyzer().analyze(&tokenize("bitte das Review sofort an Maria senden"));
        assert_eq!(indicators.len(), 1);
        assert_eq!(indicators[0].context, "bitte das Review sofort an Maria senden");
    }

    #[test]
    fn emits_one_indicator_per_matching_token() {
        let indicators = analyzer().analyze(&tokenize("urgent urgent wichtig"));
        assert_eq!(indicators.len(), 3);
    }

    #[test]
    fn neutral_text_has_no_indicators() {
        assert!(analyzer()
            .analyze(&tokenize("Der Himmel ist blau"))
            .is_empty());
    }
}
