//! Deadline inference from relative-day and weekday expressions.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Utc};

use super::lexicon::LexiconStore;
use super::tokenizer::{join, Token};
use crate::models::DateInference;

/// Tokens of context captured on each side of a match.
const CONTEXT_WINDOW: usize = 3;

/// Confidence assigned to weekday-name matches.
const WEEKDAY_CONFIDENCE: f32 = 0.8;

/// Resolves temporal expressions against a reference "now".
///
/// Every match is retained; picking "the" deadline among several inferences
/// is the task processor's documented first-match simplification, not this
/// stage's concern.
#[derive(Clone)]
pub struct DeadlineInferrer {
    lexicon: Arc<LexiconStore>,
}

impl DeadlineInferrer {
    pub fn new(lexicon: Arc<LexiconStore>) -> Self {
        Self { lexicon }
    }

    /// Scans the token sequence and resolves every temporal expression.
    pub fn infer(&self, tokens: &[Token], now: DateTime<Utc>) -> Vec<DateInference> {
        let lowered: Vec<String> = tokens
            .iter()
            .map(|token| token.text.to_lowercase())
            .collect();

        let mut inferences = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            if let Some(consumed) = self.match_relative_day(tokens, &lowered, i, now, &mut inferences)
            {
                i += consumed;
                continue;
            }
            if let Some(weekday) = self
                .lexicon
                .weekday_entries()
                .iter()
                .find(|(keyword, _)| *keyword == lowered[i])
                .map(|(_, weekday)| *weekday)
            {
                // Next occurrence forward; the same weekday resolves to today.
                let days_ahead = (weekday.num_days_from_monday() as i64
                    - now.weekday().num_days_from_monday() as i64
                    + 7)
                    % 7;
                inferences.push(DateInference {
                    date: now + Duration::days(days_ahead),
                    confidence: WEEKDAY_CONFIDENCE,
                    source_token: tokens[i].text.clone(),
                    context: context_window(tokens, i, i + 1),
                });
            }
            i += 1;
        }
        inferences
    }

    /// Tries the relative-day phrases (longest first) at position `i`.
    /// Returns the number of consumed tokens on a match.
    fn match_relative_day(
        &self,
        tokens: &[Token],
        lowered: &[String],
        i: usize,
        now: DateTime<Utc>,
        inferences: &mut Vec<DateInference>,
    ) -> Option<usize> {
        for (words, offset, confidence) in self.lexicon.relative_day_entries() {
            let n = words.len();
            if i + n <= lowered.len() && lowered[i..i + n] == words[..] {
                inferences.push(DateInference {
                    date: now + Duration::days(*offset),
                    confidence: *confidence,
                    source_token: join(&tokens[i..i + n]),
                    context: context_window(tokens, i, i + n),
                });
                return Some(n);
            }
        }
        None
    }
}

fn context_window(tokens: &[Token], start: usize, end: usize) -> String {
    let from = start.saturating_sub(CONTEXT_WINDOW);
    let to = (end + CONTEXT_WINDOW).min(tokens.len());
    join(&tokens[from..to])
}
