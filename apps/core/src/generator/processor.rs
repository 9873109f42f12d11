//! Candidate scoring and task assembly.
//!
//! Turns one raw candidate string into one structured [`Task`] in a single
//! synchronous pass: categorization, urgency scoring, priority derivation,
//! duration estimation, deadline attachment, completion probability, tag
//! extraction and recurrence detection.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

use super::deadlines::DeadlineInferrer;
use super::lexicon::LexiconStore;
use super::participants::ParticipantDetector;
use super::similarity::{jaccard, word_set};
use super::tokenizer::{tokenize, Token};
use crate::models::{
    AnalysisContext, RecurrencePattern, Task, TaskCategory, TaskPriority, UrgencyIndicator,
};

/// Weight of urgency keywords found directly inside the candidate.
const DIRECT_KEYWORD_WEIGHT: f32 = 0.5;

/// Urgency assigned when no signal is present at all. Absence of urgency
/// words does not make a genuine action item "not urgent".
const NEUTRAL_URGENCY: f32 = 0.5;

/// Cap on tags gathered from free (non-hashtag) tokens.
const MAX_FREE_TAGS: usize = 5;

// A number followed by a textual unit, e.g. "30 Minuten" or "2h". The unit
// itself is resolved through the lexicon so the pattern stays language-free.
static NUMBER_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,4})\s*(\p{L}+)").expect("Invalid regex: number-unit pattern")
});

/// Processes one candidate into a structured task.
#[derive(Clone)]
pub struct TaskProcessor {
    lexicon: Arc<LexiconStore>,
    deadlines: DeadlineInferrer,
    participants: ParticipantDetector,
}

impl TaskProcessor {
    pub fn new(lexicon: Arc<LexiconStore>) -> Self {
        Self {
            deadlines: DeadlineInferrer::new(lexicon.clone()),
            participants: ParticipantDetector::new(lexicon.clone()),
            lexicon,
        }
    }

    /// Produces one task from one candidate string.
    pub fn process(
        &self,
        candidate: &str,
        indicators: &[UrgencyIndicator],
        ctx: &AnalysisContext,
        now: DateTime<Utc>,
    ) -> Task {
        let tokens = tokenize(candidate);
        let lower = candidate.to_lowercase();

        let category = self.categorize(&lower, &tokens, ctx);
        let urgency_score = self.score_urgency(candidate, &lower, indicators);
        let estimated_duration_secs = self.estimate_duration(&lower, category);
        // First inference over the candidate's own tokens wins; conflicting
        // expressions are a documented first-match simplification.
        let deadline = self
            .deadlines
            .infer(&tokens, now)
            .into_iter()
            .next()
            .map(|inference| inference.date);
        let (is_recurring, recurrence) = self.detect_recurrence(&lower, &tokens);

        Task {
            id: Uuid::new_v4(),
            title: candidate.trim().to_string(),
            category,
            priority: TaskPriority::derive(urgency_score, category),
            urgency_score,
            estimated_duration_secs,
            deadline,
            is_recurring,
            recurrence,
            dependencies: vec![],
            participants: self.participants.detect(&tokens),
            completion_probability: completion_probability(
                urgency_score,
                tokens.len(),
                estimated_duration_secs,
            ),
            tags: self.extract_tags(&tokens),
            source_text: Some(candidate.to_string()),
            created_at: now,
            updated_at: now,
            completed: false,
        }
    }

    /// Substring match against the category lexicon, first entry wins; then
    /// token-equality hints; then the configured or builtin default.
    fn categorize(&self, lower: &str, tokens: &[Token], ctx: &AnalysisContext) -> TaskCategory {
        for (keyword, category) in self.lexicon.category_entries() {
            if lower.contains(keyword.as_str()) {
                return *category;
            }
        }
        for token in tokens {
            let token_lower = token.text.to_lowercase();
            for (hint, category) in self.lexicon.category_hints() {
                if token_lower == *hint {
                    return *category;
                }
            }
        }
        ctx.preferred_categories
            .first()
            .copied()
            .unwrap_or(TaskCategory::Personal)
    }

    /// Weighted combination of document-level indicators (relevance-weighted
    /// by context overlap) and urgency keywords inside the candidate itself.
    fn score_urgency(
        &self,
        candidate: &str,
        lower: &str,
        indicators: &[UrgencyIndicator],
    ) -> f32 {
        let candidate_words = word_set(candidate);
        let mut score = 0.0;
        let mut has_signal = false;

        for indicator in indicators {
            let relevance = jaccard(&word_set(&indicator.context), &candidate_words);
            if relevance > 0.0 {
                score += indicator.score * relevance;
                has_signal = true;
            }
        }
        for (keyword, keyword_score) in self.lexicon.urgency_entries() {
            if lower.contains(keyword.as_str()) {
                score += keyword_score * DIRECT_KEYWORD_WEIGHT;
                has_signal = true;
            }
        }

        if has_signal {
            score.clamp(0.0, 1.0)
        } else {
            NEUTRAL_URGENCY
        }
    }

    /// Explicit "number unit" expressions first, then qualitative keywords,
    /// then the per-category default.
    fn estimate_duration(&self, lower: &str, category: TaskCategory) -> u64 {
        for caps in NUMBER_UNIT.captures_iter(lower) {
            if let Some(minutes) = self.lexicon.time_unit_minutes(&caps[2]) {
                if let Ok(amount) = caps[1].parse::<u64>() {
                    return amount * minutes * 60;
                }
            }
        }
        if let Some(minutes) = self.lexicon.qualitative_minutes(lower) {
            return minutes * 60;
        }
        default_duration_minutes(category) * 60
    }

    fn detect_recurrence(
        &self,
        lower: &str,
        tokens: &[Token],
    ) -> (bool, Option<RecurrencePattern>) {
        for (keyword, pattern) in self.lexicon.recurrence_entries() {
            if lower.contains(keyword.as_str()) {
                return (true, Some(*pattern));
            }
        }
        // A named weekday implies a weekly rhythm.
        let has_weekday = tokens.iter().any(|token| {
            let token_lower = token.text.to_lowercase();
            self.lexicon
                .weekday_entries()
                .iter()
                .any(|(keyword, _)| *keyword == token_lower)
        });
        if has_weekday {
            (true, Some(RecurrencePattern::Weekly))
        } else {
            (false, None)
        }
    }

    /// Hash-prefixed tokens, then up to [`MAX_FREE_TAGS`] non-stopword,
    /// non-proper-noun tokens longer than three characters.
    fn extract_tags(&self, tokens: &[Token]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();

        for token in tokens {
            if let Some(stripped) = token.text.strip_prefix('#') {
                if !stripped.is_empty() {
                    let tag = stripped.to_lowercase();
                    if seen.insert(tag.clone()) {
                        tags.push(tag);
                    }
                }
            }
        }

        let mut free_tags = 0;
        for token in tokens {
            if free_tags >= MAX_FREE_TAGS {
                break;
            }
            if token.text.starts_with('#') {
                continue;
            }
            let is_proper_noun = token
                .text
                .chars()
                .next()
                .is_some_and(|first| first.is_uppercase());
            if is_proper_noun
                || token.text.chars().count() <= 3
                || self.lexicon.is_stopword(&token.text)
            {
                continue;
            }
            let tag = token.text.to_lowercase();
            if seen.insert(tag.clone()) {
                tags.push(tag);
                free_tags += 1;
            }
        }

        tags
    }
}

/// `clamp(0.1, 0.95, 0.4*urgency + 0.4*complexity + 0.2*time)` where
/// complexity falls with candidate length and time falls with estimated
/// duration.
fn completion_probability(urgency_score: f32, word_count: usize, duration_secs: u64) -> f32 {
    let complexity_factor = if word_count <= 5 {
        0.9
    } else if word_count <= 15 {
        0.7
    } else {
        0.5
    };
    let minutes = duration_secs / 60;
    let time_factor = if minutes <= 30 {
        0.9
    } else if minutes <= 120 {
        0.8
    } else if minutes <= 240 {
        0.6
    } else {
        0.4
    };
    (0.4 * urgency_score + 0.4 * complexity_factor + 0.2 * time_factor).clamp(0.1, 0.95)
}

/// Fixed fallback duration per category.
fn default_duration_minutes(category: TaskCategory) -> u64 {
    match category {
        TaskCategory::Meeting => 60,
        TaskCategory::Work => 120,
        TaskCategory::Project => 240,
        TaskCategory::Health => 60,
        TaskCategory::Shopping => 45,
        TaskCategory::Home => 90,
        TaskCategory::Personal => 60,
        TaskCategory::Urgent => 60,
        TaskCategory::Other => 60,
    }
}
