//! Near-duplicate merging over processed tasks.

use crate::models::{Task, TaskPriority};

use super::similarity::{jaccard, word_set, word_subset};

/// Jaccard threshold above which two titles count as the same task.
const MERGE_THRESHOLD: f32 = 0.7;

/// Folds near-duplicate tasks together.
///
/// Single pass with a processed-index set: the first unprocessed task acts
/// as anchor, everything similar to it is folded in. The anchor keeps its
/// own category and deadline (first seen wins); participants and tags are
/// unioned, urgency and completion probability take the group maximum.
pub struct Deduplicator;

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduplicator {
    pub fn new() -> Self {
        Self
    }

    /// True when two tasks describe the same work: one title contains the
    /// other (checked on characters and on word sets, since titles are token
    /// joins) or their word-set Jaccard similarity exceeds the threshold.
    fn similar(a: &Task, b: &Task) -> bool {
        let a_lower = a.title.to_lowercase();
        let b_lower = b.title.to_lowercase();
        if a_lower.contains(&b_lower) || b_lower.contains(&a_lower) {
            return true;
        }
        let a_words = word_set(&a.title);
        let b_words = word_set(&b.title);
        word_subset(&a_words, &b_words) || jaccard(&a_words, &b_words) > MERGE_THRESHOLD
    }

    pub fn merge(&self, tasks: Vec<Task>) -> Vec<Task> {
        let mut processed = vec![false; tasks.len()];
        let mut merged = Vec::new();

        for i in 0..tasks.len() {
            if processed[i] {
                continue;
            }
            processed[i] = true;
            let mut anchor = tasks[i].clone();

            for (j, other) in tasks.iter().enumerate().skip(i + 1) {
                if processed[j] || !Self::similar(&anchor, other) {
                    continue;
                }
                processed[j] = true;
                for participant in &other.participants {
                    if !anchor.participants.contains(participant) {
                        anchor.participants.push(participant.clone());
                    }
                }
                for tag in &other.tags {
                    if !anchor.tags.contains(tag) {
                        anchor.tags.push(tag.clone());
                    }
                }
                anchor.urgency_score = anchor.urgency_score.max(other.urgency_score);
                anchor.completion_probability = anchor
                    .completion_probability
                    .max(other.completion_probability);
                anchor.updated_at = anchor.updated_at.max(other.updated_at);
            }

            // Priority is a function of urgency and category; taking the max
            // urgency above can change it, so it is re-derived here.
            anchor.priority = TaskPriority::derive(anchor.urgency_score, anchor.category);
            merged.push(anchor);
        }

        merged
    }
}
