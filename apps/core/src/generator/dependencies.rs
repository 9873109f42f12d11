//! Dependency detection over the deduplicated task set.

use std::sync::Arc;

use tracing::debug;

use super::lexicon::LexiconStore;
use super::similarity::{jaccard, word_set};
use crate::models::{DependencyKind, Task, TaskDependency};

/// Jaccard threshold for linking a sequencing task to its prerequisite.
const DEPENDENCY_THRESHOLD: f32 = 0.5;

/// Detects sequencing language and folds the resulting edges into each
/// dependent task's dependency list.
///
/// Intentionally coarse: no transitive ordering is inferred and cycles in
/// the resulting graph are possible. They are left as-is rather than
/// silently resolved.
#[derive(Clone)]
pub struct DependencyDetector {
    lexicon: Arc<LexiconStore>,
}

impl DependencyDetector {
    pub fn new(lexicon: Arc<LexiconStore>) -> Self {
        Self { lexicon }
    }

    fn has_sequence_marker(&self, title: &str) -> bool {
        title
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric() && c != '-' && c != '\'')
            .any(|word| self.lexicon.is_sequence_marker(word))
    }

    /// Computes must-complete edges and appends each prerequisite to the
    /// dependent task. The edges themselves are transient; only the folded
    /// dependency lists survive.
    pub fn annotate(&self, tasks: &mut [Task]) {
        let mut edges: Vec<TaskDependency> = Vec::new();
        for i in 0..tasks.len() {
            if !self.has_sequence_marker(&tasks[i].title) {
                continue;
            }
            let dependent_words = word_set(&tasks[i].title);
            for (j, other) in tasks.iter().enumerate() {
                if i == j {
                    continue;
                }
                if jaccard(&dependent_words, &word_set(&other.title)) >= DEPENDENCY_THRESHOLD {
                    edges.push(TaskDependency {
                        dependent: tasks[i].id,
                        prerequisite: other.id,
                        kind: DependencyKind::MustComplete,
                    });
                }
            }
        }

        debug!("detected {} dependency edge(s)", edges.len());
        for edge in edges {
            let dependent = tasks
                .iter_mut()
                .find(|task| task.id == edge.dependent)
                .expect("dependent task is part of the same batch");
            if !dependent.dependencies.contains(&edge.prerequisite) {
                dependent.dependencies.push(edge.prerequisite);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskCategory, TaskPriority};
    use chrono::Utc;
    use uuid::Uuid;

    fn task(title: &str) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            category: TaskCategory::Work,
            priority: TaskPriority::derive(0.5, TaskCategory::Work),
            urgency_score: 0.5,
            estimated_duration_secs: 3600,
            deadline: None,
            is_recurring: false,
            recurrence: None,
            dependencies: vec![],
            participants: vec![],
            completion_probability: 0.5,
            tags: vec![],
            source_text: None,
            created_at: now,
            updated_at: now,
            completed: false,
        }
    }

    fn detector() -> DependencyDetector {
        DependencyDetector::new(Arc::new(LexiconStore::builtin()))
    }

    #[test]
    fn sequencing_tasks_depend_on_similar_tasks() {
        let mut tasks = vec![
            task("review the report draft"),
            task("then review the report"),
        ];
        let prerequisite = tasks[0].id;
        detector().annotate(&mut tasks);
        assert_eq!(tasks[1].dependencies, vec![prerequisite]);
        assert!(tasks[0].dependencies.is_empty());
    }

    #[test]
    fn no_marker_no_dependency() {
        let mut tasks = vec![
            task("review the report draft"),
            task("review the report again"),
        ];
        detector().annotate(&mut tasks);
        assert!(tasks.iter().all(|t| t.dependencies.is_empty()));
    }

    #[test]
    fn dissimilar_titles_do_not_link() {
        let mut tasks = vec![
            task("danach den Garten bewässern"),
            task("Steuererklärung einreichen"),
        ];
        detector().annotate(&mut tasks);
        assert!(tasks.iter().all(|t| t.dependencies.is_empty()));
    }

    #[test]
    fn marker_matching_is_word_based() {
        // "afternoon" contains "after" but is not a sequencing word
        let mut tasks = vec![
            task("book the afternoon meeting room"),
            task("book the afternoon meeting slot"),
        ];
        detector().annotate(&mut tasks);
        assert!(tasks.iter().all(|t| t.dependencies.is_empty()));
    }
}
