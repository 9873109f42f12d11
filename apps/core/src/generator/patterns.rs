//! Pattern recognition over the final task set.

use crate::models::{PatternKind, RecurrencePattern, Task, TaskCategory, TaskPattern};

/// Surfaces recurring-task clusters and project-phase clusters.
pub struct PatternRecognizer;

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternRecognizer {
    pub fn new() -> Self {
        Self
    }

    pub fn recognize(&self, tasks: &[Task]) -> Vec<TaskPattern> {
        let total = tasks.len();
        if total == 0 {
            return vec![];
        }

        let mut patterns = Vec::new();

        for recurrence in [
            RecurrencePattern::Daily,
            RecurrencePattern::Weekly,
            RecurrencePattern::Monthly,
            RecurrencePattern::Yearly,
            RecurrencePattern::Custom,
        ] {
            let task_ids: Vec<_> = tasks
                .iter()
                .filter(|task| task.is_recurring && task.recurrence == Some(recurrence))
                .map(|task| task.id)
                .collect();
            if task_ids.is_empty() {
                continue;
            }
            patterns.push(TaskPattern {
                kind: PatternKind::Recurring,
                frequency: task_ids.len() as f32 / total as f32,
                description: format!(
                    "{} task(s) recur on a {} basis",
                    task_ids.len(),
                    recurrence.label()
                ),
                task_ids,
            });
        }

        let project_ids: Vec<_> = tasks
            .iter()
            .filter(|task| task.category == TaskCategory::Project)
            .map(|task| task.id)
            .collect();
        if project_ids.len() > 1 {
            patterns.push(TaskPattern {
                kind: PatternKind::ProjectPhase,
                frequency: project_ids.len() as f32 / total as f32,
                description: format!(
                    "{} project tasks likely belong to the same project phase",
                    project_ids.len()
                ),
                task_ids: project_ids,
            });
        }

        patterns
    }
}
