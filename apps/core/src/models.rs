//! Data model for the Todo Generator.
//!
//! All types are plain serde-serializable values. The pipeline communicates
//! exclusively through these structures; no stage holds hidden state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::error::EngineError;

/// Fixed task category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Work,
    Personal,
    Urgent,
    Meeting,
    Project,
    Health,
    Shopping,
    Home,
    Other,
}

impl TaskCategory {
    /// Returns a human-readable label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            TaskCategory::Work => "work",
            TaskCategory::Personal => "personal",
            TaskCategory::Urgent => "urgent",
            TaskCategory::Meeting => "meeting",
            TaskCategory::Project => "project",
            TaskCategory::Health => "health",
            TaskCategory::Shopping => "shopping",
            TaskCategory::Home => "home",
            TaskCategory::Other => "other",
        }
    }

    /// Fixed per-category weight used in priority derivation.
    pub fn weight(&self) -> f32 {
        match self {
            TaskCategory::Urgent => 0.9,
            TaskCategory::Meeting | TaskCategory::Health => 0.8,
            TaskCategory::Work | TaskCategory::Project => 0.7,
            TaskCategory::Shopping => 0.5,
            TaskCategory::Personal | TaskCategory::Home => 0.4,
            TaskCategory::Other => 0.3,
        }
    }
}

/// Task priority, always derived from urgency score and category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    /// Derives the priority from an urgency score and a category.
    ///
    /// `combined = 0.7 * urgency + 0.3 * category weight`, thresholds at
    /// 0.8 (critical), 0.6 (high) and 0.4 (medium). This is the only way a
    /// priority is ever assigned; callers must not set it independently.
    pub fn derive(urgency_score: f32, category: TaskCategory) -> Self {
        let combined = 0.7 * urgency_score.clamp(0.0, 1.0) + 0.3 * category.weight();
        if combined >= 0.8 {
            TaskPriority::Critical
        } else if combined >= 0.6 {
            TaskPriority::High
        } else if combined >= 0.4 {
            TaskPriority::Medium
        } else {
            TaskPriority::Low
        }
    }

    /// Returns a human-readable label for the priority.
    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Critical => "critical",
        }
    }

    /// Numeric weight used by slot-suggestion confidence.
    pub fn weight(&self) -> f32 {
        match self {
            TaskPriority::Critical => 1.0,
            TaskPriority::High => 0.75,
            TaskPriority::Medium => 0.5,
            TaskPriority::Low => 0.25,
        }
    }
}

/// Recurrence pattern attached to recurring tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom,
}

impl RecurrencePattern {
    pub fn label(&self) -> &'static str {
        match self {
            RecurrencePattern::Daily => "daily",
            RecurrencePattern::Weekly => "weekly",
            RecurrencePattern::Monthly => "monthly",
            RecurrencePattern::Yearly => "yearly",
            RecurrencePattern::Custom => "custom",
        }
    }
}

/// Kind of a directed dependency edge between two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    MustComplete,
    ShouldComplete,
    CanOverlap,
}

/// Kind of a recognized task cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Recurring,
    Batch,
    Seasonal,
    ProjectPhase,
}

/// A single structured action item extracted from free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Stable unique identifier, generated at creation, never changed.
    pub id: Uuid,
    /// Source text span the task was built from.
    pub title: String,
    pub category: TaskCategory,
    /// Derived from `urgency_score` and `category`, see [`TaskPriority::derive`].
    pub priority: TaskPriority,
    /// Normalized textual urgency, always within [0, 1].
    pub urgency_score: f32,
    /// Estimated effort in seconds.
    pub estimated_duration_secs: u64,
    pub deadline: Option<DateTime<Utc>>,
    pub is_recurring: bool,
    pub recurrence: Option<RecurrencePattern>,
    /// Ids of prerequisite tasks within the same analysis batch.
    pub dependencies: Vec<Uuid>,
    pub participants: Vec<String>,
    /// Heuristic completion likelihood, always within [0, 1].
    pub completion_probability: f32,
    pub tags: Vec<String>,
    pub source_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed: bool,
}

/// An inferred deadline candidate with provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateInference {
    /// Resolved absolute date.
    pub date: DateTime<Utc>,
    /// Fixed confidence of the matched pattern class, within [0, 1].
    pub confidence: f32,
    /// The temporal expression as it appeared in the text.
    pub source_token: String,
    /// Surrounding token window.
    pub context: String,
}

/// A single urgency signal found in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrgencyIndicator {
    /// Lexicon score of the matched keyword, within [0, 1].
    pub score: f32,
    /// The lexicon keyword that matched.
    pub keyword: String,
    /// Surrounding token window.
    pub context: String,
}

/// Directed dependency edge. Transient: folded into the dependent task's
/// `dependencies` list and not retained afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDependency {
    pub dependent: Uuid,
    pub prerequisite: Uuid,
    pub kind: DependencyKind,
}

/// A recognized cluster over the final task set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPattern {
    pub kind: PatternKind,
    /// Fraction of tasks that belong to this cluster, within [0, 1].
    pub frequency: f32,
    pub description: String,
    pub task_ids: Vec<Uuid>,
}

/// An existing calendar entry, used by slot suggestion to avoid conflicts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Daily working-hours window, hours on a 0-23 clock.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WorkingHours {
    #[validate(range(min = 0, max = 23))]
    pub start_hour: u8,
    #[validate(range(min = 0, max = 23))]
    pub end_hour: u8,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

/// Optional configuration bundle passed to the pipeline. Every field has a
/// safe empty default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisContext {
    /// Preferred categories; the first one replaces the `personal` fallback
    /// when categorization finds no lexicon match.
    #[serde(default)]
    pub preferred_categories: Vec<TaskCategory>,
    /// Previously extracted tasks, carried as host-side context only.
    #[serde(default)]
    pub historical_tasks: Vec<Task>,
    /// Existing calendar entries, consumed by slot suggestion.
    #[serde(default)]
    pub calendar_events: Vec<CalendarEvent>,
    #[serde(default)]
    pub working_hours: Option<WorkingHours>,
    /// Reference "now" for deadline resolution. Defaults to the wall clock.
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
}

impl AnalysisContext {
    /// Validates the configuration bundle.
    pub fn validate(&self) -> Result<(), EngineError> {
        if let Some(hours) = &self.working_hours {
            Validate::validate(hours)?;
            if hours.start_hour >= hours.end_hour {
                return Err(EngineError::Validation(format!(
                    "working hours start ({}) must be before end ({})",
                    hours.start_hour, hours.end_hour
                )));
            }
        }
        for event in &self.calendar_events {
            if event.start >= event.end {
                return Err(EngineError::Validation(format!(
                    "calendar event '{}' ends before it starts",
                    event.title
                )));
            }
        }
        Ok(())
    }
}

/// Terminal output of the pipeline, the sole object handed to collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAnalysis {
    /// Final deduplicated task list.
    pub extracted_tasks: Vec<Task>,
    /// Participants detected across the whole document.
    pub participants: Vec<String>,
    /// All deadline inferences, including ones not attached to any task.
    pub date_inferences: Vec<DateInference>,
    /// All urgency signals found in the document.
    pub urgency_indicators: Vec<UrgencyIndicator>,
    /// Estimated duration in seconds per task id.
    pub time_estimates: HashMap<Uuid, u64>,
    /// Recognized clusters over the final task set.
    pub patterns: Vec<TaskPattern>,
    /// Wall-clock time the analysis took.
    pub processing_time_ms: u64,
    /// When the analysis ran.
    pub timestamp: DateTime<Utc>,
}

impl ContentAnalysis {
    /// An analysis with no findings, returned for empty input.
    pub fn empty() -> Self {
        Self {
            extracted_tasks: vec![],
            participants: vec![],
            date_inferences: vec![],
            urgency_indicators: vec![],
            time_estimates: HashMap::new(),
            patterns: vec![],
            processing_time_ms: 0,
            timestamp: Utc::now(),
        }
    }

    /// One-line digest for logging.
    pub fn summary(&self) -> String {
        format!(
            "Tasks: {}, Participants: {}, Dates: {}, Urgency signals: {}, Patterns: {} ({} ms)",
            self.extracted_tasks.len(),
            self.participants.len(),
            self.date_inferences.len(),
            self.urgency_indicators.len(),
            self.patterns.len(),
            self.processing_time_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_thresholds_match_derivation_formula() {
        // urgent category, weight 0.9: combined = 0.7 * 1.0 + 0.27 = 0.97
        assert_eq!(
            TaskPriority::derive(1.0, TaskCategory::Urgent),
            TaskPriority::Critical
        );
        // other category, weight 0.3: combined = 0.09
        assert_eq!(
            TaskPriority::derive(0.0, TaskCategory::Other),
            TaskPriority::Low
        );
        // work category, weight 0.7: combined = 0.35 + 0.21 = 0.56
        assert_eq!(
            TaskPriority::derive(0.5, TaskCategory::Work),
            TaskPriority::Medium
        );
        // meeting category, weight 0.8: combined = 0.42 + 0.24 = 0.66
        assert_eq!(
            TaskPriority::derive(0.6, TaskCategory::Meeting),
            TaskPriority::High
        );
    }

    #[test]
    fn priority_derivation_clamps_out_of_range_urgency() {
        assert_eq!(
            TaskPriority::derive(7.0, TaskCategory::Other),
            TaskPriority::Critical
        );
        assert_eq!(
            TaskPriority::derive(-3.0, TaskCategory::Other),
            TaskPriority::Low
        );
    }

    #[test]
    fn working_hours_validation() {
        let ctx = AnalysisContext {
            working_hours: Some(WorkingHours {
                start_hour: 17,
                end_hour: 9,
            }),
            ..Default::default()
        };
        assert!(ctx.validate().is_err());

        let ctx = AnalysisContext {
            working_hours: Some(WorkingHours::default()),
            ..Default::default()
        };
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn empty_analysis_has_no_findings() {
        let analysis = ContentAnalysis::empty();
        assert!(analysis.extracted_tasks.is_empty());
        assert!(analysis.patterns.is_empty());
        assert_eq!(analysis.processing_time_ms, 0);
    }

    #[test]
    fn summary_mentions_all_sections() {
        let summary = ContentAnalysis::empty().summary();
        assert!(summary.contains("Tasks:"));
        assert!(summary.contains("Participants:"));
        assert!(summary.contains("Patterns:"));
    }
}
