//! # NoteFlow Todo Generator
//!
//! Free-text-to-task extraction engine: consumes unstructured notes,
//! e-mails or memos and produces a structured, prioritized, deduplicated
//! and time-estimated set of action items, enriched with inferred
//! deadlines, participants, recurrence, dependencies and a predicted
//! completion likelihood.
//!
//! The pipeline is local, deterministic and purely heuristic; there are no
//! LLM calls and no I/O. The single entry point is
//! [`TodoGenerator::generate`], which turns one document into one
//! [`ContentAnalysis`]. Export serializers and calendar slot suggestion sit
//! next to the pipeline as downstream consumers of the same task contract.

pub mod error;
pub mod export;
pub mod generator;
pub mod models;
pub mod scheduling;

#[cfg(test)]
mod tests;

pub use error::EngineError;
pub use generator::{CancelFlag, LexiconStore, LexiconTables, TodoGenerator};
pub use models::{
    AnalysisContext, CalendarEvent, ContentAnalysis, DateInference, DependencyKind, PatternKind,
    RecurrencePattern, Task, TaskCategory, TaskDependency, TaskPattern, TaskPriority,
    UrgencyIndicator, WorkingHours,
};
pub use scheduling::SlotSuggestion;
