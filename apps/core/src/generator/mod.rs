//! # Todo Generator
//!
//! Deterministic, rule-and-heuristic extraction of structured tasks from
//! free-form notes. No LLM calls, no I/O; one document in, one
//! [`ContentAnalysis`](crate::models::ContentAnalysis) out.
//!
//! ## Components
//! - `lexicon`: keyword tables (urgency, categories, time units, stopwords,
//!   action verbs, recurrence, weekdays)
//! - `tokenizer`: position-tagged word tokens, the shared substrate
//! - `participants`: proper-noun and pronoun participant detection
//! - `deadlines`: relative-day and weekday resolution against "now"
//! - `urgency`: urgency signal scan with context windows
//! - `actions`: action-verb and imperative candidate extraction
//! - `processor`: per-candidate scoring into structured tasks
//! - `dedup`: similarity-based merging of near-duplicates
//! - `dependencies`: sequencing-language dependency edges
//! - `patterns`: recurring and project-phase clusters
//! - `analyzer`: the orchestrator

pub mod actions;
pub mod analyzer;
pub mod deadlines;
pub mod dedup;
pub mod dependencies;
pub mod lexicon;
pub mod participants;
pub mod patterns;
pub mod processor;
pub mod similarity;
pub mod tokenizer;
pub mod urgency;

pub use actions::ActionItemExtractor;
pub use analyzer::{CancelFlag, TodoGenerator};
pub use deadlines::DeadlineInferrer;
pub use dedup::Deduplicator;
pub use dependencies::DependencyDetector;
pub use lexicon::{LexiconReport, LexiconStore, LexiconTables};
pub use participants::ParticipantDetector;
pub use patterns::PatternRecognizer;
pub use processor::TaskProcessor;
pub use tokenizer::{tokenize, Token};
pub use urgency::UrgencyAnalyzer;
