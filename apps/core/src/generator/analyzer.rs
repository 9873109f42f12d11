//! Pipeline orchestrator for the Todo Generator.
//!
//! Sequences tokenization, the four token-level analyzers (concurrent), the
//! per-candidate task processor (fan-out), and the sequential global stages
//! (dedup, dependencies, patterns), then assembles the final
//! [`ContentAnalysis`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::actions::ActionItemExtractor;
use super::deadlines::DeadlineInferrer;
use super::dedup::Deduplicator;
use super::dependencies::DependencyDetector;
use super::lexicon::LexiconStore;
use super::participants::ParticipantDetector;
use super::patterns::PatternRecognizer;
use super::processor::TaskProcessor;
use super::tokenizer::{tokenize, Token};
use super::urgency::UrgencyAnalyzer;
use crate::models::{AnalysisContext, ContentAnalysis, Task};

/// Shared cooperative cancellation flag.
///
/// Checked between candidates; setting it abandons the remaining work and
/// yields a partial analysis of whatever completed before, never an error.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The free-text-to-task extraction engine.
///
/// Holds no mutable state; one instance can serve concurrent invocations.
pub struct TodoGenerator {
    participants: ParticipantDetector,
    deadlines: DeadlineInferrer,
    urgency: UrgencyAnalyzer,
    actions: ActionItemExtractor,
    processor: TaskProcessor,
    deduplicator: Deduplicator,
    dependencies: DependencyDetector,
    patterns: PatternRecognizer,
}

impl Default for TodoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoGenerator {
    /// Creates a generator backed by the builtin lexicon pack.
    pub fn new() -> Self {
        Self::with_lexicon(Arc::new(LexiconStore::builtin()))
    }

    /// Creates a generator backed by a custom lexicon (e.g., another
    /// language pack). The store is shared read-only across all stages.
    pub fn with_lexicon(lexicon: Arc<LexiconStore>) -> Self {
        Self {
            participants: ParticipantDetector::new(lexicon.clone()),
            deadlines: DeadlineInferrer::new(lexicon.clone()),
            urgency: UrgencyAnalyzer::new(lexicon.clone()),
            actions: ActionItemExtractor::new(lexicon.clone()),
            processor: TaskProcessor::new(lexicon.clone()),
            deduplicator: Deduplicator::new(),
            dependencies: DependencyDetector::new(lexicon),
            patterns: PatternRecognizer::new(),
        }
    }

    /// Runs the full pipeline over one document.
    ///
    /// Total over its input: empty or whitespace-only content yields an
    /// empty analysis, never an error.
    pub async fn generate(&self, content: &str, ctx: &AnalysisContext) -> ContentAnalysis {
        self.generate_with_cancel(content, ctx, &CancelFlag::new())
            .await
    }

    /// Like [`generate`](Self::generate), with cooperative cancellation.
    pub async fn generate_with_cancel(
        &self,
        content: &str,
        ctx: &AnalysisContext,
        cancel: &CancelFlag,
    ) -> ContentAnalysis {
        let start = Instant::now();

        if content.trim().is_empty() {
            debug!("empty content, returning empty analysis");
            return ContentAnalysis::empty();
        }

        let now = ctx.reference_time.unwrap_or_else(Utc::now);
        let tokens: Arc<Vec<Token>> = Arc::new(tokenize(content));
        debug!("tokenized {} token(s)", tokens.len());

        // The four token-level analyzers have no data dependency on each
        // other and run concurrently over the same immutable token sequence.
        let participants_task = {
            let detector = self.participants.clone();
            let tokens = tokens.clone();
            tokio::spawn(async move { detector.detect(&tokens) })
        };
        let deadlines_task = {
            let inferrer = self.deadlines.clone();
            let tokens = tokens.clone();
            tokio::spawn(async move { inferrer.infer(&tokens, now) })
        };
        let urgency_task = {
            let analyzer = self.urgency.clone();
            let tokens = tokens.clone();
            tokio::spawn(async move { analyzer.analyze(&tokens) })
        };
        let actions_task = {
            let extractor = self.actions.clone();
            let tokens = tokens.clone();
            tokio::spawn(async move { extractor.extract(&tokens) })
        };

        let (participants, date_inferences, urgency_indicators, candidates) = tokio::join!(
            participants_task,
            deadlines_task,
            urgency_task,
            actions_task
        );
        let participants = participants.expect("participant detector panicked");
        let date_inferences = date_inferences.expect("deadline inferrer panicked");
        let urgency_indicators = urgency_indicators.expect("urgency analyzer panicked");
        let candidates = candidates.expect("action item extractor panicked");
        debug!(
            "found {} candidate(s), {} urgency signal(s), {} date(s)",
            candidates.len(),
            urgency_indicators.len(),
            date_inferences.len()
        );

        // Per-candidate processing is independent and fans out; results are
        // reassembled in candidate order so output stays deterministic.
        let indicators = Arc::new(urgency_indicators);
        let shared_ctx = Arc::new(ctx.clone());
        let mut join_set = JoinSet::new();
        let mut spawned = 0usize;
        for (index, candidate) in candidates.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(
                    "cancelled after {} of {} candidate(s), returning partial result",
                    spawned,
                    candidates.len()
                );
                break;
            }
            let processor = self.processor.clone();
            let candidate = candidate.clone();
            let indicators = indicators.clone();
            let ctx = shared_ctx.clone();
            join_set
                .spawn(async move { (index, processor.process(&candidate, &indicators, &ctx, now)) });
            spawned += 1;
        }

        let mut slots: Vec<Option<Task>> = (0..candidates.len()).map(|_| None).collect();
        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((index, task)) => slots[index] = Some(task),
                Err(err) => warn!("candidate processing failed: {}", err),
            }
        }
        let tasks: Vec<Task> = slots.into_iter().flatten().collect();

        // The remaining stages reason over the whole task set and stay
        // sequential.
        let mut tasks = self.deduplicator.merge(tasks);
        self.dependencies.annotate(&mut tasks);
        let patterns = self.patterns.recognize(&tasks);
        let time_estimates = tasks
            .iter()
            .map(|task| (task.id, task.estimated_duration_secs))
            .collect();

        let analysis = ContentAnalysis {
            extracted_tasks: tasks,
            participants,
            date_inferences,
            urgency_indicators: Arc::try_unwrap(indicators)
                .unwrap_or_else(|shared| (*shared).clone()),
            time_estimates,
            patterns,
            processing_time_ms: start.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        };
        info!("analysis complete: {}", analysis.summary());
        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_content_yields_empty_analysis() {
        let generator = TodoGenerator::new();
        let analysis = generator.generate("", &AnalysisContext::default()).await;
        assert!(analysis.extracted_tasks.is_empty());
        assert!(analysis.participants.is_empty());

        let analysis = generator
            .generate("   \n\t  ", &AnalysisContext::default())
            .await;
        assert!(analysis.extracted_tasks.is_empty());
    }

    #[tokio::test]
    async fn text_without_triggers_yields_no_tasks() {
        let generator = TodoGenerator::new();
        let analysis = generator
            .generate(
                "Der Himmel ist blau und die Sonne scheint hell",
                &AnalysisContext::default(),
            )
            .await;
        assert!(analysis.extracted_tasks.is_empty());
    }

    #[tokio::test]
    async fn cancelled_run_returns_a_partial_result() {
        let generator = TodoGenerator::new();
        let cancel = CancelFlag::new();
        cancel.cancel();
        let analysis = generator
            .generate_with_cancel(
                "Bitte erledige das Budget-Review dringend heute.",
                &AnalysisContext::default(),
                &cancel,
            )
            .await;
        // No candidates were processed, but the token-level findings remain.
        assert!(analysis.extracted_tasks.is_empty());
        assert!(!analysis.urgency_indicators.is_empty());
    }

    #[tokio::test]
    async fn time_estimates_cover_every_task() {
        let generator = TodoGenerator::new();
        let analysis = generator
            .generate(
                "Bitte den Bericht schreiben. Danach kurz die Mail beantworten.",
                &AnalysisContext::default(),
            )
            .await;
        assert!(!analysis.extracted_tasks.is_empty());
        for task in &analysis.extracted_tasks {
            assert_eq!(
                analysis.time_estimates.get(&task.id),
                Some(&task.estimated_duration_secs)
            );
        }
    }
}
