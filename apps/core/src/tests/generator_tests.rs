//! Full pipeline tests over realistic note text.

use chrono::{Datelike, TimeZone, Utc, Weekday};

use crate::generator::{Deduplicator, TodoGenerator};
use crate::models::{AnalysisContext, PatternKind, TaskCategory, TaskPriority};

use super::init_tracing;

/// Monday, 2025-03-10, 09:00 UTC.
fn monday_context() -> AnalysisContext {
    AnalysisContext {
        reference_time: Some(Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()),
        ..Default::default()
    }
}

#[tokio::test]
async fn german_meeting_note_yields_two_scored_tasks() {
    init_tracing();
    let generator = TodoGenerator::new();
    let ctx = monday_context();
    let analysis = generator
        .generate(
            "Bitte erledige das Budget-Review dringend heute. \
             Maria soll die Präsentation für Freitag vorbereiten.",
            &ctx,
        )
        .await;

    assert!(
        analysis.extracted_tasks.len() >= 2,
        "expected at least two tasks, got {:?}",
        analysis
            .extracted_tasks
            .iter()
            .map(|t| t.title.as_str())
            .collect::<Vec<_>>()
    );
    assert!(analysis.participants.contains(&"Maria".to_string()));

    let reference = ctx.reference_time.unwrap();

    let budget = analysis
        .extracted_tasks
        .iter()
        .find(|task| task.title.contains("Budget-Review"))
        .expect("budget review task");
    assert!(
        budget.urgency_score > 0.7,
        "urgency was {}",
        budget.urgency_score
    );
    assert!(
        matches!(budget.category, TaskCategory::Work | TaskCategory::Urgent),
        "category was {:?}",
        budget.category
    );
    let budget_deadline = budget.deadline.expect("deadline resolved from 'heute'");
    assert_eq!(budget_deadline.date_naive(), reference.date_naive());

    let presentation = analysis
        .extracted_tasks
        .iter()
        .find(|task| task.title.contains("Freitag"))
        .expect("presentation task");
    assert!(presentation.participants.contains(&"Maria".to_string()));
    let friday = presentation.deadline.expect("deadline resolved from 'Freitag'");
    assert_eq!(friday.weekday(), Weekday::Fri);
    assert!(friday >= reference, "deadline must not lie in the past");
    assert!((friday - reference).num_days() < 7);
}

#[tokio::test]
async fn every_task_satisfies_the_score_invariants() {
    init_tracing();
    let generator = TodoGenerator::new();
    let documents = [
        "Bitte erledige das Budget-Review dringend heute.",
        "Kaufe morgen Milch und Brot. Danach die Wohnung putzen.",
        "Prepare the quarterly report, then review the budget draft. \
         Call Anna Schmidt about the urgent contract before Friday.",
        "Das Projekt Alpha planen und das Projekt Beta dokumentieren, sofort!",
        "täglich 30 Minuten trainieren und wöchentlich den Bericht schreiben",
    ];

    for document in documents {
        let analysis = generator.generate(document, &monday_context()).await;
        for task in &analysis.extracted_tasks {
            assert!(
                (0.0..=1.0).contains(&task.urgency_score),
                "urgency out of bounds for '{}': {}",
                task.title,
                task.urgency_score
            );
            assert!(
                (0.0..=1.0).contains(&task.completion_probability),
                "probability out of bounds for '{}': {}",
                task.title,
                task.completion_probability
            );
            assert_eq!(
                task.priority,
                TaskPriority::derive(task.urgency_score, task.category),
                "priority inconsistent with derivation for '{}'",
                task.title
            );
        }
    }
}

#[tokio::test]
async fn pipeline_output_is_already_fully_merged() {
    init_tracing();
    let generator = TodoGenerator::new();
    let analysis = generator
        .generate(
            "Bitte das Projekt X fertigstellen. Das Projekt X bitte nächste Woche fertigstellen.",
            &monday_context(),
        )
        .await;

    let deduplicator = Deduplicator::new();
    let remerged = deduplicator.merge(analysis.extracted_tasks.clone());
    assert_eq!(
        analysis.extracted_tasks.len(),
        remerged.len(),
        "a second dedup pass must not find further merges"
    );
}

#[tokio::test]
async fn prose_without_directives_produces_no_tasks() {
    init_tracing();
    let generator = TodoGenerator::new();
    let analysis = generator
        .generate(
            "Der Himmel war gestern blau und die Sonne schien den ganzen Tag über der Stadt.",
            &monday_context(),
        )
        .await;
    assert!(analysis.extracted_tasks.is_empty());
    assert!(analysis.time_estimates.is_empty());
}

#[tokio::test]
async fn weekday_tasks_surface_a_weekly_recurrence_pattern() {
    init_tracing();
    let generator = TodoGenerator::new();
    let analysis = generator
        .generate(
            "Maria soll die Präsentation für Freitag vorbereiten.",
            &monday_context(),
        )
        .await;

    let recurring = analysis
        .patterns
        .iter()
        .find(|pattern| pattern.kind == PatternKind::Recurring)
        .expect("weekly recurrence cluster");
    assert!(recurring.frequency > 0.0);
    assert!(recurring.frequency <= 1.0);
    assert!(!recurring.task_ids.is_empty());
}

#[tokio::test]
async fn dependencies_reference_tasks_of_the_same_batch() {
    init_tracing();
    let generator = TodoGenerator::new();
    let analysis = generator
        .generate(
            "Prepare the budget draft for review. Then prepare the budget summary now.",
            &monday_context(),
        )
        .await;

    let ids: Vec<_> = analysis.extracted_tasks.iter().map(|t| t.id).collect();
    for task in &analysis.extracted_tasks {
        for dependency in &task.dependencies {
            assert!(
                ids.contains(dependency),
                "dependency {} of '{}' points outside the batch",
                dependency,
                task.title
            );
            assert_ne!(*dependency, task.id, "task depends on itself");
        }
    }
}
