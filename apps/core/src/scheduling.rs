//! Calendar slot suggestion for extracted tasks.
//!
//! A downstream consumer of the task contract, not part of the extraction
//! pipeline itself: given deadline-bearing tasks and a date range, it packs
//! each task into the next free working-hours slot, skipping conflicts with
//! existing calendar events.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AnalysisContext, Task, WorkingHours};

/// A proposed time slot for one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSuggestion {
    pub task_id: Uuid,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `(urgency score + priority weight) / 2`.
    pub confidence: f32,
}

/// Suggests one slot per deadline-bearing task within the given range.
///
/// Tasks are placed in deadline order. Tasks without a deadline, and tasks
/// that cannot fit into the range or into a single working day, are left
/// without a suggestion.
pub fn suggest_slots(
    tasks: &[Task],
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    ctx: &AnalysisContext,
) -> Result<Vec<SlotSuggestion>, EngineError> {
    ctx.validate()?;
    if range_start >= range_end {
        return Err(EngineError::Validation(
            "slot suggestion range is empty".to_string(),
        ));
    }
    let hours = ctx.working_hours.clone().unwrap_or_default();
    let working_day =
        Duration::hours(i64::from(hours.end_hour) - i64::from(hours.start_hour));

    let mut pending: Vec<&Task> = tasks.iter().filter(|task| task.deadline.is_some()).collect();
    pending.sort_by_key(|task| task.deadline);
    debug!(
        "suggesting slots for {} of {} task(s)",
        pending.len(),
        tasks.len()
    );

    let mut suggestions = Vec::new();
    let mut cursor = range_start;
    for task in pending {
        let duration = Duration::seconds(task.estimated_duration_secs as i64);
        if duration > working_day {
            warn!(
                "task '{}' does not fit into a single working day, skipping",
                task.title
            );
            continue;
        }

        let mut slot_start = align_to_working_hours(cursor, &hours);
        let placed = loop {
            if slot_start + duration > range_end {
                break None;
            }
            if slot_start + duration > day_at(slot_start, hours.end_hour) {
                slot_start = day_at(slot_start + Duration::days(1), hours.start_hour);
                continue;
            }
            let slot_end = slot_start + duration;
            if let Some(conflict) = ctx
                .calendar_events
                .iter()
                .find(|event| event.start < slot_end && slot_start < event.end)
            {
                slot_start = align_to_working_hours(conflict.end, &hours);
                continue;
            }
            break Some(slot_start);
        };

        match placed {
            Some(start) => {
                let confidence = (task.urgency_score + task.priority.weight()) / 2.0;
                suggestions.push(SlotSuggestion {
                    task_id: task.id,
                    title: task.title.clone(),
                    start,
                    end: start + duration,
                    confidence,
                });
                cursor = start + duration;
            }
            None => warn!("no free slot for task '{}' within the range", task.title),
        }
    }

    Ok(suggestions)
}

/// Moves a point in time forward to the next working-hours window.
fn align_to_working_hours(at: DateTime<Utc>, hours: &WorkingHours) -> DateTime<Utc> {
    let day_start = day_at(at, hours.start_hour);
    let day_end = day_at(at, hours.end_hour);
    if at < day_start {
        day_start
    } else if at >= day_end {
        day_at(at + Duration::days(1), hours.start_hour)
    } else {
        at
    }
}

fn day_at(at: DateTime<Utc>, hour: u8) -> DateTime<Utc> {
    at.date_naive()
        .and_hms_opt(u32::from(hour), 0, 0)
        .expect("hour is validated to lie within 0-23")
        .and_utc()
}
