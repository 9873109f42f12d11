//! Export producers for extracted task lists.
//!
//! Pure serializers over `&[Task]`: JSON, CSV, iCalendar (VTODO) and
//! Markdown. Writing the result anywhere is the caller's concern.

use tracing::debug;

use crate::error::EngineError;
use crate::models::{Task, TaskPriority};

/// `yyyyMMdd'T'HHmmss'Z'`, the timestamp form used in VTODO DUE fields.
const ICAL_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Serializes tasks as pretty-printed JSON.
pub fn to_json(tasks: &[Task]) -> Result<String, EngineError> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Serializes tasks as CSV with RFC 4180 quoting.
pub fn to_csv(tasks: &[Task]) -> String {
    let mut out = String::from(
        "id,title,category,priority,urgency_score,estimated_duration_secs,deadline,completion_probability,participants,tags\n",
    );
    for task in tasks {
        let deadline = task
            .deadline
            .map(|deadline| deadline.to_rfc3339())
            .unwrap_or_default();
        let row = [
            task.id.to_string(),
            csv_field(&task.title),
            task.category.label().to_string(),
            task.priority.label().to_string(),
            format!("{:.2}", task.urgency_score),
            task.estimated_duration_secs.to_string(),
            deadline,
            format!("{:.2}", task.completion_probability),
            csv_field(&task.participants.join("; ")),
            csv_field(&task.tags.join("; ")),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    debug!("exported {} task(s) as CSV", tasks.len());
    out
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Serializes tasks as an iCalendar document with one VTODO per task.
///
/// Priorities map to the RFC 5545 scale: critical 1, high 5, medium 7,
/// low 9.
pub fn to_ical(tasks: &[Task]) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//NoteFlow//Todo Generator//EN".to_string(),
    ];
    for task in tasks {
        lines.push("BEGIN:VTODO".to_string());
        lines.push(format!("UID:{}", task.id));
        lines.push(format!("SUMMARY:{}", ical_escape(&task.title)));
        let description = task.source_text.as_deref().unwrap_or(&task.title);
        lines.push(format!("DESCRIPTION:{}", ical_escape(description)));
        lines.push(format!("PRIORITY:{}", ical_priority(task.priority)));
        if let Some(deadline) = task.deadline {
            lines.push(format!("DUE:{}", deadline.format(ICAL_DATE_FORMAT)));
        }
        let status = if task.completed {
            "COMPLETED"
        } else {
            "NEEDS-ACTION"
        };
        lines.push(format!("STATUS:{}", status));
        lines.push("END:VTODO".to_string());
    }
    lines.push("END:VCALENDAR".to_string());
    debug!("exported {} task(s) as iCalendar", tasks.len());
    // RFC 5545 mandates CRLF line endings.
    lines.join("\r\n") + "\r\n"
}

fn ical_priority(priority: TaskPriority) -> u8 {
    match priority {
        TaskPriority::Critical => 1,
        TaskPriority::High => 5,
        TaskPriority::Medium => 7,
        TaskPriority::Low => 9,
    }
}

fn ical_escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Serializes tasks as a Markdown checklist grouped by priority.
pub fn to_markdown(tasks: &[Task]) -> String {
    let mut out = String::from("# Tasks\n");
    for priority in [
        TaskPriority::Critical,
        TaskPriority::High,
        TaskPriority::Medium,
        TaskPriority::Low,
    ] {
        let group: Vec<&Task> = tasks
            .iter()
            .filter(|task| task.priority == priority)
            .collect();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!("\n## {}\n\n", heading(priority)));
        for task in group {
            let checkbox = if task.completed { "x" } else { " " };
            let mut details = vec![
                task.category.label().to_string(),
                format!("~{}", format_duration(task.estimated_duration_secs)),
            ];
            if let Some(deadline) = task.deadline {
                details.push(format!("due {}", deadline.format("%Y-%m-%d")));
            }
            out.push_str(&format!(
                "- [{}] {} ({})\n",
                checkbox,
                task.title,
                details.join(", ")
            ));
        }
    }
    out
}

fn heading(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Critical => "Critical",
        TaskPriority::High => "High",
        TaskPriority::Medium => "Medium",
        TaskPriority::Low => "Low",
    }
}

fn format_duration(secs: u64) -> String {
    let minutes = secs / 60;
    if minutes >= 60 && minutes % 60 == 0 {
        format!("{} h", minutes / 60)
    } else {
        format!("{} min", minutes)
    }
}
