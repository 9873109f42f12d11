//! Lexicon tables for the extraction pipeline.
//!
//! Pure data, no behavior beyond lookups. Every keyword the pipeline reacts
//! to lives here so language packs can be swapped without touching algorithm
//! code. The builtin store ships German and English entries side by side.

use std::collections::HashSet;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::{RecurrencePattern, TaskCategory};

/// Urgency keyword to score. No stemming is applied downstream, so inflected
/// forms that should match must be listed separately.
const URGENCY_KEYWORDS: &[(&str, f32)] = &[
    ("sofort", 1.0),
    ("immediately", 1.0),
    ("asap", 0.95),
    ("schnellstmöglich", 0.95),
    ("dringend", 0.9),
    ("urgent", 0.9),
    ("kritisch", 0.9),
    ("critical", 0.9),
    ("eilig", 0.85),
    ("deadline", 0.8),
    ("frist", 0.8),
    ("spätestens", 0.75),
    ("wichtig", 0.7),
    ("important", 0.7),
    ("priorität", 0.7),
    ("priority", 0.7),
];

/// Category keywords, matched as substrings over the whole candidate.
/// Order matters: the first matching entry wins.
const CATEGORY_KEYWORDS: &[(&str, TaskCategory)] = &[
    ("meeting", TaskCategory::Meeting),
    ("besprechung", TaskCategory::Meeting),
    ("konferenz", TaskCategory::Meeting),
    ("standup", TaskCategory::Meeting),
    ("sitzung", TaskCategory::Meeting),
    ("notfall", TaskCategory::Urgent),
    ("emergency", TaskCategory::Urgent),
    ("sofort", TaskCategory::Urgent),
    ("dringend", TaskCategory::Urgent),
    ("urgent", TaskCategory::Urgent),
    ("asap", TaskCategory::Urgent),
    ("arzt", TaskCategory::Health),
    ("doctor", TaskCategory::Health),
    ("zahnarzt", TaskCategory::Health),
    ("apotheke", TaskCategory::Health),
    ("medikament", TaskCategory::Health),
    ("workout", TaskCategory::Health),
    ("training", TaskCategory::Health),
    ("impfung", TaskCategory::Health),
    ("einkaufen", TaskCategory::Shopping),
    ("besorgen", TaskCategory::Shopping),
    ("bestellen", TaskCategory::Shopping),
    ("kaufen", TaskCategory::Shopping),
    ("shopping", TaskCategory::Shopping),
    ("putzen", TaskCategory::Home),
    ("aufräumen", TaskCategory::Home),
    ("reparieren", TaskCategory::Home),
    ("haushalt", TaskCategory::Home),
    ("wäsche", TaskCategory::Home),
    ("laundry", TaskCategory::Home),
    ("garten", TaskCategory::Home),
    ("projekt", TaskCategory::Project),
    ("project", TaskCategory::Project),
    ("milestone", TaskCategory::Project),
    ("meilenstein", TaskCategory::Project),
    ("sprint", TaskCategory::Project),
    ("release", TaskCategory::Project),
    ("budget", TaskCategory::Work),
    ("review", TaskCategory::Work),
    ("bericht", TaskCategory::Work),
    ("report", TaskCategory::Work),
    ("präsentation", TaskCategory::Work),
    ("presentation", TaskCategory::Work),
    ("kunde", TaskCategory::Work),
    ("client", TaskCategory::Work),
    ("rechnung", TaskCategory::Work),
    ("invoice", TaskCategory::Work),
    ("vertrag", TaskCategory::Work),
    ("contract", TaskCategory::Work),
    ("e-mail", TaskCategory::Work),
    ("email", TaskCategory::Work),
    ("büro", TaskCategory::Work),
    ("office", TaskCategory::Work),
    ("geburtstag", TaskCategory::Personal),
    ("birthday", TaskCategory::Personal),
    ("familie", TaskCategory::Personal),
    ("family", TaskCategory::Personal),
    ("urlaub", TaskCategory::Personal),
    ("vacation", TaskCategory::Personal),
];

/// Fallback hints, matched against single tokens by equality when no
/// substring keyword applies.
const CATEGORY_HINTS: &[(&str, TaskCategory)] = &[
    ("termin", TaskCategory::Meeting),
    ("call", TaskCategory::Meeting),
    ("arbeit", TaskCategory::Work),
    ("work", TaskCategory::Work),
    ("chef", TaskCategory::Work),
    ("boss", TaskCategory::Work),
    ("buy", TaskCategory::Shopping),
    ("supermarkt", TaskCategory::Shopping),
    ("gym", TaskCategory::Health),
    ("sport", TaskCategory::Health),
    ("zuhause", TaskCategory::Home),
    ("home", TaskCategory::Home),
];

/// Time-unit keyword to minutes. Units of three or more characters also
/// match as prefixes ("stunden" matches via "stunde"); shorter units match
/// exactly so "h" cannot swallow arbitrary words.
const TIME_UNITS: &[(&str, u64)] = &[
    ("minuten", 1),
    ("minutes", 1),
    ("minute", 1),
    ("mins", 1),
    ("min", 1),
    ("stunden", 60),
    ("stunde", 60),
    ("hours", 60),
    ("hour", 60),
    ("hrs", 60),
    ("std", 60),
    ("h", 60),
    ("tage", 1440),
    ("tagen", 1440),
    ("tag", 1440),
    ("days", 1440),
    ("day", 1440),
    ("wochen", 10080),
    ("woche", 10080),
    ("weeks", 10080),
    ("week", 10080),
];

/// Qualitative duration keyword to minutes.
const QUALITATIVE_DURATIONS: &[(&str, u64)] = &[
    ("quick", 15),
    ("schnell", 15),
    ("kurz", 15),
    ("briefly", 15),
    ("short", 30),
    ("complex", 480),
    ("komplex", 480),
    ("aufwendig", 480),
    ("umfangreich", 480),
    ("ausführlich", 240),
    ("gründlich", 240),
    ("detailed", 240),
];

const STOPWORDS_DE: &[&str] = &[
    "der", "die", "das", "den", "dem", "des", "ein", "eine", "einen", "einem", "einer", "eines",
    "und", "oder", "aber", "auch", "noch", "nur", "schon", "sehr", "nicht", "kein", "keine",
    "ich", "du", "er", "sie", "es", "wir", "ihr", "man", "mich", "dich", "sich", "uns", "euch",
    "mir", "dir", "ihm", "ihnen", "mein", "dein", "sein", "unser", "euer", "meine", "deine",
    "für", "mit", "von", "zu", "zur", "zum", "im", "in", "an", "am", "auf", "aus", "bei", "nach",
    "vor", "über", "unter", "um", "durch", "gegen", "ohne", "bis", "seit", "ab",
    "ist", "sind", "war", "waren", "wird", "werden", "wurde", "wurden", "haben", "hat", "hatte",
    "hatten", "kann", "können", "könnte", "muss", "müssen", "musste", "soll", "sollen", "sollte",
    "will", "wollen", "wollte", "mag", "möchte", "darf", "dürfen",
    "wenn", "dann", "als", "wie", "wo", "was", "wer", "warum", "weil", "dass", "ob", "doch",
    "ja", "nein", "bitte", "danke", "hier", "da", "dort", "dies", "diese", "dieser", "dieses",
    "jetzt", "mal", "etwas", "alle", "alles", "viel", "mehr", "weniger", "gut", "neu",
    "heute", "morgen", "gestern", "übermorgen", "nächste", "nächsten", "nächster", "kommende",
    "woche", "monat", "jahr", "danach", "anschließend", "nachdem",
    "montag", "dienstag", "mittwoch", "donnerstag", "freitag", "samstag", "sonntag",
];

const STOPWORDS_EN: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "else", "when", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "once", "here", "there", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "can", "will", "just", "should", "now", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing",
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
    "your", "his", "its", "our", "their", "this", "that", "these", "those", "what", "which",
    "who", "whom", "please", "today", "tomorrow", "yesterday", "next", "week", "month", "year",
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

/// Action verbs, matched against single lowercased tokens by equality.
/// Inflected forms that should trigger extraction are listed separately.
const ACTION_VERBS: &[&str] = &[
    // German
    "erledige", "erledigen", "erledigt", "vorbereiten", "bereite", "erstellen", "erstelle",
    "schreiben", "schreibe", "schreib", "senden", "sende", "schicken", "schicke", "prüfen",
    "prüfe", "überprüfen", "planen", "plane", "organisieren", "organisiere", "kaufen", "kaufe",
    "anrufen", "besprechen", "bespreche", "klären", "kläre", "fertigstellen", "abschließen",
    "überarbeiten", "korrigieren", "buchen", "buche", "vereinbaren", "aktualisieren",
    "einreichen", "abgeben", "beantworten", "antworten", "recherchieren", "testen", "teste",
    "installieren", "dokumentieren", "lesen",
    // English
    "finish", "complete", "prepare", "create", "write", "send", "review", "check", "plan",
    "organize", "buy", "call", "discuss", "clarify", "schedule", "book", "fix", "update",
    "submit", "read", "answer", "reply", "research", "test", "install", "document", "draft",
];

/// Modal and auxiliary forms signaling a directive.
const IMPERATIVE_MARKERS: &[&str] = &[
    "soll", "sollst", "sollte", "sollten", "sollen", "muss", "musst", "müssen", "müsst",
    "bitte", "unbedingt", "should", "must", "need", "needs", "shall", "please",
];

/// First and second person pronouns, appended as weak participant signals.
const PRONOUNS: &[&str] = &["ich", "du", "wir", "i", "you", "we"];

/// Explicit recurrence expressions, matched as substrings over the candidate.
const RECURRENCE_KEYWORDS: &[(&str, RecurrencePattern)] = &[
    ("every day", RecurrencePattern::Daily),
    ("jeden tag", RecurrencePattern::Daily),
    ("daily", RecurrencePattern::Daily),
    ("täglich", RecurrencePattern::Daily),
    ("every week", RecurrencePattern::Weekly),
    ("jede woche", RecurrencePattern::Weekly),
    ("weekly", RecurrencePattern::Weekly),
    ("wöchentlich", RecurrencePattern::Weekly),
    ("every month", RecurrencePattern::Monthly),
    ("jeden monat", RecurrencePattern::Monthly),
    ("monthly", RecurrencePattern::Monthly),
    ("monatlich", RecurrencePattern::Monthly),
    ("every year", RecurrencePattern::Yearly),
    ("jedes jahr", RecurrencePattern::Yearly),
    ("yearly", RecurrencePattern::Yearly),
    ("annually", RecurrencePattern::Yearly),
    ("jährlich", RecurrencePattern::Yearly),
];

/// Relative-day expressions: phrase, day offset from "now", confidence.
/// Multi-word phrases are matched before their single-word prefixes.
const RELATIVE_DAYS: &[(&str, i64, f32)] = &[
    ("day after tomorrow", 2, 0.9),
    ("übermorgen", 2, 0.9),
    ("nächste woche", 7, 0.7),
    ("kommende woche", 7, 0.7),
    ("next week", 7, 0.7),
    ("heute", 0, 0.9),
    ("today", 0, 0.9),
    ("morgen", 1, 0.9),
    ("tomorrow", 1, 0.9),
];

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("montag", Weekday::Mon),
    ("monday", Weekday::Mon),
    ("dienstag", Weekday::Tue),
    ("tuesday", Weekday::Tue),
    ("mittwoch", Weekday::Wed),
    ("wednesday", Weekday::Wed),
    ("donnerstag", Weekday::Thu),
    ("thursday", Weekday::Thu),
    ("freitag", Weekday::Fri),
    ("friday", Weekday::Fri),
    ("samstag", Weekday::Sat),
    ("saturday", Weekday::Sat),
    ("sonntag", Weekday::Sun),
    ("sunday", Weekday::Sun),
];

/// Sequencing language that marks a task as depending on another.
const SEQUENCE_MARKERS: &[&str] = &[
    "after", "then", "subsequently", "danach", "dann", "anschließend", "anschliessend",
    "nachdem",
];

/// Owned keyword tables a store is built from. `Default` yields the builtin
/// German and English pack; hosts may construct their own to swap languages.
#[derive(Debug, Clone)]
pub struct LexiconTables {
    pub urgency: Vec<(String, f32)>,
    pub categories: Vec<(String, TaskCategory)>,
    pub category_hints: Vec<(String, TaskCategory)>,
    pub time_units: Vec<(String, u64)>,
    pub qualitative_durations: Vec<(String, u64)>,
    pub stopwords: Vec<String>,
    pub action_verbs: Vec<String>,
    pub imperative_markers: Vec<String>,
    pub pronouns: Vec<String>,
    pub recurrence: Vec<(String, RecurrencePattern)>,
    pub relative_days: Vec<(String, i64, f32)>,
    pub weekdays: Vec<(String, Weekday)>,
    pub sequence_markers: Vec<String>,
}

impl Default for LexiconTables {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            urgency: URGENCY_KEYWORDS
                .iter()
                .map(|(k, s)| (k.to_string(), *s))
                .collect(),
            categories: CATEGORY_KEYWORDS
                .iter()
                .map(|(k, c)| (k.to_string(), *c))
                .collect(),
            category_hints: CATEGORY_HINTS
                .iter()
                .map(|(k, c)| (k.to_string(), *c))
                .collect(),
            time_units: TIME_UNITS
                .iter()
                .map(|(k, m)| (k.to_string(), *m))
                .collect(),
            qualitative_durations: QUALITATIVE_DURATIONS
                .iter()
                .map(|(k, m)| (k.to_string(), *m))
                .collect(),
            stopwords: STOPWORDS_DE
                .iter()
                .chain(STOPWORDS_EN.iter())
                .map(|s| s.to_string())
                .collect(),
            action_verbs: owned(ACTION_VERBS),
            imperative_markers: owned(IMPERATIVE_MARKERS),
            pronouns: owned(PRONOUNS),
            recurrence: RECURRENCE_KEYWORDS
                .iter()
                .map(|(k, p)| (k.to_string(), *p))
                .collect(),
            relative_days: RELATIVE_DAYS
                .iter()
                .map(|(k, d, c)| (k.to_string(), *d, *c))
                .collect(),
            weekdays: WEEKDAYS
                .iter()
                .map(|(k, w)| (k.to_string(), *w))
                .collect(),
            sequence_markers: owned(SEQUENCE_MARKERS),
        }
    }
}

/// Result of a single lexicon self-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconCheck {
    pub name: String,
    pub passed: bool,
    pub message: String,
}

impl LexiconCheck {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
        }
    }

    fn fail(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
        }
    }
}

/// Complete lexicon verification report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconReport {
    pub all_passed: bool,
    pub checks: Vec<LexiconCheck>,
}

/// Read-only keyword knowledge shared by all pipeline stages.
///
/// Constructed once and passed by reference (or behind an `Arc`); safe to
/// share across concurrent invocations without locking.
#[derive(Debug, Clone)]
pub struct LexiconStore {
    urgency: Vec<(String, f32)>,
    categories: Vec<(String, TaskCategory)>,
    category_hints: Vec<(String, TaskCategory)>,
    time_units: Vec<(String, u64)>,
    qualitative_durations: Vec<(String, u64)>,
    stopwords: HashSet<String>,
    action_verbs: HashSet<String>,
    imperative_markers: HashSet<String>,
    pronouns: Vec<String>,
    recurrence: Vec<(String, RecurrencePattern)>,
    /// Phrases pre-split into words, longest phrase first.
    relative_days: Vec<(Vec<String>, i64, f32)>,
    weekdays: Vec<(String, Weekday)>,
    sequence_markers: HashSet<String>,
}

impl Default for LexiconStore {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LexiconStore {
    /// The builtin German and English keyword pack.
    pub fn builtin() -> Self {
        Self::from_tables(LexiconTables::default())
    }

    /// Builds a store from custom tables (e.g., another language pack).
    pub fn from_tables(tables: LexiconTables) -> Self {
        let mut relative_days: Vec<(Vec<String>, i64, f32)> = tables
            .relative_days
            .into_iter()
            .map(|(phrase, offset, confidence)| {
                let words = phrase
                    .to_lowercase()
                    .split_whitespace()
                    .map(|w| w.to_string())
                    .collect::<Vec<_>>();
                (words, offset, confidence)
            })
            .collect();
        // Longest phrase first so "day after tomorrow" wins over "tomorrow".
        relative_days.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let lower_set =
            |items: Vec<String>| items.into_iter().map(|s| s.to_lowercase()).collect();

        Self {
            urgency: tables.urgency,
            categories: tables.categories,
            category_hints: tables.category_hints,
            time_units: tables.time_units,
            qualitative_durations: tables.qualitative_durations,
            stopwords: lower_set(tables.stopwords),
            action_verbs: lower_set(tables.action_verbs),
            imperative_markers: lower_set(tables.imperative_markers),
            pronouns: tables.pronouns,
            recurrence: tables.recurrence,
            relative_days,
            weekdays: tables
                .weekdays
                .into_iter()
                .map(|(k, w)| (k.to_lowercase(), w))
                .collect(),
            sequence_markers: lower_set(tables.sequence_markers),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Expects an already lowercased token.
    pub fn is_action_verb(&self, word: &str) -> bool {
        self.action_verbs.contains(word)
    }

    /// Expects an already lowercased token.
    pub fn is_imperative_marker(&self, word: &str) -> bool {
        self.imperative_markers.contains(word)
    }

    /// Expects an already lowercased token.
    pub fn is_sequence_marker(&self, word: &str) -> bool {
        self.sequence_markers.contains(word)
    }

    pub fn pronouns(&self) -> &[String] {
        &self.pronouns
    }

    pub fn urgency_entries(&self) -> &[(String, f32)] {
        &self.urgency
    }

    pub fn category_entries(&self) -> &[(String, TaskCategory)] {
        &self.categories
    }

    pub fn category_hints(&self) -> &[(String, TaskCategory)] {
        &self.category_hints
    }

    pub fn recurrence_entries(&self) -> &[(String, RecurrencePattern)] {
        &self.recurrence
    }

    pub fn relative_day_entries(&self) -> &[(Vec<String>, i64, f32)] {
        &self.relative_days
    }

    pub fn weekday_entries(&self) -> &[(String, Weekday)] {
        &self.weekdays
    }

    /// Resolves a time-unit token to minutes.
    pub fn time_unit_minutes(&self, unit: &str) -> Option<u64> {
        let unit = unit.to_lowercase();
        self.time_units
            .iter()
            .find(|(keyword, _)| {
                unit == *keyword || (keyword.chars().count() >= 3 && unit.starts_with(keyword))
            })
            .map(|(_, minutes)| *minutes)
    }

    /// Finds the first qualitative duration keyword contained in the text.
    /// Expects lowercased input.
    pub fn qualitative_minutes(&self, text: &str) -> Option<u64> {
        self.qualitative_durations
            .iter()
            .find(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, minutes)| *minutes)
    }

    /// Structural self-check of the loaded tables. Never called implicitly by
    /// the pipeline; hosts may run it once at startup.
    pub fn verify(&self) -> LexiconReport {
        let mut checks = Vec::new();

        let non_empty: &[(&str, bool)] = &[
            ("urgency", self.urgency.is_empty()),
            ("categories", self.categories.is_empty()),
            ("time_units", self.time_units.is_empty()),
            ("stopwords", self.stopwords.is_empty()),
            ("action_verbs", self.action_verbs.is_empty()),
            ("imperative_markers", self.imperative_markers.is_empty()),
            ("relative_days", self.relative_days.is_empty()),
            ("weekdays", self.weekdays.is_empty()),
        ];
        for (name, empty) in non_empty {
            if *empty {
                checks.push(LexiconCheck::fail(name, "table is empty"));
            } else {
                checks.push(LexiconCheck::pass(name, "table loaded"));
            }
        }

        if let Some((keyword, score)) = self
            .urgency
            .iter()
            .find(|(_, score)| !(0.0..=1.0).contains(score))
        {
            checks.push(LexiconCheck::fail(
                "urgency_scores",
                &format!("score {} for '{}' outside [0, 1]", score, keyword),
            ));
        } else {
            checks.push(LexiconCheck::pass("urgency_scores", "all within [0, 1]"));
        }

        if let Some((keyword, _)) = self.time_units.iter().find(|(_, minutes)| *minutes == 0) {
            checks.push(LexiconCheck::fail(
                "time_unit_minutes",
                &format!("unit '{}' resolves to zero minutes", keyword),
            ));
        } else {
            checks.push(LexiconCheck::pass("time_unit_minutes", "all positive"));
        }

        let all_passed = checks.iter().all(|check| check.passed);
        LexiconReport { all_passed, checks }
    }
}
