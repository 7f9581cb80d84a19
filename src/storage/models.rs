//! Data model for the reflection log.
//!
//! These types mirror the on-disk `log.json` document. Field names are
//! serialized in camelCase so existing logs stay readable.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::session::QuestionKey;

/// Schema tag written into every log.
pub const LOG_VERSION: &str = "1.0";

/// The full contents of `log.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionLog {
    /// Schema version tag (currently "1.0").
    pub version: String,

    /// Entries in append order, oldest first.
    pub entries: Vec<LogEntry>,

    /// Summary statistics.
    pub stats: LogStats,

    /// Keys this version does not know about, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReflectionLog {
    /// Creates an empty log whose project start date is today (UTC).
    pub fn new() -> Self {
        Self {
            version: LOG_VERSION.to_string(),
            entries: Vec::new(),
            stats: LogStats {
                total_commits: 0,
                project_start_date: Utc::now().date_naive(),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// Appends an entry and recomputes the cached commit count.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
        self.stats.total_commits = self.entries.len();
    }

    /// The most recently appended entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.last()
    }
}

impl Default for ReflectionLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics stored alongside the entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStats {
    /// Cached `entries.len()`; rewritten on every append.
    pub total_commits: usize,

    /// Date of the first write to this log.
    pub project_start_date: NaiveDate,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One reflection, recorded for a single commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// When the entry was created, with millisecond precision.
    pub timestamp: DateTime<Utc>,

    /// Calendar date of `timestamp`.
    pub date: NaiveDate,

    /// Branch being committed to.
    pub branch_name: String,

    /// First line of the commit message.
    pub commit_message: String,

    /// Answers to the reflection questions.
    pub answers: Answers,

    /// Unknown keys of an entry read from disk.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LogEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(branch_name: impl Into<String>, commit_message: impl Into<String>, answers: Answers) -> Self {
        Self::at(Utc::now(), branch_name, commit_message, answers)
    }

    /// Creates an entry stamped with `now`.
    ///
    /// The timestamp is cut to milliseconds so an entry compares equal to
    /// itself after a trip through `log.json`.
    pub fn at(
        now: DateTime<Utc>,
        branch_name: impl Into<String>,
        commit_message: impl Into<String>,
        answers: Answers,
    ) -> Self {
        let timestamp = now.trunc_subsecs(3);
        Self {
            timestamp,
            date: timestamp.date_naive(),
            branch_name: branch_name.into(),
            commit_message: commit_message.into(),
            answers,
            extra: Map::new(),
        }
    }
}

/// Answers to the seven reflection questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answers {
    pub intent: String,
    pub problem_solved: String,
    pub learned: String,
    pub would_do_differently: String,
    pub confidence: String,
    pub testing: String,
    pub technical_debt: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Answers {
    /// Returns the answer for `key`.
    pub fn get(&self, key: QuestionKey) -> &str {
        match key {
            QuestionKey::Intent => &self.intent,
            QuestionKey::ProblemSolved => &self.problem_solved,
            QuestionKey::Learned => &self.learned,
            QuestionKey::WouldDoDifferently => &self.would_do_differently,
            QuestionKey::Confidence => &self.confidence,
            QuestionKey::Testing => &self.testing,
            QuestionKey::TechnicalDebt => &self.technical_debt,
        }
    }

    /// Stores the answer for `key`.
    pub fn set(&mut self, key: QuestionKey, answer: impl Into<String>) {
        let slot = match key {
            QuestionKey::Intent => &mut self.intent,
            QuestionKey::ProblemSolved => &mut self.problem_solved,
            QuestionKey::Learned => &mut self.learned,
            QuestionKey::WouldDoDifferently => &mut self.would_do_differently,
            QuestionKey::Confidence => &mut self.confidence,
            QuestionKey::Testing => &mut self.testing,
            QuestionKey::TechnicalDebt => &mut self.technical_debt,
        };
        *slot = answer.into();
    }

    /// True when every question has a non-blank answer.
    pub fn is_complete(&self) -> bool {
        QuestionKey::all()
            .iter()
            .all(|key| !self.get(*key).trim().is_empty())
    }
}
