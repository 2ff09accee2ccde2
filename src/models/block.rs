use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An explicitly closed-off span on a specific date. Rows are created
/// one-off or expanded from a recurring spec; they are deleted to unblock,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedInterval {
    pub id: String,
    pub provider_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub kind: BlockKind,
    pub title: Option<String>,
    pub recurrence_pattern: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Blocked,
    Break,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Blocked => "blocked",
            BlockKind::Break => "break",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "break" => BlockKind::Break,
            _ => BlockKind::Blocked,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    Single,
    Daily,
    Weekly,
    Weekdays,
    Weekends,
    Custom,
}

impl RecurrencePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrencePattern::Single => "single",
            RecurrencePattern::Daily => "daily",
            RecurrencePattern::Weekly => "weekly",
            RecurrencePattern::Weekdays => "weekdays",
            RecurrencePattern::Weekends => "weekends",
            RecurrencePattern::Custom => "custom",
        }
    }
}

/// Caller-supplied specification for blocking time, possibly recurring.
/// `end_date` is ignored for `single`; `days` (0=Sunday .. 6=Saturday) is
/// only consulted for `custom`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockSpec {
    pub pattern: RecurrencePattern,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub kind: Option<BlockKind>,
    pub title: Option<String>,
    pub days: Option<Vec<u8>>,
}
