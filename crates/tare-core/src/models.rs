//! Domain models for tare
//!
//! Field names on the serde-visible types are the wire contract of the
//! original spreadsheet backend and must not be renamed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A profile under which weight entries are grouped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique, case-sensitive, immutable once created
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    /// Height in centimeters; BMI is not computable without it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Target weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl User {
    /// Create a user with the current timestamp and no optional fields
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            created_at: Utc::now(),
            height_cm: None,
            target_weight: None,
            notes: None,
        }
    }
}

/// One dated weight measurement for a profile
///
/// At most one entry exists per (user_name, date) pair; saving an existing
/// pair overwrites weight and note in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub user_name: String,
    /// Calendar date, day granularity (serialized as YYYY-MM-DD)
    pub date: NaiveDate,
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Derived statistics snapshot, recomputed from the full entry list on
/// every view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Weight of the latest entry by date
    pub current: f64,
    /// Weight of the earliest entry by date
    pub start: f64,
    /// current - start, rounded to 2 decimals
    pub change: f64,
    /// 0.0 when height is absent or non-positive
    pub bmi: f64,
    #[serde(rename = "weeklyAvg")]
    pub weekly_avg: f64,
    #[serde(rename = "monthlyAvg")]
    pub monthly_avg: f64,
    /// Percentage in [0, 100], or None when no target weight is set
    /// (serialized as null, never omitted)
    #[serde(rename = "goalProgress")]
    pub goal_progress: Option<f64>,
}

impl Stats {
    /// The defined empty state for a user with no entries
    pub fn empty() -> Self {
        Self {
            current: 0.0,
            start: 0.0,
            change: 0.0,
            bmi: 0.0,
            weekly_avg: 0.0,
            monthly_avg: 0.0,
            goal_progress: None,
        }
    }
}

/// Time window for filtering entries (the analytics view's range selector)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "30days")]
    Last30Days,
    All,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last7Days => "7days",
            Self::Last30Days => "30days",
            Self::All => "all",
        }
    }

    /// Earliest date (inclusive) kept by this range, relative to `today`
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Last7Days => Some(today - chrono::Duration::days(7)),
            Self::Last30Days => Some(today - chrono::Duration::days(30)),
            Self::All => None,
        }
    }

    /// Keep only entries within this range, relative to `today`
    pub fn filter(&self, entries: &[WeightEntry], today: NaiveDate) -> Vec<WeightEntry> {
        match self.cutoff(today) {
            Some(cutoff) => entries
                .iter()
                .filter(|e| e.date >= cutoff)
                .cloned()
                .collect(),
            None => entries.to_vec(),
        }
    }
}

impl std::str::FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "7d" | "7days" => Ok(Self::Last7Days),
            "30d" | "30days" => Ok(Self::Last30Days),
            "all" => Ok(Self::All),
            _ => Err(format!("Unknown time range: {}", s)),
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
