//! Stats engine - derived metrics over a profile's weight entries
//!
//! Pure functions only: no I/O, no locks, deterministic for a given input.
//! The surrounding layers fetch a consistent snapshot from the store and
//! feed it here; malformed data (missing dates, negative weights) is a
//! data-entry concern handled before this point.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Stats, User, WeightEntry};

/// Display emphasis for a derived reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Attention,
    /// Should be addressed
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// BMI category by the fixed WHO-style thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    /// BMI could not be computed (no height on the profile)
    NotAvailable,
    Underweight,
    HealthyWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value. Total: every non-negative input maps to a
    /// category, with 0 meaning "unknown/not computable".
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi == 0.0 {
            Self::NotAvailable
        } else if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::HealthyWeight
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotAvailable => "Not available",
            Self::Underweight => "Underweight",
            Self::HealthyWeight => "Healthy Weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::NotAvailable | Self::HealthyWeight => Severity::Info,
            Self::Underweight | Self::Overweight => Severity::Attention,
            Self::Obese => Severity::Warning,
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Round to 2 decimal places, half away from zero
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to 1 decimal place, half away from zero
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// BMI from weight and optional height; 0.0 when height is absent or
/// non-positive (the "not computable" sentinel, never an error)
pub fn calculate_bmi(weight_kg: f64, height_cm: Option<f64>) -> f64 {
    match height_cm {
        Some(h) if h > 0.0 => {
            let height_m = h / 100.0;
            round1(weight_kg / (height_m * height_m))
        }
        _ => 0.0,
    }
}

/// Compute the stats snapshot for a user from their (unordered) entry list.
///
/// An empty list yields the fixed empty state. Entries are sorted by date
/// with a stable sort; if two entries share a date (should not happen given
/// the upsert-by-date invariant) the later-indexed one wins as `current`.
pub fn generate_stats(entries: &[WeightEntry], user: &User) -> Stats {
    if entries.is_empty() {
        return Stats::empty();
    }

    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let first = sorted[0];
    let last = sorted[sorted.len() - 1];

    let current = last.weight_kg;
    let start = first.weight_kg;
    let change = round2(current - start);
    let bmi = calculate_bmi(current, user.height_cm);

    // Fractional weeks/months, floored at one unit so a sub-week span does
    // not blow up the averages
    let days = elapsed_days(first.date, last.date) as f64;
    let weeks = (days / 7.0).max(1.0);
    let months = (days / 30.0).max(1.0);

    let weekly_avg = round2(change / weeks);
    let monthly_avg = round2(change / months);

    let goal_progress = user
        .target_weight
        .filter(|t| *t != 0.0)
        .and_then(|target| {
            let to_lose = start - target;
            let lost = start - current;
            if to_lose == 0.0 {
                // Undefined direction; reported as "no progress to measure"
                None
            } else {
                Some((lost / to_lose * 100.0).clamp(0.0, 100.0))
            }
        });

    Stats {
        current,
        start,
        change,
        bmi,
        weekly_avg,
        monthly_avg,
        goal_progress,
    }
}

fn elapsed_days(first: NaiveDate, last: NaiveDate) -> i64 {
    (last - first).num_days()
}
