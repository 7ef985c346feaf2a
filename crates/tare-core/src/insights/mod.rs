//! Insight generation - rule-based observations over a stats snapshot
//!
//! The engine applies a fixed, ordered set of rules to an already-computed
//! [`Stats`](crate::models::Stats) snapshot. Message order is part of the
//! output contract: trend first, then pace, then goal.

mod engine;
mod rules;

pub use engine::{generate_insights, InsightContext, InsightEngine, InsightRule};
pub use rules::{GoalRule, PaceRule, TrendRule};
