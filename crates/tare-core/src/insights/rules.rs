//! Built-in insight rules
//!
//! Message text is kept byte-for-byte compatible with the original app so
//! existing UI snapshot tests and translations keep working. Numbers render
//! without trailing zeros (2, 1.25), matching how the original displays
//! them.

use super::engine::{InsightContext, InsightRule};

/// Weekly loss faster than this triggers the rapid-pace caution
const RAPID_LOSS_KG_PER_WEEK: f64 = -0.5;

/// Within this many kg of the target counts as "near goal"
const NEAR_GOAL_KG: f64 = 1.0;

/// Message keyed on the sign of the total change
pub struct TrendRule;

impl InsightRule for TrendRule {
    fn name(&self) -> &'static str {
        "trend"
    }

    fn apply(&self, ctx: &InsightContext<'_>) -> Vec<String> {
        let change = ctx.stats.change;
        let message = if change < 0.0 {
            format!("Great job! You've lost {}kg so far.", change.abs())
        } else if change > 0.0 {
            format!("You have gained {}kg since starting.", change)
        } else {
            "Your weight is stable.".to_string()
        };
        vec![message]
    }
}

/// Sub-message on the weekly rate, only while losing overall
pub struct PaceRule;

impl InsightRule for PaceRule {
    fn name(&self) -> &'static str {
        "pace"
    }

    fn apply(&self, ctx: &InsightContext<'_>) -> Vec<String> {
        if ctx.stats.change >= 0.0 {
            return vec![];
        }

        let weekly = ctx.stats.weekly_avg;
        if weekly < RAPID_LOSS_KG_PER_WEEK {
            vec![
                "You are losing weight at a rapid pace (>0.5kg/week). Ensure you're staying hydrated."
                    .to_string(),
            ]
        } else if weekly < 0.0 {
            vec!["You have a sustainable weekly loss rate.".to_string()]
        } else {
            vec![]
        }
    }
}

/// Goal proximity / estimated time-to-goal, only when a target is set
pub struct GoalRule;

impl InsightRule for GoalRule {
    fn name(&self) -> &'static str {
        "goal"
    }

    fn apply(&self, ctx: &InsightContext<'_>) -> Vec<String> {
        let Some(target) = ctx.user.target_weight.filter(|t| *t != 0.0) else {
            return vec![];
        };

        let diff = ctx.stats.current - target;
        if diff.abs() < NEAR_GOAL_KG {
            vec!["You are very close to your goal!".to_string()]
        } else if ctx.stats.weekly_avg < 0.0 && diff > 0.0 {
            let weeks_left = (diff / ctx.stats.weekly_avg).abs().ceil() as i64;
            vec![format!(
                "At this rate, you could reach your goal in ~{} weeks.",
                weeks_left
            )]
        } else {
            vec![]
        }
    }
}
