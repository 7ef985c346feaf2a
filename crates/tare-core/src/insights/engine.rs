//! Insight Engine - applies the observation rules in a fixed order

use crate::models::{Stats, User, WeightEntry};

use super::rules::{GoalRule, PaceRule, TrendRule};

/// Entries needed before per-trend insights are produced
const MIN_ENTRIES: usize = 3;

/// Shown instead of any rule output while the log is still short
const KEEP_LOGGING_MESSAGE: &str = "Keep logging daily to unlock insights!";

/// Inputs for a single insight pass
///
/// The raw entry list is consulted only for its count; everything else
/// comes from the precomputed snapshot.
pub struct InsightContext<'a> {
    pub stats: &'a Stats,
    pub user: &'a User,
    pub entries: &'a [WeightEntry],
}

impl<'a> InsightContext<'a> {
    pub fn new(stats: &'a Stats, user: &'a User, entries: &'a [WeightEntry]) -> Self {
        Self {
            stats,
            user,
            entries,
        }
    }
}

/// A rule that may contribute observation messages
///
/// Rules are pure and infallible: a rule that does not apply contributes
/// nothing rather than erroring.
pub trait InsightRule: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    /// Produce this rule's messages, in display order
    fn apply(&self, ctx: &InsightContext<'_>) -> Vec<String>;
}

/// The insight engine: an ordered list of rules
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules in their fixed order
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(TrendRule));
        engine.register(Box::new(PaceRule));
        engine.register(Box::new(GoalRule));

        engine
    }

    /// Append a rule; rules run in registration order
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Generate the ordered message list for a snapshot
    ///
    /// With fewer than three entries this is exactly the single
    /// encouragement message, regardless of the snapshot's contents.
    pub fn generate(&self, ctx: &InsightContext<'_>) -> Vec<String> {
        if ctx.entries.len() < MIN_ENTRIES {
            return vec![KEEP_LOGGING_MESSAGE.to_string()];
        }

        let mut messages = vec![];
        for rule in &self.rules {
            let produced = rule.apply(ctx);
            tracing::debug!(
                rule = rule.name(),
                count = produced.len(),
                "Insight rule applied"
            );
            messages.extend(produced);
        }
        messages
    }
}

/// Convenience wrapper: compute insights with the built-in rules
pub fn generate_insights(stats: &Stats, user: &User, entries: &[WeightEntry]) -> Vec<String> {
    InsightEngine::new().generate(&InsightContext::new(stats, user, entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::generate_stats;
    use chrono::NaiveDate;

    fn entry(date: &str, weight: f64) -> WeightEntry {
        WeightEntry {
            user_name: "sam".to_string(),
            date: date.parse::<NaiveDate>().unwrap(),
            weight_kg: weight,
            note: None,
        }
    }

    #[test]
    fn test_short_log_gets_single_encouragement() {
        // Two entries produce exactly the keep-logging message,
        // even when a target is set
        let mut user = User::new("sam");
        user.target_weight = Some(70.0);
        let entries = vec![entry("2026-01-01", 80.0), entry("2026-01-08", 78.0)];
        let stats = generate_stats(&entries, &user);

        let insights = generate_insights(&stats, &user, &entries);
        assert_eq!(insights, vec!["Keep logging daily to unlock insights!"]);
    }

    #[test]
    fn test_message_order_is_trend_pace_goal() {
        let mut user = User::new("sam");
        user.target_weight = Some(74.0);
        let entries = vec![
            entry("2026-01-01", 80.0),
            entry("2026-01-15", 79.0),
            entry("2026-01-29", 78.0),
        ];
        let stats = generate_stats(&entries, &user);

        let insights = generate_insights(&stats, &user, &entries);
        assert_eq!(insights.len(), 3);
        assert!(insights[0].starts_with("Great job!"));
        assert_eq!(insights[1], "You have a sustainable weekly loss rate.");
        assert!(insights[2].starts_with("At this rate,"));
    }

    #[test]
    fn test_engine_runs_custom_rules_in_registration_order() {
        struct Fixed(&'static str);
        impl InsightRule for Fixed {
            fn name(&self) -> &'static str {
                "fixed"
            }
            fn apply(&self, _ctx: &InsightContext<'_>) -> Vec<String> {
                vec![self.0.to_string()]
            }
        }

        let mut engine = InsightEngine {
            rules: vec![],
        };
        engine.register(Box::new(Fixed("first")));
        engine.register(Box::new(Fixed("second")));

        let user = User::new("sam");
        let entries = vec![
            entry("2026-01-01", 80.0),
            entry("2026-01-02", 80.0),
            entry("2026-01-03", 80.0),
        ];
        let stats = generate_stats(&entries, &user);
        let out = engine.generate(&InsightContext::new(&stats, &user, &entries));
        assert_eq!(out, vec!["first", "second"]);
    }
}
