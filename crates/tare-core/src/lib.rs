//! Tare Core Library
//!
//! Shared functionality for the tare weight tracker:
//! - Record store (SQLite) for profiles and weight entries
//! - Stats engine (BMI, trend, and goal-progress arithmetic)
//! - Rule-based insight generation
//! - The store lock that serializes gateway requests

pub mod db;
pub mod error;
pub mod insights;
pub mod models;
pub mod stats;

pub use db::{normalize_date, Database, StoreGuard, StoreLock, LOCK_WAIT};
pub use error::{Error, Result};
pub use insights::{generate_insights, InsightContext, InsightEngine, InsightRule};
pub use models::{Stats, TimeRange, User, WeightEntry};
pub use stats::{calculate_bmi, generate_stats, BmiCategory, Severity};
