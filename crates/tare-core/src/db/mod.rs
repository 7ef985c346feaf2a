//! Record store with connection pooling and migrations
//!
//! The original backend was two spreadsheet tabs behind a script-level
//! lock; here the same two tables live in SQLite:
//! - `users` - one row per profile, keyed by user_name
//! - `weight_log` - one row per (user_name, date) measurement
//!
//! The script lock survives as [`StoreLock`]: an explicit acquire/release
//! type with a bounded wait, taken once per gateway request.

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDate, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::{Error, Result};

mod users;
mod weights;

#[cfg(test)]
mod tests;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Bounded wait when acquiring the store lock, matching the original
/// backend's 10-second lock wait
pub const LOCK_WAIT: Duration = Duration::from_secs(10);

/// Process-wide mutual exclusion over the store
///
/// `acquire` blocks up to the timeout and hands back a guard; dropping the
/// guard releases the lock and wakes one waiter.
#[derive(Clone)]
pub struct StoreLock {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Default for StoreLock {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreLock {
    pub fn new() -> Self {
        Self {
            inner: Arc::new((Mutex::new(false), Condvar::new())),
        }
    }

    /// Acquire the lock, waiting at most `timeout`
    pub fn acquire(&self, timeout: Duration) -> Result<StoreGuard> {
        let (held, cvar) = &*self.inner;
        let deadline = Instant::now() + timeout;

        let mut held = held.lock().unwrap_or_else(|e| e.into_inner());
        while *held {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(Error::LockTimeout(timeout));
            }
            let (guard, wait) = cvar
                .wait_timeout(held, remaining)
                .unwrap_or_else(|e| e.into_inner());
            held = guard;
            if wait.timed_out() && *held {
                return Err(Error::LockTimeout(timeout));
            }
        }
        *held = true;

        Ok(StoreGuard {
            inner: Arc::clone(&self.inner),
        })
    }
}

/// Held while a request owns the store; releases on drop
#[derive(Debug)]
pub struct StoreGuard {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Drop for StoreGuard {
    fn drop(&mut self) {
        let (held, cvar) = &*self.inner;
        let mut held = held.lock().unwrap_or_else(|e| e.into_inner());
        *held = false;
        cvar.notify_one();
    }
}

/// Normalize a stored date value to a plain calendar date
///
/// The original data layer held a mix of date objects and strings; values
/// may carry a time component ("2026-01-05T00:00:00.000Z" or
/// "2026-01-05 00:00:00"). Everything is reduced to YYYY-MM-DD here, at
/// the storage boundary, so the stats core never sees an ambiguous date.
/// The gateway uses the same normalization for inbound payload dates.
pub fn normalize_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    // get() refuses a split inside a multi-byte character; such input is
    // invalid rather than a panic
    if let Some(prefix) = raw.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Ok(date);
        }
    }
    Err(Error::InvalidData(format!("Unparseable date: {}", raw)))
}

/// Parse a stored timestamp, tolerating both RFC 3339 and SQLite's
/// "YYYY-MM-DD HH:MM:SS" form
pub(crate) fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.and_utc())
        })
        .unwrap_or_else(|_| Utc::now())
}

/// Store wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
    lock: StoreLock,
}

impl Database {
    /// Open (creating if needed) a store at the given path and run
    /// migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
            lock: StoreLock::new(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// The process-wide store lock; the gateway acquires this once per
    /// request
    pub fn lock(&self) -> &StoreLock {
        &self.lock
    }

    /// Create a throwaway database (for testing)
    ///
    /// Uses a temporary file rather than `:memory:` so every pooled
    /// connection sees the same database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!("tare_test_{}_{}.db", std::process::id(), id));
        let path = path.to_string_lossy().to_string();

        let _ = std::fs::remove_file(&path);

        Self::new(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            -- WAL mode: readers don't block the (single) writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- Profiles
            CREATE TABLE IF NOT EXISTS users (
                user_name TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                height_cm REAL,
                target_weight REAL,
                notes TEXT
            );

            -- One measurement per profile per calendar day
            CREATE TABLE IF NOT EXISTS weight_log (
                id INTEGER PRIMARY KEY,
                user_name TEXT NOT NULL,
                date TEXT NOT NULL,
                weight_kg REAL NOT NULL,
                note TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(user_name, date)
            );

            CREATE INDEX IF NOT EXISTS idx_weight_log_user ON weight_log(user_name);
            CREATE INDEX IF NOT EXISTS idx_weight_log_date ON weight_log(date);
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}
