//! Error types for tare

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Message text is part of the wire contract; clients match on it.
    #[error("User already exists")]
    UserExists,

    #[error("Entry not found")]
    EntryNotFound,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Could not acquire store lock within {0:?}")]
    LockTimeout(std::time::Duration),
}

pub type Result<T> = std::result::Result<T, Error>;
