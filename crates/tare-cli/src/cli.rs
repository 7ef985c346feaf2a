//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tare - Personal weight tracker
#[derive(Parser)]
#[command(name = "tare")]
#[command(about = "Self-hosted weight tracking and trend analysis", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tare.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web gateway
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Restrict CORS to these origins (repeatable; default allows any)
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },

    /// Manage user profiles (list, add, delete)
    Users {
        #[command(subcommand)]
        action: Option<UsersAction>,
    },

    /// Manage weight entries (add, list, delete)
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Show the stats snapshot and insights for a user
    Stats {
        /// User name
        user: String,

        /// Time range: 7d, 30d, all
        #[arg(long, default_value = "all")]
        range: String,

        /// Print the snapshot as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// List all profiles
    List,

    /// Create a profile
    Add {
        /// User name (case-sensitive, must be unique)
        name: String,

        /// Height in centimeters (needed for BMI)
        #[arg(long)]
        height_cm: Option<f64>,

        /// Target weight in kilograms
        #[arg(long)]
        target_weight: Option<f64>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a profile and all its weight entries
    Delete {
        /// User name
        name: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum LogAction {
    /// Record a weight (overwrites any entry already on that date)
    Add {
        /// User name
        user: String,

        /// Weight in kilograms
        weight: f64,

        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Optional note for the entry
        #[arg(long)]
        note: Option<String>,
    },

    /// List weight entries
    List {
        /// User name
        user: String,

        /// Time range: 7d, 30d, all
        #[arg(long, default_value = "all")]
        range: String,
    },

    /// Delete the entry on a given date
    Delete {
        /// User name
        user: String,

        /// Entry date (YYYY-MM-DD)
        date: String,
    },
}
