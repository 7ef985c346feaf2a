//! Tare CLI - Personal weight tracker
//!
//! Usage:
//!   tare init                  Initialize database
//!   tare users add sam         Create a profile
//!   tare log add sam 81.4      Record today's weight
//!   tare stats sam             Show the stats snapshot and insights
//!   tare serve --port 3000     Start the web gateway

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Serve {
            port,
            host,
            static_dir,
            cors_origins,
        } => commands::cmd_serve(&cli.db, &host, port, static_dir.as_deref(), &cors_origins).await,
        Commands::Users { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(UsersAction::List) => commands::cmd_users_list(&db),
                Some(UsersAction::Add {
                    name,
                    height_cm,
                    target_weight,
                    notes,
                }) => commands::cmd_users_add(&db, &name, height_cm, target_weight, notes.as_deref()),
                Some(UsersAction::Delete { name, yes }) => {
                    commands::cmd_users_delete(&db, &name, yes)
                }
            }
        }
        Commands::Log { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                LogAction::Add {
                    user,
                    weight,
                    date,
                    note,
                } => commands::cmd_log_add(&db, &user, weight, date.as_deref(), note.as_deref()),
                LogAction::List { user, range } => commands::cmd_log_list(&db, &user, &range),
                LogAction::Delete { user, date } => commands::cmd_log_delete(&db, &user, &date),
            }
        }
        Commands::Stats { user, range, json } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_stats(&db, &user, &range, json)
        }
    }
}
