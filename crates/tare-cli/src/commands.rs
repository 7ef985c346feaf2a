//! Command implementations
//!
//! Each `cmd_*` function is one CLI subcommand: open the store, do the
//! work, print a human-readable result. Anything machine-readable goes
//! through `--json`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};

use tare_core::{
    generate_insights, generate_stats, BmiCategory, Database, TimeRange, User, WeightEntry,
};

/// Open the database, creating it if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    tracing::debug!(path = %db_path.display(), "Opening database");
    let path_str = db_path.to_str().context("Database path is not UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

fn parse_range(range: &str) -> Result<TimeRange> {
    range.parse::<TimeRange>().map_err(|e| anyhow::anyhow!(e))
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .context("Invalid date format (use YYYY-MM-DD)")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Create a profile: tare users add NAME --height-cm 180");
    println!("  2. Record a weight:  tare log add NAME 81.4");
    println!("  3. Start the web UI: tare serve");

    Ok(())
}

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    cors_origins: &[String],
) -> Result<()> {
    let db = open_db(db_path)?;

    if cors_origins.is_empty() {
        println!("🌐 CORS: any origin (restrict with --cors-origin)");
    } else {
        println!("🌐 CORS: {}", cors_origins.join(", "));
    }
    println!("🚀 Serving on http://{}:{}", host, port);

    let config = tare_server::ServerConfig {
        allowed_origins: cors_origins.to_vec(),
    };
    let static_dir = static_dir.and_then(|p| p.to_str());

    tare_server::serve_with_config(db, host, port, static_dir, config).await
}

pub fn cmd_users_list(db: &Database) -> Result<()> {
    let users = db.list_users()?;

    if users.is_empty() {
        println!("No profiles yet. Create one with: tare users add NAME");
        return Ok(());
    }

    println!("👤 Profiles ({})", users.len());
    for user in users {
        let mut details = Vec::new();
        if let Some(h) = user.height_cm {
            details.push(format!("{}cm", h));
        }
        if let Some(t) = user.target_weight {
            details.push(format!("target {}kg", t));
        }
        if details.is_empty() {
            println!("   {}", user.user_name);
        } else {
            println!("   {} ({})", user.user_name, details.join(", "));
        }
    }

    Ok(())
}

pub fn cmd_users_add(
    db: &Database,
    name: &str,
    height_cm: Option<f64>,
    target_weight: Option<f64>,
    notes: Option<&str>,
) -> Result<()> {
    let mut user = User::new(name);
    user.height_cm = height_cm;
    user.target_weight = target_weight;
    user.notes = notes.map(String::from);

    db.create_user(&user)?;

    println!("✅ Created profile '{}'", name);
    if height_cm.is_none() {
        println!("   💡 Tip: add --height-cm to enable BMI tracking");
    }

    Ok(())
}

pub fn cmd_users_delete(db: &Database, name: &str, yes: bool) -> Result<()> {
    if db.get_user(name)?.is_none() {
        println!("No profile named '{}'", name);
        return Ok(());
    }

    if !yes {
        println!(
            "⚠️  This permanently deletes '{}' and all their weight entries.",
            name
        );
        println!("   Re-run with --yes to confirm.");
        return Ok(());
    }

    db.delete_user(name)?;
    println!("✅ Deleted profile '{}'", name);

    Ok(())
}

pub fn cmd_log_add(
    db: &Database,
    user: &str,
    weight: f64,
    date: Option<&str>,
    note: Option<&str>,
) -> Result<()> {
    let date = match date {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };

    let entry = WeightEntry {
        user_name: user.to_string(),
        date,
        weight_kg: weight,
        note: note.map(String::from),
    };
    db.save_weight(&entry)?;

    println!("✅ Recorded {}kg for {} on {}", weight, user, date);

    Ok(())
}

pub fn cmd_log_list(db: &Database, user: &str, range: &str) -> Result<()> {
    let range = parse_range(range)?;
    let today = Local::now().date_naive();
    let entries = range.filter(&db.list_weights(user)?, today);

    if entries.is_empty() {
        println!("No entries for '{}' in range '{}'", user, range);
        return Ok(());
    }

    println!("⚖️  Entries for {} ({})", user, range);
    for entry in entries {
        match entry.note {
            Some(note) => println!("   {}  {:>6} kg  {}", entry.date, entry.weight_kg, note),
            None => println!("   {}  {:>6} kg", entry.date, entry.weight_kg),
        }
    }

    Ok(())
}

pub fn cmd_log_delete(db: &Database, user: &str, date: &str) -> Result<()> {
    let date = parse_date(date)?;
    db.delete_weight(user, date)?;

    println!("✅ Deleted entry for {} on {}", user, date);

    Ok(())
}

pub fn cmd_stats(db: &Database, user_name: &str, range: &str, json: bool) -> Result<()> {
    let range = parse_range(range)?;
    let user = match db.get_user(user_name)? {
        Some(user) => user,
        None => bail!("No profile named '{}'", user_name),
    };

    let today = Local::now().date_naive();
    let entries = range.filter(&db.list_weights(user_name)?, today);
    let stats = generate_stats(&entries, &user);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("📊 Stats for {} ({})", user_name, range);
    println!("   ─────────────────────────────");
    println!("   Current:     {} kg", stats.current);
    println!("   Start:       {} kg", stats.start);
    println!("   Change:      {} kg", stats.change);
    println!("   Weekly avg:  {} kg", stats.weekly_avg);
    println!("   Monthly avg: {} kg", stats.monthly_avg);

    let category = BmiCategory::from_bmi(stats.bmi);
    if category == BmiCategory::NotAvailable {
        println!("   BMI:         not available (set --height-cm on the profile)");
    } else {
        println!("   BMI:         {} ({})", stats.bmi, category.label());
    }

    match (stats.goal_progress, user.target_weight) {
        (Some(progress), Some(target)) => {
            println!("   Goal:        {:.0}% toward {} kg", progress, target)
        }
        _ => println!("   Goal:        no target weight set"),
    }

    let insights = generate_insights(&stats, &user, &entries);
    if !insights.is_empty() {
        println!();
        println!("💡 Insights");
        for insight in insights {
            println!("   • {}", insight);
        }
    }

    Ok(())
}
