//! CLI command tests

use tempfile::TempDir;

use crate::commands;

fn setup() -> (TempDir, tare_core::Database) {
    let dir = TempDir::new().unwrap();
    let db = commands::open_db(&dir.path().join("test.db")).unwrap();
    (dir, db)
}

#[test]
fn test_init_creates_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tare.db");

    commands::cmd_init(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_users_add_and_delete() {
    let (_dir, db) = setup();

    commands::cmd_users_add(&db, "sam", Some(180.0), Some(76.0), None).unwrap();
    assert!(db.get_user("sam").unwrap().is_some());

    // Without --yes the profile survives
    commands::cmd_users_delete(&db, "sam", false).unwrap();
    assert!(db.get_user("sam").unwrap().is_some());

    commands::cmd_users_delete(&db, "sam", true).unwrap();
    assert!(db.get_user("sam").unwrap().is_none());
}

#[test]
fn test_duplicate_user_add_fails() {
    let (_dir, db) = setup();

    commands::cmd_users_add(&db, "sam", None, None, None).unwrap();
    let err = commands::cmd_users_add(&db, "sam", None, None, None).unwrap_err();
    assert_eq!(err.to_string(), "User already exists");
}

#[test]
fn test_log_add_defaults_to_today() {
    let (_dir, db) = setup();
    commands::cmd_users_add(&db, "sam", None, None, None).unwrap();

    commands::cmd_log_add(&db, "sam", 81.4, None, None).unwrap();

    let entries = db.list_weights("sam").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, chrono::Local::now().date_naive());
}

#[test]
fn test_log_delete_missing_entry() {
    let (_dir, db) = setup();

    let err = commands::cmd_log_delete(&db, "sam", "2026-03-05").unwrap_err();
    assert_eq!(err.to_string(), "Entry not found");
}

#[test]
fn test_log_rejects_bad_date_and_range() {
    let (_dir, db) = setup();

    assert!(commands::cmd_log_add(&db, "sam", 81.4, Some("03/05/2026"), None).is_err());
    assert!(commands::cmd_log_list(&db, "sam", "fortnight").is_err());
}

#[test]
fn test_stats_unknown_user() {
    let (_dir, db) = setup();

    let err = commands::cmd_stats(&db, "nobody", "all", false).unwrap_err();
    assert!(err.to_string().contains("No profile named"));
}

#[test]
fn test_stats_renders_for_user_with_entries() {
    let (_dir, db) = setup();
    commands::cmd_users_add(&db, "sam", Some(180.0), Some(76.0), None).unwrap();
    commands::cmd_log_add(&db, "sam", 82.0, Some("2026-01-01"), None).unwrap();
    commands::cmd_log_add(&db, "sam", 81.0, Some("2026-01-15"), None).unwrap();
    commands::cmd_log_add(&db, "sam", 79.9, Some("2026-01-29"), None).unwrap();

    commands::cmd_stats(&db, "sam", "all", false).unwrap();
    commands::cmd_stats(&db, "sam", "all", true).unwrap();
}
