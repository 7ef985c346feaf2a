//! Store tests

use std::time::Duration;

use chrono::NaiveDate;

use super::{normalize_date, Database, StoreLock};
use crate::error::Error;
use crate::models::{User, WeightEntry};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn entry(user: &str, d: &str, weight: f64) -> WeightEntry {
    WeightEntry {
        user_name: user.to_string(),
        date: date(d),
        weight_kg: weight,
        note: None,
    }
}

#[test]
fn test_create_and_list_users() {
    let db = Database::in_memory().unwrap();

    let mut user = User::new("sam");
    user.height_cm = Some(178.0);
    user.target_weight = Some(75.0);
    user.notes = Some("morning weigh-ins".to_string());
    db.create_user(&user).unwrap();
    db.create_user(&User::new("alex")).unwrap();

    let users = db.list_users().unwrap();
    assert_eq!(users.len(), 2);

    let sam = db.get_user("sam").unwrap().unwrap();
    assert_eq!(sam.height_cm, Some(178.0));
    assert_eq!(sam.target_weight, Some(75.0));
    assert_eq!(sam.notes.as_deref(), Some("morning weigh-ins"));
}

#[test]
fn test_user_names_are_case_sensitive() {
    let db = Database::in_memory().unwrap();
    db.create_user(&User::new("Sam")).unwrap();
    db.create_user(&User::new("sam")).unwrap();
    assert_eq!(db.list_users().unwrap().len(), 2);
}

#[test]
fn test_duplicate_user_rejected() {
    let db = Database::in_memory().unwrap();
    db.create_user(&User::new("sam")).unwrap();

    let err = db.create_user(&User::new("sam")).unwrap_err();
    assert!(matches!(err, Error::UserExists));
    assert_eq!(err.to_string(), "User already exists");
}

#[test]
fn test_save_weight_upserts_by_user_and_date() {
    let db = Database::in_memory().unwrap();
    db.create_user(&User::new("sam")).unwrap();

    db.save_weight(&entry("sam", "2026-03-01", 80.0)).unwrap();
    db.save_weight(&entry("sam", "2026-03-02", 79.6)).unwrap();

    // Same (user, date): overwrites in place, count unchanged
    let mut replacement = entry("sam", "2026-03-02", 79.2);
    replacement.note = Some("after run".to_string());
    db.save_weight(&replacement).unwrap();

    let weights = db.list_weights("sam").unwrap();
    assert_eq!(weights.len(), 2);
    let second = weights.iter().find(|w| w.date == date("2026-03-02")).unwrap();
    assert_eq!(second.weight_kg, 79.2);
    assert_eq!(second.note.as_deref(), Some("after run"));
}

#[test]
fn test_same_date_different_users_do_not_collide() {
    let db = Database::in_memory().unwrap();
    db.create_user(&User::new("sam")).unwrap();
    db.create_user(&User::new("alex")).unwrap();

    db.save_weight(&entry("sam", "2026-03-01", 80.0)).unwrap();
    db.save_weight(&entry("alex", "2026-03-01", 64.5)).unwrap();

    assert_eq!(db.list_weights("sam").unwrap().len(), 1);
    assert_eq!(db.list_weights("alex").unwrap().len(), 1);
}

#[test]
fn test_delete_weight() {
    let db = Database::in_memory().unwrap();
    db.create_user(&User::new("sam")).unwrap();
    db.save_weight(&entry("sam", "2026-03-01", 80.0)).unwrap();

    db.delete_weight("sam", date("2026-03-01")).unwrap();
    assert!(db.list_weights("sam").unwrap().is_empty());

    let err = db.delete_weight("sam", date("2026-03-01")).unwrap_err();
    assert!(matches!(err, Error::EntryNotFound));
    assert_eq!(err.to_string(), "Entry not found");
}

#[test]
fn test_delete_user_cascades_to_entries() {
    let db = Database::in_memory().unwrap();
    db.create_user(&User::new("sam")).unwrap();
    db.create_user(&User::new("alex")).unwrap();
    db.save_weight(&entry("sam", "2026-03-01", 80.0)).unwrap();
    db.save_weight(&entry("sam", "2026-03-02", 79.6)).unwrap();
    db.save_weight(&entry("alex", "2026-03-01", 64.5)).unwrap();

    db.delete_user("sam").unwrap();

    assert!(db.get_user("sam").unwrap().is_none());
    assert!(db.list_weights("sam").unwrap().is_empty());
    // Other profiles untouched
    assert_eq!(db.list_weights("alex").unwrap().len(), 1);
}

#[test]
fn test_delete_missing_user_is_a_noop() {
    let db = Database::in_memory().unwrap();
    db.delete_user("nobody").unwrap();
}

#[test]
fn test_normalize_date_variants() {
    assert_eq!(normalize_date("2026-03-05").unwrap(), date("2026-03-05"));
    assert_eq!(
        normalize_date("2026-03-05T00:00:00.000Z").unwrap(),
        date("2026-03-05")
    );
    assert_eq!(
        normalize_date("2026-03-05 13:45:00").unwrap(),
        date("2026-03-05")
    );
    assert!(normalize_date("03/05/2026").is_err());
    assert!(normalize_date("").is_err());
    // Multi-byte character straddling the date-prefix boundary: invalid,
    // never a panic (this value can arrive straight off the wire)
    assert!(normalize_date("123456789é").is_err());
    assert!(normalize_date("2026-03-0é extra").is_err());
}

#[test]
fn test_store_lock_times_out_while_held() {
    let lock = StoreLock::new();
    let guard = lock.acquire(Duration::from_secs(1)).unwrap();

    let err = lock.acquire(Duration::from_millis(50)).unwrap_err();
    assert!(matches!(err, Error::LockTimeout(_)));

    drop(guard);
    // Released: immediately acquirable again
    lock.acquire(Duration::from_millis(50)).unwrap();
}

#[test]
fn test_store_lock_hands_off_to_waiter() {
    let lock = StoreLock::new();
    let guard = lock.acquire(Duration::from_secs(1)).unwrap();

    let waiter = {
        let lock = lock.clone();
        std::thread::spawn(move || lock.acquire(Duration::from_secs(5)).map(drop))
    };

    std::thread::sleep(Duration::from_millis(50));
    drop(guard);

    waiter.join().unwrap().unwrap();
}
