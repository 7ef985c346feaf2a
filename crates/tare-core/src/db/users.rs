//! Profile operations

use rusqlite::params;

use super::{parse_timestamp, Database};
use crate::error::{Error, Result};
use crate::models::User;

impl Database {
    /// List all profiles in creation order
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT user_name, created_at, height_cm, target_weight, notes
             FROM users ORDER BY created_at, user_name",
        )?;

        let users = stmt
            .query_map([], |row| {
                let created_at_str: String = row.get(1)?;
                Ok(User {
                    user_name: row.get(0)?,
                    created_at: parse_timestamp(&created_at_str),
                    height_cm: row.get(2)?,
                    target_weight: row.get(3)?,
                    notes: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Get a profile by name (exact, case-sensitive match)
    pub fn get_user(&self, user_name: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT user_name, created_at, height_cm, target_weight, notes
                 FROM users WHERE user_name = ?",
                params![user_name],
                |row| {
                    let created_at_str: String = row.get(1)?;
                    Ok(User {
                        user_name: row.get(0)?,
                        created_at: parse_timestamp(&created_at_str),
                        height_cm: row.get(2)?,
                        target_weight: row.get(3)?,
                        notes: row.get(4)?,
                    })
                },
            )
            .ok();

        Ok(user)
    }

    /// Create a profile; the name must not be taken
    pub fn create_user(&self, user: &User) -> Result<()> {
        let conn = self.conn()?;

        let exists: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM users WHERE user_name = ?",
                params![user.user_name],
                |row| row.get(0),
            )
            .ok();
        if exists.is_some() {
            return Err(Error::UserExists);
        }

        conn.execute(
            "INSERT INTO users (user_name, created_at, height_cm, target_weight, notes)
             VALUES (?, ?, ?, ?, ?)",
            params![
                user.user_name,
                user.created_at.to_rfc3339(),
                user.height_cm,
                user.target_weight,
                user.notes
            ],
        )?;

        Ok(())
    }

    /// Delete a profile and all of its weight entries
    ///
    /// A no-op (still Ok) when the profile does not exist, matching the
    /// original backend.
    pub fn delete_user(&self, user_name: &str) -> Result<()> {
        let conn = self.conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| {
            conn.execute(
                "DELETE FROM weight_log WHERE user_name = ?",
                params![user_name],
            )?;
            conn.execute("DELETE FROM users WHERE user_name = ?", params![user_name])?;
            Ok(())
        })();

        match result {
            Ok(()) => {
                conn.execute("COMMIT", [])?;
                Ok(())
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }
}
