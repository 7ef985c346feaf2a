//! Weight entry operations

use rusqlite::params;

use super::{normalize_date, Database};
use crate::error::{Error, Result};
use crate::models::WeightEntry;

impl Database {
    /// List a profile's entries, dates normalized to plain calendar dates
    pub fn list_weights(&self, user_name: &str) -> Result<Vec<WeightEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT user_name, date, weight_kg, note
             FROM weight_log WHERE user_name = ? ORDER BY date",
        )?;

        let rows = stmt
            .query_map(params![user_name], |row| {
                let date_str: String = row.get(1)?;
                Ok((
                    row.get::<_, String>(0)?,
                    date_str,
                    row.get::<_, f64>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut entries = Vec::with_capacity(rows.len());
        for (user_name, date_str, weight_kg, note) in rows {
            entries.push(WeightEntry {
                user_name,
                date: normalize_date(&date_str)?,
                weight_kg,
                note,
            });
        }

        Ok(entries)
    }

    /// Upsert an entry by (user_name, date)
    ///
    /// An existing row for the pair gets its weight and note overwritten;
    /// the total entry count for the profile does not change.
    pub fn save_weight(&self, entry: &WeightEntry) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO weight_log (user_name, date, weight_kg, note)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(user_name, date)
             DO UPDATE SET weight_kg = excluded.weight_kg, note = excluded.note",
            params![
                entry.user_name,
                entry.date.format("%Y-%m-%d").to_string(),
                entry.weight_kg,
                entry.note
            ],
        )?;
        Ok(())
    }

    /// Delete the entry matching (user_name, date)
    pub fn delete_weight(&self, user_name: &str, date: chrono::NaiveDate) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM weight_log WHERE user_name = ? AND date = ?",
            params![user_name, date.format("%Y-%m-%d").to_string()],
        )?;

        if deleted == 0 {
            return Err(Error::EntryNotFound);
        }
        Ok(())
    }
}
