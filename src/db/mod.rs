//! Database module - SQLite storage for logged sets

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::units::{Unit, Weight};

/// Logged set record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: Option<i64>,
    pub date: DateTime<Utc>,
    pub exercise: String,
    pub weight: Weight,
    pub unit: Unit,
    pub sets: i32,
    pub reps: i32,
    pub rest_secs: Option<i32>, // Rest taken between sets
    pub notes: Option<String>,
}

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        debug!(path, "opening database");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// In-memory database, mainly for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS workout_sets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                exercise TEXT NOT NULL,
                weight INTEGER NOT NULL,
                unit TEXT NOT NULL,
                sets INTEGER NOT NULL,
                reps INTEGER NOT NULL,
                rest_secs INTEGER,
                notes TEXT
            )",
            [],
        )?;

        // Migration: add rest_secs column if missing
        let has_rest: bool = self
            .conn
            .prepare("SELECT rest_secs FROM workout_sets LIMIT 1")
            .is_ok();
        if !has_rest {
            let _ = self.conn.execute(
                "ALTER TABLE workout_sets ADD COLUMN rest_secs INTEGER",
                [],
            );
        }

        Ok(())
    }

    /// Add new logged set
    pub fn add_set(&self, set: &WorkoutSet) -> Result<i64> {
        debug!(exercise = %set.exercise, weight = %set.weight, "logging set");
        self.conn.execute(
            "INSERT INTO workout_sets (date, exercise, weight, unit, sets, reps, rest_secs, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                set.date.to_rfc3339(),
                set.exercise,
                set.weight.hundredths(),
                set.unit.to_string(),
                set.sets,
                set.reps,
                set.rest_secs,
                set.notes,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get all logged sets, newest first
    pub fn get_sets(&self) -> Result<Vec<WorkoutSet>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, exercise, weight, unit, sets, reps, rest_secs, notes FROM workout_sets ORDER BY date DESC",
        )?;

        let sets = stmt
            .query_map([], |row| {
                let date_str: String = row.get(1)?;
                let weight_raw: i64 = row.get(3)?;
                let unit_str: String = row.get(4)?;
                Ok(WorkoutSet {
                    id: Some(row.get(0)?),
                    date: DateTime::parse_from_rfc3339(&date_str)
                        .map(|d| d.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now()),
                    exercise: row.get(2)?,
                    weight: Weight::from_hundredths(
                        u32::try_from(weight_raw).unwrap_or(0),
                    ),
                    unit: unit_str.parse().unwrap_or(Unit::Lbs),
                    sets: row.get(5)?,
                    reps: row.get(6)?,
                    rest_secs: row.get(7)?,
                    notes: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_set(exercise: &str, weight: Weight, days_ago: i64) -> WorkoutSet {
        WorkoutSet {
            id: None,
            date: Utc::now() - chrono::Duration::days(days_ago),
            exercise: exercise.to_string(),
            weight,
            unit: Unit::Lbs,
            sets: 3,
            reps: 5,
            rest_secs: Some(90),
            notes: None,
        }
    }

    #[test]
    fn test_add_and_get_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        let id = db
            .add_set(&create_set("bench press", Weight::from_hundredths(13500), 0))
            .unwrap();
        assert!(id > 0);

        let sets = db.get_sets().unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id, Some(id));
        assert_eq!(sets[0].exercise, "bench press");
        assert_eq!(sets[0].weight, Weight::from_hundredths(13500));
        assert_eq!(sets[0].unit, Unit::Lbs);
        assert_eq!(sets[0].rest_secs, Some(90));
    }

    #[test]
    fn test_get_sets_newest_first() {
        let db = Database::open_in_memory().unwrap();
        db.add_set(&create_set("squat", Weight::from_hundredths(22500), 2))
            .unwrap();
        db.add_set(&create_set("squat", Weight::from_hundredths(23000), 0))
            .unwrap();
        db.add_set(&create_set("squat", Weight::from_hundredths(22000), 5))
            .unwrap();

        let sets = db.get_sets().unwrap();
        assert_eq!(sets.len(), 3);
        assert_eq!(sets[0].weight, Weight::from_hundredths(23000));
        assert_eq!(sets[2].weight, Weight::from_hundredths(22000));
    }

    #[test]
    fn test_empty_database() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_sets().unwrap().is_empty());
    }

    #[test]
    fn test_fractional_weight_survives_storage() {
        let db = Database::open_in_memory().unwrap();
        let mut set = create_set("press", Weight::from_hundredths(10250), 0);
        set.unit = Unit::Kg;
        db.add_set(&set).unwrap();

        let sets = db.get_sets().unwrap();
        assert_eq!(sets[0].weight.to_f64(), 102.5);
        assert_eq!(sets[0].unit, Unit::Kg);
    }
}
