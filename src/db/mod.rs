use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

pub mod models;
use models::*;

/// Thread-safe SQLite connection pool (single connection with mutex)
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the SQLite database at the given path.
    /// `:memory:` gives a throwaway database.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let db = Database {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection mutex poisoned"))
    }

    /// Run schema migrations (idempotent)
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    // ── Predictions ──────────────────────────────────────────────────────────

    /// Append a served prediction
    pub fn insert_prediction(&self, rec: &PredictionRecord) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO predictions (
                team1, team2, venue, batting_team, innings,
                current_score, current_wickets, current_overs, target_score,
                team1_probability, team2_probability, predicted_winner, confidence,
                base_winner, base_confidence, created_at
             ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16)",
            params![
                rec.team1,
                rec.team2,
                rec.venue,
                rec.batting_team,
                rec.innings,
                rec.current_score,
                rec.current_wickets,
                rec.current_overs,
                rec.target_score,
                rec.team1_probability,
                rec.team2_probability,
                rec.predicted_winner,
                rec.confidence,
                rec.base_winner,
                rec.base_confidence,
                rec.created_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Most recent predictions first
    pub fn list_recent_predictions(&self, limit: i64) -> Result<Vec<PredictionRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, team1, team2, venue, batting_team, innings,
                    current_score, current_wickets, current_overs, target_score,
                    team1_probability, team2_probability, predicted_winner, confidence,
                    base_winner, base_confidence, created_at
             FROM predictions ORDER BY created_at DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], map_prediction)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    // ── Stats ─────────────────────────────────────────────────────────────────

    /// Aggregate counts for the health endpoint
    pub fn get_stats(&self) -> Result<Stats> {
        let conn = self.conn()?;
        let total_predictions: i64 =
            conn.query_row("SELECT COUNT(*) FROM predictions", [], |r| r.get(0))?;
        let chase_predictions: i64 = conn.query_row(
            "SELECT COUNT(*) FROM predictions WHERE innings = 2",
            [],
            |r| r.get(0),
        )?;
        Ok(Stats {
            total_predictions,
            chase_predictions,
        })
    }
}

// ── SQL helpers ────────────────────────────────────────────────────────────────

fn map_prediction(row: &rusqlite::Row) -> rusqlite::Result<PredictionRecord> {
    Ok(PredictionRecord {
        id: row.get(0)?,
        team1: row.get(1)?,
        team2: row.get(2)?,
        venue: row.get(3)?,
        batting_team: row.get(4)?,
        innings: row.get(5)?,
        current_score: row.get(6)?,
        current_wickets: row.get(7)?,
        current_overs: row.get(8)?,
        target_score: row.get(9)?,
        team1_probability: row.get(10)?,
        team2_probability: row.get(11)?,
        predicted_winner: row.get(12)?,
        confidence: row.get(13)?,
        base_winner: row.get(14)?,
        base_confidence: row.get(15)?,
        created_at: row.get(16)?,
    })
}

/// SQLite schema (idempotent CREATE IF NOT EXISTS)
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS predictions (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    team1             TEXT    NOT NULL,
    team2             TEXT    NOT NULL,
    venue             TEXT    NOT NULL,
    batting_team      TEXT    NOT NULL,
    innings           INTEGER NOT NULL,
    current_score     REAL    NOT NULL,
    current_wickets   REAL    NOT NULL,
    current_overs     REAL    NOT NULL,
    target_score      REAL    NOT NULL,
    team1_probability REAL    NOT NULL,
    team2_probability REAL    NOT NULL,
    predicted_winner  TEXT    NOT NULL,
    confidence        REAL    NOT NULL,
    base_winner       TEXT    NOT NULL,
    base_confidence   REAL    NOT NULL,
    created_at        TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_predictions_created ON predictions(created_at);
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub total_predictions: i64,
    pub chase_predictions: i64,
}
