use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One served live prediction, as logged for later review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Option<i64>,
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub batting_team: String,
    /// 1 or 2 (other values are logged as received)
    pub innings: i64,
    pub current_score: f64,
    pub current_wickets: f64,
    /// Decimal overs, after any notation conversion
    pub current_overs: f64,
    pub target_score: f64,
    pub team1_probability: f64,
    pub team2_probability: f64,
    pub predicted_winner: String,
    pub confidence: f64,
    pub base_winner: String,
    pub base_confidence: f64,
    pub created_at: DateTime<Utc>,
}
