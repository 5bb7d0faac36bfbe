//! Request and response bodies for the prediction endpoints.

use serde::{Deserialize, Serialize};

use super::error::{require, ApiError};
use crate::estimator::{EstimatePhase, Insights};
use crate::model::{BasePrediction, MatchContext, TossDecision};

/// Pre-match fields shared by `/predict` and `/predict-live`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchRequest {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub venue: Option<String>,
    pub toss_winner: Option<String>,
    pub toss_decision: Option<String>,
}

impl MatchRequest {
    pub fn into_context(self) -> Result<MatchContext, ApiError> {
        let team1 = require("team1", self.team1)?;
        let team2 = require("team2", self.team2)?;
        let venue = require("venue", self.venue)?;
        let toss_winner = require("toss_winner", self.toss_winner)?;
        let toss_decision = require("toss_decision", self.toss_decision)?;
        Ok(MatchContext {
            team1,
            team2,
            venue,
            toss_winner,
            toss_decision: TossDecision::parse(&toss_decision)?,
        })
    }
}

fn default_innings() -> i64 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveRequest {
    #[serde(flatten)]
    pub match_info: MatchRequest,
    #[serde(default = "default_innings")]
    pub innings: i64,
    #[serde(default)]
    pub current_score: f64,
    #[serde(default)]
    pub current_wickets: f64,
    #[serde(default)]
    pub current_overs: f64,
    /// First-innings total; only read in the second innings.
    #[serde(default)]
    pub target_score: f64,
    /// Defaults to `team1`.
    pub batting_team: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    /// Batting team; `team1` is accepted as an alias.
    pub team: Option<String>,
    pub team1: Option<String>,
    pub venue: Option<String>,
    pub toss_winner: Option<String>,
    pub toss_decision: Option<String>,
    #[serde(default)]
    pub current_score: f64,
    #[serde(default)]
    pub current_overs: f64,
    #[serde(default)]
    pub current_wickets: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

// ── Responses ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub predicted_winner: String,
    pub confidence: f64,
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub model: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Probabilities {
    pub team1: f64,
    pub team2: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveContext {
    pub innings: i64,
    pub current_score: f64,
    pub current_wickets: f64,
    pub current_overs: f64,
    pub target_score: f64,
    pub batting_team: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveResponse {
    pub success: bool,
    pub predicted_winner: String,
    pub confidence: f64,
    pub probabilities: Probabilities,
    pub base_ml_prediction: BasePrediction,
    pub context: LiveContext,
    pub analysis: EstimatePhase,
    pub insights: Insights,
    pub model: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub success: bool,
    pub predicted_score: i64,
    pub current_score: f64,
    pub current_overs: f64,
    pub team: String,
    pub venue: String,
}

/// Two decimal places, as served.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
