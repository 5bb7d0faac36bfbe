//! Static (pre-match) prediction models.
//!
//! A static model sees only who is playing where and the toss. The live
//! estimator uses its output as the starting point for the first innings,
//! and the API returns it alongside every live prediction.

pub mod ratings;
pub mod score;

pub use ratings::RatingModel;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Invalid {field}: {team}")]
    UnknownTeam { field: &'static str, team: String },
    #[error("Invalid venue: {0}")]
    UnknownVenue(String),
    #[error("Invalid toss_decision: {0} (expected 'bat' or 'field')")]
    InvalidTossDecision(String),
    #[error("Invalid toss_winner: {0} is not playing this match")]
    InvalidTossWinner(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TossDecision {
    Bat,
    Field,
}

impl TossDecision {
    /// Case-insensitive parse of `bat` / `field`.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        match raw.trim().to_lowercase().as_str() {
            "bat" => Ok(TossDecision::Bat),
            "field" => Ok(TossDecision::Field),
            _ => Err(ModelError::InvalidTossDecision(raw.to_string())),
        }
    }
}

/// Pre-match facts a static model predicts from.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchContext {
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
}

impl MatchContext {
    /// Whether `toss_winner` names one of the two sides.
    pub fn check_toss_winner(&self) -> Result<(), ModelError> {
        if self.toss_winner == self.team1 || self.toss_winner == self.team2 {
            Ok(())
        } else {
            Err(ModelError::InvalidTossWinner(self.toss_winner.clone()))
        }
    }
}

/// A static model's call: the favoured team and its probability (percent).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasePrediction {
    pub winner: String,
    pub confidence: f64,
}

impl BasePrediction {
    pub fn team1_probability(&self, team1: &str) -> f64 {
        if self.winner == team1 {
            self.confidence
        } else {
            100.0 - self.confidence
        }
    }

    /// Static probability for whichever side is batting.
    pub fn batting_side_probability(&self, team1: &str, batting_team: &str) -> f64 {
        let team1_prob = self.team1_probability(team1);
        if batting_team == team1 {
            team1_prob
        } else {
            100.0 - team1_prob
        }
    }
}

/// Descriptive data served by `/metadata`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelMetadata {
    pub teams: Vec<String>,
    pub venues: Vec<String>,
    pub toss_decisions: Vec<String>,
    /// Hold-out accuracy, 0.0–1.0.
    pub accuracy: f64,
    pub total_matches: u64,
    pub total_teams: usize,
}

/// Trait every static model must implement.
pub trait BaseModel: Send + Sync {
    /// Human-readable name for logging and responses.
    fn name(&self) -> &str;

    fn metadata(&self) -> &ModelMetadata;

    /// Whether [`BaseModel::par_score`] can return a score at all.
    fn has_score_model(&self) -> bool;

    fn predict(&self, ctx: &MatchContext) -> Result<BasePrediction, ModelError>;

    /// Expected first-innings total for `team` at `venue`, or `None` when the
    /// model has no score component.
    fn par_score(&self, team: &str, venue: &str) -> Result<Option<f64>, ModelError>;
}

/// Model used when no artifact is configured: every match is a coin flip.
pub struct EvenModel {
    metadata: ModelMetadata,
}

impl EvenModel {
    pub fn new() -> Self {
        Self {
            metadata: ModelMetadata {
                toss_decisions: vec!["bat".into(), "field".into()],
                accuracy: 0.5,
                ..ModelMetadata::default()
            },
        }
    }
}

impl Default for EvenModel {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseModel for EvenModel {
    fn name(&self) -> &str {
        "even-odds"
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn has_score_model(&self) -> bool {
        false
    }

    fn predict(&self, ctx: &MatchContext) -> Result<BasePrediction, ModelError> {
        ctx.check_toss_winner()?;
        Ok(BasePrediction {
            winner: ctx.team1.clone(),
            confidence: 50.0,
        })
    }

    fn par_score(&self, _team: &str, _venue: &str) -> Result<Option<f64>, ModelError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ctx(toss_winner: &str) -> MatchContext {
        MatchContext {
            team1: "SRH".into(),
            team2: "DC".into(),
            venue: "Eden Gardens".into(),
            toss_winner: toss_winner.into(),
            toss_decision: TossDecision::Field,
        }
    }

    #[test]
    fn toss_decision_parse_is_case_insensitive() {
        assert_eq!(TossDecision::parse("Bat").unwrap(), TossDecision::Bat);
        assert_eq!(TossDecision::parse(" FIELD ").unwrap(), TossDecision::Field);
        assert_eq!(
            TossDecision::parse("bowl"),
            Err(ModelError::InvalidTossDecision("bowl".into()))
        );
    }

    #[test]
    fn batting_side_probability_follows_winner() {
        let base = BasePrediction {
            winner: "DC".into(),
            confidence: 70.0,
        };
        assert_relative_eq!(base.team1_probability("SRH"), 30.0);
        assert_relative_eq!(base.batting_side_probability("SRH", "SRH"), 30.0);
        assert_relative_eq!(base.batting_side_probability("SRH", "DC"), 70.0);
    }

    #[test]
    fn even_model_is_a_coin_flip() {
        let model = EvenModel::new();
        let p = model.predict(&ctx("DC")).unwrap();
        assert_eq!(p.winner, "SRH");
        assert_relative_eq!(p.confidence, 50.0);
        assert_eq!(model.par_score("SRH", "Eden Gardens").unwrap(), None);
    }

    #[test]
    fn even_model_rejects_stray_toss_winner() {
        let model = EvenModel::new();
        assert_eq!(
            model.predict(&ctx("CSK")),
            Err(ModelError::InvalidTossWinner("CSK".into()))
        );
    }
}
