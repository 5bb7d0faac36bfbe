//! Team-rating model loaded from a JSON artifact.
//!
//! Each team carries a strength rating on the log-odds scale. The favourite
//! is decided by
//!
//!   P(team1) = sigmoid(r1 − r2 ± toss_bonus ± home_bonus)
//!
//! where the toss term favours the toss winner and the home term favours a
//! side playing at one of its home venues. The same artifact carries par
//! scores per venue for the first-innings score projection.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use super::{BaseModel, BasePrediction, MatchContext, ModelError, ModelMetadata};

#[derive(Debug, Clone, Deserialize)]
pub struct TeamRating {
    pub rating: f64,
    #[serde(default)]
    pub home_venues: Vec<String>,
    /// Runs added to the venue par score when this team bats first.
    #[serde(default)]
    pub batting_bonus: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueInfo {
    pub par_score: f64,
}

/// On-disk layout of a rating artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingArtifact {
    #[serde(default = "default_name")]
    pub name: String,
    pub accuracy: f64,
    pub total_matches: u64,
    #[serde(default)]
    pub toss_bonus: f64,
    #[serde(default)]
    pub home_bonus: f64,
    pub default_par_score: f64,
    pub teams: BTreeMap<String, TeamRating>,
    #[serde(default)]
    pub venues: BTreeMap<String, VenueInfo>,
}

fn default_name() -> String {
    "team-ratings".to_string()
}

pub struct RatingModel {
    artifact: RatingArtifact,
    metadata: ModelMetadata,
}

impl RatingModel {
    /// Load a rating artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading model artifact {}", path.display()))?;
        let model = Self::from_json(&raw)
            .with_context(|| format!("parsing model artifact {}", path.display()))?;
        info!(
            "Loaded model '{}' ({} teams, {} venues, accuracy {:.2}%)",
            model.artifact.name,
            model.metadata.total_teams,
            model.metadata.venues.len(),
            model.metadata.accuracy * 100.0
        );
        Ok(model)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let artifact: RatingArtifact = serde_json::from_str(raw)?;
        if artifact.teams.len() < 2 {
            anyhow::bail!("model artifact must rate at least two teams");
        }
        if !(0.0..=1.0).contains(&artifact.accuracy) {
            anyhow::bail!("model accuracy must be between 0.0 and 1.0");
        }
        Ok(Self::new(artifact))
    }

    pub fn new(artifact: RatingArtifact) -> Self {
        let metadata = ModelMetadata {
            teams: artifact.teams.keys().cloned().collect(),
            venues: artifact.venues.keys().cloned().collect(),
            toss_decisions: vec!["bat".into(), "field".into()],
            accuracy: artifact.accuracy,
            total_matches: artifact.total_matches,
            total_teams: artifact.teams.len(),
        };
        Self { artifact, metadata }
    }

    fn team(&self, field: &'static str, name: &str) -> Result<&TeamRating, ModelError> {
        self.artifact
            .teams
            .get(name)
            .ok_or_else(|| ModelError::UnknownTeam {
                field,
                team: name.to_string(),
            })
    }

    fn home_edge(&self, team: &TeamRating, venue: &str) -> f64 {
        if team.home_venues.iter().any(|v| v == venue) {
            self.artifact.home_bonus
        } else {
            0.0
        }
    }
}

impl BaseModel for RatingModel {
    fn name(&self) -> &str {
        &self.artifact.name
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn has_score_model(&self) -> bool {
        true
    }

    fn predict(&self, ctx: &MatchContext) -> Result<BasePrediction, ModelError> {
        let t1 = self.team("team1", &ctx.team1)?;
        let t2 = self.team("team2", &ctx.team2)?;
        if !self.artifact.venues.contains_key(&ctx.venue) {
            return Err(ModelError::UnknownVenue(ctx.venue.clone()));
        }
        ctx.check_toss_winner()?;

        let toss = if ctx.toss_winner == ctx.team1 {
            self.artifact.toss_bonus
        } else {
            -self.artifact.toss_bonus
        };
        let home = self.home_edge(t1, &ctx.venue) - self.home_edge(t2, &ctx.venue);
        let p1 = sigmoid(t1.rating - t2.rating + toss + home);

        let (winner, p) = if p1 >= 0.5 {
            (ctx.team1.clone(), p1)
        } else {
            (ctx.team2.clone(), 1.0 - p1)
        };
        Ok(BasePrediction {
            winner,
            confidence: p * 100.0,
        })
    }

    fn par_score(&self, team: &str, venue: &str) -> Result<Option<f64>, ModelError> {
        let rating = self.team("team", team)?;
        let par = match self.artifact.venues.get(venue) {
            Some(v) => v.par_score,
            None => {
                warn!(
                    "Venue '{}' not found, using default par score {}",
                    venue, self.artifact.default_par_score
                );
                self.artifact.default_par_score
            }
        };
        Ok(Some(par + rating.batting_bonus))
    }
}

/// Numerically stable logistic function.
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
