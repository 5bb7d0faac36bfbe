//! Live cricket win probability.
//!
//! The first innings leans on a static pre-match probability and only corrects
//! it for wickets lost. The second innings is a chase, and there the target
//! makes the state informative enough to blend five signals (see
//! [`super::signals`]) into a bounded estimate. Decided chases snap to 0/100.
//!
//! All probabilities here are percentages.

use serde::Serialize;
use tracing::{debug, info};

use super::signals::{self, ChaseSignals};

/// Bounds for an undecided chase.
const CHASE_MIN: f64 = 5.0;
const CHASE_MAX: f64 = 95.0;
/// Largest first-innings wicket penalty, reached at ten wickets down.
const MAX_WICKET_PENALTY: f64 = 5.0;
/// First-innings floor for the batting side after the penalty.
const FIRST_INNINGS_FLOOR: f64 = 10.0;

/// Snapshot of a live match, as seen from the side currently batting.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    /// 1 or 2; anything else falls back to an even split.
    pub innings: i64,
    pub current_score: f64,
    pub current_wickets: f64,
    /// Overs completed, in decimal overs.
    pub current_overs: f64,
    /// First-innings total. Only read in the second innings.
    pub target_score: f64,
    pub total_overs: f64,
    pub batting_team: String,
    pub team1: String,
    pub team2: String,
}

impl MatchState {
    pub fn runs_needed(&self) -> f64 {
        self.target_score - self.current_score + 1.0
    }

    pub fn balls_left(&self) -> f64 {
        (self.total_overs - self.current_overs) * 6.0
    }

    pub fn wickets_left(&self) -> f64 {
        10.0 - self.current_wickets
    }

    pub fn required_run_rate(&self) -> f64 {
        signals::required_run_rate(self.runs_needed(), self.balls_left())
    }

    pub fn current_run_rate(&self) -> f64 {
        signals::current_run_rate(self.current_score, self.current_overs)
    }

    fn team1_is_batting(&self) -> bool {
        self.batting_team == self.team1
    }
}

/// Which branch of the chase model produced the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChaseOutcome {
    TargetReached,
    AllOut,
    OversExhausted,
    InProgress {
        required_run_rate: f64,
        current_run_rate: f64,
        signals: ChaseSignals,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum EstimatePhase {
    FirstInnings { base_probability: f64 },
    Chase { outcome: ChaseOutcome },
    InvalidInnings,
}

/// Probability pair attributed to the two teams.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveEstimate {
    pub team1_probability: f64,
    pub team2_probability: f64,
    /// Probability for whichever side is batting.
    pub batting_probability: f64,
    pub predicted_winner: String,
    /// The larger of the two team probabilities.
    pub confidence: f64,
    #[serde(flatten)]
    pub phase: EstimatePhase,
}

/// Estimate the live win probability for both teams.
///
/// `base_batting_probability` is the static model's probability for the
/// batting side; only the first innings reads it.
pub fn estimate_live(state: &MatchState, base_batting_probability: f64) -> LiveEstimate {
    let (batting, phase) = match state.innings {
        1 => (
            first_innings_probability(state, base_batting_probability),
            EstimatePhase::FirstInnings {
                base_probability: base_batting_probability,
            },
        ),
        2 => {
            let (p, outcome) = chase_probability(state);
            (p, EstimatePhase::Chase { outcome })
        }
        other => {
            info!("Invalid innings number {}, falling back to 50/50", other);
            return finish(state, 50.0, 50.0, 50.0, EstimatePhase::InvalidInnings);
        }
    };

    let (team1, team2) = attribute(state, batting);
    finish(state, team1, team2, batting, phase)
}

/// Batting side's probability in the first innings: the static probability
/// minus a linear wicket penalty, floored at 10.
///
/// No penalty is applied before a ball has been bowled.
pub fn first_innings_probability(state: &MatchState, base_batting_probability: f64) -> f64 {
    if state.current_overs > 0.0 {
        let penalty = state.current_wickets / 10.0 * MAX_WICKET_PENALTY;
        (base_batting_probability - penalty).max(FIRST_INNINGS_FLOOR)
    } else {
        base_batting_probability
    }
}

/// Chasing side's probability in the second innings.
pub fn chase_probability(state: &MatchState) -> (f64, ChaseOutcome) {
    let runs_needed = state.runs_needed();
    let balls_left = state.balls_left();
    let wickets_left = state.wickets_left();

    if runs_needed <= 0.0 {
        info!("Target reached by {}", state.batting_team);
        return (100.0, ChaseOutcome::TargetReached);
    }
    if wickets_left <= 0.0 {
        info!("{} all out, {} short", state.batting_team, runs_needed);
        return (0.0, ChaseOutcome::AllOut);
    }
    if balls_left <= 0.0 {
        info!("{} ran out of overs, {} short", state.batting_team, runs_needed);
        return (0.0, ChaseOutcome::OversExhausted);
    }

    let required_rr = state.required_run_rate();
    let current_rr = state.current_run_rate();
    let chase = ChaseSignals {
        wicket_strength: signals::wicket_strength(wickets_left),
        rr_pressure: signals::rr_pressure(required_rr),
        balls_factor: signals::balls_factor(balls_left),
        runs_factor: signals::runs_factor(runs_needed),
        momentum: signals::momentum(current_rr, required_rr, state.current_overs),
    };
    let p = chase.blend().clamp(CHASE_MIN, CHASE_MAX);

    debug!(
        runs_needed,
        balls_left,
        wickets_left,
        required_rr,
        current_rr,
        ?chase,
        probability = p,
        "Chase analysis"
    );

    (
        p,
        ChaseOutcome::InProgress {
            required_run_rate: required_rr,
            current_run_rate: current_rr,
            signals: chase,
        },
    )
}

/// Split the batting side's probability into `(team1, team2)`.
///
/// A batting team matching neither id is attributed to `team2`.
pub fn attribute(state: &MatchState, batting_probability: f64) -> (f64, f64) {
    if state.team1_is_batting() {
        (batting_probability, 100.0 - batting_probability)
    } else {
        (100.0 - batting_probability, batting_probability)
    }
}

fn finish(
    state: &MatchState,
    team1: f64,
    team2: f64,
    batting: f64,
    phase: EstimatePhase,
) -> LiveEstimate {
    let predicted_winner = if team1 > team2 {
        state.team1.clone()
    } else {
        state.team2.clone()
    };
    LiveEstimate {
        team1_probability: team1,
        team2_probability: team2,
        batting_probability: batting,
        predicted_winner,
        confidence: team1.max(team2),
        phase,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
