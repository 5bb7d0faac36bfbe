//! Human-readable context returned next to a live estimate: a projected
//! total, the factors driving the prediction, and a coarse confidence band.

use serde::Serialize;

use super::win_probability::MatchState;

/// Death-overs scoring boost applied when fewer than five overs remain.
const DEATH_OVERS_ACCELERATION: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    /// Band for a confidence percentage.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 80.0 {
            ConfidenceBand::High
        } else if confidence > 60.0 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// Projected first-innings total, or the winning score in a chase.
    pub projected_score: Option<u32>,
    pub key_factors: Vec<&'static str>,
    pub confidence_band: ConfidenceBand,
}

pub fn insights(state: &MatchState, confidence: f64) -> Insights {
    Insights {
        projected_score: projected_score(state),
        key_factors: key_factors(state),
        confidence_band: ConfidenceBand::from_confidence(confidence),
    }
}

/// Projected total for the batting side.
///
/// First innings: the current rate carried over the remaining overs, scaled
/// by wickets in hand and clamped to what the format plausibly produces.
/// Second innings: the score that wins the match.
pub fn projected_score(state: &MatchState) -> Option<u32> {
    match state.innings {
        1 => {
            let overs_left = state.total_overs - state.current_overs;
            let wicket_factor = state.wickets_left() / 10.0;
            let acceleration = if overs_left < 5.0 {
                DEATH_OVERS_ACCELERATION
            } else {
                1.0
            };
            let projected = (state.current_score
                + state.current_run_rate() * overs_left * wicket_factor * acceleration)
                .trunc();
            let (lo, hi) = format_bounds(state.total_overs);
            Some(projected.clamp(lo, hi) as u32)
        }
        2 => Some((state.target_score + 1.0).max(0.0) as u32),
        _ => None,
    }
}

/// Plausible first-innings totals for a format.
fn format_bounds(total_overs: f64) -> (f64, f64) {
    if total_overs == 20.0 {
        (120.0, 240.0)
    } else if total_overs == 50.0 {
        (200.0, 400.0)
    } else {
        (100.0, (total_overs * 12.0).trunc().max(100.0))
    }
}

pub fn key_factors(state: &MatchState) -> Vec<&'static str> {
    let current_rr = state.current_run_rate();
    // Only a live chase has a required rate.
    let required_rr = if state.innings == 2 && state.balls_left() > 0.0 {
        state.required_run_rate()
    } else {
        0.0
    };

    let mut factors = Vec::new();
    if state.wickets_left() <= 3.0 {
        factors.push("Few wickets remaining");
    }
    if required_rr > 12.0 {
        factors.push("High required run rate");
    }
    if current_rr > 8.0 {
        factors.push("Strong batting performance");
    }
    if required_rr > 0.0 && current_rr > required_rr {
        factors.push("Ahead of required run rate");
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(innings: i64, score: f64, wickets: f64, overs: f64, target: f64) -> MatchState {
        MatchState {
            innings,
            current_score: score,
            current_wickets: wickets,
            current_overs: overs,
            target_score: target,
            total_overs: 20.0,
            batting_team: "RR".into(),
            team1: "RR".into(),
            team2: "KKR".into(),
        }
    }

    #[test]
    fn confidence_bands() {
        assert_eq!(ConfidenceBand::from_confidence(85.0), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_confidence(80.0), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_confidence(61.0), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_confidence(60.0), ConfidenceBand::Low);
    }

    #[test]
    fn projects_first_innings_at_current_rate() {
        // 85/2 after 10: 85 + 8.5 * 10 * 0.8 = 153
        let s = state(1, 85.0, 2.0, 10.0, 0.0);
        assert_eq!(projected_score(&s), Some(153));
    }

    #[test]
    fn projection_accelerates_at_the_death() {
        // 150/3 after 16: 150 + 9.375 * 4 * 0.7 * 1.15 = 180.1875
        let s = state(1, 150.0, 3.0, 16.0, 0.0);
        assert_eq!(projected_score(&s), Some(180));
    }

    #[test]
    fn projection_is_clamped_to_format() {
        let slow = state(1, 20.0, 6.0, 8.0, 0.0);
        assert_eq!(projected_score(&slow), Some(120));
        let fast = state(1, 150.0, 0.0, 8.0, 0.0);
        assert_eq!(projected_score(&fast), Some(240));

        let mut odi = state(1, 50.0, 5.0, 20.0, 0.0);
        odi.total_overs = 50.0;
        assert_eq!(projected_score(&odi), Some(200));
    }

    #[test]
    fn chase_projects_winning_score() {
        let s = state(2, 60.0, 1.0, 6.0, 171.0);
        assert_eq!(projected_score(&s), Some(172));
        let bad = state(5, 60.0, 1.0, 6.0, 171.0);
        assert_eq!(projected_score(&bad), None);
    }

    #[test]
    fn chase_key_factors() {
        // 105/8 after 16 chasing 174: rr 6.56, rrr 17.5
        let s = state(2, 105.0, 8.0, 16.0, 174.0);
        assert_eq!(
            key_factors(&s),
            vec!["Few wickets remaining", "High required run rate"]
        );

        // 110/3 after 12 chasing 139: rr 9.17, rrr 3.75
        let s = state(2, 110.0, 3.0, 12.0, 139.0);
        assert_eq!(
            key_factors(&s),
            vec!["Strong batting performance", "Ahead of required run rate"]
        );
    }

    #[test]
    fn first_innings_has_no_required_rate_factors() {
        let s = state(1, 30.0, 0.0, 5.0, 0.0);
        assert!(key_factors(&s).is_empty());
    }
}
