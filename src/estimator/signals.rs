//! Normalized chase signals blended by the second-innings model.
//!
//! Each signal maps one aspect of the chase onto `[0, 1]`, where 1 favours the
//! batting side. The weights below turn the blend directly into a percentage.

/// Required run rate reported when no balls remain.
pub const UNACHIEVABLE_RUN_RATE: f64 = 100.0;

/// Required run rate treated as "par" by the pressure curve.
const PAR_RUN_RATE: f64 = 8.0;
/// Spread of the pressure curve around par.
const PRESSURE_SCALE: f64 = 2.5;
/// Balls remaining (12 overs) at which time stops being a constraint.
const COMFORTABLE_BALLS: f64 = 72.0;
/// Runs needed at which the runs signal bottoms out.
const DIFFICULT_RUNS: f64 = 120.0;
/// Overs that must be bowled before run-rate momentum is trusted.
const MOMENTUM_MIN_OVERS: f64 = 2.0;

// ── Weights (sum to 100) ─────────────────────────────────────────────────────

pub const WICKET_WEIGHT: f64 = 35.0;
pub const PRESSURE_WEIGHT: f64 = 25.0;
pub const BALLS_WEIGHT: f64 = 15.0;
pub const RUNS_WEIGHT: f64 = 10.0;
pub const MOMENTUM_WEIGHT: f64 = 15.0;

/// Runs per over still required, or [`UNACHIEVABLE_RUN_RATE`] once the
/// innings has no balls left.
pub fn required_run_rate(runs_needed: f64, balls_left: f64) -> f64 {
    if balls_left > 0.0 {
        runs_needed / balls_left * 6.0
    } else {
        UNACHIEVABLE_RUN_RATE
    }
}

/// Runs per over scored so far; zero before the first over is complete.
pub fn current_run_rate(current_score: f64, current_overs: f64) -> f64 {
    if current_overs > 0.0 {
        current_score / current_overs
    } else {
        0.0
    }
}

/// Super-linear decay in remaining wickets: the tail is worth much less than
/// the top order. 10 wickets → 1.0, 5 → 0.354, 2 → 0.089.
pub fn wicket_strength(wickets_left: f64) -> f64 {
    (wickets_left.max(0.0) / 10.0).powf(1.5)
}

/// Logistic pressure on the required rate, centred on par. Tends to 1 below
/// ~3 an over and to 0 above ~15.
pub fn rr_pressure(required_run_rate: f64) -> f64 {
    1.0 / (1.0 + ((required_run_rate - PAR_RUN_RATE) / PRESSURE_SCALE).exp())
}

/// Full credit with 12+ overs to go, linear below that.
pub fn balls_factor(balls_left: f64) -> f64 {
    (balls_left / COMFORTABLE_BALLS).min(1.0)
}

/// 1 with nothing left to score, 0 with 120 or more still needed.
pub fn runs_factor(runs_needed: f64) -> f64 {
    1.0 - (runs_needed / DIFFICULT_RUNS).min(1.0)
}

/// Step function over how far the scoring rate is ahead of the required rate.
///
/// Neutral (0.5) until two overs have been bowled.
pub fn momentum(current_run_rate: f64, required_run_rate: f64, current_overs: f64) -> f64 {
    if current_overs < MOMENTUM_MIN_OVERS {
        return 0.5;
    }
    let rr_diff = current_run_rate - required_run_rate;
    if rr_diff > 4.0 {
        0.9
    } else if rr_diff > 2.0 {
        0.75
    } else if rr_diff > -1.0 {
        0.55
    } else if rr_diff > -3.0 {
        0.35
    } else {
        0.15
    }
}

/// The five signals for one chase snapshot.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ChaseSignals {
    pub wicket_strength: f64,
    pub rr_pressure: f64,
    pub balls_factor: f64,
    pub runs_factor: f64,
    pub momentum: f64,
}

impl ChaseSignals {
    /// Weighted sum of the signals, a percentage in `[0, 100]`.
    pub fn blend(&self) -> f64 {
        WICKET_WEIGHT * self.wicket_strength
            + PRESSURE_WEIGHT * self.rr_pressure
            + BALLS_WEIGHT * self.balls_factor
            + RUNS_WEIGHT * self.runs_factor
            + MOMENTUM_WEIGHT * self.momentum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn weights_sum_to_one_hundred() {
        let total =
            WICKET_WEIGHT + PRESSURE_WEIGHT + BALLS_WEIGHT + RUNS_WEIGHT + MOMENTUM_WEIGHT;
        assert_relative_eq!(total, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn required_rate_uses_sentinel_without_balls() {
        assert_relative_eq!(required_run_rate(30.0, 48.0), 3.75, epsilon = 1e-12);
        assert_relative_eq!(required_run_rate(30.0, 0.0), UNACHIEVABLE_RUN_RATE);
        assert_relative_eq!(required_run_rate(30.0, -6.0), UNACHIEVABLE_RUN_RATE);
    }

    #[test]
    fn current_rate_is_zero_before_first_over() {
        assert_relative_eq!(current_run_rate(12.0, 0.0), 0.0);
        assert_relative_eq!(current_run_rate(110.0, 12.0), 110.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn wicket_strength_reference_points() {
        assert_relative_eq!(wicket_strength(10.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(wicket_strength(5.0), 0.353_553, epsilon = 1e-6);
        assert_relative_eq!(wicket_strength(0.0), 0.0);
    }

    #[test]
    fn rr_pressure_is_half_at_par() {
        assert_relative_eq!(rr_pressure(8.0), 0.5, epsilon = 1e-12);
        assert!(rr_pressure(3.0) > 0.85);
        assert!(rr_pressure(15.0) < 0.06);
    }

    #[test]
    fn balls_and_runs_factors_saturate() {
        assert_relative_eq!(balls_factor(120.0), 1.0);
        assert_relative_eq!(balls_factor(36.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(runs_factor(0.0), 1.0);
        assert_relative_eq!(runs_factor(60.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(runs_factor(200.0), 0.0);
    }

    #[test]
    fn momentum_breakpoints_are_exclusive() {
        // diff exactly on a breakpoint falls into the lower bucket
        assert_relative_eq!(momentum(12.0, 8.0, 5.0), 0.75);
        assert_relative_eq!(momentum(12.1, 8.0, 5.0), 0.9);
        assert_relative_eq!(momentum(10.0, 8.0, 5.0), 0.55);
        assert_relative_eq!(momentum(7.0, 8.0, 5.0), 0.35);
        assert_relative_eq!(momentum(5.0, 8.0, 5.0), 0.15);
        assert_relative_eq!(momentum(1.0, 12.0, 5.0), 0.15);
    }

    #[test]
    fn momentum_is_neutral_in_early_overs() {
        assert_relative_eq!(momentum(20.0, 4.0, 1.9), 0.5);
        assert_relative_eq!(momentum(0.0, 14.0, 0.0), 0.5);
        assert_relative_eq!(momentum(20.0, 4.0, 2.0), 0.9);
    }

    #[test]
    fn blend_of_perfect_signals_is_one_hundred() {
        let s = ChaseSignals {
            wicket_strength: 1.0,
            rr_pressure: 1.0,
            balls_factor: 1.0,
            runs_factor: 1.0,
            momentum: 1.0,
        };
        assert_relative_eq!(s.blend(), 100.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn wicket_strength_never_decreases(a in 0u32..=10, b in 0u32..=10) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(wicket_strength(lo as f64) <= wicket_strength(hi as f64));
        }

        #[test]
        fn rr_pressure_never_increases(a in 0.0f64..40.0, b in 0.0f64..40.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rr_pressure(hi) <= rr_pressure(lo));
        }

        #[test]
        fn signals_stay_in_unit_interval(
            wickets in 0u32..=10,
            rrr in 0.0f64..100.0,
            balls in 1.0f64..300.0,
            runs in 1.0f64..400.0,
        ) {
            for v in [
                wicket_strength(wickets as f64),
                rr_pressure(rrr),
                balls_factor(balls),
                runs_factor(runs),
            ] {
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
