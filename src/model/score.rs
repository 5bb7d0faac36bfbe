/// Adjust a static first-innings par score for the live situation.
///
/// Mid-innings, the runs still expected on top of the current score are
/// scaled by wickets in hand, and the result never assumes fewer than five
/// runs an over from here. Before the first ball and after the last over the
/// par score is returned unchanged.
pub fn live_adjusted_score(
    par_score: f64,
    current_score: f64,
    current_wickets: f64,
    current_overs: f64,
    total_overs: f64,
) -> i64 {
    let projected = if current_overs > 0.0 && current_overs < total_overs {
        let overs_remaining = total_overs - current_overs;
        let wicket_factor = (10.0 - current_wickets) / 10.0;
        let adjusted = current_score + (par_score - current_score) * wicket_factor;
        let floor = current_score + overs_remaining * 5.0;
        adjusted.max(floor)
    } else {
        par_score
    };
    projected.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_before_first_ball() {
        assert_eq!(live_adjusted_score(171.6, 0.0, 0.0, 0.0, 20.0), 172);
    }

    #[test]
    fn scales_remaining_runs_by_wickets_in_hand() {
        // 100 + (180 - 100) * 0.6 = 148, floor 100 + 8 * 5 = 140
        assert_eq!(live_adjusted_score(180.0, 100.0, 4.0, 12.0, 20.0), 148);
    }

    #[test]
    fn never_below_five_an_over() {
        // 90 + (160 - 90) * 0.2 = 104, floor 90 + 10 * 5 = 140
        assert_eq!(live_adjusted_score(160.0, 90.0, 8.0, 10.0, 20.0), 140);
    }

    #[test]
    fn untouched_after_last_over() {
        assert_eq!(live_adjusted_score(160.0, 190.0, 5.0, 20.0, 20.0), 160);
    }
}
