//! Cricket overs notation.
//!
//! Scorecards write `12.3` for twelve overs and three balls, which is 12.5
//! overs in decimal. The estimator works in decimal overs, so requests that
//! use scorecard notation go through [`cricket_to_decimal`] first.

use thiserror::Error;

pub const BALLS_PER_OVER: u32 = 6;

#[derive(Debug, Error, PartialEq)]
pub enum OversError {
    #[error("overs must be a non-negative number, got {0}")]
    Negative(f64),
    #[error("invalid overs {overs}: an over has only {max} balls, got {balls}")]
    TooManyBalls { overs: f64, balls: u32, max: u32 },
}

/// Split scorecard overs into `(completed overs, balls into the current over)`.
pub fn split_overs(overs: f64) -> Result<(u32, u32), OversError> {
    if overs.is_nan() || overs < 0.0 {
        return Err(OversError::Negative(overs));
    }
    let whole = overs.trunc();
    let balls = ((overs - whole) * 10.0).round() as u32;
    if balls >= BALLS_PER_OVER {
        return Err(OversError::TooManyBalls {
            overs,
            balls,
            max: BALLS_PER_OVER - 1,
        });
    }
    Ok((whole as u32, balls))
}

/// `12.3` → `12.5`.
pub fn cricket_to_decimal(overs: f64) -> Result<f64, OversError> {
    let (whole, balls) = split_overs(overs)?;
    Ok(whole as f64 + balls as f64 / BALLS_PER_OVER as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn whole_overs_are_unchanged() {
        assert_relative_eq!(cricket_to_decimal(12.0).unwrap(), 12.0);
        assert_relative_eq!(cricket_to_decimal(0.0).unwrap(), 0.0);
    }

    #[test]
    fn partial_overs_convert_to_sixths() {
        assert_relative_eq!(cricket_to_decimal(12.3).unwrap(), 12.5, epsilon = 1e-12);
        assert_relative_eq!(cricket_to_decimal(0.1).unwrap(), 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(cricket_to_decimal(19.5).unwrap(), 19.0 + 5.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn split_counts_balls_into_the_over() {
        assert_eq!(split_overs(16.4).unwrap(), (16, 4));
        assert_eq!(split_overs(20.0).unwrap(), (20, 0));
    }

    #[test]
    fn rejects_seventh_ball() {
        assert!(matches!(
            cricket_to_decimal(12.6),
            Err(OversError::TooManyBalls { balls: 6, .. })
        ));
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert_eq!(cricket_to_decimal(-1.0), Err(OversError::Negative(-1.0)));
        assert!(cricket_to_decimal(f64::NAN).is_err());
    }
}
