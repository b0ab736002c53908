//! Match evaluation
//!
//! Two coordinates count as the same place when both axes agree after
//! rounding to 4 decimal places (~11 m of latitude at the equator). This
//! fixed-precision equality is a deliberate stand-in for a geodesic
//! distance threshold; changing it changes which inputs match.

use crate::constants::matching::PRECISION_DECIMALS;
use crate::error::{Error, Result};
use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Outcome of comparing a resolved location against the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    #[serde(rename = "MATCH")]
    Match,
    #[serde(rename = "NOT_MATCH")]
    NoMatch,
}

impl std::fmt::Display for MatchVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "MATCH"),
            Self::NoMatch => write!(f, "NOT MATCH"),
        }
    }
}

/// Round a value to the match precision
fn round_to_precision(value: f64) -> f64 {
    let factor = 10f64.powi(PRECISION_DECIMALS as i32);
    (value * factor).round() / factor
}

/// Compare two coordinates for rounded equality on both axes
///
/// Assumes both inputs are valid; use `evaluate` at the request boundary.
pub fn is_match(a: Coordinate, b: Coordinate) -> bool {
    round_to_precision(a.lat) == round_to_precision(b.lat)
        && round_to_precision(a.lng) == round_to_precision(b.lng)
}

/// Evaluate a match verdict with defensive input validation
///
/// Non-finite or out-of-range coordinates indicate malformed upstream
/// data that slipped past the resolver and fail with a comparison error.
pub fn evaluate(a: Coordinate, b: Coordinate) -> Result<MatchVerdict> {
    a.validate()
        .map_err(|e| Error::Comparison(e.to_string()))?;
    b.validate()
        .map_err(|e| Error::Comparison(e.to_string()))?;

    if is_match(a, b) {
        Ok(MatchVerdict::Match)
    } else {
        Ok(MatchVerdict::NoMatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const REFERENCE: Coordinate = Coordinate {
        lat: 12.9145732,
        lng: 77.6385797,
    };

    #[test]
    fn test_round_to_precision() {
        assert_relative_eq!(round_to_precision(12.91457321), 12.9146);
        assert_relative_eq!(round_to_precision(-77.63858), -77.6386);
        assert_relative_eq!(round_to_precision(0.0), 0.0);
    }

    #[test]
    fn test_reflexivity() {
        assert!(is_match(REFERENCE, REFERENCE));
    }

    #[test]
    fn test_symmetry() {
        let other = Coordinate::new(12.91461, 77.63858);
        assert_eq!(is_match(REFERENCE, other), is_match(other, REFERENCE));

        let far = Coordinate::new(13.0, 80.0);
        assert_eq!(is_match(REFERENCE, far), is_match(far, REFERENCE));
    }

    #[test]
    fn test_rounding_boundary() {
        // Both round to 12.9146 at 4 decimals; rounding, not truncation
        let a = Coordinate::new(12.91457321, 77.6385797);
        let b = Coordinate::new(12.91457324, 77.6385797);
        assert!(is_match(a, b));
    }

    #[test]
    fn test_truncation_would_differ() {
        // 12.91455001 rounds up to 12.9146; truncation would give 12.9145
        let rounds_up = Coordinate::new(12.91455001, 77.6385797);
        let target = Coordinate::new(12.9146, 77.6385797);
        assert!(is_match(rounds_up, target));
    }

    #[test]
    fn test_identical_reference_matches() {
        let searched = Coordinate::new(12.9145732, 77.6385797);
        assert_eq!(evaluate(searched, REFERENCE).unwrap(), MatchVerdict::Match);
    }

    #[test]
    fn test_distant_coordinate_does_not_match() {
        let searched = Coordinate::new(13.0, 80.0);
        assert_eq!(evaluate(searched, REFERENCE).unwrap(), MatchVerdict::NoMatch);
    }

    #[test]
    fn test_one_axis_agreement_is_not_a_match() {
        let same_lat = Coordinate::new(12.9145732, 80.0);
        assert_eq!(evaluate(same_lat, REFERENCE).unwrap(), MatchVerdict::NoMatch);
    }

    #[test]
    fn test_evaluate_rejects_non_finite() {
        let bad = Coordinate::new(f64::NAN, 77.6385797);
        assert!(matches!(
            evaluate(bad, REFERENCE),
            Err(Error::Comparison(_))
        ));

        let inf = Coordinate::new(12.9, f64::INFINITY);
        assert!(matches!(
            evaluate(REFERENCE, inf),
            Err(Error::Comparison(_))
        ));
    }

    #[test]
    fn test_evaluate_rejects_out_of_range() {
        let bad = Coordinate::new(91.0, 0.0);
        assert!(matches!(
            evaluate(bad, REFERENCE),
            Err(Error::Comparison(_))
        ));
    }

    #[test]
    fn test_verdict_serialization() {
        assert_eq!(
            serde_json::to_string(&MatchVerdict::Match).unwrap(),
            "\"MATCH\""
        );
        assert_eq!(
            serde_json::to_string(&MatchVerdict::NoMatch).unwrap(),
            "\"NOT_MATCH\""
        );
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(MatchVerdict::Match.to_string(), "MATCH");
        assert_eq!(MatchVerdict::NoMatch.to_string(), "NOT MATCH");
    }
}
