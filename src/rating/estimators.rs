//! Pairwise and rating-period estimators
//!
//! Pure functions over internal-scale values: the impact attenuation `g`,
//! the expected score `E`, and the per-period aggregates (estimated variance,
//! estimated rating improvement) built on top of them.

use crate::types::Match;
use std::f64::consts::PI;

/// Attenuation factor for an opponent's impact, based on the uncertainty of
/// their rating (internal scale)
///
/// Strictly decreasing for positive deviations, in (0, 1]; a deviation of
/// zero yields exactly 1.
pub fn g(deviation: f64) -> f64 {
    1.0 / (1.0 + 3.0 * deviation.powi(2) / (PI * PI)).sqrt()
}

/// Expected score of `rating` against one opponent (internal scale), in (0, 1)
pub fn expected_score(rating: f64, opponent_rating: f64, opponent_deviation: f64) -> f64 {
    1.0 / (1.0 + (-g(opponent_deviation) * (rating - opponent_rating)).exp())
}

/// Estimated variance of the player's rating from the period's outcomes
///
/// Callers must supply at least one match; an empty period makes the sum zero
/// and the variance undefined.
pub(crate) fn estimate_variance(rating: f64, matches: &[Match<'_>]) -> f64 {
    let mut sum = 0.0;
    for m in matches {
        let e = expected_score(rating, m.opponent.rating, m.opponent.deviation);
        sum += g(m.opponent.deviation).powi(2) * e * (1.0 - e);
    }
    1.0 / sum
}

/// Attenuated score surplus over the period, `Σ g(φ_i)·(s_i - E_i)`
///
/// Shared between the delta estimate and the final rating step.
pub(crate) fn performance_sum(rating: f64, matches: &[Match<'_>]) -> f64 {
    let mut sum = 0.0;
    for m in matches {
        let e = expected_score(rating, m.opponent.rating, m.opponent.deviation);
        sum += g(m.opponent.deviation) * (m.score - e);
    }
    sum
}

/// Estimated rating improvement from the period's outcomes
pub(crate) fn estimate_delta(rating: f64, matches: &[Match<'_>], variance: f64) -> f64 {
    variance * performance_sum(rating, matches)
}
