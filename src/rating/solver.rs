//! Volatility solver
//!
//! Re-estimates a player's volatility from the period's variance and delta by
//! root-finding on the Glicko-2 volatility function with the Illinois variant
//! of regula falsi. Both the bracket-widening loop and the root-finding loop
//! carry a hard iteration cap; exceeding it surfaces a convergence error
//! instead of looping forever.

use crate::config::Glicko2Config;
use crate::error::{RatingError, Result};
use tracing::debug;

/// Solve for the new volatility given the previous volatility, the player's
/// deviation, and the period's variance and delta (all internal scale).
pub(crate) fn solve_volatility(
    volatility: f64,
    deviation: f64,
    variance: f64,
    delta: f64,
    config: &Glicko2Config,
) -> Result<f64> {
    if !variance.is_finite() || !delta.is_finite() {
        return Err(RatingError::ConvergenceFailed {
            reason: format!(
                "non-finite solver input (variance {variance}, delta {delta})"
            ),
        }
        .into());
    }

    let tau = config.tau;
    let phi_sq = deviation * deviation;
    let delta_sq = delta * delta;
    let ln_sigma_sq = (volatility * volatility).ln();

    let f = |x: f64| {
        let ex = x.exp();
        ex * (delta_sq - phi_sq - variance - ex) / (2.0 * (phi_sq + variance + ex).powi(2))
            - (x - ln_sigma_sq) / (tau * tau)
    };

    // Initial bracket: f changes sign between A and B
    let mut x_a = ln_sigma_sq;
    let mut x_b = if delta_sq > phi_sq + variance {
        (delta_sq - phi_sq - variance).ln()
    } else {
        let mut k = 1.0;
        while f(ln_sigma_sq - k * tau) < 0.0 {
            k += 1.0;
            if k as u32 > config.max_solver_iterations {
                return Err(RatingError::ConvergenceFailed {
                    reason: format!(
                        "bracket widening exceeded {} steps",
                        config.max_solver_iterations
                    ),
                }
                .into());
            }
        }
        ln_sigma_sq - k * tau
    };

    let mut f_a = f(x_a);
    let mut f_b = f(x_b);
    let mut iterations = 0u32;

    while (x_b - x_a).abs() > config.epsilon {
        if iterations >= config.max_solver_iterations {
            return Err(RatingError::ConvergenceFailed {
                reason: format!(
                    "regula falsi exceeded {} iterations (interval width {})",
                    config.max_solver_iterations,
                    (x_b - x_a).abs()
                ),
            }
            .into());
        }

        let x_c = x_a + (x_a - x_b) * f_a / (f_b - f_a);
        let f_c = f(x_c);
        if f_c * f_b < 0.0 {
            x_a = x_b;
            f_a = f_b;
        } else {
            // Illinois modification: halve the retained endpoint's value so
            // the secant cannot stall against it
            f_a /= 2.0;
        }
        x_b = x_c;
        f_b = f_c;
        iterations += 1;
    }

    debug!(iterations, "volatility solver converged");
    Ok((x_a / 2.0).exp())
}
