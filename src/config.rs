//! Rating system configuration

use crate::error::RatingError;
use crate::rating::scale;
use serde::{Deserialize, Serialize};

/// Tuning parameters for the Glicko-2 calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glicko2Config {
    /// Constrains volatility change per rating period. Reasonable choices
    /// are between 0.3 and 1.2; smaller values keep volatility more stable.
    pub tau: f64,
    /// Convergence tolerance for the volatility solver
    pub epsilon: f64,
    /// Initial rating for new players (display scale)
    pub initial_rating: f64,
    /// Initial rating deviation for new players (display scale)
    pub initial_deviation: f64,
    /// Initial volatility for new players
    pub initial_volatility: f64,
    /// Hard cap on solver bracketing and root-finding iterations
    pub max_solver_iterations: u32,
}

impl Default for Glicko2Config {
    fn default() -> Self {
        Self {
            tau: 0.5,
            epsilon: 1e-6,
            initial_rating: scale::INITIAL_RATING,
            initial_deviation: scale::INITIAL_DEVIATION,
            initial_volatility: scale::INITIAL_VOLATILITY,
            max_solver_iterations: 100,
        }
    }
}

impl Glicko2Config {
    /// Create conservative configuration (volatility reacts slowly to upsets)
    pub fn conservative() -> Self {
        Self {
            tau: 0.3,
            ..Self::default()
        }
    }

    /// Create aggressive configuration (volatility reacts quickly to upsets)
    pub fn aggressive() -> Self {
        Self {
            tau: 1.2,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(0.3..=1.2).contains(&self.tau) {
            return Err(RatingError::ConfigurationError {
                message: format!("Tau must be within [0.3, 1.2], got {}", self.tau),
            }
            .into());
        }

        if !(self.epsilon > 0.0) {
            return Err(RatingError::ConfigurationError {
                message: "Epsilon must be positive".to_string(),
            }
            .into());
        }

        if !self.initial_rating.is_finite() {
            return Err(RatingError::ConfigurationError {
                message: "Initial rating must be finite".to_string(),
            }
            .into());
        }

        if !(self.initial_deviation > 0.0) {
            return Err(RatingError::ConfigurationError {
                message: "Initial deviation must be positive".to_string(),
            }
            .into());
        }

        if !(self.initial_volatility > 0.0) {
            return Err(RatingError::ConfigurationError {
                message: "Initial volatility must be positive".to_string(),
            }
            .into());
        }

        if self.max_solver_iterations == 0 {
            return Err(RatingError::ConfigurationError {
                message: "Solver iteration cap must be nonzero".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
