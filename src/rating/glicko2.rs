//! Glicko-2 rating calculator
//!
//! Applies the full per-player update for one rating period: variance and
//! delta estimation, volatility re-estimation, and the new deviation and
//! rating, with optional fractional blending for team and multi-match
//! scenarios.

use crate::config::Glicko2Config;
use crate::error::{RatingError, Result};
use crate::rating::{estimators, solver};
use crate::types::{Match, Player, RosterEntry};
use std::f64::consts::PI;
use tracing::warn;

/// Glicko-2 rating calculator
///
/// Owns a validated configuration and applies rating updates in place. The
/// calculator never mutates opponent snapshots; callers freeze all snapshots
/// for a rating period before applying any update from it.
#[derive(Debug, Clone)]
pub struct Glicko2Calculator {
    config: Glicko2Config,
}

impl Default for Glicko2Calculator {
    fn default() -> Self {
        Self {
            config: Glicko2Config::default(),
        }
    }
}

impl Glicko2Calculator {
    /// Create a calculator from a validated configuration
    pub fn new(config: Glicko2Config) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &Glicko2Config {
        &self.config
    }

    /// Create a player with this calculator's configured initial values
    pub fn initial_player(&self) -> Player {
        Player::with_rating(
            self.config.initial_rating,
            self.config.initial_deviation,
            self.config.initial_volatility,
        )
    }

    /// Update one player in place from a rating period of matches
    ///
    /// `factor` blends the update linearly between the old state (0.0) and
    /// the full Glicko-2 update (1.0); fractional values distribute credit
    /// across simultaneous contests.
    pub fn update_rating(
        &self,
        player: &mut Player,
        matches: &[Match<'_>],
        factor: f64,
    ) -> Result<()> {
        self.validate_update(player, matches, factor)?;

        let old = *player;

        // Step 3: estimated variance from the period's outcomes
        let variance = estimators::estimate_variance(old.rating, matches);

        // Steps 4 and 5: estimated improvement, then the new volatility
        let delta = estimators::estimate_delta(old.rating, matches, variance);
        let new_volatility =
            solver::solve_volatility(old.volatility, old.deviation, variance, delta, &self.config)?;

        // Step 6: pre-rating-period deviation
        let phi_star = (old.deviation * old.deviation + new_volatility * new_volatility).sqrt();

        // Step 7: new deviation and rating, evaluated against the original
        // rating and the frozen opponent snapshots
        let new_deviation = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / variance).sqrt();
        let new_rating =
            new_deviation * new_deviation * estimators::performance_sum(old.rating, matches);

        player.volatility = old.volatility + factor * (new_volatility - old.volatility);
        player.deviation = old.deviation + factor * (new_deviation - old.deviation);
        player.rating = old.rating + factor * (new_rating - old.rating);

        Ok(())
    }

    /// Translate two aggregate strengths into a pairwise score in [0, 1]
    ///
    /// Compresses the linear proportion `a / (a + b)` into an S-curve; equal
    /// strengths yield 0.5. Used to turn an N-way contest into the pairwise
    /// results the updater consumes. Strengths must be non-negative and not
    /// both zero.
    pub fn adjust_score(&self, strength_a: f64, strength_b: f64) -> f64 {
        let proportion = strength_a / (strength_a + strength_b);
        ((proportion - 0.5) * PI).sin() / 2.0 + 0.5
    }

    /// Update a roster of players, splitting each player's update evenly
    /// across the matches of their period
    ///
    /// Each entry with N matches receives the full update N times at
    /// `factor = 1/N`, approximating an even split of credit across
    /// simultaneous team contests.
    pub fn update_team_ratings(&self, roster: &mut [RosterEntry<'_>]) -> Result<()> {
        for entry in roster.iter_mut() {
            if entry.matches.is_empty() {
                return Err(RatingError::EmptyRatingPeriod {
                    reason: "roster entry has no matches".to_string(),
                }
                .into());
            }

            let factor = 1.0 / entry.matches.len() as f64;
            for _ in 0..entry.matches.len() {
                self.update_rating(entry.player, entry.matches, factor)?;
            }
        }

        Ok(())
    }

    fn validate_update(
        &self,
        player: &Player,
        matches: &[Match<'_>],
        factor: f64,
    ) -> Result<()> {
        if matches.is_empty() {
            return Err(RatingError::EmptyRatingPeriod {
                reason: "update requires at least one match".to_string(),
            }
            .into());
        }

        if !(player.deviation > 0.0) || !player.deviation.is_finite() {
            return Err(RatingError::InvalidRating {
                reason: format!("deviation must be positive, got {}", player.deviation()),
            }
            .into());
        }

        if !(player.volatility > 0.0) || !player.volatility.is_finite() {
            return Err(RatingError::InvalidRating {
                reason: format!("volatility must be positive, got {}", player.volatility),
            }
            .into());
        }

        if !player.rating.is_finite() {
            return Err(RatingError::InvalidRating {
                reason: "rating must be finite".to_string(),
            }
            .into());
        }

        if !factor.is_finite() {
            return Err(RatingError::InvalidRating {
                reason: format!("blend factor must be finite, got {factor}"),
            }
            .into());
        }

        for m in matches {
            if !m.score.is_finite() {
                return Err(RatingError::InvalidRating {
                    reason: format!("match score must be finite, got {}", m.score),
                }
                .into());
            }
            if !(0.0..=1.0).contains(&m.score) {
                warn!(score = m.score, "match score outside [0, 1]");
            }
            if !(m.opponent.deviation > 0.0) {
                return Err(RatingError::InvalidRating {
                    reason: format!(
                        "opponent deviation must be positive, got {}",
                        m.opponent.deviation()
                    ),
                }
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RatingSnapshot;

    fn calculator() -> Glicko2Calculator {
        Glicko2Calculator::default()
    }

    #[test]
    fn test_new_validates_config() {
        let mut config = Glicko2Config::default();
        config.tau = 5.0;
        assert!(Glicko2Calculator::new(config).is_err());
        assert!(Glicko2Calculator::new(Glicko2Config::conservative()).is_ok());
    }

    #[test]
    fn test_initial_player_uses_config() {
        let config = Glicko2Config {
            initial_rating: 1200.0,
            initial_deviation: 250.0,
            initial_volatility: 0.05,
            ..Glicko2Config::default()
        };
        let calc = Glicko2Calculator::new(config).unwrap();
        let player = calc.initial_player();
        assert!((player.rating() - 1200.0).abs() < 1e-9);
        assert!((player.deviation() - 250.0).abs() < 1e-9);
        assert!((player.volatility() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_draw_against_equal_opponent() {
        let calc = calculator();
        let mut player = Player::new();
        let opponent = Player::new().snapshot();
        let matches = [Match::new(&opponent, 0.5)];

        calc.update_rating(&mut player, &matches, 1.0).unwrap();

        // Rating stays put, uncertainty shrinks
        assert!((player.rating() - 1500.0).abs() < 1e-6);
        assert!(player.deviation() < 350.0);
    }

    #[test]
    fn test_upset_win_moves_rating_more() {
        let calc = calculator();

        let mut underdog = Player::new();
        let strong = RatingSnapshot::new(1900.0, 100.0);
        calc.update_rating(&mut underdog, &[Match::new(&strong, 1.0)], 1.0)
            .unwrap();

        let mut favorite = Player::new();
        let weak = RatingSnapshot::new(1100.0, 100.0);
        calc.update_rating(&mut favorite, &[Match::new(&weak, 1.0)], 1.0)
            .unwrap();

        assert!(underdog.rating() > favorite.rating());
    }

    #[test]
    fn test_factor_zero_is_noop() {
        let calc = calculator();
        let mut player = Player::with_rating(1600.0, 120.0, 0.06);
        let before = player;
        let opponent = RatingSnapshot::new(1500.0, 200.0);

        calc.update_rating(&mut player, &[Match::new(&opponent, 1.0)], 0.0)
            .unwrap();

        assert_eq!(player, before);
    }

    #[test]
    fn test_factor_one_equals_unscaled_update() {
        let calc = calculator();
        let opponent = RatingSnapshot::new(1450.0, 80.0);
        let matches = [Match::new(&opponent, 0.0)];

        let mut full = Player::new();
        calc.update_rating(&mut full, &matches, 1.0).unwrap();

        // The blend is linear, so the full update must equal the half update
        // extrapolated back out from the starting state
        let mut half = Player::new();
        calc.update_rating(&mut half, &matches, 0.5).unwrap();

        let extrapolated = 1500.0 + (half.rating() - 1500.0) * 2.0;
        assert!((full.rating() - extrapolated).abs() < 1e-9);
        assert!(full.rating() < 1500.0);
    }

    #[test]
    fn test_partial_factor_blends_between_endpoints() {
        let calc = calculator();
        let opponent = RatingSnapshot::new(1400.0, 60.0);
        let matches = [Match::new(&opponent, 1.0)];

        let mut full = Player::new();
        calc.update_rating(&mut full, &matches, 1.0).unwrap();

        let mut half = Player::new();
        calc.update_rating(&mut half, &matches, 0.5).unwrap();

        let expected = 1500.0 + (full.rating() - 1500.0) * 0.5;
        assert!((half.rating() - expected).abs() < 1e-9);
        assert!(half.deviation() > full.deviation());
        assert!(half.deviation() < 350.0);
    }

    #[test]
    fn test_opponents_never_mutated() {
        let calc = calculator();
        let opponent_player = Player::with_rating(1550.0, 90.0, 0.06);
        let opponent = opponent_player.snapshot();
        let before = opponent;

        let mut player = Player::new();
        calc.update_rating(&mut player, &[Match::new(&opponent, 1.0)], 1.0)
            .unwrap();

        assert_eq!(opponent, before);
    }

    #[test]
    fn test_empty_period_rejected() {
        let calc = calculator();
        let mut player = Player::new();
        let result = calc.update_rating(&mut player, &[], 1.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_player_state_rejected() {
        let calc = calculator();
        let opponent = RatingSnapshot::new(1500.0, 200.0);
        let matches = [Match::new(&opponent, 1.0)];

        let mut bad_deviation = Player::new();
        bad_deviation.set_deviation(0.0);
        assert!(calc.update_rating(&mut bad_deviation, &matches, 1.0).is_err());

        let mut bad_volatility = Player::new();
        bad_volatility.set_volatility(-0.01);
        assert!(calc
            .update_rating(&mut bad_volatility, &matches, 1.0)
            .is_err());
    }

    #[test]
    fn test_non_finite_score_rejected() {
        let calc = calculator();
        let mut player = Player::new();
        let opponent = RatingSnapshot::new(1500.0, 200.0);
        let matches = [Match::new(&opponent, f64::NAN)];
        assert!(calc.update_rating(&mut player, &matches, 1.0).is_err());
    }

    #[test]
    fn test_adjust_score_balanced() {
        let calc = calculator();
        assert!((calc.adjust_score(10.0, 10.0) - 0.5).abs() < 1e-12);
        assert!((calc.adjust_score(1500.0, 1500.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_adjust_score_limits() {
        let calc = calculator();
        assert!(calc.adjust_score(1.0, 1e9) < 1e-6);
        assert!(calc.adjust_score(1e9, 1.0) > 1.0 - 1e-6);

        // Complementary sides of the same contest
        let a = calc.adjust_score(3.0, 1.0);
        let b = calc.adjust_score(1.0, 3.0);
        assert!((a + b - 1.0).abs() < 1e-12);
        assert!(a > 0.5 && b < 0.5);
    }

    #[test]
    fn test_team_update_splits_credit() {
        let calc = calculator();

        let opponents = [
            RatingSnapshot::new(1450.0, 120.0),
            RatingSnapshot::new(1520.0, 90.0),
        ];
        let matches = [Match::new(&opponents[0], 1.0), Match::new(&opponents[1], 1.0)];

        // Manual application: two updates at factor 1/2
        let mut expected = Player::new();
        calc.update_rating(&mut expected, &matches, 0.5).unwrap();
        calc.update_rating(&mut expected, &matches, 0.5).unwrap();

        let mut player = Player::new();
        let mut roster = [RosterEntry::new(&mut player, &matches)];
        calc.update_team_ratings(&mut roster).unwrap();

        assert_eq!(player, expected);
    }

    #[test]
    fn test_team_update_rejects_empty_entry() {
        let calc = calculator();
        let mut player = Player::new();
        let mut roster = [RosterEntry::new(&mut player, &[])];
        assert!(calc.update_team_ratings(&mut roster).is_err());
    }
}
