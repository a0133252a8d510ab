//! Common types used throughout the rating engine

use crate::rating::scale;
use serde::{Deserialize, Serialize};

/// Rating state for one competitor
///
/// Fields are stored on the internal Glicko-2 scale where the update math is
/// numerically well-behaved; all public accessors convert to and from the
/// display scale (rating ~1500, deviation ~350).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) rating: f64,
    pub(crate) deviation: f64,
    pub(crate) volatility: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self::with_rating(
            scale::INITIAL_RATING,
            scale::INITIAL_DEVIATION,
            scale::INITIAL_VOLATILITY,
        )
    }
}

impl Player {
    /// Create a player with the standard initial rating (1500 / 350 / 0.06)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a player from explicit display-scale values
    pub fn with_rating(rating: f64, deviation: f64, volatility: f64) -> Self {
        Self {
            rating: scale::internal_rating(rating),
            deviation: scale::internal_deviation(deviation),
            volatility,
        }
    }

    /// Display-scale rating
    pub fn rating(&self) -> f64 {
        scale::display_rating(self.rating)
    }

    /// Set the rating from a display-scale value
    pub fn set_rating(&mut self, rating: f64) {
        self.rating = scale::internal_rating(rating);
    }

    /// Display-scale rating deviation
    pub fn deviation(&self) -> f64 {
        scale::display_deviation(self.deviation)
    }

    /// Set the rating deviation from a display-scale value
    pub fn set_deviation(&mut self, deviation: f64) {
        self.deviation = scale::internal_deviation(deviation);
    }

    /// Volatility (scale-free)
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn set_volatility(&mut self, volatility: f64) {
        self.volatility = volatility;
    }

    /// Freeze this player's current rating and deviation for use as an
    /// opponent in a rating period.
    ///
    /// Snapshots must be taken before any player in the batch is updated, so
    /// that every update in the period reads the same frozen opponent state.
    pub fn snapshot(&self) -> RatingSnapshot {
        RatingSnapshot {
            rating: self.rating,
            deviation: self.deviation,
        }
    }
}

/// Immutable copy of an opponent's rating and deviation at the start of a
/// rating period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSnapshot {
    pub(crate) rating: f64,
    pub(crate) deviation: f64,
}

impl RatingSnapshot {
    /// Create a snapshot from display-scale values
    pub fn new(rating: f64, deviation: f64) -> Self {
        Self {
            rating: scale::internal_rating(rating),
            deviation: scale::internal_deviation(deviation),
        }
    }

    /// Display-scale rating
    pub fn rating(&self) -> f64 {
        scale::display_rating(self.rating)
    }

    /// Display-scale rating deviation
    pub fn deviation(&self) -> f64 {
        scale::display_deviation(self.deviation)
    }
}

/// One observed outcome against a frozen opponent snapshot
///
/// The score is 1.0 for a win, 0.0 for a loss, 0.5 for a draw; fractional
/// values in [0, 1] carry adjusted scores from multi-sided contests.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub opponent: &'a RatingSnapshot,
    pub score: f64,
}

impl<'a> Match<'a> {
    pub fn new(opponent: &'a RatingSnapshot, score: f64) -> Self {
        Self { opponent, score }
    }
}

/// One player's match set for a rating period, as processed by the team
/// aggregator
#[derive(Debug)]
pub struct RosterEntry<'a> {
    pub player: &'a mut Player,
    pub matches: &'a [Match<'a>],
}

impl<'a> RosterEntry<'a> {
    pub fn new(player: &'a mut Player, matches: &'a [Match<'a>]) -> Self {
        Self { player, matches }
    }
}
