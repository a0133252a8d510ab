//! Glicko Engine - Glicko-2 skill rating calculations
//!
//! This crate computes updated ratings, rating deviations, and volatilities
//! for competitors after a rating period of match outcomes, including
//! fractional-credit updates for team and multi-sided contests.

pub mod config;
pub mod error;
pub mod rating;
pub mod types;

// Re-export commonly used types
pub use config::Glicko2Config;
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use rating::{expected_score, g, Glicko2Calculator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
