//! Glicko-2 rating system implementation
//!
//! This module provides the rating scale conversions, the pairwise and
//! rating-period estimators, the volatility solver, and the calculator that
//! ties them into the full per-player update.

pub mod estimators;
pub mod glicko2;
pub mod scale;
mod solver;

// Re-export commonly used types
pub use estimators::{expected_score, g};
pub use glicko2::Glicko2Calculator;
