//! Conversions between the display rating scale and the internal Glicko-2
//! scale
//!
//! Glicko-2 runs its math on a rescaled coordinate system (rating ~0,
//! deviation ~1-2). The display scale (rating ~1500, deviation ~350) is the
//! public contract; both transforms are fixed affine maps.

/// Conversion factor between the display scale and the Glicko-2 scale
pub const GLICKO2_SCALE: f64 = 173.7178;

/// Display-scale rating that maps to 0 on the internal scale
pub const DISPLAY_OFFSET: f64 = 1500.0;

/// Standard initial rating on the display scale
pub const INITIAL_RATING: f64 = 1500.0;

/// Standard initial rating deviation on the display scale
pub const INITIAL_DEVIATION: f64 = 350.0;

/// Standard initial volatility
pub const INITIAL_VOLATILITY: f64 = 0.06;

/// Convert a display-scale rating to the internal scale
pub fn internal_rating(display: f64) -> f64 {
    (display - DISPLAY_OFFSET) / GLICKO2_SCALE
}

/// Convert an internal-scale rating to the display scale
pub fn display_rating(internal: f64) -> f64 {
    GLICKO2_SCALE * internal + DISPLAY_OFFSET
}

/// Convert a display-scale deviation to the internal scale
pub fn internal_deviation(display: f64) -> f64 {
    display / GLICKO2_SCALE
}

/// Convert an internal-scale deviation to the display scale
pub fn display_deviation(internal: f64) -> f64 {
    GLICKO2_SCALE * internal
}
