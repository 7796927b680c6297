//! Sampling constants and default values
//!
//! Centralizes the thresholds and defaults used by the samplers so they
//! are easy to find and tune in one place.

/// Sampling trigger and budget defaults
pub mod sampling {
    /// Series at or below this length are returned unchanged
    pub const DEFAULT_MAX_POINTS: usize = 400;

    /// Desired output length once sampling triggers
    pub const DEFAULT_TARGET_POINTS: usize = 200;

    /// Neighborhood radius for peak/valley detection
    pub const DEFAULT_SMOOTHING_WINDOW: usize = 3;

    /// Smallest budget a sampler can honor (both endpoints)
    pub const MIN_TARGET_POINTS: usize = 2;
}

/// Feature detection constants
pub mod features {
    /// Minimum trend magnitude for an inflection point (absolute units)
    pub const DEFAULT_INFLECTION_EPSILON: f64 = 0.01;

    /// Offset between the samples compared when computing a trend
    pub const TREND_SPAN: usize = 2;
}

/// Level-of-detail budget split
pub mod lod {
    /// Share of the budget spent on the visible window
    pub const VISIBLE_SHARE: f64 = 0.7;
}

/// Configuration file paths
pub mod config {
    /// Configuration file name
    pub const CONFIG_FILE: &str = "metric-sampler.json";
}

/// Default column names for long-format metric tables
pub mod columns {
    pub const RUN: &str = "run_name";
    pub const STEP: &str = "step";
    pub const VALUE: &str = "value";
}
