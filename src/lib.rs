//! Feature-preserving downsampling for metric curves
//!
//! Reduces long `(step, value)` series, such as training-loss curves with
//! thousands of points, to a bounded subset of the original observations
//! while keeping peaks, valleys and inflection points.
//!
//! ```no_run
//! use metric_sampler::{Observation, SamplingConfig, SeriesSampler};
//!
//! let series: Vec<Observation> = (0..5000)
//!     .map(|i| Observation::new(i as f64, (i as f64 / 300.0).sin()))
//!     .collect();
//!
//! let sampler = SeriesSampler::new(SamplingConfig::default())?;
//! let reduced = sampler.sample_series(&series);
//! assert_eq!(reduced.sampled_indices[0], 0);
//! # Ok::<(), metric_sampler::SamplerError>(())
//! ```

pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod sampling;
pub mod series;

pub use config::{InflectionThreshold, SamplingConfig, Strategy, Viewport};
pub use error::{Result, SamplerError};
pub use sampling::{
    AppliedStrategy, FeatureSet, MultiSeriesResult, SamplingResult, SeriesMetadata, SeriesSampler,
};
pub use series::{Observation, Series, full_data_for_range, validate_series};
