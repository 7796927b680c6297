pub mod source;

// Re-export key types for convenience
pub use source::{ColumnMapping, MetricSource};
