//! Satisfaction metrics.
//!
//! A metric maps a candidate budget and a single voter to a non-negative
//! score. The selection rules take the metric as a strategy parameter and
//! maximize its sum over all voters (the aggregate score).
//!
//! - [`SatisfactionMetric::Numeric`]: approved items funded
//! - [`SatisfactionMetric::Cost`]: cost of approved items funded
//! - [`SatisfactionMetric::Binary`]: whether any approved item is funded
//!
//! Custom metrics implement [`Satisfaction`].

mod metrics;
mod types;

pub use metrics::SatisfactionMetric;
pub use types::{aggregate_score, Satisfaction};
