//! Evaluation metrics for produced budgets.
//!
//! - [`total_cost`]: sum of funded costs
//! - [`anger_ratio`]: fraction of voters with none of their approved items
//!   funded
//! - [`average_cost`]: mean cost of the funded items
//!
//! [`compare`] runs every rule against every built-in metric and evaluates
//! each resulting budget.

mod compare;
mod metrics;

pub use compare::{compare, ComparisonRow};
pub use metrics::{anger_ratio, average_cost, total_cost, Evaluation};
