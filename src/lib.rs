//! Budget-constrained project selection for participatory budgeting.
//!
//! Given items with costs, a budget cap, and voters approving subsets of the
//! items, the selection rules pick a set of items whose total cost stays
//! within the cap while maximizing aggregate voter satisfaction:
//!
//! - **Instance model** ([`instance`]): ordered items, voters, the cap, and
//!   candidate [`Budget`](instance::Budget)s. Includes a loader for the
//!   semicolon-delimited `.pb` format and a seeded instance generator.
//! - **Satisfaction metrics** ([`satisfaction`]): numeric, cost and binary
//!   satisfaction behind one [`Satisfaction`](satisfaction::Satisfaction)
//!   trait.
//! - **Selection rules** ([`rules`]): exact maximum (exponential reference),
//!   greedy, and proportional greedy.
//! - **Evaluation** ([`evaluation`]): total cost, anger ratio, average cost,
//!   and a rule × metric comparison.
//!
//! # Architecture
//!
//! Data flows one way: instance → rule (parameterized by a metric) →
//! evaluation. Every function is pure and deterministic for a fixed item
//! order; the item order decides all ties.

pub mod error;
pub mod evaluation;
pub mod instance;
pub mod rules;
pub mod satisfaction;

pub use error::{Error, Result};
