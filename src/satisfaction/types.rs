//! Core trait for satisfaction metrics.

use crate::instance::{Budget, Instance, Voter};

/// Scores how satisfied one voter is with a candidate budget.
///
/// Implementations must be pure and return non-negative scores. All rules
/// sum the score over every voter to obtain the aggregate score they
/// optimize.
///
/// # Examples
///
/// ```ignore
/// // Squared number of approved items funded.
/// struct Squared;
///
/// impl Satisfaction for Squared {
///     fn name(&self) -> &str { "squared" }
///     fn score(&self, budget: &Budget, voter: &Voter, _instance: &Instance) -> f64 {
///         let n = voter.approvals().iter().filter(|&&i| budget.contains(i)).count();
///         (n * n) as f64
///     }
/// }
/// ```
pub trait Satisfaction: Send + Sync {
    /// Returns the name of this metric.
    fn name(&self) -> &str;

    /// Computes the voter's score for `budget`. The instance supplies costs.
    fn score(&self, budget: &Budget, voter: &Voter, instance: &Instance) -> f64;
}

/// Sum of `metric` over every voter of `instance`.
pub fn aggregate_score<S: Satisfaction + ?Sized>(
    instance: &Instance,
    budget: &Budget,
    metric: &S,
) -> f64 {
    instance
        .voters()
        .iter()
        .map(|voter| metric.score(budget, voter, instance))
        .sum()
}
