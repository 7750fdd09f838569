//! Metrics for comparing budgets.

use crate::error::{Error, Result};
use crate::instance::{Budget, Instance};
use crate::satisfaction::{Satisfaction, SatisfactionMetric};

/// Sum of the costs of the budget's items. Zero for an empty budget.
pub fn total_cost(instance: &Instance, budget: &Budget) -> f64 {
    budget.indices().map(|i| instance.cost(i)).sum()
}

/// Fraction of voters none of whose approved items is funded.
///
/// # Errors
/// [`Error::NoVoters`] if the instance has no voters.
pub fn anger_ratio(instance: &Instance, budget: &Budget) -> Result<f64> {
    let voters = instance.voters();
    if voters.is_empty() {
        return Err(Error::NoVoters);
    }
    let angry = voters
        .iter()
        .filter(|v| SatisfactionMetric::Binary.score(budget, v, instance) == 0.0)
        .count();
    Ok(angry as f64 / voters.len() as f64)
}

/// Mean cost of the budget's items.
///
/// # Errors
/// [`Error::EmptyBudget`] if the budget selects nothing.
pub fn average_cost(instance: &Instance, budget: &Budget) -> Result<f64> {
    if budget.is_empty() {
        return Err(Error::EmptyBudget);
    }
    Ok(total_cost(instance, budget) / budget.len() as f64)
}

/// The evaluation metrics of one budget.
///
/// Anger ratio and average cost keep their own results, so an empty budget
/// still reports its anger ratio.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Total cost of the budget.
    pub total_cost: f64,

    /// Fraction of voters with nothing funded.
    pub anger_ratio: Result<f64>,

    /// Mean cost of the funded items.
    pub average_cost: Result<f64>,
}

impl Evaluation {
    /// Computes every metric for `budget`.
    pub fn of(instance: &Instance, budget: &Budget) -> Self {
        Self {
            total_cost: total_cost(instance, budget),
            anger_ratio: anger_ratio(instance, budget),
            average_cost: average_cost(instance, budget),
        }
    }
}
