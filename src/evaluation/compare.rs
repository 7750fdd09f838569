//! Every rule against every built-in metric.

use super::metrics::Evaluation;
use crate::error::Result;
use crate::instance::{Budget, Instance};
use crate::rules::{RuleKind, SelectionConfig};
use crate::satisfaction::SatisfactionMetric;

/// One rule × metric combination and how its budget scores.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonRow {
    /// Rule that produced the budget.
    pub rule: RuleKind,

    /// Metric the rule optimized.
    pub metric: SatisfactionMetric,

    /// The selected budget.
    pub budget: Budget,

    /// Aggregate score of `budget` under `metric`.
    pub score: f64,

    /// Evaluation metrics of `budget`.
    pub evaluation: Evaluation,
}

/// Runs every rule in [`RuleKind::ALL`] with every metric in
/// [`SatisfactionMetric::ALL`], rule-major, and evaluates each budget.
///
/// # Errors
/// Propagates the first rule failure, e.g. [`Error::TooManyItems`] when the
/// instance exceeds `config.exact_item_limit`.
///
/// [`Error::TooManyItems`]: crate::Error::TooManyItems
pub fn compare(instance: &Instance, config: &SelectionConfig) -> Result<Vec<ComparisonRow>> {
    let mut rows = Vec::with_capacity(RuleKind::ALL.len() * SatisfactionMetric::ALL.len());
    for rule in RuleKind::ALL {
        for metric in SatisfactionMetric::ALL {
            let result = rule.run(instance, &metric, config)?;
            let evaluation = Evaluation::of(instance, &result.budget);
            rows.push(ComparisonRow {
                rule,
                metric,
                budget: result.budget,
                score: result.score,
                evaluation,
            });
        }
    }
    Ok(rows)
}
