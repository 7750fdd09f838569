//! Rule identifiers and the result every rule returns.

use crate::instance::{Budget, Instance};

/// The available selection rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleKind {
    /// Exhaustive search for the maximum aggregate score. Exponential.
    Exact,

    /// Repeatedly adds the item giving the highest aggregate score.
    Greedy,

    /// Repeatedly adds the item with the highest marginal score per unit cost.
    ProportionalGreedy,
}

impl RuleKind {
    /// Every rule, in the order comparisons report them.
    pub const ALL: [RuleKind; 3] = [
        RuleKind::Greedy,
        RuleKind::ProportionalGreedy,
        RuleKind::Exact,
    ];

    /// Returns the name of this rule.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Exact => "exact",
            RuleKind::Greedy => "greedy",
            RuleKind::ProportionalGreedy => "proportional-greedy",
        }
    }
}

/// Result of running a selection rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionResult {
    /// The rule that produced the budget.
    pub rule: RuleKind,

    /// Name of the satisfaction metric that was optimized.
    pub metric: String,

    /// The selected items. Total cost never exceeds the cap.
    pub budget: Budget,

    /// Aggregate score of `budget` under `metric`.
    pub score: f64,

    /// Number of budgets whose aggregate score was computed.
    pub evaluations: usize,

    /// Number of items committed (greedy rules) or subset sizes
    /// enumerated (exact rule).
    pub rounds: usize,

    /// Number of subsets rejected for exceeding the cap (exact rule only).
    pub discarded: usize,
}

impl SelectionResult {
    /// Selected item ids in item order.
    pub fn ids<'a>(&'a self, instance: &'a Instance) -> Vec<&'a str> {
        self.budget.ids(instance).collect()
    }
}
