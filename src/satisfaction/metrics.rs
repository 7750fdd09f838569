//! The built-in satisfaction metrics.

use super::types::Satisfaction;
use crate::instance::{Budget, Instance, Voter};

/// Built-in satisfaction metrics.
///
/// # Examples
///
/// ```
/// use u_budgeting::satisfaction::{Satisfaction, SatisfactionMetric};
///
/// assert_eq!(SatisfactionMetric::Cost.name(), "cost");
/// assert_eq!(SatisfactionMetric::ALL.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SatisfactionMetric {
    /// Number of approved items in the budget.
    #[default]
    Numeric,

    /// Total cost of the approved items in the budget.
    Cost,

    /// 1 if at least one approved item is in the budget, else 0.
    Binary,
}

impl SatisfactionMetric {
    /// Every built-in metric.
    pub const ALL: [SatisfactionMetric; 3] = [
        SatisfactionMetric::Numeric,
        SatisfactionMetric::Cost,
        SatisfactionMetric::Binary,
    ];
}

impl Satisfaction for SatisfactionMetric {
    fn name(&self) -> &str {
        match self {
            SatisfactionMetric::Numeric => "numeric",
            SatisfactionMetric::Cost => "cost",
            SatisfactionMetric::Binary => "binary",
        }
    }

    fn score(&self, budget: &Budget, voter: &Voter, instance: &Instance) -> f64 {
        let mut funded = voter
            .approvals()
            .iter()
            .copied()
            .filter(|&i| budget.contains(i));
        match self {
            SatisfactionMetric::Numeric => funded.count() as f64,
            SatisfactionMetric::Cost => funded.map(|i| instance.cost(i)).sum(),
            SatisfactionMetric::Binary => {
                if funded.next().is_some() {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{Ballot, InstanceBuilder, Item};
    use crate::satisfaction::aggregate_score;

    fn instance() -> Instance {
        InstanceBuilder::new(100.0)
            .with_item(Item::new("A", 10.0))
            .with_item(Item::new("B", 15.0))
            .with_item(Item::new("C", 20.0))
            .with_ballot(Ballot::new("v1", ["A", "B"]))
            .with_ballot(Ballot::new("v2", ["C"]))
            .with_ballot(Ballot::new("v3", Vec::<String>::new()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_numeric() {
        let inst = instance();
        let budget = Budget::from_ids(&inst, ["A", "B", "C"]).unwrap();
        let v1 = &inst.voters()[0];
        assert!((SatisfactionMetric::Numeric.score(&budget, v1, &inst) - 2.0).abs() < 1e-10);
        assert!((aggregate_score(&inst, &budget, &SatisfactionMetric::Numeric) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost() {
        let inst = instance();
        let budget = Budget::from_ids(&inst, ["B", "C"]).unwrap();
        let v1 = &inst.voters()[0];
        assert!((SatisfactionMetric::Cost.score(&budget, v1, &inst) - 15.0).abs() < 1e-10);
        assert!((aggregate_score(&inst, &budget, &SatisfactionMetric::Cost) - 35.0).abs() < 1e-10);
    }

    #[test]
    fn test_binary() {
        let inst = instance();
        let budget = Budget::from_ids(&inst, ["A", "B"]).unwrap();
        let scores: Vec<f64> = inst
            .voters()
            .iter()
            .map(|v| SatisfactionMetric::Binary.score(&budget, v, &inst))
            .collect();
        assert_eq!(scores, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_budget_scores_zero() {
        let inst = instance();
        let empty = Budget::empty_for(&inst);
        for metric in SatisfactionMetric::ALL {
            assert_eq!(aggregate_score(&inst, &empty, &metric), 0.0);
        }
    }

    #[test]
    fn test_voter_without_approvals_scores_zero() {
        let inst = instance();
        let all = Budget::from_indices(3, 0..3);
        let v3 = &inst.voters()[2];
        for metric in SatisfactionMetric::ALL {
            assert_eq!(metric.score(&all, v3, &inst), 0.0);
        }
    }
}
