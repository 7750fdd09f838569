//! Property tests over small random instances.
//!
//! Most properties use integer costs so exact score comparisons are stable;
//! feasibility is also checked on fractional costs and caps.

use proptest::prelude::*;
use u_budgeting::evaluation::{anger_ratio, average_cost, total_cost, Evaluation};
use u_budgeting::instance::{Ballot, Budget, Instance, InstanceBuilder, Item};
use u_budgeting::rules::{ExactRule, RuleKind, SelectionConfig};
use u_budgeting::satisfaction::{aggregate_score, Satisfaction, SatisfactionMetric};
use u_budgeting::Error;

fn build(costs: Vec<u32>, approvals: Vec<Vec<bool>>, cap: u32) -> Instance {
    build_f64(
        costs.into_iter().map(f64::from).collect(),
        approvals,
        f64::from(cap),
    )
}

fn build_f64(costs: Vec<f64>, approvals: Vec<Vec<bool>>, cap: f64) -> Instance {
    let mut builder = InstanceBuilder::new(cap);
    for (i, cost) in costs.iter().enumerate() {
        builder.add_item(Item::new(format!("p{i}"), *cost));
    }
    for (v, row) in approvals.iter().enumerate() {
        let ids: Vec<String> = row
            .iter()
            .enumerate()
            .filter(|(_, &approved)| approved)
            .map(|(i, _)| format!("p{i}"))
            .collect();
        builder.add_ballot(Ballot::new(format!("v{v}"), ids));
    }
    builder.build().unwrap()
}

fn arb_instance() -> impl Strategy<Value = Instance> {
    (0usize..=7, 0usize..=6)
        .prop_flat_map(|(n, m)| {
            (
                prop::collection::vec(1u32..=30, n),
                prop::collection::vec(prop::collection::vec(any::<bool>(), n), m),
                0u32..=120,
            )
        })
        .prop_map(|(costs, approvals, cap)| build(costs, approvals, cap))
}

fn arb_fractional_instance() -> impl Strategy<Value = Instance> {
    (0usize..=7, 0usize..=6)
        .prop_flat_map(|(n, m)| {
            (
                prop::collection::vec(0.01f64..30.0, n),
                prop::collection::vec(prop::collection::vec(any::<bool>(), n), m),
                0.0f64..120.0,
            )
        })
        .prop_map(|(costs, approvals, cap)| build_f64(costs, approvals, cap))
}

/// Costs that are tenths, where summation order routinely moves the last bit.
fn arb_tenths_instance() -> impl Strategy<Value = Instance> {
    (1usize..=7, 1usize..=4)
        .prop_flat_map(|(n, m)| {
            (
                prop::collection::vec(1u32..=10, n),
                prop::collection::vec(prop::collection::vec(any::<bool>(), n), m),
                prop::collection::vec(1u32..=10, 0..=n),
            )
        })
        .prop_map(|(costs, approvals, cap_terms)| {
            let costs: Vec<f64> = costs.into_iter().map(|c| f64::from(c) / 10.0).collect();
            // The cap is a sum of item-sized terms in reverse order.
            let cap = cap_terms.iter().rev().map(|&c| f64::from(c) / 10.0).sum();
            build_f64(costs, approvals, cap)
        })
}

fn arb_metric() -> impl Strategy<Value = SatisfactionMetric> {
    prop_oneof![
        Just(SatisfactionMetric::Numeric),
        Just(SatisfactionMetric::Cost),
        Just(SatisfactionMetric::Binary),
    ]
}

/// Every subset as (size, ascending positions, budget).
fn all_subsets(instance: &Instance) -> Vec<(Vec<usize>, Budget)> {
    let n = instance.item_count();
    (0u32..1 << n)
        .map(|mask| {
            let members: Vec<usize> = (0..n).filter(|&i| mask & (1 << i) != 0).collect();
            let budget = Budget::from_indices(n, members.iter().copied());
            (members, budget)
        })
        .collect()
}

/// Size first, then lexicographic by position.
fn enumerated_before(a: &[usize], b: &[usize]) -> bool {
    (a.len(), a) <= (b.len(), b)
}

proptest! {
    #[test]
    fn every_rule_stays_within_cap(instance in arb_instance(), metric in arb_metric()) {
        let config = SelectionConfig::default();
        for rule in RuleKind::ALL {
            let result = rule.run(&instance, &metric, &config).unwrap();
            prop_assert!(total_cost(&instance, &result.budget) <= instance.cap());
        }
    }

    #[test]
    fn every_rule_stays_within_fractional_cap(
        instance in arb_fractional_instance(),
        metric in arb_metric(),
    ) {
        let config = SelectionConfig::default();
        for rule in RuleKind::ALL {
            let result = rule.run(&instance, &metric, &config).unwrap();
            prop_assert!(total_cost(&instance, &result.budget) <= instance.cap());
        }
    }

    #[test]
    fn every_rule_stays_within_tenths_cap(
        instance in arb_tenths_instance(),
        metric in arb_metric(),
    ) {
        let config = SelectionConfig::default();
        for rule in RuleKind::ALL {
            let result = rule.run(&instance, &metric, &config).unwrap();
            prop_assert!(total_cost(&instance, &result.budget) <= instance.cap());
        }
    }

    #[test]
    fn exact_is_optimal_and_earliest(instance in arb_instance(), metric in arb_metric()) {
        let result = ExactRule::run(&instance, &metric);
        let chosen: Vec<usize> = result.budget.indices().collect();

        for (members, subset) in all_subsets(&instance) {
            if total_cost(&instance, &subset) > instance.cap() {
                continue;
            }
            let score = aggregate_score(&instance, &subset, &metric);
            prop_assert!(result.score >= score);
            if result.score == score {
                prop_assert!(enumerated_before(&chosen, &members));
            }
        }
    }

    #[test]
    fn greedy_rules_never_beat_exact(instance in arb_instance(), metric in arb_metric()) {
        let config = SelectionConfig::default();
        let exact = RuleKind::Exact.run(&instance, &metric, &config).unwrap();
        let greedy = RuleKind::Greedy.run(&instance, &metric, &config).unwrap();
        let prop = RuleKind::ProportionalGreedy.run(&instance, &metric, &config).unwrap();
        prop_assert!(greedy.score <= exact.score);
        prop_assert!(prop.score <= exact.score);
    }

    #[test]
    fn satisfaction_is_non_negative(instance in arb_instance(), metric in arb_metric()) {
        for (_, subset) in all_subsets(&instance) {
            for voter in instance.voters() {
                prop_assert!(metric.score(&subset, voter, &instance) >= 0.0);
            }
        }
    }

    #[test]
    fn anger_ratio_in_unit_interval(instance in arb_instance(), metric in arb_metric()) {
        let result = ExactRule::run(&instance, &metric);
        match anger_ratio(&instance, &result.budget) {
            Ok(ratio) => prop_assert!((0.0..=1.0).contains(&ratio)),
            Err(err) => {
                prop_assert_eq!(err, Error::NoVoters);
                prop_assert_eq!(instance.voter_count(), 0);
            }
        }
    }

    #[test]
    fn average_cost_identity(instance in arb_instance(), metric in arb_metric()) {
        let config = SelectionConfig::default();
        for rule in RuleKind::ALL {
            let budget = rule.run(&instance, &metric, &config).unwrap().budget;
            match average_cost(&instance, &budget) {
                Ok(avg) => prop_assert_eq!(avg, total_cost(&instance, &budget) / budget.len() as f64),
                Err(err) => {
                    prop_assert_eq!(err, Error::EmptyBudget);
                    prop_assert!(budget.is_empty());
                }
            }
        }
    }

    #[test]
    fn evaluation_is_idempotent(instance in arb_instance(), metric in arb_metric()) {
        let budget = RuleKind::Greedy
            .run(&instance, &metric, &SelectionConfig::default())
            .unwrap()
            .budget;
        prop_assert_eq!(Evaluation::of(&instance, &budget), Evaluation::of(&instance, &budget));
    }

    #[test]
    fn zero_cap_funds_nothing(
        costs in prop::collection::vec(1u32..=30, 1..=6),
        voters in 1usize..=5,
        metric in arb_metric(),
    ) {
        // Every voter approves every item.
        let n = costs.len();
        let instance = build(costs, vec![vec![true; n]; voters], 0);
        let config = SelectionConfig::default();
        for rule in RuleKind::ALL {
            let budget = rule.run(&instance, &metric, &config).unwrap().budget;
            prop_assert!(budget.is_empty());
            prop_assert_eq!(anger_ratio(&instance, &budget), Ok(1.0));
        }
    }
}
