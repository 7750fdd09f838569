//! Exact maximum rule by exhaustive enumeration.

use super::types::{RuleKind, SelectionResult};
use crate::instance::{Budget, Instance};
use crate::satisfaction::{aggregate_score, Satisfaction};

/// Finds the feasible budget with the maximum aggregate score.
///
/// Subsets are enumerated by increasing size and, within a size, in
/// lexicographic order of item positions. Subsets over the cap are skipped
/// without scoring. The incumbent is replaced only on a strictly greater
/// score, so among optimal budgets the first one enumerated wins: the
/// smallest, then the lexicographically earliest by item order.
///
/// # Complexity
///
/// O(2^n · m) for n items and m voters. This is a reference implementation
/// for small instances (a few dozen items at most); use
/// [`SelectionConfig::exact_item_limit`](super::SelectionConfig::exact_item_limit)
/// to guard calls on real-world inputs.
pub struct ExactRule;

impl ExactRule {
    /// Runs the exact rule.
    pub fn run<S: Satisfaction + ?Sized>(instance: &Instance, metric: &S) -> SelectionResult {
        let n = instance.item_count();
        let cap = instance.cap();

        let mut best = Budget::empty(n);
        let mut best_score = aggregate_score(instance, &best, metric);
        let mut evaluations = 1usize;
        let mut discarded = 0usize;

        // Costs are non-negative, so once the k cheapest items overflow the
        // cap every subset of size >= k does too.
        let max_size = max_feasible_size(instance);

        let mut scratch = Budget::empty(n);
        let mut combo: Vec<usize> = Vec::with_capacity(n);

        for k in 1..=max_size {
            combo.clear();
            combo.extend(0..k);

            loop {
                let cost: f64 = combo.iter().map(|&i| instance.cost(i)).sum();
                if cost > cap {
                    discarded += 1;
                } else {
                    scratch.clear();
                    for &i in &combo {
                        scratch.insert(i);
                    }
                    let score = aggregate_score(instance, &scratch, metric);
                    evaluations += 1;
                    if score > best_score {
                        best_score = score;
                        best.clone_from(&scratch);
                    }
                }

                if !next_combination(&mut combo, n) {
                    break;
                }
            }
        }

        tracing::debug!(
            rule = RuleKind::Exact.name(),
            metric = metric.name(),
            items = n,
            selected = best.len(),
            score = best_score,
            evaluations,
            discarded,
            "rule finished"
        );

        SelectionResult {
            rule: RuleKind::Exact,
            metric: metric.name().to_string(),
            budget: best,
            score: best_score,
            evaluations,
            rounds: max_size + 1,
            discarded,
        }
    }
}

/// Largest subset size that could possibly fit under the cap.
fn max_feasible_size(instance: &Instance) -> usize {
    let cap = instance.cap();
    // Slack keeps float summation order from cutting off a feasible size;
    // every subset below the cut-off is still checked exactly.
    let limit = cap + cap.abs() * 1e-9 + 1e-9;

    let mut costs: Vec<f64> = instance.items().iter().map(|it| it.cost).collect();
    costs.sort_by(f64::total_cmp);

    let mut running = 0.0;
    let mut size = 0;
    for c in costs {
        running += c;
        if running > limit {
            break;
        }
        size += 1;
    }
    size
}

/// Advances `combo` to the next k-combination of `0..n` in lexicographic
/// order. Returns `false` after the last one.
fn next_combination(combo: &mut [usize], n: usize) -> bool {
    let k = combo.len();
    let Some(i) = (0..k).rev().find(|&i| combo[i] < n - k + i) else {
        return false;
    };
    combo[i] += 1;
    for j in i + 1..k {
        combo[j] = combo[j - 1] + 1;
    }
    true
}
