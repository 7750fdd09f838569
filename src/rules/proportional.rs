//! Greedy rule on marginal score per unit cost.

use super::types::{RuleKind, SelectionResult};
use crate::error::{Error, Result};
use crate::evaluation::total_cost;
use crate::instance::{Budget, Instance};
use crate::satisfaction::{aggregate_score, Satisfaction};

/// Grows a budget one item at a time, always adding the item with the
/// highest marginal aggregate score per unit cost:
///
/// ```text
/// (score(current ∪ {item}) - score(current)) / cost(item)
/// ```
///
/// Scanning, eligibility and tie-breaking match [`GreedyRule`](super::GreedyRule):
/// the last item in item order wins a tie.
///
/// # Errors
///
/// Returns [`Error::ZeroCostItem`] when the scan reaches an eligible item
/// of cost zero, whose ratio is undefined. With a zero cap no item is
/// scanned and the empty budget is returned.
pub struct ProportionalGreedyRule;

impl ProportionalGreedyRule {
    /// Runs the proportional greedy rule.
    pub fn run<S: Satisfaction + ?Sized>(
        instance: &Instance,
        metric: &S,
    ) -> Result<SelectionResult> {
        let cap = instance.cap();
        let mut current = Budget::empty_for(instance);
        let mut cur_cost = 0.0;
        let mut cur_score = aggregate_score(instance, &current, metric);
        let mut evaluations = 1usize;
        let mut rounds = 0usize;

        while cur_cost < cap {
            let mut best_item = None;
            let mut best_score = 0.0;
            let mut best_ratio = 0.0;

            for i in 0..instance.item_count() {
                if current.contains(i) {
                    continue;
                }
                current.insert(i);
                if total_cost(instance, &current) > cap {
                    current.remove(i);
                    continue;
                }
                let cost = instance.cost(i);
                if cost == 0.0 {
                    return Err(Error::ZeroCostItem {
                        item: instance.item_id(i).to_string(),
                    });
                }

                let score = aggregate_score(instance, &current, metric);
                current.remove(i);
                evaluations += 1;

                let ratio = (score - cur_score) / cost;
                if ratio >= best_ratio {
                    best_score = score;
                    best_ratio = ratio;
                    best_item = Some(i);
                }
            }

            let Some(item) = best_item else {
                break;
            };
            current.insert(item);
            cur_cost = total_cost(instance, &current);
            cur_score = best_score;
            rounds += 1;

            tracing::trace!(
                rule = RuleKind::ProportionalGreedy.name(),
                item = instance.item_id(item),
                ratio = best_ratio,
                score = cur_score,
                cost = cur_cost,
                "item committed"
            );
        }

        tracing::debug!(
            rule = RuleKind::ProportionalGreedy.name(),
            metric = metric.name(),
            selected = current.len(),
            score = cur_score,
            cost = cur_cost,
            evaluations,
            "rule finished"
        );

        Ok(SelectionResult {
            rule: RuleKind::ProportionalGreedy,
            metric: metric.name().to_string(),
            budget: current,
            score: cur_score,
            evaluations,
            rounds,
            discarded: 0,
        })
    }
}
